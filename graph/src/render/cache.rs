use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::core::Commit;
use crate::layout::{build_pipe_sets, PipeSet};
use crate::style::TextStyle;

/// Identity of a loaded history: the head commit and how many commits follow.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub head_sha: String,
    pub commit_count: usize,
}

impl CacheKey {
    pub fn for_commits(commits: &[Commit]) -> Option<Self> {
        commits.first().map(|head| Self {
            head_sha: head.sha.clone(),
            commit_count: commits.len(),
        })
    }
}

#[derive(Debug)]
struct CacheEntry {
    key: CacheKey,
    pipe_sets: Arc<[PipeSet]>,
}

/// Memoised lane layout of the most recently rendered history.
///
/// Lane allocation doesn't depend on the selection, so moving the cursor
/// reuses the stored pipe sets and only re-renders cells. A different key
/// replaces the entry wholesale.
#[derive(Debug, Default)]
pub struct GraphCache {
    entry: Mutex<Option<CacheEntry>>,
}

impl GraphCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pipe sets for `commits`, computing them on a miss.
    ///
    /// The lock is held from the key check until the result has been read,
    /// so overlapping callers never observe a half-written entry.
    pub fn pipe_sets<F>(&self, commits: &[Commit], style_for: F) -> Arc<[PipeSet]>
    where
        F: Fn(&Commit) -> TextStyle,
    {
        let Some(key) = CacheKey::for_commits(commits) else {
            return Arc::from(Vec::new());
        };

        let mut entry = self.entry.lock();
        if let Some(cached) = entry.as_ref().filter(|cached| cached.key == key) {
            trace!(head = %key.head_sha, count = key.commit_count, "pipe set cache hit");
            return Arc::clone(&cached.pipe_sets);
        }

        debug!(head = %key.head_sha, count = key.commit_count, "pipe set cache miss");
        let pipe_sets: Arc<[PipeSet]> = build_pipe_sets(commits, style_for).into();
        *entry = Some(CacheEntry {
            key,
            pipe_sets: Arc::clone(&pipe_sets),
        });
        pipe_sets
    }

    pub fn is_cached(&self, commits: &[Commit]) -> bool {
        match CacheKey::for_commits(commits) {
            Some(key) => self
                .entry
                .lock()
                .as_ref()
                .is_some_and(|cached| cached.key == key),
            None => false,
        }
    }

    pub fn invalidate(&self) {
        *self.entry.lock() = None;
    }
}
