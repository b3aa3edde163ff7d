use serde::Deserialize;

/// Push/merge state of a commit, as reported by the log backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommitStatus {
    #[default]
    None,
    Unpushed,
    Pushed,
    Merged,
    Rebasing,
    Reflog,
}

/// A commit row as supplied by the host application.
///
/// The engine only reads commits; it never fetches or mutates them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Commit {
    /// Commit id (may be compared by prefix only)
    pub sha: String,
    /// Parent ids, mainline parent first
    #[serde(default)]
    pub parents: Vec<String>,
    /// Summary line
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub unix_timestamp: i64,
    #[serde(default)]
    pub status: CommitStatus,
    /// Rebase todo action (`pick`, `drop`, ...), empty outside a rebase
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Free text such as branch refs
    #[serde(default)]
    pub extra_info: String,
}

impl Commit {
    pub fn new(sha: impl Into<String>, parents: &[&str]) -> Self {
        Self {
            sha: sha.into(),
            parents: parents.iter().map(|p| p.to_string()).collect(),
            ..Self::default()
        }
    }

    /// Check if this is a merge commit (multiple parents)
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }

    /// Check if this is a root commit (no parents)
    pub fn is_root(&self) -> bool {
        self.parents.is_empty()
    }

    pub fn first_parent(&self) -> Option<&str> {
        self.parents.first().map(String::as_str)
    }

    pub fn short_sha(&self) -> &str {
        match self.sha.char_indices().nth(8) {
            Some((idx, _)) => &self.sha[..idx],
            None => &self.sha,
        }
    }
}
