use std::collections::HashMap;

use crossterm::style::Color;
use graph::{equal_hashes, TextStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BisectStatus {
    None,
    Old,
    New,
    Skipped,
    /// Still a possible culprit
    Candidate,
}

/// State of an in-progress `git bisect`, as far as list colouring cares.
#[derive(Debug, Clone, Default)]
pub struct BisectInfo {
    started: bool,
    statuses: HashMap<String, BisectStatus>,
}

impl BisectInfo {
    pub fn started() -> Self {
        Self {
            started: true,
            statuses: HashMap::new(),
        }
    }

    pub fn mark(&mut self, sha: impl Into<String>, status: BisectStatus) {
        self.statuses.insert(sha.into(), status);
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn status(&self, sha: &str) -> BisectStatus {
        self.statuses
            .iter()
            .find(|(marked, _)| equal_hashes(marked, sha))
            .map_or(BisectStatus::None, |(_, status)| *status)
    }

    /// Sha colour replacing the push status while bisecting.
    pub fn status_style(&self, sha: &str) -> Option<TextStyle> {
        if !self.is_started() {
            return None;
        }
        let color = match self.status(sha) {
            BisectStatus::None => Color::DarkGrey,
            BisectStatus::Old => Color::Green,
            BisectStatus::New => Color::Red,
            BisectStatus::Skipped => Color::Yellow,
            BisectStatus::Candidate => Color::Blue,
        };
        Some(TextStyle::fg(color))
    }
}
