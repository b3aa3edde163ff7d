use crate::core::equal_hashes;
use crate::style::TextStyle;

/// A lane is an integer-indexed column of the graph
pub type LaneIdx = usize;

/// Sha of the synthetic pipe feeding the first row.
pub const START_SHA: &str = "START";

/// Role of a pipe within its row.
///
/// The declaration order is the tie-break used when sorting a row's pipes
/// and must stay `Starts < Terminates < Continues`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PipeKind {
    /// Leaves the row's commit towards one of its parents
    Starts,
    /// Ends at the row's commit
    Terminates,
    /// Passes through the row on its way to a later commit
    Continues,
}

/// One line segment across a single row transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipe {
    pub from_pos: LaneIdx,
    pub to_pos: LaneIdx,
    pub from_sha: String,
    pub to_sha: String,
    pub kind: PipeKind,
    pub style: TextStyle,
}

/// All pipes active at one commit row, sorted by destination lane.
pub type PipeSet = Vec<Pipe>;

impl Pipe {
    pub fn left(&self) -> LaneIdx {
        self.from_pos.min(self.to_pos)
    }

    pub fn right(&self) -> LaneIdx {
        self.from_pos.max(self.to_pos)
    }

    /// Whether either end of the pipe belongs to `sha`.
    pub fn for_sha(&self, sha: &str) -> bool {
        equal_hashes(&self.from_sha, sha) || equal_hashes(&self.to_sha, sha)
    }

    fn is_straight(&self) -> bool {
        self.from_pos == self.to_pos
    }

    /// Zero-length pipe ending on the commit's own lane.
    pub fn is_straight_termination(&self) -> bool {
        self.kind == PipeKind::Terminates && self.is_straight()
    }
}

/// Whether any pipe in the set originates from `sha`.
pub fn contains_commit_sha(pipes: &[Pipe], sha: &str) -> bool {
    pipes.iter().any(|pipe| equal_hashes(&pipe.from_sha, sha))
}

/// The lane of the row's own commit: where its `Starts` pipes leave from and
/// where its `Terminates` pipes arrive.
pub fn commit_pos(pipes: &[Pipe]) -> Option<LaneIdx> {
    pipes.iter().rev().find_map(|pipe| match pipe.kind {
        PipeKind::Starts => Some(pipe.from_pos),
        PipeKind::Terminates => Some(pipe.to_pos),
        PipeKind::Continues => None,
    })
}

/// Rightmost lane touched by any pipe in the set.
pub fn max_lane(pipes: &[Pipe]) -> Option<LaneIdx> {
    pipes.iter().map(Pipe::right).max()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(from_pos: usize, to_pos: usize, kind: PipeKind) -> Pipe {
        Pipe {
            from_pos,
            to_pos,
            from_sha: "a".to_string(),
            to_sha: "b".to_string(),
            kind,
            style: TextStyle::DEFAULT,
        }
    }

    #[test]
    fn test_left_right() {
        let p = pipe(3, 1, PipeKind::Continues);
        assert_eq!(p.left(), 1);
        assert_eq!(p.right(), 3);
    }

    #[test]
    fn test_kind_order_is_pinned() {
        let mut kinds = vec![PipeKind::Continues, PipeKind::Terminates, PipeKind::Starts];
        kinds.sort();
        assert_eq!(kinds, vec![PipeKind::Starts, PipeKind::Terminates, PipeKind::Continues]);
    }

    #[test]
    fn test_commit_pos_ignores_continuing_pipes() {
        let pipes = vec![
            pipe(0, 0, PipeKind::Continues),
            pipe(2, 1, PipeKind::Terminates),
            pipe(3, 2, PipeKind::Continues),
        ];
        assert_eq!(commit_pos(&pipes), Some(1));
        assert_eq!(commit_pos(&pipes[..1]), None);
        assert_eq!(max_lane(&pipes), Some(3));
    }

    #[test]
    fn test_contains_commit_sha_by_prefix() {
        let pipes = vec![pipe(0, 0, PipeKind::Starts)];
        assert!(contains_commit_sha(&pipes, "a123"));
        assert!(!contains_commit_sha(&pipes, "b"));
        assert!(pipes[0].for_sha("b"));
    }
}
