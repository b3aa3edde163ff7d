use thiserror::Error;

/// Invariant violations raised while turning pipe sets into cells.
///
/// Well-formed commit lists never produce these; seeing one means the lane
/// allocator emitted an inconsistent pipe set. Hosts are expected to fall
/// back to a plain commit list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("no pipe identifies the lane of commit {sha}")]
    MissingCommitLane { sha: String },

    #[error("commit {sha} sits on lane {pos} but the row is only {width} lanes wide")]
    LaneOutOfRange { sha: String, pos: usize, width: usize },

    #[error("pipe sets cover {pipe_sets} rows but {commits} commits were supplied")]
    RowCountMismatch { pipe_sets: usize, commits: usize },
}

pub type Result<T> = std::result::Result<T, GraphError>;
