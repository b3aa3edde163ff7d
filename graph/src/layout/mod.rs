pub mod allocator;
pub mod pipe;

pub use allocator::{build_pipe_sets, next_pipes, selection_span, start_pipe};
pub use pipe::{
    commit_pos, contains_commit_sha, max_lane, LaneIdx, Pipe, PipeKind, PipeSet, START_SHA,
};
