pub mod core;
pub mod error;
pub mod layout;
pub mod render;
pub mod style;

pub use crate::core::{equal_hashes, Commit, CommitStatus};
pub use crate::error::GraphError;
pub use crate::layout::{
    build_pipe_sets, next_pipes, selection_span, LaneIdx, Pipe, PipeKind, PipeSet,
};
pub use crate::render::{
    cells_from_pipe_set, render_cells, render_commit_graph, render_range, render_rows, Cell,
    CellType, CommitGraph, GraphCache,
};
pub use crate::style::{decolorise, highlight_style, TextStyle};
