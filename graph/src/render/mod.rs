pub mod cache;
pub mod cell;
pub mod grid;

pub use cache::{CacheKey, GraphCache};
pub use cell::{box_drawing_chars, render_cells, Cell, CellType, COMMIT_SYMBOL, MERGE_SYMBOL};
pub use grid::{cells_from_pipe_set, render_commit_graph, render_range, render_rows, CommitGraph};
