use std::ops::Range;

use tracing::{error, trace};

use crate::core::{equal_hashes, Commit};
use crate::error::{GraphError, Result};
use crate::layout::{build_pipe_sets, commit_pos, max_lane, selection_span, Pipe, PipeKind, PipeSet};
use crate::render::cell::{render_cells, Cell, CellType};
use crate::style::{highlight_style, TextStyle};

/// Full-history rendering: pipe sets, glyph lines, and the rows spanned by
/// the selected commit's outgoing pipes.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    pub pipe_sets: Vec<PipeSet>,
    pub lines: Vec<String>,
    pub selection: Option<(usize, usize)>,
}

/// Lay out and render every row of `commits`.
pub fn render_commit_graph<F>(
    commits: &[Commit],
    selected_sha: &str,
    style_for: F,
) -> Result<CommitGraph>
where
    F: Fn(&Commit) -> TextStyle,
{
    let pipe_sets = build_pipe_sets(commits, style_for);
    let lines = render_rows(&pipe_sets, commits, selected_sha)?;
    let selection = selection_span(&pipe_sets, selected_sha);
    Ok(CommitGraph {
        pipe_sets,
        lines,
        selection,
    })
}

/// Render every row. `pipe_sets[i]` belongs to `commits[i]`.
pub fn render_rows(
    pipe_sets: &[PipeSet],
    commits: &[Commit],
    selected_sha: &str,
) -> Result<Vec<String>> {
    render_range(pipe_sets, commits, 0..commits.len(), selected_sha)
}

/// Render the rows in `range` of a full history.
///
/// The commit just above the range still counts as the previous commit of
/// its first row, so scrolling doesn't change how the selection is drawn.
/// The range is clamped to the history.
pub fn render_range(
    pipe_sets: &[PipeSet],
    commits: &[Commit],
    range: Range<usize>,
    selected_sha: &str,
) -> Result<Vec<String>> {
    if pipe_sets.len() != commits.len() {
        return Err(GraphError::RowCountMismatch {
            pipe_sets: pipe_sets.len(),
            commits: commits.len(),
        });
    }

    let end = range.end.min(commits.len());
    let start = range.start.min(end);
    trace!(start, end, "rendering graph rows");
    (start..end)
        .map(|idx| {
            let prev_commit = idx.checked_sub(1).map(|prev| &commits[prev]);
            let cells =
                cells_from_pipe_set(&pipe_sets[idx], &commits[idx], selected_sha, prev_commit)?;
            Ok(render_cells(&cells))
        })
        .collect()
}

struct Grid {
    cells: Vec<Cell>,
}

impl Grid {
    fn draw(&mut self, pipe: &Pipe, style: TextStyle, override_right_style: bool) {
        let (left, right) = (pipe.left(), pipe.right());
        if left != right {
            for cell in &mut self.cells[left + 1..right] {
                cell.set_left(style).set_right(style, override_right_style);
            }
            self.cells[left].set_right(style, override_right_style);
            self.cells[right].set_left(style);
        }

        if matches!(pipe.kind, PipeKind::Starts | PipeKind::Continues) {
            self.cells[pipe.to_pos].set_down(style);
        }
        if matches!(pipe.kind, PipeKind::Terminates | PipeKind::Continues) {
            self.cells[pipe.from_pos].set_up(style);
        }
    }

    fn clear_span(&mut self, pipe: &Pipe) {
        for cell in &mut self.cells[pipe.left()..=pipe.right()] {
            cell.reset();
        }
    }
}

/// Whether the selected commit's path should be highlighted in this row.
///
/// Directly below the selected commit, a plain straight continuation is left
/// alone, otherwise two adjacent commits would both look selected. An empty
/// sha means nothing is selected.
fn highlights_selection(pipes: &[Pipe], selected_sha: &str, prev_commit: Option<&Commit>) -> bool {
    if selected_sha.is_empty() {
        return false;
    }
    match prev_commit {
        Some(prev) if equal_hashes(&prev.sha, selected_sha) => pipes
            .iter()
            .filter(|pipe| equal_hashes(&pipe.from_sha, selected_sha))
            .any(|pipe| !pipe.is_straight_termination()),
        _ => true,
    }
}

/// Turn one row's pipes into cells, drawing the selected commit's pipes on
/// top of everything else.
pub fn cells_from_pipe_set(
    pipes: &[Pipe],
    commit: &Commit,
    selected_sha: &str,
    prev_commit: Option<&Commit>,
) -> Result<Vec<Cell>> {
    let Some(pos) = commit_pos(pipes) else {
        error!(sha = %commit.sha, "pipe set does not locate its commit");
        return Err(GraphError::MissingCommitLane {
            sha: commit.sha.clone(),
        });
    };
    let width = max_lane(pipes).map_or(0, |max| max + 1);
    if pos >= width {
        error!(sha = %commit.sha, pos, width, "commit lane outside of its row");
        return Err(GraphError::LaneOutOfRange {
            sha: commit.sha.clone(),
            pos,
            width,
        });
    }

    let mut grid = Grid {
        cells: vec![Cell::default(); width],
    };

    let highlight = highlights_selection(pipes, selected_sha, prev_commit);
    let (selected, others): (Vec<&Pipe>, Vec<&Pipe>) = pipes
        .iter()
        .partition(|pipe| highlight && equal_hashes(&pipe.from_sha, selected_sha));

    for pipe in others.iter().filter(|pipe| pipe.kind == PipeKind::Starts) {
        grid.draw(pipe, pipe.style, true);
    }
    for pipe in others.iter().filter(|pipe| pipe.kind != PipeKind::Starts) {
        // the commit's own incoming line is hidden behind its node
        if pipe.is_straight_termination() && pipe.to_pos == pos {
            continue;
        }
        grid.draw(pipe, pipe.style, false);
    }

    if !selected.is_empty() {
        let style = highlight_style();
        for pipe in &selected {
            grid.clear_span(pipe);
        }
        for pipe in &selected {
            grid.draw(pipe, style, true);
            if pipe.to_pos == pos {
                grid.cells[pos].set_style(style);
            }
        }
    }

    let cell_type = if commit.is_merge() {
        CellType::Merge
    } else {
        CellType::Commit
    };
    grid.cells[pos].set_type(cell_type);

    Ok(grid.cells)
}
