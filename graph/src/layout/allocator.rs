use std::time::Instant;

use smallvec::SmallVec;
use tracing::debug;

use crate::core::{equal_hashes, Commit};
use crate::layout::pipe::{LaneIdx, Pipe, PipeKind, PipeSet, START_SHA};
use crate::style::TextStyle;

/// Growable set of lane indices, one flag per lane.
#[derive(Debug, Default)]
struct LaneMarks(SmallVec<[bool; 16]>);

impl LaneMarks {
    fn contains(&self, lane: LaneIdx) -> bool {
        self.0.get(lane).copied().unwrap_or(false)
    }

    fn insert(&mut self, lane: LaneIdx) {
        if lane >= self.0.len() {
            self.0.resize(lane + 1, false);
        }
        self.0[lane] = true;
    }

    fn first_free(&self) -> LaneIdx {
        self.0.iter().position(|marked| !marked).unwrap_or(self.0.len())
    }
}

/// Per-row bookkeeping of which lanes are spoken for.
#[derive(Debug, Default)]
struct RowLanes {
    /// Lanes some pipe of this row ends on
    taken: LaneMarks,
    /// Lanes some pipe of this row crosses horizontally
    traversed: LaneMarks,
    /// Destinations of incoming pipes that don't end at this commit
    passing: LaneMarks,
}

impl RowLanes {
    fn traverse(&mut self, from: LaneIdx, to: LaneIdx) {
        for lane in from.min(to)..=from.max(to) {
            self.traversed.insert(lane);
        }
        self.taken.insert(to);
    }

    /// Lane for a new merge path: free in this row and not the landing spot of
    /// a pipe that is still on its way somewhere else.
    fn free_for_new_pipe(&self) -> LaneIdx {
        let mut lane = 0;
        while self.taken.contains(lane) || self.passing.contains(lane) {
            lane += 1;
        }
        lane
    }

    /// Leftward drift for a pipe right of the commit: slide through lanes
    /// nobody has claimed, stop at the first claimed one.
    fn drift_towards(&self, from: LaneIdx, pos: LaneIdx) -> LaneIdx {
        let mut lane = from;
        for candidate in (pos + 1..=from).rev() {
            if self.taken.contains(candidate) || self.traversed.contains(candidate) {
                break;
            }
            lane = candidate;
        }
        lane
    }
}

impl Pipe {
    /// The continuation of an incoming pipe in the next row.
    fn carried(&self, to_pos: LaneIdx, kind: PipeKind) -> Pipe {
        Pipe {
            from_pos: self.to_pos,
            to_pos,
            from_sha: self.from_sha.clone(),
            to_sha: self.to_sha.clone(),
            kind,
            style: self.style,
        }
    }
}

/// Pipe feeding the first row of a history.
pub fn start_pipe(first: &Commit) -> Pipe {
    Pipe {
        from_pos: 0,
        to_pos: 0,
        from_sha: START_SHA.to_string(),
        to_sha: first.sha.clone(),
        kind: PipeKind::Starts,
        style: TextStyle::DEFAULT,
    }
}

/// Compute the pipes of `commit`'s row from the previous row's pipes.
pub fn next_pipes<F>(prev_pipes: &[Pipe], commit: &Commit, style_for: F) -> PipeSet
where
    F: Fn(&Commit) -> TextStyle,
{
    let current: SmallVec<[&Pipe; 16]> = prev_pipes
        .iter()
        .filter(|pipe| pipe.kind != PipeKind::Terminates)
        .collect();
    let ends_here = |pipe: &Pipe| equal_hashes(&pipe.to_sha, &commit.sha);

    let mut lanes = RowLanes::default();
    let incoming = current
        .iter()
        .filter(|pipe| ends_here(pipe))
        .map(|pipe| pipe.to_pos)
        .min();

    // a commit nothing points at (filtered log, orphan branch) opens a lane
    // right of everything in flight
    let pos = incoming.unwrap_or_else(|| {
        let pos = current
            .iter()
            .map(|pipe| pipe.to_pos)
            .max()
            .map_or(0, |max| max + 1);
        lanes.taken.insert(pos);
        lanes.traversed.insert(pos);
        pos
    });

    let style = style_for(commit);
    let mut pipes = PipeSet::with_capacity(current.len() + commit.parents.len());
    match commit.first_parent() {
        Some(parent) => pipes.push(Pipe {
            from_pos: pos,
            to_pos: pos,
            from_sha: commit.sha.clone(),
            to_sha: parent.to_string(),
            kind: PipeKind::Starts,
            style,
        }),
        // dead end with nothing arriving: keep a zero-length marker so the
        // row still knows where its commit sits
        None if incoming.is_none() => pipes.push(Pipe {
            from_pos: pos,
            to_pos: pos,
            from_sha: commit.sha.clone(),
            to_sha: commit.sha.clone(),
            kind: PipeKind::Terminates,
            style,
        }),
        None => {}
    }

    for pipe in current.iter().filter(|pipe| !ends_here(pipe)) {
        lanes.passing.insert(pipe.to_pos);
    }

    for pipe in &current {
        if ends_here(pipe) {
            pipes.push(pipe.carried(pos, PipeKind::Terminates));
            lanes.traverse(pipe.to_pos, pos);
        } else if pipe.to_pos < pos {
            let lane = lanes.traversed.first_free();
            pipes.push(pipe.carried(lane, PipeKind::Continues));
            lanes.traverse(pipe.to_pos, lane);
        }
    }

    // merge paths are placed before right-hand pipes drift, so they get first
    // pick of gaps opened by terminations
    for parent in commit.parents.iter().skip(1) {
        let lane = lanes.free_for_new_pipe();
        pipes.push(Pipe {
            from_pos: pos,
            to_pos: lane,
            from_sha: commit.sha.clone(),
            to_sha: parent.clone(),
            kind: PipeKind::Starts,
            style,
        });
        lanes.taken.insert(lane);
    }

    for pipe in current
        .iter()
        .filter(|pipe| !ends_here(pipe) && pipe.to_pos > pos)
    {
        let lane = lanes.drift_towards(pipe.to_pos, pos);
        pipes.push(pipe.carried(lane, PipeKind::Continues));
        lanes.traverse(pipe.to_pos, lane);
    }

    pipes.sort_by(|a, b| a.to_pos.cmp(&b.to_pos).then(a.kind.cmp(&b.kind)));
    pipes
}

/// Run the lane allocator over a whole history, one pipe set per commit.
pub fn build_pipe_sets<F>(commits: &[Commit], style_for: F) -> Vec<PipeSet>
where
    F: Fn(&Commit) -> TextStyle,
{
    let Some(first) = commits.first() else {
        return Vec::new();
    };

    let started = Instant::now();
    let start = [start_pipe(first)];
    let mut pipe_sets: Vec<PipeSet> = Vec::with_capacity(commits.len());
    for commit in commits {
        let prev = pipe_sets.last().map_or(&start[..], |pipes| &pipes[..]);
        let next = next_pipes(prev, commit, &style_for);
        pipe_sets.push(next);
    }

    debug!(
        commits = commits.len(),
        elapsed = ?started.elapsed(),
        "built pipe sets"
    );
    pipe_sets
}

/// First contiguous run of rows carrying a pipe that leaves `sha`.
///
/// Returns the inclusive `(first, last)` row indices, or `None` if the commit
/// is not part of the history or `sha` is empty.
pub fn selection_span(pipe_sets: &[PipeSet], sha: &str) -> Option<(usize, usize)> {
    if sha.is_empty() {
        return None;
    }
    let mut rows = pipe_sets
        .iter()
        .enumerate()
        .skip_while(|(_, pipes)| !crate::layout::contains_commit_sha(pipes, sha))
        .take_while(|(_, pipes)| crate::layout::contains_commit_sha(pipes, sha))
        .map(|(idx, _)| idx);
    let first = rows.next()?;
    let last = rows.last().unwrap_or(first);
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn plain(_: &Commit) -> TextStyle {
        TextStyle::DEFAULT
    }

    fn pipe(from_pos: usize, to_pos: usize, from: &str, to: &str, kind: PipeKind) -> Pipe {
        Pipe {
            from_pos,
            to_pos,
            from_sha: from.to_string(),
            to_sha: to.to_string(),
            kind,
            style: TextStyle::DEFAULT,
        }
    }

    fn history(rows: &[(&str, &[&str])]) -> Vec<Commit> {
        rows.iter().map(|(sha, parents)| Commit::new(*sha, parents)).collect()
    }

    #[test]
    fn test_linear_step() {
        let prev = vec![pipe(0, 0, "a", "b", PipeKind::Starts)];
        let next = next_pipes(&prev, &Commit::new("b", &["c"]), plain);
        assert_eq!(
            next,
            vec![
                pipe(0, 0, "b", "c", PipeKind::Starts),
                pipe(0, 0, "a", "b", PipeKind::Terminates),
            ]
        );
    }

    #[test]
    fn test_branch_commit_lands_on_its_lane() {
        let prev = vec![
            pipe(0, 0, "a", "b", PipeKind::Terminates),
            pipe(0, 0, "b", "c", PipeKind::Starts),
            pipe(0, 1, "b", "d", PipeKind::Starts),
        ];
        let next = next_pipes(&prev, &Commit::new("d", &["e"]), plain);
        assert_eq!(
            next,
            vec![
                pipe(0, 0, "b", "c", PipeKind::Continues),
                pipe(1, 1, "d", "e", PipeKind::Starts),
                pipe(1, 1, "b", "d", PipeKind::Terminates),
            ]
        );
    }

    #[test]
    fn test_merge_fans_out_to_new_lanes() {
        let prev = vec![pipe(0, 0, "a", "m", PipeKind::Starts)];
        let next = next_pipes(&prev, &Commit::new("m", &["p1", "p2", "p3"]), plain);
        assert_eq!(
            next,
            vec![
                pipe(0, 0, "m", "p1", PipeKind::Starts),
                pipe(0, 0, "a", "m", PipeKind::Terminates),
                pipe(0, 1, "m", "p2", PipeKind::Starts),
                pipe(0, 2, "m", "p3", PipeKind::Starts),
            ]
        );
    }

    #[test]
    fn test_orphan_commit_opens_lane_on_the_right() {
        let prev = vec![pipe(0, 0, "a", "b", PipeKind::Starts)];
        let next = next_pipes(&prev, &Commit::new("x", &["y"]), plain);
        assert_eq!(
            next,
            vec![
                pipe(0, 0, "a", "b", PipeKind::Continues),
                pipe(1, 1, "x", "y", PipeKind::Starts),
            ]
        );
    }

    #[test]
    fn test_root_commit_is_a_dead_end() {
        let prev = vec![pipe(0, 0, "a", "b", PipeKind::Starts)];
        let next = next_pipes(&prev, &Commit::new("b", &[]), plain);
        assert_eq!(next, vec![pipe(0, 0, "a", "b", PipeKind::Terminates)]);

        // nothing carries on past the root
        let after = next_pipes(&next, &Commit::new("z", &["y"]), plain);
        assert_eq!(after, vec![pipe(0, 0, "z", "y", PipeKind::Starts)]);
    }

    #[test]
    fn test_orphan_root_keeps_a_lane_marker() {
        let next = next_pipes(&[], &Commit::new("r", &[]), plain);
        assert_eq!(next, vec![pipe(0, 0, "r", "r", PipeKind::Terminates)]);
        assert_eq!(crate::layout::commit_pos(&next), Some(0));
    }

    #[test]
    fn test_prefix_matched_parent() {
        let prev = vec![pipe(0, 0, "a", "bcdef0", PipeKind::Starts)];
        let next = next_pipes(&prev, &Commit::new("bcdef0123456", &["c"]), plain);
        assert_eq!(next[1].kind, PipeKind::Terminates);
        assert_eq!(next.len(), 2);
    }

    #[test]
    fn test_right_pipe_blocked_by_join() {
        // lane 1 is crossed by the join into 3, so the pipe to 5 can't drift
        // past it and stays on lane 2
        let commits = history(&[
            ("1", &["2"]),
            ("2", &["3", "4"]),
            ("4", &["3", "5"]),
            ("3", &["5"]),
        ]);
        let pipe_sets = build_pipe_sets(&commits, plain);
        let row = &pipe_sets[3];
        assert_eq!(
            row,
            &vec![
                pipe(0, 0, "3", "5", PipeKind::Starts),
                pipe(0, 0, "2", "3", PipeKind::Terminates),
                pipe(1, 0, "4", "3", PipeKind::Terminates),
                pipe(2, 2, "4", "5", PipeKind::Continues),
            ]
        );
    }

    #[test]
    fn test_build_pipe_sets_one_per_commit() {
        let commits = history(&[("1", &["2"]), ("2", &["3"]), ("3", &[])]);
        let pipe_sets = build_pipe_sets(&commits, plain);
        assert_eq!(pipe_sets.len(), commits.len());
        assert!(build_pipe_sets(&[], plain).is_empty());
    }

    #[test]
    fn test_style_comes_from_commit() {
        use crossterm::style::Color;
        let commits = history(&[("1", &["2", "3"])]);
        let pipe_sets = build_pipe_sets(&commits, |_| TextStyle::fg(Color::Cyan));
        assert!(pipe_sets[0]
            .iter()
            .filter(|pipe| pipe.kind == PipeKind::Starts)
            .all(|pipe| pipe.style == TextStyle::fg(Color::Cyan)));
    }

    #[test]
    fn test_selection_span() {
        let commits = history(&[
            ("1", &["2"]),
            ("2", &["3", "4"]),
            ("4", &["3"]),
            ("3", &["5"]),
            ("5", &["6"]),
        ]);
        let pipe_sets = build_pipe_sets(&commits, plain);
        // pipes out of 2 run until 3 is reached
        assert_eq!(selection_span(&pipe_sets, "2"), Some((1, 3)));
        assert_eq!(selection_span(&pipe_sets, "5"), Some((4, 4)));
        assert_eq!(selection_span(&pipe_sets, "nope"), None);
        assert_eq!(selection_span(&pipe_sets, ""), None);
    }
}
