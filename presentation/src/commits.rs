use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt::Write;
use std::ops::Range;

use chrono::{DateTime, Local};
use graph::{equal_hashes, render_range, Commit, GraphCache, GraphError, TextStyle};
use serde::Deserialize;
use tracing::trace;

use crate::authors::{author_style, long_author, short_author};
use crate::bisect::BisectInfo;
use crate::emoji::emojify;
use crate::theme::Theme;

pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Display columns of one commit, pre-coloured for the terminal.
pub type Row = Vec<String>;

/// How much of each commit the list shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DescriptionMode {
    /// Sha, author initials, graph with branch info and summary
    #[default]
    Compact,
    /// Adds the date, the padded author name, and tags instead of branch info
    Full,
}

impl DescriptionMode {
    pub fn from_full(full_description: bool) -> Self {
        if full_description {
            Self::Full
        } else {
            Self::Compact
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplayOptions {
    pub mode: DescriptionMode,
    pub parse_emoji: bool,
    /// strftime format of the date column
    pub time_format: String,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            mode: DescriptionMode::Compact,
            parse_emoji: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
        }
    }
}

/// Per-call state owned by the host: what is being diffed, what is queued
/// for cherry-picking, and whether a bisect is running.
#[derive(Debug, Clone, Default)]
pub struct RenderContext {
    pub diff_target: Option<String>,
    pub cherry_picked: HashSet<String>,
    pub bisect: BisectInfo,
}

/// Visible slice of the commit list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: usize,
    pub len: usize,
}

impl Window {
    pub fn new(start: usize, len: usize) -> Self {
        Self { start, len }
    }

    pub fn all() -> Self {
        Self::new(0, usize::MAX)
    }

    /// Clamp to a list of `total` rows.
    pub fn range(&self, total: usize) -> Range<usize> {
        let end = self.start.saturating_add(self.len).min(total);
        self.start.min(end)..end
    }
}

/// Renders the commit list: graph from the shared cache, metadata columns
/// from the display options.
#[derive(Debug, Default)]
pub struct CommitListRenderer {
    cache: GraphCache,
    options: DisplayOptions,
    theme: Theme,
}

impl CommitListRenderer {
    pub fn new(options: DisplayOptions) -> Self {
        Self {
            cache: GraphCache::new(),
            options,
            theme: Theme::default(),
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn options(&self) -> &DisplayOptions {
        &self.options
    }

    pub fn cache(&self) -> &GraphCache {
        &self.cache
    }

    /// Rows for the commits inside `window`.
    ///
    /// Lane layout covers the whole list and is reused while the list's head
    /// and length stay the same; only the visible rows are drawn, using the
    /// current selection.
    pub fn render(
        &self,
        commits: &[Commit],
        selected_sha: Option<&str>,
        window: Window,
        ctx: &RenderContext,
    ) -> Result<Vec<Row>, GraphError> {
        let range = window.range(commits.len());
        if range.is_empty() {
            return Ok(Vec::new());
        }

        let pipe_sets = self
            .cache
            .pipe_sets(commits, |commit| author_style(&commit.author));
        let graph_lines = render_range(
            &pipe_sets,
            commits,
            range.clone(),
            selected_sha.unwrap_or(""),
        )?;
        trace!(start = range.start, end = range.end, "composing commit rows");

        Ok(commits[range]
            .iter()
            .zip(graph_lines)
            .map(|(commit, graph_line)| self.display_commit(commit, &graph_line, ctx))
            .collect())
    }

    fn display_commit(&self, commit: &Commit, graph_line: &str, ctx: &RenderContext) -> Row {
        let sha = sha_style(commit, ctx, &self.theme).paint(commit.short_sha());
        match self.options.mode {
            DescriptionMode::Compact => {
                compact_row(commit, sha, graph_line, &self.options, &self.theme)
            }
            DescriptionMode::Full => full_row(commit, sha, graph_line, &self.options, &self.theme),
        }
    }
}

fn compact_row(
    commit: &Commit,
    sha: String,
    graph_line: &str,
    options: &DisplayOptions,
    theme: &Theme,
) -> Row {
    let info = if commit.extra_info.is_empty() {
        String::new()
    } else {
        format!("{} ", theme.extra_info.paint(&commit.extra_info))
    };
    vec![
        sha,
        short_author(&commit.author),
        trailing(commit, graph_line, info, options, theme),
    ]
}

fn full_row(
    commit: &Commit,
    sha: String,
    graph_line: &str,
    options: &DisplayOptions,
    theme: &Theme,
) -> Row {
    let tags = if commit.tags.is_empty() {
        String::new()
    } else {
        format!("{} ", theme.tags.paint(&commit.tags.join(" ")))
    };
    vec![
        sha,
        theme
            .date
            .paint(&format_timestamp(commit.unix_timestamp, &options.time_format)),
        long_author(&commit.author),
        trailing(commit, graph_line, tags, options, theme),
    ]
}

/// `graph + (action | refs) + name`; a rebase action takes the refs' slot.
fn trailing(
    commit: &Commit,
    graph_line: &str,
    refs: String,
    options: &DisplayOptions,
    theme: &Theme,
) -> String {
    let label = if commit.action.is_empty() {
        refs
    } else {
        format!("{} ", theme.action_style(&commit.action).paint(&commit.action))
    };
    let name = if options.parse_emoji {
        emojify(&commit.name)
    } else {
        Cow::Borrowed(commit.name.as_str())
    };
    format!("{}{}{}", graph_line, label, theme.default_text.paint(&name))
}

/// Colour of the sha column.
///
/// Precedence, lowest first: push status (or bisect status while bisecting),
/// cherry-pick selection, diff target.
pub fn sha_style(commit: &Commit, ctx: &RenderContext, theme: &Theme) -> TextStyle {
    let diffed = ctx
        .diff_target
        .as_deref()
        .is_some_and(|target| !target.is_empty() && equal_hashes(target, &commit.sha));
    if diffed {
        return theme.diff_target;
    }
    if ctx
        .cherry_picked
        .iter()
        .any(|picked| equal_hashes(picked, &commit.sha))
    {
        return theme.cherry_picked;
    }
    ctx.bisect
        .status_style(&commit.sha)
        .unwrap_or_else(|| theme.status_style(commit.status))
}

/// Local time of a unix timestamp. Falls back to the default format when
/// `format` is not valid strftime, and to an empty string for timestamps out
/// of range.
pub fn format_timestamp(unix_timestamp: i64, format: &str) -> String {
    let Some(time) = DateTime::from_timestamp(unix_timestamp, 0) else {
        return String::new();
    };
    let time = time.with_timezone(&Local);

    let mut out = String::new();
    if write!(out, "{}", time.format(format)).is_err() {
        out.clear();
        let _ = write!(out, "{}", time.format(DEFAULT_TIME_FORMAT));
    }
    out
}
