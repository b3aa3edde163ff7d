use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use gitlane::{init_logging, load_history, Config, LogLevel};
use graph::selection_span;
use presentation::{author_style, CommitListRenderer, DescriptionMode, RenderContext, Window};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "gitlane")]
#[command(about = "Render a commit list with its branch graph", long_about = None)]
struct Cli {
    /// TOML file with `[[commit]]` tables, newest first
    history: PathBuf,

    /// Config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Highlight the path through this commit
    #[arg(short, long)]
    selected: Option<String>,

    /// Show the diff-target colour on this commit
    #[arg(long)]
    diff: Option<String>,

    /// First row to show
    #[arg(long, default_value = "0")]
    start: usize,

    /// Number of rows to show (defaults to the configured window)
    #[arg(short = 'n', long)]
    count: Option<usize>,

    /// Show dates, full author names and tags
    #[arg(long)]
    full: bool,

    /// Replace :shortcode: emoji in commit names
    #[arg(long)]
    emoji: bool,

    /// trace, debug, info, warn or error
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load_or_default(cli.config.as_deref()).context("failed to load config")?;
    let level = match cli.log_level.as_deref() {
        Some(level) => {
            LogLevel::parse(level).with_context(|| format!("unknown log level {level:?}"))?
        }
        None => config.log_level()?,
    };
    init_logging(level)?;

    let history = load_history(&cli.history)?;
    let mut options = config.display_options();
    if cli.full {
        options.mode = DescriptionMode::Full;
    }
    options.parse_emoji |= cli.emoji;

    let selected = cli.selected.or(history.selected);
    let ctx = RenderContext {
        diff_target: cli.diff.or(history.diff_target),
        cherry_picked: history.cherry_picked,
        ..RenderContext::default()
    };
    let window = Window::new(cli.start, cli.count.unwrap_or(config.display.window));

    let renderer = CommitListRenderer::new(options);
    let rows = renderer
        .render(&history.commits, selected.as_deref(), window, &ctx)
        .context("failed to render commit graph")?;

    if let Some(sha) = selected.as_deref() {
        let pipe_sets = renderer
            .cache()
            .pipe_sets(&history.commits, |commit| author_style(&commit.author));
        match selection_span(&pipe_sets, sha) {
            Some((first, last)) => info!(sha, first, last, "selected path"),
            None => warn!(sha, "selected commit is not in the history"),
        }
    }

    for row in rows {
        println!("{}", row.join(" "));
    }
    Ok(())
}
