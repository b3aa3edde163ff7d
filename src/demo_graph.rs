use anyhow::Result;
use gitlane::{init_logging, LogLevel};
use graph::{render_commit_graph, Commit};
use presentation::author_style;

fn history(rows: &[(&str, &[&str])]) -> Vec<Commit> {
    rows.iter()
        .map(|(sha, parents)| Commit {
            author: format!("author {sha}"),
            ..Commit::new(*sha, parents)
        })
        .collect()
}

fn samples() -> Vec<(&'static str, &'static str, Vec<Commit>)> {
    vec![
        (
            "linear",
            "2",
            history(&[("1", &["2"]), ("2", &["3"]), ("3", &["4"]), ("4", &[])]),
        ),
        (
            "merges",
            "2",
            history(&[
                ("1", &["2"]),
                ("2", &["3", "5"]),
                ("3", &["4"]),
                ("4", &["7"]),
                ("5", &["6"]),
                ("6", &["7"]),
                ("7", &["8"]),
                ("8", &[]),
            ]),
        ),
        (
            "lane reuse",
            "B",
            history(&[
                ("A", &["B", "C", "D"]),
                ("B", &["E"]),
                ("C", &["E"]),
                ("D", &["F"]),
                ("E", &["F"]),
                ("F", &[]),
            ]),
        ),
        (
            "disconnected",
            "",
            history(&[("a", &["b"]), ("x", &["y"]), ("b", &[]), ("y", &[])]),
        ),
    ]
}

fn main() -> Result<()> {
    init_logging(LogLevel::Info)?;

    println!("Commit Graph Demo");
    println!("=================\n");

    for (title, selected, commits) in samples() {
        let graph = render_commit_graph(&commits, selected, |commit| author_style(&commit.author))?;

        println!("{title} (selected: {})", if selected.is_empty() { "none" } else { selected });
        for (commit, line) in commits.iter().zip(&graph.lines) {
            println!("  {:<2} {}", commit.sha, line);
        }
        if let Some((first, last)) = graph.selection {
            println!("  highlighted rows {first}..={last}");
        }
        println!();
    }
    Ok(())
}
