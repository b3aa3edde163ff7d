use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};
use graph::Commit;
use serde::Deserialize;
use tracing::debug;

/// A commit list fixture, newest commit first.
///
/// ```toml
/// selected = "b1c2"
///
/// [[commit]]
/// sha = "a1b2"
/// parents = ["b1c2"]
/// name = "fix the thing"
/// author = "Jesse Duffield"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct History {
    #[serde(rename = "commit")]
    pub commits: Vec<Commit>,
    pub selected: Option<String>,
    pub diff_target: Option<String>,
    pub cherry_picked: HashSet<String>,
}

pub fn parse_history(contents: &str) -> Result<History> {
    let history: History = toml::from_str(contents).context("failed to parse history")?;
    for (idx, commit) in history.commits.iter().enumerate() {
        if commit.sha.is_empty() {
            bail!("commit #{idx} has an empty sha");
        }
        if commit.parents.iter().any(String::is_empty) {
            bail!("commit {} lists an empty parent sha", commit.sha);
        }
    }
    debug!(commits = history.commits.len(), "parsed history");
    Ok(history)
}

pub fn load_history(path: &Path) -> Result<History> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    parse_history(&contents).with_context(|| format!("invalid history file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graph::CommitStatus;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const SAMPLE: &str = r#"
selected = "2"
cherry_picked = ["3"]

[[commit]]
sha = "1"
parents = ["2"]
name = "top"
author = "Ada Lovelace"
status = "unpushed"
tags = ["v2"]

[[commit]]
sha = "2"
parents = ["3"]

[[commit]]
sha = "3"
"#;

    #[test]
    fn test_parse_history() {
        let history = parse_history(SAMPLE).unwrap();
        assert_eq!(history.commits.len(), 3);
        assert_eq!(history.selected.as_deref(), Some("2"));
        assert_eq!(history.diff_target, None);
        assert!(history.cherry_picked.contains("3"));

        let top = &history.commits[0];
        assert_eq!(top.parents, vec!["2".to_string()]);
        assert_eq!(top.status, CommitStatus::Unpushed);
        assert_eq!(top.tags, vec!["v2".to_string()]);
        assert!(history.commits[2].is_root());
    }

    #[test]
    fn test_empty_file_is_empty_history() {
        let history = parse_history("").unwrap();
        assert!(history.commits.is_empty());
        assert!(history.selected.is_none());
    }

    #[test]
    fn test_rejects_empty_shas() {
        assert!(parse_history("[[commit]]\nsha = \"\"\n").is_err());
        assert!(parse_history("[[commit]]\nsha = \"a\"\nparents = [\"\"]\n").is_err());
    }

    #[test]
    fn test_load_history_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let history = load_history(file.path()).unwrap();
        assert_eq!(history.commits.len(), 3);

        let err = load_history(Path::new("/nonexistent/history.toml")).unwrap_err();
        assert!(format!("{err:#}").contains("failed to read history file"));
    }
}
