use crossterm::style::Color;
use graph::{CommitStatus, TextStyle};

/// Colours of the commit list that don't depend on the commit's author.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub default_text: TextStyle,
    pub diff_target: TextStyle,
    pub cherry_picked: TextStyle,
    pub date: TextStyle,
    pub tags: TextStyle,
    pub extra_info: TextStyle,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            default_text: TextStyle::DEFAULT,
            diff_target: TextStyle::fg(Color::Magenta),
            cherry_picked: TextStyle::fg(Color::Cyan).with_bg(Color::DarkBlue),
            date: TextStyle::fg(Color::Blue),
            tags: TextStyle::fg(Color::Magenta).bold(),
            extra_info: TextStyle::fg(Color::Magenta).bold(),
        }
    }
}

impl Theme {
    pub fn status_style(&self, status: CommitStatus) -> TextStyle {
        match status {
            CommitStatus::None => self.default_text,
            CommitStatus::Unpushed => TextStyle::fg(Color::Red),
            CommitStatus::Pushed => TextStyle::fg(Color::Yellow),
            CommitStatus::Merged => TextStyle::fg(Color::Green),
            CommitStatus::Rebasing | CommitStatus::Reflog => TextStyle::fg(Color::Blue),
        }
    }

    /// Colour of a rebase todo action label.
    pub fn action_style(&self, action: &str) -> TextStyle {
        match action {
            "pick" => TextStyle::fg(Color::Cyan),
            "drop" => TextStyle::fg(Color::Red),
            "edit" => TextStyle::fg(Color::Green),
            "fixup" => TextStyle::fg(Color::Magenta),
            _ => TextStyle::fg(Color::Yellow),
        }
    }
}
