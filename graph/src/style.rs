//! Terminal text styles for graph glyphs and list columns.

use crossterm::style::{Attribute, Color, ContentStyle};
use once_cell::sync::Lazy;
use regex::Regex;

/// A foreground colour plus attributes, rendered as ANSI escape sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle(ContentStyle);

impl TextStyle {
    /// No colour and no attributes; renders text unchanged.
    pub const DEFAULT: TextStyle = TextStyle(ContentStyle {
        foreground_color: None,
        background_color: None,
        underline_color: None,
        attributes: crossterm::style::Attributes::none(),
    });

    pub fn fg(color: Color) -> Self {
        Self(ContentStyle {
            foreground_color: Some(color),
            ..ContentStyle::default()
        })
    }

    pub fn with_bg(mut self, color: Color) -> Self {
        self.0.background_color = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.0.attributes.set(Attribute::Bold);
        self
    }

    pub fn foreground(&self) -> Option<Color> {
        self.0.foreground_color
    }

    pub fn is_bold(&self) -> bool {
        self.0.attributes.has(Attribute::Bold)
    }

    /// Wrap `text` in this style's escape sequences.
    pub fn paint(&self, text: &str) -> String {
        if *self == Self::DEFAULT {
            return text.to_string();
        }
        self.0.apply(text).to_string()
    }
}

/// Style of the path through the selected commit.
pub fn highlight_style() -> TextStyle {
    TextStyle::fg(Color::White).bold()
}

static ANSI_ESCAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid ANSI escape regex")
});

/// Strip ANSI escape sequences so rendered output can be compared literally.
pub fn decolorise(text: &str) -> String {
    ANSI_ESCAPE.replace_all(text, "").into_owned()
}
