use crossterm::style::Color;
use graph::TextStyle;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Column width of the author in full-description mode.
pub const LONG_AUTHOR_WIDTH: usize = 17;

const PALETTE: [Color; 12] = [
    Color::DarkCyan,
    Color::DarkGreen,
    Color::DarkYellow,
    Color::DarkMagenta,
    Color::DarkBlue,
    Color::DarkRed,
    Color::Cyan,
    Color::Green,
    Color::Yellow,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

fn stable_color_index(name: &str, modulo: usize) -> usize {
    let mut hash: u64 = 1469598103934665603; // FNV-1a
    for b in name.as_bytes() {
        hash ^= *b as u64;
        hash = hash.wrapping_mul(1099511628211);
    }
    (hash % modulo as u64) as usize
}

/// Colour used for an author everywhere, including their graph lines.
pub fn author_style(name: &str) -> TextStyle {
    TextStyle::fg(PALETTE[stable_color_index(name, PALETTE.len())])
}

/// Two-letter initials: first letters of the first two words, or the first
/// two letters of a single-word name.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (None, _) => String::new(),
        (Some(word), None) => word.graphemes(true).take(2).collect(),
        (Some(first), Some(second)) => first
            .graphemes(true)
            .take(1)
            .chain(second.graphemes(true).take(1))
            .collect(),
    }
}

/// Fit `text` into exactly `width` columns, ending with `…` when cut.
pub fn fit_to_width(text: &str, width: usize) -> String {
    let mut out = String::new();
    let mut used = 0;

    if text.width() > width {
        for grapheme in text.graphemes(true) {
            let grapheme_width = grapheme.width();
            if used + grapheme_width + 1 > width {
                break;
            }
            out.push_str(grapheme);
            used += grapheme_width;
        }
        if width > 0 {
            out.push('…');
            used += 1;
        }
    } else {
        out.push_str(text);
        used = text.width();
    }

    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

pub fn short_author(name: &str) -> String {
    author_style(name).paint(&initials(name))
}

pub fn long_author(name: &str) -> String {
    author_style(name).paint(&fit_to_width(name, LONG_AUTHOR_WIDTH))
}
