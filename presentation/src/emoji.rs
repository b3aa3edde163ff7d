use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SHORTCODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":([a-z0-9_+\-]+):").expect("valid shortcode regex"));

/// Replace `:shortcode:` sequences with their emoji. Unknown shortcodes are
/// left as written.
pub fn emojify(text: &str) -> Cow<'_, str> {
    SHORTCODE.replace_all(text, |caps: &Captures| match emojis::get_by_shortcode(&caps[1]) {
        Some(emoji) => emoji.as_str().to_string(),
        None => caps[0].to_string(),
    })
}
