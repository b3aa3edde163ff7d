//! Commit list presentation: turns commits and their graph lines into
//! coloured display columns.

pub mod authors;
pub mod bisect;
pub mod commits;
pub mod emoji;
pub mod theme;

pub use authors::{author_style, initials, long_author, short_author};
pub use bisect::{BisectInfo, BisectStatus};
pub use commits::{
    format_timestamp, sha_style, CommitListRenderer, DescriptionMode, DisplayOptions,
    RenderContext, Row, Window, DEFAULT_TIME_FORMAT,
};
pub use emoji::emojify;
pub use theme::Theme;
