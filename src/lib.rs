//! Host side of the commit graph viewer: configuration, history fixtures
//! and logging setup shared by the binaries.

pub mod config;
pub mod history;
pub mod logging;

pub use config::{Config, ConfigError};
pub use history::{load_history, parse_history, History};
pub use logging::{init_logging, LogLevel};
