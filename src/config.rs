use std::path::{Path, PathBuf};

use chrono::format::{Item, StrftimeItems};
use presentation::{DescriptionMode, DisplayOptions, DEFAULT_TIME_FORMAT};
use serde::Deserialize;
use thiserror::Error;

use crate::logging::LogLevel;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid time format {0:?}")]
    InvalidTimeFormat(String),

    #[error("unknown log level {0:?}")]
    InvalidLogLevel(String),
}

/// Viewer configuration, read from a TOML file.
///
/// ```toml
/// [display]
/// full_description = true
/// parse_emoji = true
/// time_format = "%d %b %Y"
/// window = 30
///
/// [log]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplaySection,
    pub log: LogSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DisplaySection {
    pub full_description: bool,
    pub parse_emoji: bool,
    pub time_format: String,
    /// Number of rows rendered at once
    pub window: usize,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            full_description: false,
            parse_emoji: false,
            time_format: DEFAULT_TIME_FORMAT.to_string(),
            window: 50,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LogSection {
    pub level: String,
}

impl Default for LogSection {
    fn default() -> Self {
        Self {
            level: LogLevel::default().as_filter_str().to_string(),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_time_format(&self.display.time_format) {
            return Err(ConfigError::InvalidTimeFormat(self.display.time_format.clone()));
        }
        self.log_level()?;
        Ok(())
    }

    pub fn log_level(&self) -> Result<LogLevel, ConfigError> {
        LogLevel::parse(&self.log.level)
            .ok_or_else(|| ConfigError::InvalidLogLevel(self.log.level.clone()))
    }

    pub fn display_options(&self) -> DisplayOptions {
        DisplayOptions {
            mode: DescriptionMode::from_full(self.display.full_description),
            parse_emoji: self.display.parse_emoji,
            time_format: self.display.time_format.clone(),
        }
    }
}

pub fn is_valid_time_format(format: &str) -> bool {
    !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.display.window, 50);
        assert_eq!(config.log_level().unwrap(), LogLevel::Warn);
        assert_eq!(config.display_options(), DisplayOptions::default());
    }

    #[test]
    fn test_load_partial_file() {
        let file = write_config(
            r#"
[display]
full_description = true
time_format = "%Y"
"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert!(config.display.full_description);
        assert!(!config.display.parse_emoji);
        assert_eq!(config.display.window, 50);
        assert_eq!(config.log, LogSection::default());

        let options = config.display_options();
        assert_eq!(options.mode, DescriptionMode::Full);
        assert_eq!(options.time_format, "%Y");
    }

    #[test]
    fn test_rejects_bad_time_format() {
        let file = write_config("[display]\ntime_format = \"%Q\"\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::InvalidTimeFormat(format)) if format == "%Q"
        ));
    }

    #[test]
    fn test_rejects_bad_log_level() {
        let file = write_config("[log]\nlevel = \"loud\"\n");
        assert!(matches!(Config::load(file.path()), Err(ConfigError::InvalidLogLevel(_))));
    }

    #[test]
    fn test_parse_error_names_file() {
        let file = write_config("[display\n");
        let err = Config::load(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(&file.path().display().to_string()));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/gitlane.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(Config::load_or_default(None).is_ok());
    }
}
