//! CLI configuration, read from `<data-dir>/config.json`.

use std::path::Path;

use anyhow::{Context, Result};
use keepsake_core::Avatars;
use keepsake_recurrence::{Locale, WeekOrder};
use serde::{Deserialize, Serialize};

/// File name inside the data directory.
pub const CONFIG_FILE: &str = "config.json";

/// User settings. Every field has a default, so a partial file is fine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Countdown text language
    pub locale: Locale,

    /// First day of the timetable week
    pub week_order: WeekOrder,

    /// Avatars given to new anniversaries
    pub default_avatars: Avatars,
}

impl Config {
    /// Load the config from a data directory; a missing file gives defaults.
    pub fn load(data_dir: &Path) -> Result<Self> {
        let path = data_dir.join(CONFIG_FILE);
        match std::fs::read_to_string(&path) {
            Ok(s) => serde_json::from_str(&s)
                .with_context(|| format!("invalid config file {}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.locale, Locale::Zh);
        assert_eq!(config.week_order, WeekOrder::Monday);
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), r#"{"locale":"en"}"#).unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.locale, Locale::En);
        assert_eq!(config.week_order, WeekOrder::Monday);
        assert_eq!(config.default_avatars, Avatars::default());
    }

    #[test]
    fn test_bad_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ nope").unwrap();
        assert!(Config::load(dir.path()).is_err());
    }
}
