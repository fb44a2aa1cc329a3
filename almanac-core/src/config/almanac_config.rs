//! Global almanac configuration.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use super::EngineLimits;
use crate::error::{AlmanacError, AlmanacResult};

static DEFAULT_EVENTS_PATH: &str = "~/almanac/events.toml";

fn default_events_path() -> PathBuf {
    PathBuf::from(DEFAULT_EVENTS_PATH)
}

/// Global configuration at ~/.config/almanac/config.toml
///
/// Any key can be overridden from the environment with an `ALMANAC__`
/// prefix and `__` between nested keys, e.g.
/// `ALMANAC__ENGINE__SCAN_CEILING=20000`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AlmanacConfig {
    /// Calendar definition file. Without one, the Gregorian calendar is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<PathBuf>,

    #[serde(default = "default_events_path")]
    pub events: PathBuf,

    #[serde(default)]
    pub engine: EngineLimits,
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        AlmanacConfig {
            calendar: None,
            events: default_events_path(),
            engine: EngineLimits::default(),
        }
    }
}

impl AlmanacConfig {
    pub fn config_path() -> AlmanacResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AlmanacError::Config("Could not determine config directory".into()))?
            .join("almanac");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, writing a commented template there
    /// on first use.
    pub fn load() -> AlmanacResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    /// Load from `path` (which may be absent) plus environment overrides.
    pub fn load_from(path: &Path) -> AlmanacResult<Self> {
        tracing::debug!(path = %path.display(), "loading configuration");

        Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(false))
            .add_source(
                Environment::with_prefix("ALMANAC")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AlmanacError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AlmanacError::Config(e.to_string()))
    }

    pub fn events_path(&self) -> PathBuf {
        expand(&self.events)
    }

    pub fn calendar_path(&self) -> Option<PathBuf> {
        self.calendar.as_deref().map(expand)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AlmanacResult<()> {
        let contents = format!(
            "\
# almanac configuration

# Calendar definition (TOML). Leave unset for the Gregorian calendar:
# calendar = \"~/almanac/calendar.toml\"

# Where your events live:
# events = \"{}\"

# Limits that keep a single query bounded:
# [engine]
# scan_ceiling = 10000
# random_scan_ceiling = 50000
# stride_ceiling = 100000
# max_link_depth = 8
# lookahead_days = 3650
",
            DEFAULT_EVENTS_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AlmanacError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AlmanacError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AlmanacConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.engine, EngineLimits::default());
        assert_eq!(config.events, default_events_path());
        assert_eq!(config.calendar, None);
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("almanac/config.toml");
        AlmanacConfig::create_default_config(&path).unwrap();

        let config = AlmanacConfig::load_from(&path).unwrap();
        assert_eq!(config.engine, EngineLimits::default());
    }

    #[test]
    fn test_partial_engine_section_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "calendar = \"/srv/faerun.toml\"\n\n[engine]\nscan_ceiling = 500\n",
        )
        .unwrap();

        let config = AlmanacConfig::load_from(&path).unwrap();
        assert_eq!(config.engine.scan_ceiling, 500);
        assert_eq!(config.engine.max_link_depth, EngineLimits::default().max_link_depth);
        assert_eq!(config.calendar_path(), Some(PathBuf::from("/srv/faerun.toml")));
    }

    #[test]
    fn test_tilde_is_expanded() {
        let config = AlmanacConfig::default();
        assert!(!config.events_path().to_string_lossy().starts_with('~'));
    }
}
