//! Configuration file loading and layering.
//!
//! Settings come from an optional config file overlaid by CLI flags. Both
//! layers are [`ConfigFile`] values with every field optional; the merged
//! result is validated into a [`JigglerConfig`] by [`ConfigFile::build`].

use crate::error::ConfigError;
use crate::jiggler::{ActivityKind, JigglerConfig, MAX_OFFSET_LIMIT};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name looked up in the working directory.
pub const LOCAL_CONFIG_NAME: &str = "nudgemon.toml";
/// Config file name inside the per-user config directory.
pub const USER_CONFIG_NAME: &str = "config.toml";

/// Shortest interval the loop will run with.
pub const MIN_INTERVAL: Duration = Duration::from_secs(5);
/// Longest interval accepted from a config file or the CLI.
pub const MAX_INTERVAL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

const DEFAULT_INTERVAL_MINUTES: f64 = 4.0;
const DEFAULT_MAX_OFFSET: i64 = 5;

/// One layer of settings, as found in a config file or on the command line.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    pub interval_minutes: Option<f64>,
    pub max_offset: Option<i64>,
    pub prevent_sleep: Option<bool>,
    pub activity_type: Option<ActivityKind>,
    pub verbose: Option<bool>,
}

impl ConfigFile {
    /// Reads a config file, parsing `.json` files as JSON and anything else as TOML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::MissingFile(path.to_path_buf())
            } else {
                ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;

        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&contents).map_err(|source| ConfigError::ParseJson {
                path: path.to_path_buf(),
                source,
            })?
        } else {
            toml::from_str(&contents).map_err(|source| ConfigError::ParseToml {
                path: path.to_path_buf(),
                source,
            })?
        };

        tracing::info!(path = %path.display(), "Config file loaded");
        Ok(config)
    }

    /// Returns `self` with every field set in `overrides` replaced.
    pub fn merge(self, overrides: ConfigFile) -> ConfigFile {
        ConfigFile {
            interval_minutes: overrides.interval_minutes.or(self.interval_minutes),
            max_offset: overrides.max_offset.or(self.max_offset),
            prevent_sleep: overrides.prevent_sleep.or(self.prevent_sleep),
            activity_type: overrides.activity_type.or(self.activity_type),
            verbose: overrides.verbose.or(self.verbose),
        }
    }

    /// Applies defaults and validates.
    ///
    /// Intervals below [`MIN_INTERVAL`] are raised to it. Zero, negative,
    /// non-finite and above-[`MAX_INTERVAL`] intervals are errors.
    pub fn build(&self) -> Result<JigglerConfig, ConfigError> {
        let minutes = self.interval_minutes.unwrap_or(DEFAULT_INTERVAL_MINUTES);
        if !minutes.is_finite() || minutes <= 0.0 {
            return Err(ConfigError::InvalidInterval(minutes));
        }
        let mut interval = Duration::try_from_secs_f64(minutes * 60.0)
            .ok()
            .filter(|interval| *interval <= MAX_INTERVAL)
            .ok_or(ConfigError::InvalidInterval(minutes))?;
        if interval < MIN_INTERVAL {
            tracing::warn!(
                requested_secs = interval.as_secs_f64(),
                min_secs = MIN_INTERVAL.as_secs(),
                "Interval too short, using minimum"
            );
            interval = MIN_INTERVAL;
        }

        let raw_offset = self.max_offset.unwrap_or(DEFAULT_MAX_OFFSET);
        let max_offset = u32::try_from(raw_offset)
            .ok()
            .filter(|m| (1..=MAX_OFFSET_LIMIT).contains(m))
            .ok_or(ConfigError::InvalidMaxOffset {
                value: raw_offset,
                max: MAX_OFFSET_LIMIT,
            })?;

        let config = JigglerConfig {
            interval,
            max_offset,
            prevent_sleep: self.prevent_sleep.unwrap_or(false),
            activity: self.activity_type.unwrap_or_default(),
            verbose: self.verbose.unwrap_or(false),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Finds the config file to use.
///
/// An explicit path is returned as is, even if it does not exist, so the
/// caller reports it. Otherwise `./nudgemon.toml` and then the per-user
/// config directory are tried. `None` means run on defaults.
pub fn locate(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    let local = PathBuf::from(LOCAL_CONFIG_NAME);
    if local.is_file() {
        return Some(local);
    }

    let user = dirs::config_dir()?.join("nudgemon").join(USER_CONFIG_NAME);
    if user.is_file() {
        return Some(user);
    }

    tracing::debug!("No config file found, using defaults");
    None
}

/// Loads the config file (if any) and overlays `overrides` on top.
pub fn load(explicit: Option<&Path>, overrides: ConfigFile) -> Result<JigglerConfig, ConfigError> {
    let file = match locate(explicit) {
        Some(path) => ConfigFile::from_file(&path)?,
        None => ConfigFile::default(),
    };
    file.merge(overrides).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_defaults() {
        let config = ConfigFile::default().build().unwrap();
        assert_eq!(config, JigglerConfig::default());
    }

    #[test]
    fn test_toml_file() {
        let (_dir, path) = write_config(
            "settings.toml",
            "interval_minutes = 2.5\nmax_offset = 3\nprevent_sleep = true\nactivity_type = \"notepad\"\n",
        );

        let config = ConfigFile::from_file(&path).unwrap().build().unwrap();
        assert_eq!(config.interval, Duration::from_secs(150));
        assert_eq!(config.max_offset, 3);
        assert!(config.prevent_sleep);
        assert_eq!(config.activity, ActivityKind::Notepad);
    }

    #[test]
    fn test_json_file() {
        let (_dir, path) = write_config("settings.json", r#"{"interval_minutes": 1, "verbose": true}"#);

        let file = ConfigFile::from_file(&path).unwrap();
        assert_eq!(file.interval_minutes, Some(1.0));
        assert_eq!(file.verbose, Some(true));
        assert_eq!(file.max_offset, None);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let (_dir, path) = write_config("bad.toml", "interval = 3\n");
        let err = ConfigFile::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
    }

    #[test]
    fn test_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");

        let err = load(Some(&path), ConfigFile::default()).unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(p) if p == path));
    }

    #[test]
    fn test_cli_overrides_file() {
        let (_dir, path) = write_config(
            "settings.toml",
            "interval_minutes = 10\nmax_offset = 2\nprevent_sleep = true\n",
        );
        let overrides = ConfigFile {
            interval_minutes: Some(1.0),
            prevent_sleep: Some(false),
            ..ConfigFile::default()
        };

        let config = load(Some(&path), overrides).unwrap();
        assert_eq!(config.interval, Duration::from_secs(60));
        assert_eq!(config.max_offset, 2);
        assert!(!config.prevent_sleep);
    }

    #[test]
    fn test_non_positive_interval_rejected() {
        for minutes in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let file = ConfigFile {
                interval_minutes: Some(minutes),
                ..ConfigFile::default()
            };
            assert!(matches!(file.build(), Err(ConfigError::InvalidInterval(_))));
        }
    }

    #[test]
    fn test_interval_above_maximum_rejected() {
        let max_minutes = MAX_INTERVAL.as_secs_f64() / 60.0;
        for minutes in [max_minutes + 1.0, 2e17, f64::MAX] {
            let file = ConfigFile {
                interval_minutes: Some(minutes),
                ..ConfigFile::default()
            };
            assert!(matches!(file.build(), Err(ConfigError::InvalidInterval(_))));
        }

        let at_max = ConfigFile {
            interval_minutes: Some(max_minutes),
            ..ConfigFile::default()
        };
        assert_eq!(at_max.build().unwrap().interval, MAX_INTERVAL);
    }

    #[test]
    fn test_short_interval_raised_to_minimum() {
        let file = ConfigFile {
            interval_minutes: Some(0.01),
            ..ConfigFile::default()
        };
        assert_eq!(file.build().unwrap().interval, MIN_INTERVAL);
    }

    #[test]
    fn test_invalid_max_offset() {
        for value in [0, -3, i64::from(MAX_OFFSET_LIMIT) + 1, i64::MAX] {
            let file = ConfigFile {
                max_offset: Some(value),
                ..ConfigFile::default()
            };
            let err = file.build().unwrap_err();
            assert!(matches!(err, ConfigError::InvalidMaxOffset { value: v, .. } if v == value));
        }
    }

    #[test]
    fn test_locate_prefers_explicit_path() {
        let path = PathBuf::from("/definitely/not/here.toml");
        assert_eq!(locate(Some(&path)), Some(path));
    }
}
