use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::{
    GridSize, DEFAULT_TICK_INTERVAL_MS, DEFAULT_TILE_COUNT, MAX_TILE_COUNT, MIN_TICK_INTERVAL_MS,
    MIN_TILE_COUNT,
};
use crate::engine::EngineConfig;
use crate::error::SettingsError;

const APP_DIR_NAME: &str = "modal-snake";
const SETTINGS_FILE_NAME: &str = "settings.json";

/// User-tunable settings. Every field is optional in the file.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub tile_count: u16,
    pub tick_interval_ms: u64,
    pub show_buttons: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tile_count: DEFAULT_TILE_COUNT,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            show_buttons: false,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub struct Overrides {
    pub tile_count: Option<u16>,
    pub tick_interval_ms: Option<u64>,
    pub show_buttons: bool,
}

impl Settings {
    #[must_use]
    pub fn with_overrides(self, overrides: Overrides) -> Self {
        Self {
            tile_count: overrides.tile_count.unwrap_or(self.tile_count),
            tick_interval_ms: overrides.tick_interval_ms.unwrap_or(self.tick_interval_ms),
            show_buttons: self.show_buttons || overrides.show_buttons,
        }
    }

    /// Checks value ranges.
    pub fn validate(self) -> Result<Self, SettingsError> {
        if !(MIN_TILE_COUNT..=MAX_TILE_COUNT).contains(&self.tile_count) {
            return Err(SettingsError::Invalid {
                field: "tile_count",
                reason: format!(
                    "{} is outside {MIN_TILE_COUNT}..={MAX_TILE_COUNT}",
                    self.tile_count
                ),
            });
        }

        if self.tick_interval_ms < MIN_TICK_INTERVAL_MS {
            return Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                reason: format!(
                    "{} is below the minimum of {MIN_TICK_INTERVAL_MS}",
                    self.tick_interval_ms
                ),
            });
        }

        Ok(self)
    }

    #[must_use]
    pub fn engine_config(&self, seed: Option<u64>) -> EngineConfig {
        EngineConfig {
            grid: GridSize::square(self.tile_count),
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            seed,
        }
    }
}

/// Returns the platform-correct settings file path.
#[must_use]
pub fn settings_path() -> PathBuf {
    let mut base = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    base.push(APP_DIR_NAME);
    base.push(SETTINGS_FILE_NAME);
    base
}

/// Loads settings from the default location.
///
/// A missing file yields the defaults; an unreadable or malformed file is an
/// error so it can be reported before the terminal enters raw mode.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from_path(&settings_path())
}

pub fn load_settings_from_path(path: &Path) -> Result<Settings, SettingsError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use crate::config::GridSize;
    use crate::error::SettingsError;

    use super::{load_settings_from_path, Overrides, Settings};

    #[test]
    fn missing_settings_file_returns_defaults() {
        let path = unique_test_path("missing");

        let loaded = load_settings_from_path(&path).expect("missing file should return defaults");

        assert_eq!(loaded, Settings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "show_buttons": true }"#);

        let loaded = load_settings_from_path(&path).expect("load should succeed");

        assert!(loaded.show_buttons);
        assert_eq!(loaded.tile_count, 20);
        assert_eq!(loaded.tick_interval_ms, 150);
        cleanup_test_path(&path);
    }

    #[test]
    fn written_settings_load_back() {
        let path = unique_test_path("written");
        let settings = Settings {
            tile_count: 12,
            tick_interval_ms: 90,
            show_buttons: true,
        };
        let json = serde_json::to_string_pretty(&settings).expect("settings serialize");
        write_test_file(&path, &json);

        let loaded = load_settings_from_path(&path).expect("load should succeed");

        assert_eq!(loaded, settings);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_settings_file_returns_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        let error = load_settings_from_path(&path).expect_err("malformed file should fail");

        assert!(matches!(error, SettingsError::Parse { .. }));
        cleanup_test_path(&path);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let path = unique_test_path("unknown");
        write_test_file(&path, r#"{ "high_score": 3 }"#);

        assert!(load_settings_from_path(&path).is_err());
        cleanup_test_path(&path);
    }

    #[test]
    fn validation_bounds() {
        let too_small = Settings {
            tile_count: 1,
            ..Settings::default()
        };
        let too_fast = Settings {
            tick_interval_ms: 5,
            ..Settings::default()
        };

        assert!(matches!(
            too_small.validate(),
            Err(SettingsError::Invalid {
                field: "tile_count",
                ..
            })
        ));
        assert!(matches!(
            too_fast.validate(),
            Err(SettingsError::Invalid {
                field: "tick_interval_ms",
                ..
            })
        ));
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn overrides_take_precedence() {
        let settings = Settings::default().with_overrides(Overrides {
            tile_count: Some(15),
            tick_interval_ms: None,
            show_buttons: true,
        });

        let config = settings.engine_config(Some(3));

        assert_eq!(config.grid, GridSize::square(15));
        assert_eq!(config.tick_interval, Duration::from_millis(150));
        assert_eq!(config.seed, Some(3));
        assert!(settings.show_buttons);
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("modal-snake-settings-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
