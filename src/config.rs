use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::error::{ReplayError, ReplayResult};
use crate::playback::PlaybackConfig;
use crate::resample::MILLIS_PER_SECOND;

/// Persistent replay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    /// Frames per raw sample
    pub upsample_factor: usize,

    /// Multiplier from seconds to schedule units (1000 = milliseconds)
    pub unit_scale: f64,

    /// 1.0 = real-time, 2.0 = 2x speed
    pub playback_speed: f64,

    /// Suffix for the speed readout
    pub speed_unit: String,

    /// Driver name used when the lap file does not carry one
    pub driver_name: String,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            upsample_factor: 10,
            unit_scale: MILLIS_PER_SECOND,
            playback_speed: 1.0,
            speed_unit: "km/h".to_string(),
            driver_name: "Driver".to_string(),
        }
    }
}

impl ReplayConfig {
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lap-replay").join("settings.json"))
    }

    /// Load settings from the user config directory, falling back to defaults
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_or_init_at(&path),
            None => Self::default(),
        }
    }

    /// Load settings from `path`, writing the defaults there on first run
    ///
    /// An unreadable file is left untouched and the defaults are used.
    pub fn load_or_init_at(path: &Path) -> Self {
        if !path.exists() {
            let config = Self::default();
            match config.save_to(path) {
                Ok(()) => debug!("Wrote default settings to {}", path.display()),
                Err(e) => warn!("Could not write default settings: {:#}", e),
            }
            return config;
        }

        match Self::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring unreadable settings {}: {:#}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        debug!("Loaded settings from {}", path.display());
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    /// Check values the pipeline cannot work with
    pub fn validate(&self) -> ReplayResult<()> {
        if self.upsample_factor == 0 {
            return Err(ReplayError::invalid_input("upsample_factor must be at least 1"));
        }
        if !self.unit_scale.is_finite() || self.unit_scale <= 0.0 {
            return Err(ReplayError::invalid_input(format!(
                "unit_scale must be positive, got {}",
                self.unit_scale
            )));
        }
        Ok(())
    }

    pub fn playback(&self) -> PlaybackConfig {
        PlaybackConfig {
            speed: self.playback_speed,
            speed_unit: self.speed_unit.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("lap-replay-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_defaults() {
        let config = ReplayConfig::default();
        assert_eq!(config.upsample_factor, 10);
        assert_eq!(config.unit_scale, 1000.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: ReplayConfig =
            serde_json::from_str(r#"{ "upsample_factor": 4, "speed_unit": "mph" }"#).unwrap();
        assert_eq!(config.upsample_factor, 4);
        assert_eq!(config.speed_unit, "mph");
        assert_eq!(config.playback_speed, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("settings.json");
        let config = ReplayConfig {
            playback_speed: 2.5,
            driver_name: "Leclerc".to_string(),
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(ReplayConfig::load_from(&path).unwrap(), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_reports_bad_json() {
        let path = temp_path("broken.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();
        let err = ReplayConfig::load_from(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse"));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_first_run_writes_defaults() {
        let path = temp_path("first-run/settings.json");
        let _ = fs::remove_file(&path);

        let config = ReplayConfig::load_or_init_at(&path);
        assert_eq!(config, ReplayConfig::default());
        assert!(path.exists());
        assert_eq!(ReplayConfig::load_from(&path).unwrap(), config);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_existing_settings_are_kept() {
        let path = temp_path("existing/settings.json");
        let custom = ReplayConfig {
            upsample_factor: 3,
            ..Default::default()
        };
        custom.save_to(&path).unwrap();

        assert_eq!(ReplayConfig::load_or_init_at(&path), custom);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_settings_fall_back_without_overwrite() {
        let path = temp_path("garbled/settings.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ garbled").unwrap();

        assert_eq!(ReplayConfig::load_or_init_at(&path), ReplayConfig::default());
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ garbled");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = ReplayConfig {
            upsample_factor: 0,
            ..Default::default()
        };
        assert!(matches!(zero.validate(), Err(ReplayError::InvalidInput(_))));

        let negative = ReplayConfig {
            unit_scale: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_playback_config() {
        let config = ReplayConfig {
            playback_speed: 3.0,
            speed_unit: "mph".to_string(),
            ..Default::default()
        };
        let playback = config.playback();
        assert_eq!(playback.speed, 3.0);
        assert_eq!(playback.speed_unit, "mph");
    }
}
