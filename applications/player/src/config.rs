/// Player configuration
use crate::error::{PlayerAppError, Result};
use cadence_playback::PlaybackConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "cadence.toml";

/// Prefix for environment overrides, e.g. `CADENCE_PLAYBACK__VOLUME=0.4`
pub const ENV_PREFIX: &str = "CADENCE";

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default)]
    pub playback: PlaybackConfig,

    #[serde(default)]
    pub library: LibrarySettings,

    /// Tracing filter directive, e.g. `debug` or `cadence_playback=trace`
    #[serde(default)]
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct LibrarySettings {
    /// JSON track listing to preload
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist. Without one, `cadence.toml` in the
    /// working directory is used if present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, environment())
    }

    /// Load with a caller-supplied environment source
    pub fn load_with_env(path: Option<&Path>, env: config::Environment) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(PlayerAppError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(env);

        let config: Self = settings.build()?.try_deserialize()?;
        tracing::debug!(?config, "configuration loaded");
        Ok(config)
    }

    /// Apply command-line overrides on top of file and environment
    #[must_use]
    pub fn with_overrides(mut self, library: Option<PathBuf>, seed: Option<u64>) -> Self {
        if library.is_some() {
            self.library.path = library;
        }
        if seed.is_some() {
            self.playback.shuffle_seed = seed;
        }
        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let volume = self.playback.volume;
        if !volume.is_finite() || !(0.0..=1.0).contains(&volume) {
            return Err(PlayerAppError::Config(format!(
                "playback.volume must be between 0.0 and 1.0, got {volume}"
            )));
        }

        if let Some(level) = &self.log_level {
            if let Err(e) = tracing_subscriber::EnvFilter::try_new(level) {
                return Err(PlayerAppError::Config(format!(
                    "invalid log_level {level:?}: {e}"
                )));
            }
        }

        if let Some(path) = &self.library.path {
            if !path.is_file() {
                return Err(PlayerAppError::Config(format!(
                    "library listing not found at {}",
                    path.display()
                )));
            }
        }

        Ok(())
    }
}

/// `CADENCE_` prefixed variables, `__` between nested keys
pub fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = PlayerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.library.path.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn volume_out_of_range_rejected() {
        let mut config = PlayerConfig::default();
        config.playback.volume = 1.5;
        assert!(matches!(config.validate(), Err(PlayerAppError::Config(_))));

        config.playback.volume = f32::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_log_level_rejected() {
        let config = PlayerConfig {
            log_level: Some("cadence_player=loud".to_string()),
            ..PlayerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn overrides_only_replace_given_values() {
        let config = PlayerConfig {
            library: LibrarySettings {
                path: Some(PathBuf::from("lib.json")),
            },
            ..PlayerConfig::default()
        };

        let config = config.with_overrides(None, Some(9));
        assert_eq!(config.library.path, Some(PathBuf::from("lib.json")));
        assert_eq!(config.playback.shuffle_seed, Some(9));
    }
}
