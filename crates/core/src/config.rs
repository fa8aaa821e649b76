use std::fs;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

/// Engine policy knobs. Always passed explicitly into the engine entry
/// points; the engine reads no ambient process state.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Timezone fixing the one-response-per-day window.
    pub timezone: Tz,
    /// Character cap on the designated free-text question.
    pub max_text_length: usize,
    /// `order` of the free-text question the cap applies to.
    pub free_text_order: u32,
    /// Option id meaning "yes, I woke during the night".
    pub wake_yes_option: String,
    /// Option id meaning "no, I slept through".
    pub wake_no_option: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::Europe::Copenhagen,
            max_text_length: 200,
            free_text_order: 2,
            wake_yes_option: "wake_yes".to_owned(),
            wake_no_option: "wake_no".to_owned(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigPatch {
    timezone: Option<String>,
    max_text_length: Option<usize>,
    free_text_order: Option<u32>,
    wake_yes_option: Option<String>,
    wake_no_option: Option<String>,
}

impl EngineConfig {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(path) = path {
            let raw = fs::read_to_string(path)
                .map_err(|source| ConfigError::ReadFile { path: path.to_owned(), source })?;
            let patch: ConfigPatch = toml::from_str(&raw)
                .map_err(|source| ConfigError::ParseFile { path: path.to_owned(), source })?;
            config.apply_patch(patch)?;
        }
        config.validate()?;
        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) -> Result<(), ConfigError> {
        if let Some(timezone) = patch.timezone {
            self.timezone = timezone.parse().map_err(|_| {
                ConfigError::Validation(format!("unknown timezone `{timezone}`"))
            })?;
        }
        if let Some(max_text_length) = patch.max_text_length {
            self.max_text_length = max_text_length;
        }
        if let Some(free_text_order) = patch.free_text_order {
            self.free_text_order = free_text_order;
        }
        if let Some(wake_yes_option) = patch.wake_yes_option {
            self.wake_yes_option = wake_yes_option;
        }
        if let Some(wake_no_option) = patch.wake_no_option {
            self.wake_no_option = wake_no_option;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.max_text_length == 0 {
            return Err(ConfigError::Validation(
                "max_text_length must be greater than zero".to_owned(),
            ));
        }
        if self.wake_yes_option.is_empty() || self.wake_no_option.is_empty() {
            return Err(ConfigError::Validation(
                "wake option ids must not be empty".to_owned(),
            ));
        }
        if self.wake_yes_option == self.wake_no_option {
            return Err(ConfigError::Validation(
                "wake_yes_option and wake_no_option must differ".to_owned(),
            ));
        }
        Ok(())
    }
}
