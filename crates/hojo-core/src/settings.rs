//! User settings
//!
//! ## Resolution
//!
//! Settings are loaded with a three-layer resolution:
//! 1. An explicit path (`--config`), which must exist
//! 2. The user config file (`~/.config/hojo/config.toml` on Linux)
//! 3. Embedded defaults (compiled into the binary)
//!
//! Unknown keys are rejected so typos surface instead of being ignored.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::ScoringOptions;
use crate::error::{Error, Result};

/// Embedded default settings (compiled into binary)
const DEFAULT_SETTINGS: &str = include_str!("../../../config/hojo.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoringSettings {
    pub strict: bool,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self { strict: true }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    pub show_details: bool,
    pub json: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            show_details: true,
            json: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub scoring: ScoringSettings,
    pub output: OutputSettings,
}

impl Settings {
    /// Resolve settings from an explicit path, the user config file, or the
    /// embedded defaults, in that order
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::InvalidConfig(format!(
                    "Settings file not found: {}",
                    path.display()
                )));
            }
            return Self::from_file(path);
        }

        if let Some(path) = default_settings_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        debug!("Using embedded default settings");
        Self::embedded()
    }

    /// The defaults shipped with the binary
    pub fn embedded() -> Result<Self> {
        Self::parse(DEFAULT_SETTINGS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        debug!(path = %path.display(), "Loading settings");
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn scoring_options(&self) -> ScoringOptions {
        ScoringOptions {
            strict: self.scoring.strict,
        }
    }
}

/// Location of the user settings file
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("hojo").join("config.toml"))
}
