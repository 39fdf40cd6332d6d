//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgtree/orgtree.toml`
//! 3. Explicit config file (`--config <FILE>`)
//! 4. Environment variables: `ORGTREE_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;

/// How a chart is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputStyle {
    /// Two spaces of indentation per level
    #[default]
    Outline,
    /// Box-drawing tree
    Tree,
}

impl fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputStyle::Outline => write!(f, "outline"),
            OutputStyle::Tree => write!(f, "tree"),
        }
    }
}

/// Unified configuration for orgtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Chart rendering style
    pub style: OutputStyle,
    /// Line printed between demo steps
    pub separator: String,
    /// Colored status output
    pub color: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: OutputStyle::Outline,
            separator: "-".repeat(38),
            color: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified, inherit").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub style: Option<OutputStyle>,
    pub separator: Option<String>,
    pub color: Option<bool>,
}

/// Get the XDG config directory for orgtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            style: overlay.style.unwrap_or(self.style),
            separator: overlay
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            color: overlay.color.unwrap_or(self.color),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Optional explicit config file; unlike the global file it must exist
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("loading global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        if let Some(path) = config_file {
            debug!("loading config file: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        Self::apply_env_overrides(current, Environment::with_prefix("ORGTREE"))
    }

    /// Apply `ORGTREE_*` environment variables as explicit overrides.
    ///
    /// The environment source is a parameter so callers can feed a fixed map.
    pub fn apply_env_overrides(
        mut settings: Self,
        environment: Environment,
    ) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(environment.prefix_separator("_"))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("style") {
            settings.style =
                OutputStyle::from_str(&val, true).map_err(|e| ApplicationError::Config {
                    message: format!("ORGTREE_STYLE: {}", e),
                })?;
        }
        if let Ok(val) = config.get_string("separator") {
            settings.separator = val;
        }
        if let Ok(val) = config.get_bool("color") {
            settings.color = val;
        }

        Ok(settings)
    }
}
