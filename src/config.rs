//! `ledmatrix.toml` schema, defaults and validation.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::assets::AssetDirs;
use crate::engine::command::Command;
use crate::foundation::error::LedError;

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The file is not valid TOML for this schema.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    /// One or more fields hold unusable values.
    #[error("config validation failed:\n{}", .0.iter().map(|e| format!("  - {e}")).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

impl From<ConfigError> for LedError {
    fn from(err: ConfigError) -> Self {
        LedError::config(err.to_string())
    }
}

/// Root of the configuration file. Every section is optional.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub display: DisplayConfig,
    pub assets: AssetsConfig,
    pub dashboards: DashboardsConfig,
    pub engine: EngineConfig,
}

/// Panel layout. The logical display is `cols * chain_length` wide and `rows * parallel` tall.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Rows per panel.
    pub rows: u32,
    /// Columns per panel.
    pub cols: u32,
    /// Panels daisy-chained on one output.
    pub chain_length: u32,
    /// Parallel chains.
    pub parallel: u32,
    /// Brightness in percent, 1..=100.
    pub brightness: u8,
    /// Driver wiring name, passed through to hardware sinks.
    pub hardware_mapping: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            rows: 32,
            cols: 64,
            chain_length: 1,
            parallel: 1,
            brightness: 100,
            hardware_mapping: "regular".to_string(),
        }
    }
}

impl DisplayConfig {
    /// Logical display size as `(width, height)`.
    pub fn geometry(&self) -> (u32, u32) {
        (
            self.cols.saturating_mul(self.chain_length),
            self.rows.saturating_mul(self.parallel),
        )
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub images_dir: PathBuf,
    pub gifs_dir: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        let dirs = AssetDirs::default();
        Self {
            images_dir: dirs.images,
            gifs_dir: dirs.gifs,
        }
    }
}

impl AssetsConfig {
    pub fn dirs(&self) -> AssetDirs {
        AssetDirs {
            images: self.images_dir.clone(),
            gifs: self.gifs_dir.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardsConfig {
    /// BDF font used by text dashboards.
    pub font: PathBuf,
}

impl Default for DashboardsConfig {
    fn default() -> Self {
        Self {
            font: PathBuf::from("fonts/7x14.bdf"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Capacity of the external command channel.
    pub command_buffer: usize,
    /// How long a superseded session may take to stop before a warning is logged.
    pub stop_grace_ms: u64,
    /// Command dispatched before any external command.
    pub bootstrap: Option<Command>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            command_buffer: 16,
            stop_grace_ms: 100,
            bootstrap: None,
        }
    }
}

impl EngineConfig {
    pub fn stop_grace(&self) -> Duration {
        Duration::from_millis(self.stop_grace_ms)
    }
}

impl Config {
    /// Read and validate the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML source.
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(src)?;
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        Ok(config)
    }

    /// Every problem with the current values, empty when the config is usable.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let d = &self.display;

        for (field, value) in [
            ("display.rows", d.rows),
            ("display.cols", d.cols),
            ("display.chain_length", d.chain_length),
            ("display.parallel", d.parallel),
        ] {
            if value == 0 {
                errors.push(format!("{field}: must be a positive integer"));
            }
        }
        if !(1..=100).contains(&d.brightness) {
            errors.push(format!(
                "display.brightness: must be within 1..=100, got {}",
                d.brightness
            ));
        }
        if d.hardware_mapping.trim().is_empty() {
            errors.push("display.hardware_mapping: must be non-empty".to_string());
        }
        if self.dashboards.font.as_os_str().is_empty() {
            errors.push("dashboards.font: must be non-empty".to_string());
        }
        if self.engine.command_buffer == 0 {
            errors.push("engine.command_buffer: must be a positive integer".to_string());
        }
        if let Some(cmd) = &self.engine.bootstrap
            && cmd.name.trim().is_empty()
        {
            errors.push("engine.bootstrap.name: must be non-empty".to_string());
        }

        errors
    }

    /// Logical display size as `(width, height)`.
    pub fn geometry(&self) -> (u32, u32) {
        self.display.geometry()
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
