//! Device configuration.
//!
//! The pipeline needs two facts about the display it renders for: its
//! native resolution and how the panel is mounted. They are read through
//! the [`DeviceConfig`] trait so a host application can supply its own
//! store; [`DeviceSettings`] is the file-backed implementation used by the
//! CLI.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [display]
//! resolution = [800, 480]     # native panel width, height in pixels
//! orientation = "horizontal"  # "horizontal" or "vertical"
//! ```
//!
//! Values not present in the file keep their stock defaults. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// How the panel is mounted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Parse the stored setting. Anything but `"vertical"` is horizontal.
    pub fn from_setting(value: Option<&str>) -> Self {
        match value {
            Some("vertical") => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

/// Read access to the device's display configuration.
pub trait DeviceConfig {
    /// Native panel resolution as `(width, height)`.
    fn resolution(&self) -> (u32, u32);

    /// Raw string value of a named device setting.
    fn get_config(&self, key: &str) -> Option<String>;

    fn orientation(&self) -> Orientation {
        Orientation::from_setting(self.get_config("orientation").as_deref())
    }
}

/// Device configuration loaded from `device.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeviceSettings {
    pub display: DisplayConfig,
}

/// Display panel settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayConfig {
    /// Native resolution as `[width, height]`.
    pub resolution: [u32; 2],
    pub orientation: Orientation,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            resolution: [800, 480],
            orientation: Orientation::Horizontal,
        }
    }
}

impl DeviceSettings {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.display.resolution[0] == 0 || self.display.resolution[1] == 0 {
            return Err(ConfigError::Validation(
                "display.resolution values must be non-zero".into(),
            ));
        }
        Ok(())
    }
}

impl DeviceConfig for DeviceSettings {
    fn resolution(&self) -> (u32, u32) {
        (self.display.resolution[0], self.display.resolution[1])
    }

    fn get_config(&self, key: &str) -> Option<String> {
        match key {
            "orientation" => Some(
                match self.display.orientation {
                    Orientation::Horizontal => "horizontal",
                    Orientation::Vertical => "vertical",
                }
                .to_string(),
            ),
            _ => None,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(DeviceSettings::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a device config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file doesn't exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Load the device config, merging it over stock defaults, rejecting
/// unknown keys and validating the result.
pub fn load_config(path: &Path) -> Result<DeviceSettings, ConfigError> {
    let base = stock_defaults_value();
    let merged = match load_raw_config(path)? {
        Some(overlay) => merge_toml(base, overlay),
        None => base,
    };
    let config: DeviceSettings = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `device.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Frame Cycle Device Configuration
# ================================
# All settings are optional. Values shown below are the defaults.
# Unknown keys will cause an error.

[display]
# Native panel resolution as [width, height] in pixels.
# Non-padded images are resized to exactly this size and cached.
resolution = [800, 480]

# How the panel is mounted: "horizontal" or "vertical".
# In padImage mode a vertical panel swaps width and height when
# computing the frame's aspect ratio.
orientation = "horizontal"
"##
}
