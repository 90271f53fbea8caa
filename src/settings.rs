//! Persisted per-instance settings.
//!
//! Settings are a flat JSON object shared with the web UI that edits them.
//! Keys and value conventions are fixed by that UI and must be preserved:
//!
//! | Key | Value |
//! |---|---|
//! | `image_index` | integer cursor for sequential mode |
//! | `imageFiles[]` | array of source image paths |
//! | `randomize` | `"true"` / `"false"` |
//! | `padImage` | `"true"` / `"false"` |
//! | `backgroundColor` | color name, hex, `rgb()` or `[r, g, b]` |
//! | `crop_settings[<safe_id>]` | JSON object *encoded as a string* |
//!
//! Unknown keys are kept untouched so a load/save round trip never drops
//! data the UI wrote. The pipeline only ever writes `image_index`.

use serde_json::{Map, Value};
use std::path::Path;
use thiserror::Error;

pub const IMAGE_INDEX: &str = "image_index";
pub const IMAGE_FILES: &str = "imageFiles[]";
pub const RANDOMIZE: &str = "randomize";
pub const PAD_IMAGE: &str = "padImage";
pub const BACKGROUND_COLOR: &str = "backgroundColor";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings must be a JSON object")]
    NotAnObject,
    #[error("{key} entry {position} is not a path string: {value}")]
    NotAString {
        key: &'static str,
        position: usize,
        value: Value,
    },
}

/// Settings for one frame instance, owned by the caller for a whole cycle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    values: Map<String, Value>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        match serde_json::from_str(json)? {
            Value::Object(values) => Ok(Self { values }),
            _ => Err(SettingsError::NotAnObject),
        }
    }

    /// Load from a JSON file.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Save to a JSON file, replacing it.
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sequential cursor. Missing, negative or non-numeric values read as 0.
    pub fn image_index(&self) -> usize {
        match self.values.get(IMAGE_INDEX) {
            Some(Value::Number(n)) => n.as_u64().map_or(0, |n| n as usize),
            Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    pub fn set_image_index(&mut self, index: usize) {
        self.values.insert(IMAGE_INDEX.to_string(), Value::from(index));
    }

    /// The configured image list, or `None` when the key is absent or not
    /// an array.
    ///
    /// `image_index` addresses this list by position, so a non-string entry
    /// is an error rather than skipped.
    pub fn image_files(&self) -> Result<Option<Vec<String>>, SettingsError> {
        let Some(items) = self.values.get(IMAGE_FILES).and_then(Value::as_array) else {
            return Ok(None);
        };
        items
            .iter()
            .enumerate()
            .map(|(position, v)| {
                v.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| SettingsError::NotAString {
                        key: IMAGE_FILES,
                        position,
                        value: v.clone(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    /// Boolean flags are stored as the strings `"true"` / `"false"`.
    /// A native JSON `true` is accepted too.
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(Value::String(s)) => s == "true",
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }

    pub fn background_color(&self) -> Option<&Value> {
        self.values.get(BACKGROUND_COLOR)
    }

    /// Raw crop record for an image, keyed by its [`safe_id`](crate::naming::safe_id).
    pub fn crop_settings(&self, id: &str) -> Option<&str> {
        self.values
            .get(&crop_settings_key(id))
            .and_then(Value::as_str)
    }
}

/// Settings key holding the crop record for `id`.
pub fn crop_settings_key(id: &str) -> String {
    format!("crop_settings[{id}]")
}
