//! Shared test utilities for the frame-cycle test suite.
//!
//! Builds throwaway image libraries on disk in the layout the frame host
//! uses, with synthetic PNG sources, and settings objects pointing at them.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let lib = setup_library(&[("dawn.png", (1600, 960)), ("tall.png", (300, 600))]);
//! let mut settings = settings_for(&lib.sources);
//!
//! let render = generate_image(&RustBackend::new(), &mut settings, &device).unwrap();
//! assert!(lib.cached("dawn.png").exists());
//! ```

use image::{Rgb, RgbImage};
use serde_json::json;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::cache::CACHE_DIR;
use crate::settings::{IMAGE_FILES, PAD_IMAGE, RANDOMIZE, Settings};

/// Directory holding the originals, next to [`CACHE_DIR`].
pub const SAVED_DIR: &str = "saved";

// =========================================================================
// Fixture setup
// =========================================================================

/// A `<root>/saved` + `<root>/cached` tree in a temp directory.
pub struct Library {
    pub dir: TempDir,
    /// Absolute source paths in the order they were requested.
    pub sources: Vec<String>,
}

impl Library {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the cache entry for `name`.
    pub fn cached(&self, name: &str) -> PathBuf {
        self.root().join(CACHE_DIR).join(name)
    }
}

/// Create a library with one synthetic PNG per `(file name, (width, height))`.
///
/// Both directories exist afterwards; `cached/` is empty.
pub fn setup_library(images: &[(&str, (u32, u32))]) -> Library {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(SAVED_DIR)).unwrap();
    fs::create_dir_all(dir.path().join(CACHE_DIR)).unwrap();

    let sources = images
        .iter()
        .map(|(name, (w, h))| {
            let path = dir.path().join(SAVED_DIR).join(name);
            gradient(*w, *h).save(&path).unwrap();
            path.to_string_lossy().into_owned()
        })
        .collect();

    Library { dir, sources }
}

/// Deterministic RGB gradient so resized output is not uniform.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

// =========================================================================
// Settings
// =========================================================================

/// Sequential, unpadded settings listing `sources`.
pub fn settings_for<S: AsRef<str>>(sources: &[S]) -> Settings {
    let files: Vec<&str> = sources.iter().map(AsRef::as_ref).collect();
    let mut settings = Settings::new();
    settings.set(IMAGE_FILES, json!(files));
    settings.set(RANDOMIZE, "false");
    settings.set(PAD_IMAGE, "false");
    settings
}
