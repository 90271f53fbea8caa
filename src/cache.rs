//! Processed-image cache.
//!
//! Cropping, rotating and resampling a full-size photo is by far the most
//! expensive part of a refresh, and for a given source image the result is
//! the same every time it comes around. The processed bitmap is therefore
//! stored next to the uploads and reused on later cycles.
//!
//! # Layout
//!
//! ```text
//! <images_root>/
//! ├── saved/
//! │   └── dawn.jpg        # source, as uploaded
//! └── cached/
//!     └── dawn.jpg        # processed derivative (PNG-encoded)
//! ```
//!
//! The cache path is a function of the source *file name* only: the source's
//! grandparent directory is taken as the images root. Two sources with the
//! same name in different directories share one cache entry.
//!
//! # Invalidation
//!
//! There is none. An entry is not keyed on the crop record, background
//! color or display resolution that produced it, so editing those leaves
//! the old derivative in place until the file under `cached/` is deleted.
//! Callers that edit per-image settings are expected to delete the entry.
//!
//! # Misses
//!
//! A missing or unreadable entry is the normal state for a new image, so
//! [`open_cached`] reports it as `None` rather than an error.

use crate::imaging::{BackendError, Bitmap, ImageBackend};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory under the images root that holds processed derivatives.
pub const CACHE_DIR: &str = "cached";

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Failed to write cache entry {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: BackendError,
    },
}

/// Cache location for a source image: `<grandparent>/cached/<file name>`.
///
/// Pure path arithmetic; never touches the filesystem.
pub fn cache_location(source: &Path) -> PathBuf {
    let root = match source.parent() {
        Some(parent) => parent.parent().unwrap_or(parent),
        None => Path::new(""),
    };
    let name = source.file_name().unwrap_or_default();
    root.join(CACHE_DIR).join(name)
}

/// Try to open the cached derivative of `source`.
///
/// Any failure (missing file, truncated write, unknown format) is a miss.
pub fn open_cached(backend: &impl ImageBackend, source: &Path) -> Option<Bitmap> {
    let path = cache_location(source);
    match backend.open(&path) {
        Ok(bitmap) => Some(bitmap),
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "cache miss");
            None
        }
    }
}

/// Store `bitmap` as the cached derivative of `source`, overwriting any
/// existing entry. Fails when the cache directory is missing or read-only.
pub fn write_cache(
    backend: &impl ImageBackend,
    bitmap: &Bitmap,
    source: &Path,
) -> Result<PathBuf, CacheError> {
    let path = cache_location(source);
    backend
        .save(bitmap, &path)
        .map_err(|source| CacheError::Write {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}
