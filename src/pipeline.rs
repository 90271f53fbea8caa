//! One generation cycle: select, load, transform, cache.
//!
//! ```text
//! select ──► open_image ──► Cache ─────────────────────────────► done
//!                      └──► Raw ──► crop/rotate ──► Pad ───────► done
//!                                               └─► Stretch ──► write_cache ──► done
//! ```
//!
//! The settings object is borrowed mutably for the whole cycle and the
//! only key written is `image_index`. It is written on the raw path as soon
//! as the source is open, before the transform runs, so it is advanced even
//! when the transform fails. A cache hit leaves it untouched. Persisting
//! the settings afterwards is the caller's job, including after an error.
//!
//! Cycles are not safe to run concurrently against the same settings or
//! cache directory; a host serving several callers has to serialize them.

use crate::cache::write_cache;
use crate::color::ColorError;
use crate::config::DeviceConfig;
use crate::imaging::{Bitmap, ImageBackend};
use crate::loader::{ImageSource, open_image};
use crate::selection::select;
use crate::settings::Settings;
use crate::transform::{FrameFit, transform};
use rand::Rng;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// No usable image list; raised before any file is touched.
    #[error("{0}")]
    Input(String),
    /// Neither the cached derivative nor the source could be opened.
    /// The underlying cause is logged, not carried.
    #[error("Failed to read image file")]
    SourceRead,
    #[error("Invalid crop settings for {id}: {source}")]
    CropSettings {
        id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid background color: {0}")]
    Color(#[from] ColorError),
}

/// Result of one cycle.
#[derive(Debug, Clone)]
pub struct Render {
    pub bitmap: Bitmap,
    /// Position in `imageFiles[]` that was shown.
    pub index: usize,
    pub source: ImageSource,
    /// Frame-fit branch taken; `None` on a cache hit.
    pub fit: Option<FrameFit>,
    /// Cache entry written this cycle, if any.
    pub cache_written: Option<PathBuf>,
}

/// Run one cycle with the thread-local RNG.
pub fn generate_image(
    backend: &impl ImageBackend,
    settings: &mut Settings,
    device: &impl DeviceConfig,
) -> Result<Render, PipelineError> {
    generate_image_with_rng(backend, settings, device, &mut rand::rng())
}

/// Run one cycle with a caller-supplied RNG (for reproducible random mode).
pub fn generate_image_with_rng(
    backend: &impl ImageBackend,
    settings: &mut Settings,
    device: &impl DeviceConfig,
    rng: &mut impl Rng,
) -> Result<Render, PipelineError> {
    let images = settings
        .image_files()
        .map_err(|e| PipelineError::Input(e.to_string()))?
        .ok_or_else(|| PipelineError::Input("No images provided.".into()))?;
    let selection = select(settings, images.len(), rng)?;
    let (bitmap, source) = open_image(backend, selection.current, &images)?;

    if source == ImageSource::Cache {
        return Ok(Render {
            bitmap,
            index: selection.current,
            source,
            fit: None,
            cache_written: None,
        });
    }

    // Advanced before the transform: a failing transform still moves on.
    settings.set_image_index(selection.next);
    let source_path = Path::new(&images[selection.current]);
    let (bitmap, fit) = transform(backend, bitmap, settings, source_path, device)?;

    let cache_written = match fit {
        FrameFit::Pad => None,
        FrameFit::Stretch => match write_cache(backend, &bitmap, source_path) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!(error = %e, "could not cache processed image, continuing");
                None
            }
        },
    };

    Ok(Render {
        bitmap,
        index: selection.current,
        source,
        fit: Some(fit),
        cache_written,
    })
}
