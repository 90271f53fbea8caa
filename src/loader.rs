//! Opening the image for a cycle: cached derivative first, raw source second.

use crate::cache::{cache_location, open_cached};
use crate::imaging::{Bitmap, ImageBackend};
use crate::pipeline::PipelineError;
use std::path::Path;

/// Where the bitmap returned by [`open_image`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource {
    /// Processed derivative; must not be transformed again.
    Cache,
    /// Original upload; still needs crop/rotate and frame-fit.
    Raw,
}

/// Open `images[index]`, preferring its cached derivative.
///
/// A cache miss is silent. Only a failure to open the raw source is an
/// error, and its detail is logged rather than returned.
pub fn open_image(
    backend: &impl ImageBackend,
    index: usize,
    images: &[String],
) -> Result<(Bitmap, ImageSource), PipelineError> {
    if images.is_empty() {
        return Err(PipelineError::Input("No images provided.".into()));
    }
    let source = images
        .get(index)
        .ok_or_else(|| PipelineError::Input(format!("image index {index} out of range")))?;
    let source = Path::new(source);

    if let Some(bitmap) = open_cached(backend, source) {
        tracing::info!(path = %cache_location(source).display(), "using cached version of image");
        return Ok((bitmap, ImageSource::Cache));
    }

    match backend.open(source) {
        Ok(bitmap) => Ok((bitmap, ImageSource::Raw)),
        Err(e) => {
            tracing::error!(path = %source.display(), error = %e, "failed to read image file");
            Err(PipelineError::SourceRead)
        }
    }
}
