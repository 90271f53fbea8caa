//! Crop/rotate and frame-fit for a freshly loaded source image.
//!
//! Runs only on a cache miss. Steps, in order:
//!
//! 1. Resolve the background color (`backgroundColor`, default white).
//! 2. Apply the image's crop record, if any (`crop_settings[<safe_id>]`).
//! 3. Fit to the frame:
//!    - `padImage == "true"`: letterbox to the frame's aspect ratio at the
//!      image's own resolution ([`FrameFit::Pad`]).
//!    - otherwise: resize to exactly the device resolution ([`FrameFit::Stretch`]).
//!
//! Only a [`FrameFit::Stretch`] result is resolution-normalized, so only
//! that one is worth caching; the caller decides based on the returned fit.

use crate::color::resolve_background;
use crate::config::{DeviceConfig, Orientation};
use crate::imaging::{
    Bitmap, CropParams, ImageBackend, calculate_pad_size, calculate_rotated_bounds,
    crop_and_rotate, pad_to_size, resize_to_fill,
};
use crate::naming::safe_id;
use crate::pipeline::PipelineError;
use crate::settings::{PAD_IMAGE, Settings};
use serde::Deserialize;
use std::path::Path;

/// Which frame-fit branch produced a bitmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFit {
    /// Letterboxed to the frame's aspect ratio; not cached.
    Pad,
    /// Resized to the device resolution; cached.
    Stretch,
}

/// Crop record as the editor stores it. Numbers may be fractional.
#[derive(Debug, Deserialize)]
struct CropRecord {
    rotate: f64,
    width: f64,
    height: f64,
    x: f64,
    y: f64,
}

impl TryFrom<CropRecord> for CropParams {
    type Error = String;

    fn try_from(record: CropRecord) -> Result<Self, Self::Error> {
        let (width, height) = (record.width.round(), record.height.round());
        if !(width >= 1.0 && height >= 1.0) || width > u32::MAX as f64 || height > u32::MAX as f64 {
            return Err(format!(
                "crop size must be at least 1x1, got {}x{}",
                record.width, record.height
            ));
        }
        if !record.rotate.is_finite() || !record.x.is_finite() || !record.y.is_finite() {
            return Err("crop rotate/x/y must be finite numbers".into());
        }
        Ok(Self {
            rotate: record.rotate,
            width: width as u32,
            height: height as u32,
            x: record.x.round() as i64,
            y: record.y.round() as i64,
        })
    }
}

/// Parse a stored crop record.
///
/// An absent value, an empty string and `{}` all mean "no crop". Anything
/// else must be a complete record; a malformed one is an error rather than
/// silently ignored.
pub fn parse_crop_record(raw: Option<&str>) -> Result<Option<CropParams>, serde_json::Error> {
    let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
        return Ok(None);
    };
    let value: serde_json::Value = serde_json::from_str(raw)?;
    if value.as_object().is_some_and(|o| o.is_empty()) {
        return Ok(None);
    }
    let record: CropRecord = serde_json::from_value(value)?;
    CropParams::try_from(record)
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Largest crop window accepted for an image: twice its rotated bounds on
/// each side, which leaves room for background margins around the image.
fn max_crop_size(image: (u32, u32), rotate: f64) -> (u32, u32) {
    let (w, h) = calculate_rotated_bounds(image.0, image.1, rotate);
    (w.saturating_mul(2), h.saturating_mul(2))
}

/// Frame size used for pad mode: the device resolution, swapped for a
/// vertically mounted panel.
pub fn frame_dimensions(device: &impl DeviceConfig) -> (u32, u32) {
    let (w, h) = device.resolution();
    match device.orientation() {
        Orientation::Vertical => (h, w),
        Orientation::Horizontal => (w, h),
    }
}

/// Apply the stored crop/rotate record and the frame-fit policy.
pub fn transform(
    backend: &impl ImageBackend,
    bitmap: Bitmap,
    settings: &Settings,
    source: &Path,
    device: &impl DeviceConfig,
) -> Result<(Bitmap, FrameFit), PipelineError> {
    let background = resolve_background(settings.background_color())?;

    let id = safe_id(source.to_str());
    let bitmap = match parse_crop_record(settings.crop_settings(&id))
        .map_err(|e| PipelineError::CropSettings { id: id.clone(), source: e })?
    {
        Some(params) => {
            let (max_w, max_h) = max_crop_size(bitmap.dimensions(), params.rotate);
            if params.width > max_w || params.height > max_h {
                return Err(PipelineError::CropSettings {
                    source: serde::de::Error::custom(format!(
                        "crop size {}x{} exceeds {}x{} for this image",
                        params.width, params.height, max_w, max_h
                    )),
                    id,
                });
            }
            tracing::debug!(%id, ?params, "applying crop record");
            crop_and_rotate(backend, bitmap, &params, background)
        }
        None => bitmap,
    };

    if settings.flag(PAD_IMAGE) {
        let frame = frame_dimensions(device);
        let (w, h) = calculate_pad_size(bitmap.dimensions(), frame);
        tracing::debug!(width = w, height = h, ?frame, "padding to frame ratio");
        return Ok((pad_to_size(backend, &bitmap, w, h, background), FrameFit::Pad));
    }

    let (w, h) = device.resolution();
    tracing::debug!(width = w, height = h, "resizing to device resolution");
    Ok((resize_to_fill(backend, &bitmap, w, h), FrameFit::Stretch))
}
