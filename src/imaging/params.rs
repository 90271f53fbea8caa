//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the high-level [`operations`](super::operations) module
//! and the [`backend`](super::backend) that does the pixel work.
//!
//! ## Types
//!
//! - [`ResizeFilter`]: Resampling kernel for a resize.
//! - [`CropParams`]: A crop/rotate rectangle in source pixel space.

use image::imageops::FilterType;

/// Resampling filter for [`ImageBackend::resize`](super::ImageBackend::resize).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResizeFilter {
    Nearest,
    Triangle,
    /// Highest quality; used for every resize the pipeline performs.
    #[default]
    Lanczos3,
}

impl From<ResizeFilter> for FilterType {
    fn from(filter: ResizeFilter) -> Self {
        match filter {
            ResizeFilter::Nearest => FilterType::Nearest,
            ResizeFilter::Triangle => FilterType::Triangle,
            ResizeFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

/// Crop/rotate instructions for one image.
///
/// Rotation is applied first (clockwise-positive, as the editor shows it),
/// then the `width`×`height` window at `(x, y)` of the rotated image is
/// cut out. Parts of the window outside the rotated image are filled with
/// the background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropParams {
    /// Clockwise rotation in degrees.
    pub rotate: f64,
    pub width: u32,
    pub height: u32,
    pub x: i64,
    pub y: i64,
}

impl CropParams {
    /// Crop window covering a `width`×`height` image with no rotation.
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            rotate: 0.0,
            width,
            height,
            x: 0,
            y: 0,
        }
    }
}
