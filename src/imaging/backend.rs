//! Imaging backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between the selection/transform
//! pipeline and the pixel work: decode, rotate, compose, resample, encode.
//! Pipeline code only ever talks to the trait, so tests can swap in a
//! recording mock without touching the filesystem.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend), built on the `image`
//! crate and statically linked into the binary.

use super::params::ResizeFilter;
use image::{Rgb, RgbImage};
use std::path::Path;
use thiserror::Error;

/// Decoded image as handed between pipeline stages. Always 8-bit RGB.
pub type Bitmap = RgbImage;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {path}: {reason}")]
    Decode { path: String, reason: String },
    #[error("Failed to encode {path}: {reason}")]
    Encode { path: String, reason: String },
}

/// The imaging capability consumed by the pipeline.
///
/// `open` and `save` are the only fallible operations; everything else
/// works on in-memory bitmaps and always produces a result.
pub trait ImageBackend: Sync {
    /// Decode an image file to RGB.
    fn open(&self, path: &Path) -> Result<Bitmap, BackendError>;

    /// Rotate counter-clockwise by `degrees`, growing the canvas to fit.
    fn rotate(&self, bitmap: &Bitmap, degrees: f64) -> Bitmap;

    /// A `width`×`height` canvas filled with `color`.
    fn new_canvas(&self, width: u32, height: u32, color: Rgb<u8>) -> Bitmap;

    /// Copy `src` onto `canvas` with its top-left corner at `(x, y)`.
    /// Offsets may be negative; whatever falls outside the canvas is dropped.
    fn paste(&self, canvas: &mut Bitmap, src: &Bitmap, x: i64, y: i64);

    /// Resample to exactly `width`×`height`.
    fn resize(&self, bitmap: &Bitmap, width: u32, height: u32, filter: ResizeFilter) -> Bitmap;

    /// Encode `bitmap` to `path`, replacing any existing file.
    fn save(&self, bitmap: &Bitmap, path: &Path) -> Result<(), BackendError>;
}
