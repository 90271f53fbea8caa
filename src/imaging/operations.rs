//! High-level image operations.
//!
//! These functions combine calculations with backend execution.
//! They take parameters, compute geometry, and call the backend.

use super::backend::{Bitmap, ImageBackend};
use super::calculations::{
    ContainLayout, calculate_contain_layout, calculate_fill_dimensions,
};
use super::params::{CropParams, ResizeFilter};
use image::Rgb;

/// Rotate, then cut the crop window out onto a `background` canvas.
///
/// `params.rotate` is clockwise (what the editor shows); the backend rotates
/// counter-clockwise, hence the negation. The window origin is subtracted
/// from the paste offset, so any part of the window outside the rotated
/// image keeps the background color.
pub fn crop_and_rotate(
    backend: &impl ImageBackend,
    bitmap: Bitmap,
    params: &CropParams,
    background: Rgb<u8>,
) -> Bitmap {
    let rotated = if params.rotate != 0.0 {
        backend.rotate(&bitmap, -params.rotate)
    } else {
        bitmap
    };

    let mut canvas = backend.new_canvas(params.width, params.height, background);
    backend.paste(&mut canvas, &rotated, -params.x, -params.y);
    canvas
}

/// Letterbox `bitmap` into a `width`×`height` canvas filled with `background`.
///
/// The image is scaled to fit entirely (Lanczos3) and centered. When its
/// aspect ratio already matches, it is simply resized to the target.
pub fn pad_to_size(
    backend: &impl ImageBackend,
    bitmap: &Bitmap,
    width: u32,
    height: u32,
    background: Rgb<u8>,
) -> Bitmap {
    let ContainLayout {
        width: fit_w,
        height: fit_h,
        x,
        y,
    } = calculate_contain_layout(bitmap.dimensions(), (width, height));

    if (fit_w, fit_h) == (width, height) {
        return backend.resize(bitmap, width, height, ResizeFilter::Lanczos3);
    }

    let fitted = backend.resize(bitmap, fit_w, fit_h, ResizeFilter::Lanczos3);
    let mut canvas = backend.new_canvas(width, height, background);
    backend.paste(&mut canvas, &fitted, i64::from(x), i64::from(y));
    canvas
}

/// Fill a `width`×`height` area exactly: scale to cover, then center-crop.
///
/// Aspect ratio is preserved and nothing is letterboxed; whatever overhangs
/// the target on the long side is cut off evenly.
pub fn resize_to_fill(
    backend: &impl ImageBackend,
    bitmap: &Bitmap,
    width: u32,
    height: u32,
) -> Bitmap {
    let (fill_w, fill_h) = calculate_fill_dimensions(bitmap.dimensions(), (width, height));
    let filled = backend.resize(bitmap, fill_w, fill_h, ResizeFilter::Lanczos3);
    if (fill_w, fill_h) == (width, height) {
        return filled;
    }

    let offset_x = i64::from((fill_w - width) / 2);
    let offset_y = i64::from((fill_h - height) / 2);
    let mut canvas = backend.new_canvas(width, height, Rgb([0, 0, 0]));
    backend.paste(&mut canvas, &filled, -offset_x, -offset_y);
    canvas
}
