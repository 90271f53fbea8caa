//! Pure Rust imaging backend built on the `image` crate.
//!
//! Everything is statically linked into the binary.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Decode (JPEG, PNG, TIFF, WebP, GIF, BMP) | `image::ImageReader` with content sniffing |
//! | Rotate, quarter turns | `image::imageops::rotate90/180/270` |
//! | Rotate, any angle | nearest-neighbour inverse mapping (below) |
//! | Paste | `image::imageops::replace` (signed offsets, clipped) |
//! | Resize | `image::imageops::resize` |
//! | Encode | PNG, whatever the file is called |
//!
//! ## Why PNG for every save
//!
//! Cached derivatives keep the source's file name (`cached/photo.jpg`), but
//! a cache hit must return exactly the pixels that were written. Saving
//! losslessly and sniffing the format on open gives that guarantee without
//! changing the cache naming scheme.

use super::backend::{BackendError, Bitmap, ImageBackend};
use super::calculations::{calculate_rotated_bounds, quarter_turns};
use super::params::ResizeFilter;
use image::{ImageError, ImageFormat, ImageReader, Rgb, RgbImage, imageops};
use std::path::Path;

/// Fill for canvas area a rotation uncovers.
const ROTATE_FILL: Rgb<u8> = Rgb([0, 0, 0]);

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
#[derive(Debug, Clone, Copy)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotate counter-clockwise by an arbitrary angle about the image center.
///
/// Each output pixel center is mapped back into the source; pixels that
/// land outside it get [`ROTATE_FILL`].
fn rotate_any(src: &Bitmap, degrees: f64) -> Bitmap {
    let (out_w, out_h) = calculate_rotated_bounds(src.width(), src.height(), degrees);
    let (sin, cos) = degrees.to_radians().sin_cos();

    let (src_cx, src_cy) = (src.width() as f64 / 2.0, src.height() as f64 / 2.0);
    let (out_cx, out_cy) = (out_w as f64 / 2.0, out_h as f64 / 2.0);

    RgbImage::from_fn(out_w, out_h, |ox, oy| {
        let dx = ox as f64 + 0.5 - out_cx;
        let dy = oy as f64 + 0.5 - out_cy;
        let sx = (dx * cos - dy * sin + src_cx).floor();
        let sy = (dx * sin + dy * cos + src_cy).floor();
        if sx >= 0.0 && sy >= 0.0 && sx < src.width() as f64 && sy < src.height() as f64 {
            *src.get_pixel(sx as u32, sy as u32)
        } else {
            ROTATE_FILL
        }
    })
}

impl ImageBackend for RustBackend {
    fn open(&self, path: &Path) -> Result<Bitmap, BackendError> {
        let img = ImageReader::open(path)?
            .with_guessed_format()?
            .decode()
            .map_err(|e| match e {
                ImageError::IoError(io) => BackendError::Io(io),
                other => BackendError::Decode {
                    path: path.display().to_string(),
                    reason: other.to_string(),
                },
            })?;
        Ok(img.into_rgb8())
    }

    fn rotate(&self, bitmap: &Bitmap, degrees: f64) -> Bitmap {
        // imageops rotations are clockwise; `degrees` is counter-clockwise
        match quarter_turns(degrees) {
            Some(0) => bitmap.clone(),
            Some(1) => imageops::rotate270(bitmap),
            Some(2) => imageops::rotate180(bitmap),
            Some(_) => imageops::rotate90(bitmap),
            None => rotate_any(bitmap, degrees),
        }
    }

    fn new_canvas(&self, width: u32, height: u32, color: Rgb<u8>) -> Bitmap {
        RgbImage::from_pixel(width, height, color)
    }

    fn paste(&self, canvas: &mut Bitmap, src: &Bitmap, x: i64, y: i64) {
        imageops::replace(canvas, src, x, y);
    }

    fn resize(&self, bitmap: &Bitmap, width: u32, height: u32, filter: ResizeFilter) -> Bitmap {
        let (width, height) = (width.max(1), height.max(1));
        if bitmap.dimensions() == (width, height) {
            return bitmap.clone();
        }
        imageops::resize(bitmap, width, height, filter.into())
    }

    fn save(&self, bitmap: &Bitmap, path: &Path) -> Result<(), BackendError> {
        bitmap
            .save_with_format(path, ImageFormat::Png)
            .map_err(|e| match e {
                ImageError::IoError(io) => BackendError::Io(io),
                other => BackendError::Encode {
                    path: path.display().to_string(),
                    reason: other.to_string(),
                },
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::ImageEncoder;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);
    const BLUE: Rgb<u8> = Rgb([0, 0, 255]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    /// Create a small valid JPEG file with the given dimensions.
    fn create_test_jpeg(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            Rgb([(x % 256) as u8, (y % 256) as u8, 128])
        });
        let file = std::fs::File::create(path).unwrap();
        let writer = std::io::BufWriter::new(file);
        image::codecs::jpeg::JpegEncoder::new(writer)
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
    }

    /// 2x1 strip: red on the left, blue on the right.
    fn red_blue_strip() -> Bitmap {
        RgbImage::from_fn(2, 1, |x, _| if x == 0 { RED } else { BLUE })
    }

    #[test]
    fn open_synthetic_jpeg() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("test.jpg");
        create_test_jpeg(&path, 200, 150);

        let img = RustBackend::new().open(&path).unwrap();
        assert_eq!(img.dimensions(), (200, 150));
    }

    #[test]
    fn open_nonexistent_file_is_io_error() {
        let result = RustBackend::new().open(Path::new("/nonexistent/image.jpg"));
        assert!(matches!(result, Err(BackendError::Io(_))));
    }

    #[test]
    fn open_garbage_is_decode_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("broken.png");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let result = RustBackend::new().open(&path);
        assert!(matches!(result, Err(BackendError::Decode { .. })));
    }

    #[test]
    fn save_is_lossless_even_with_jpeg_name() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("cached.jpg");
        let img = RgbImage::from_fn(17, 9, |x, y| Rgb([x as u8 * 13, y as u8 * 27, 77]));

        let backend = RustBackend::new();
        backend.save(&img, &path).unwrap();
        assert_eq!(backend.open(&path).unwrap(), img);
    }

    #[test]
    fn save_into_missing_directory_errors() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("out.png");
        let result = RustBackend::new().save(&RgbImage::new(2, 2), &path);
        assert!(result.is_err());
    }

    #[test]
    fn rotate_positive_90_is_counter_clockwise() {
        // CCW: the right end of the strip moves to the top
        let out = RustBackend::new().rotate(&red_blue_strip(), 90.0);
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(*out.get_pixel(0, 0), BLUE);
        assert_eq!(*out.get_pixel(0, 1), RED);
    }

    #[test]
    fn rotate_negative_90_is_clockwise() {
        let out = RustBackend::new().rotate(&red_blue_strip(), -90.0);
        assert_eq!(out.dimensions(), (1, 2));
        assert_eq!(*out.get_pixel(0, 0), RED);
        assert_eq!(*out.get_pixel(0, 1), BLUE);
    }

    #[test]
    fn rotate_180_flips_both_axes() {
        let out = RustBackend::new().rotate(&red_blue_strip(), 180.0);
        assert_eq!(out.dimensions(), (2, 1));
        assert_eq!(*out.get_pixel(0, 0), BLUE);
    }

    #[test]
    fn rotate_zero_is_identity() {
        let img = red_blue_strip();
        assert_eq!(RustBackend::new().rotate(&img, 0.0), img);
        assert_eq!(RustBackend::new().rotate(&img, 360.0), img);
    }

    #[test]
    fn rotate_arbitrary_angle_expands_and_fills_corners() {
        let img = RgbImage::from_pixel(100, 100, WHITE);
        let out = RustBackend::new().rotate(&img, 45.0);

        assert_eq!(out.dimensions(), (142, 142));
        assert_eq!(*out.get_pixel(0, 0), ROTATE_FILL);
        assert_eq!(*out.get_pixel(71, 71), WHITE);
    }

    #[test]
    fn paste_negative_offset_crops() {
        let backend = RustBackend::new();
        let mut canvas = backend.new_canvas(1, 1, WHITE);
        backend.paste(&mut canvas, &red_blue_strip(), -1, 0);
        assert_eq!(*canvas.get_pixel(0, 0), BLUE);
    }

    #[test]
    fn paste_past_edge_leaves_background() {
        let backend = RustBackend::new();
        let mut canvas = backend.new_canvas(4, 1, WHITE);
        backend.paste(&mut canvas, &red_blue_strip(), 3, 0);
        assert_eq!(*canvas.get_pixel(2, 0), WHITE);
        assert_eq!(*canvas.get_pixel(3, 0), RED);
    }

    #[test]
    fn resize_hits_exact_dimensions() {
        let img = RgbImage::from_pixel(640, 480, RED);
        let out = RustBackend::new().resize(&img, 800, 480, ResizeFilter::Lanczos3);
        assert_eq!(out.dimensions(), (800, 480));
    }

    #[test]
    fn resize_to_same_size_is_untouched() {
        let img = RgbImage::from_fn(5, 5, |x, y| Rgb([x as u8, y as u8, 0]));
        let out = RustBackend::new().resize(&img, 5, 5, ResizeFilter::Lanczos3);
        assert_eq!(out, img);
    }
}
