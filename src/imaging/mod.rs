//! Image processing in pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Decode** | `image::ImageReader` (format sniffed from content) |
//! | **Rotate** | `imageops::rotate*` for quarter turns, inverse mapping otherwise |
//! | **Crop / letterbox** | canvas + `imageops::replace` |
//! | **Resize** | `imageops::resize`, Lanczos3 |
//! | **Encode** | PNG |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for geometry (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: Crop/rotate, letterbox and fill built on the backend

pub mod backend;
mod calculations;
pub mod operations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Bitmap, ImageBackend};
pub use calculations::{ContainLayout, calculate_pad_size, calculate_rotated_bounds};
pub use operations::{crop_and_rotate, pad_to_size, resize_to_fill};
pub use params::{CropParams, ResizeFilter};
pub use rust_backend::RustBackend;
