//! # Frame Cycle
//!
//! Picks the next photo for a digital picture frame and turns it into a bitmap
//! that exactly fits the panel. Uploaded originals live in a `saved/`
//! directory; processed derivatives are kept in a sibling `cached/` directory
//! so that the expensive crop, rotate and resize work happens once per image.
//!
//! # Architecture: One Cycle
//!
//! Each call to [`pipeline::generate_image`] runs a single cycle against a
//! mutable settings object and a device description:
//!
//! ```text
//! 1. Select     settings            →  index to show, index to persist
//! 2. Load       imageFiles[index]   →  cached derivative, or raw source
//! 3. Transform  raw source          →  crop/rotate, then pad or resize
//! 4. Cache      resized bitmap      →  <root>/cached/<file name>
//! ```
//!
//! A cache hit short-circuits steps 3 and 4. Everything that touches pixels
//! goes through the [`imaging::ImageBackend`] trait, so the cycle logic is
//! tested against a recording mock without encoding a single file.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | One generation cycle and its error type |
//! | [`selection`] | Sequential or random choice of the image index |
//! | [`loader`] | Opens an image, cached derivative first |
//! | [`transform`] | Crop record, rotation, and the pad/resize frame-fit branch |
//! | [`cache`] | Cache location rule, cache reads and writes |
//! | [`naming`] | `safe_id`: the filesystem-safe token keying per-image settings |
//! | [`settings`] | Flat JSON key/value store shared with the host |
//! | [`color`] | Background color parsing for padded output |
//! | [`config`] | `device.toml` loading: panel resolution and orientation |
//! | [`imaging`] | Pure-Rust image operations behind a backend trait |
//! | [`output`] | CLI output formatting for a cycle |
//!
//! # Design Decisions
//!
//! ## Derivatives Are Keyed by File Name
//!
//! The cache entry for `<root>/saved/dawn.jpg` is `<root>/cached/dawn.jpg`,
//! nothing more. There is no content hash and no dependence on crop settings
//! or device resolution, so changing either leaves a stale derivative that
//! keeps being served until something deletes it. Two sources with the same
//! file name in different directories under one root share an entry. The
//! frame host owns invalidation.
//!
//! ## Lossless Cache Encoding
//!
//! Derivatives are written as PNG whatever their extension says, and opened by
//! sniffing content. A cache hit therefore returns exactly the pixels of the
//! cycle that produced it.
//!
//! ## Padded Output Is Not Cached
//!
//! Padded bitmaps keep the source's own size and depend on the background
//! color, so only the full-resolution resize branch writes a derivative.

pub mod cache;
pub mod color;
pub mod config;
pub mod imaging;
pub mod loader;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod selection;
pub mod settings;
pub mod transform;

#[cfg(test)]
pub(crate) mod test_helpers;
