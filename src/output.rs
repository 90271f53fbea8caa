//! CLI output formatting for a render cycle.
//!
//! Output is **information-first**: the header names the image by its
//! position in the list and its file name, with paths and pipeline details
//! as indented context lines.
//!
//! ```text
//! 002/005 dawn.jpg
//!     Source: /srv/images/saved/dawn.jpg
//!     Image: processed, resized to 800x480
//!     Cache: wrote /srv/images/cached/dawn.jpg
//!     Next: 003
//! ```
//!
//! Format functions return `Vec<String>` and are pure; `print_*` wrappers
//! write to stdout.

use crate::loader::ImageSource;
use crate::pipeline::Render;
use crate::transform::FrameFit;
use std::path::Path;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Describe what happened to the bitmap.
fn image_status(render: &Render) -> String {
    let (w, h) = render.bitmap.dimensions();
    match (render.source, render.fit) {
        (ImageSource::Cache, _) => format!("cached ({}x{})", w, h),
        (ImageSource::Raw, Some(FrameFit::Pad)) => format!("processed, padded to {}x{}", w, h),
        (ImageSource::Raw, _) => format!("processed, resized to {}x{}", w, h),
    }
}

fn cache_status(render: &Render) -> String {
    match (&render.cache_written, render.source, render.fit) {
        (Some(path), _, _) => format!("wrote {}", path.display()),
        (None, ImageSource::Cache, _) => "hit".to_string(),
        (None, _, Some(FrameFit::Pad)) => "skipped (padded)".to_string(),
        (None, _, _) => "write failed".to_string(),
    }
}

/// Format the result of one cycle.
///
/// `next_index` is the persisted cursor after the cycle (0-based).
pub fn format_render_output(
    render: &Render,
    images: &[String],
    next_index: usize,
) -> Vec<String> {
    let source = images
        .get(render.index)
        .map(String::as_str)
        .unwrap_or_default();
    let filename = Path::new(source)
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string());

    vec![
        format!(
            "{}/{} {}",
            format_index(render.index + 1),
            format_index(images.len()),
            filename
        ),
        format!("{}Source: {}", indent(1), source),
        format!("{}Image: {}", indent(1), image_status(render)),
        format!("{}Cache: {}", indent(1), cache_status(render)),
        format!("{}Next: {}", indent(1), format_index(next_index + 1)),
    ]
}

/// Print render output to stdout.
pub fn print_render_output(render: &Render, images: &[String], next_index: usize) {
    for line in format_render_output(render, images, next_index) {
        println!("{}", line);
    }
}
