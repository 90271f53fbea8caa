//! Pure calculation functions for image geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// Rounding slack for trigonometry, so `cos(90°)` counts as zero.
const EPSILON: f64 = 1e-9;

/// Canvas size of a `width`×`height` image after rotating by `degrees`
/// with the canvas expanded to hold every source pixel.
///
/// Quarter turns are exact (`(w, h)` or `(h, w)`). Other angles take the
/// bounding box of the rotated corners, rounded outwards.
pub fn calculate_rotated_bounds(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    match quarter_turns(degrees) {
        Some(0) | Some(2) => return (width, height),
        Some(_) => return (height, width),
        None => {}
    }
    let (sin, cos) = degrees.to_radians().sin_cos();
    let (w, h) = (width as f64, height as f64);
    let bw = w * cos.abs() + h * sin.abs();
    let bh = w * sin.abs() + h * cos.abs();
    ((bw - EPSILON).ceil().max(1.0) as u32, (bh - EPSILON).ceil().max(1.0) as u32)
}

/// Number of counter-clockwise quarter turns in `degrees`, if it is a
/// whole multiple of 90. Always in `0..4`.
pub fn quarter_turns(degrees: f64) -> Option<u8> {
    let turns = degrees / 90.0;
    let rounded = turns.round();
    if (turns - rounded).abs() > EPSILON {
        return None;
    }
    Some((rounded as i64).rem_euclid(4) as u8)
}

/// Target size for pad mode: keep the image's long side, extend the other
/// one until the result has the frame's aspect ratio.
///
/// - landscape or square image: `(round(h * frame_ratio), h)`
/// - portrait image: `(w, round(w / frame_ratio))`
///
/// Neither dimension is ever zero.
pub fn calculate_pad_size(image: (u32, u32), frame: (u32, u32)) -> (u32, u32) {
    let (img_w, img_h) = image;
    let frame_ratio = frame.0 as f64 / frame.1 as f64;

    if img_w >= img_h {
        let w = (img_h as f64 * frame_ratio).round() as u32;
        (w.max(1), img_h)
    } else {
        let h = (img_w as f64 / frame_ratio).round() as u32;
        (img_w, h.max(1))
    }
}

/// Where a source image lands inside a letterboxed canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainLayout {
    /// Size the source is resampled to (equal to the source when no resize is needed).
    pub width: u32,
    pub height: u32,
    /// Top-left offset of the resampled source on the canvas.
    pub x: u32,
    pub y: u32,
}

/// Fit `source` entirely inside `target`, preserving aspect ratio, centered.
///
/// One side always matches the target exactly; the other is centered with
/// equal borders (the extra pixel of an odd border goes to the near side).
pub fn calculate_contain_layout(source: (u32, u32), target: (u32, u32)) -> ContainLayout {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if (src_aspect - tgt_aspect).abs() < EPSILON {
        return ContainLayout {
            width: tgt_w,
            height: tgt_h,
            x: 0,
            y: 0,
        };
    }

    if src_aspect > tgt_aspect {
        // Wider than the target: bars above and below
        let h = ((src_h as f64 / src_w as f64) * tgt_w as f64).round() as u32;
        let h = h.clamp(1, tgt_h);
        ContainLayout {
            width: tgt_w,
            height: h,
            x: 0,
            y: ((tgt_h - h) as f64 * 0.5).round() as u32,
        }
    } else {
        // Taller than the target: bars left and right
        let w = ((src_w as f64 / src_h as f64) * tgt_h as f64).round() as u32;
        let w = w.clamp(1, tgt_w);
        ContainLayout {
            width: w,
            height: tgt_h,
            x: ((tgt_w - w) as f64 * 0.5).round() as u32,
            y: 0,
        }
    }
}

/// Calculate dimensions needed to fill a target area (resize before crop).
///
/// Returns dimensions that completely cover the target area while maintaining
/// the source aspect ratio. One dimension will match exactly, the other may exceed.
pub fn calculate_fill_dimensions(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;

    let src_aspect = src_w as f64 / src_h as f64;
    let tgt_aspect = tgt_w as f64 / tgt_h as f64;

    if src_aspect > tgt_aspect {
        // Source is wider: height will match, width will exceed
        let h = tgt_h;
        let w = (h as f64 * src_aspect).round() as u32;
        (w.max(tgt_w), h)
    } else {
        // Source is taller: width will match, height will exceed
        let w = tgt_w;
        let h = (w as f64 / src_aspect).round() as u32;
        (w, h.max(tgt_h))
    }
}
