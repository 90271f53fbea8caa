//! Which image to show this cycle, and which index to persist for the next.
//!
//! Two modes, chosen by the `randomize` flag:
//!
//! - **Sequential**: show `image_index`, persist `image_index + 1` (wrapping).
//! - **Random**: draw a uniform index, show it and persist it as-is. Every
//!   cycle draws afresh; the persisted value only matters if the mode is
//!   later switched back to sequential, which then resumes from the last
//!   random pick.
//!
//! A stored index past the end of the list (the list shrank since the last
//! run) is treated as 0 before either mode applies.

use crate::pipeline::PipelineError;
use crate::settings::{RANDOMIZE, Settings};
use rand::Rng;

/// Outcome of [`select`]. Both indices are always `< len`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Index to display now.
    pub current: usize,
    /// Value to store in `image_index` once the cycle succeeds.
    pub next: usize,
}

/// Pick the index for this cycle from a list of `len` images.
pub fn select(
    settings: &Settings,
    len: usize,
    rng: &mut impl Rng,
) -> Result<Selection, PipelineError> {
    if len == 0 {
        return Err(PipelineError::Input("No images provided.".into()));
    }

    let mut index = settings.image_index();
    if index >= len {
        tracing::debug!(index, len, "stored index out of range, restarting at 0");
        index = 0;
    }

    let selection = if settings.flag(RANDOMIZE) {
        let pick = rng.random_range(0..len);
        Selection {
            current: pick,
            next: pick,
        }
    } else {
        Selection {
            current: index,
            next: (index + 1) % len,
        }
    };
    tracing::debug!(current = selection.current, next = selection.next, "selected image");
    Ok(selection)
}
