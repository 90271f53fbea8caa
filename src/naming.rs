//! Identifier-safe tokens derived from image paths.
//!
//! Per-image settings are stored under keys like `crop_settings[<id>]`. The
//! id is built from the file name alone so that it stays stable however the
//! upload directory is spelled, and only contains characters that are safe
//! inside a settings key.
//!
//! ## Rules
//!
//! 1. Everything up to and including the last `/` or `\` is dropped.
//! 2. Every character outside `[A-Za-z0-9_-]` becomes `_`.
//!
//! - `/srv/images/saved/My Photo.jpg` → `My_Photo_jpg`
//! - `C:\uploads\beach-2024.png` → `beach-2024_png`
//! - `None` → `""`

/// Derive the settings-key token for an image path.
///
/// Total and pure: never fails, never touches the filesystem. Non-ASCII
/// characters are replaced one-for-one, so `é` becomes a single `_`.
pub fn safe_id(path: Option<&str>) -> String {
    let Some(path) = path else {
        return String::new();
    };
    let name = match path.rfind(['/', '\\']) {
        Some(pos) => &path[pos + 1..],
        None => path,
    };
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect()
}
