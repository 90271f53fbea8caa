//! Background color resolution.
//!
//! The `backgroundColor` setting is written by a web form, so it arrives in
//! whatever notation the browser produced. Accepted forms:
//!
//! | Form | Example |
//! |---|---|
//! | CSS color name (case-insensitive) | `"white"`, `"DarkSlateGray"` |
//! | Short hex | `"#fff"` |
//! | Hex | `"#ffffff"` |
//! | Hex with alpha (alpha ignored) | `"#ffffff80"` |
//! | Functional | `"rgb(255, 255, 255)"`, `"rgb(100%, 50%, 0%)"` |
//! | JSON triple | `[255, 255, 255]` |
//!
//! A missing or empty value falls back to opaque white.

use image::Rgb;
use serde_json::Value;
use thiserror::Error;

/// Used when no background color is configured.
pub const DEFAULT_BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ColorError {
    #[error("unknown color specifier: \"{0}\"")]
    Unknown(String),
    #[error("color component out of range in \"{0}\"")]
    OutOfRange(String),
}

/// Resolve an optional settings value to an RGB color.
pub fn resolve_background(value: Option<&Value>) -> Result<Rgb<u8>, ColorError> {
    match value {
        None | Some(Value::Null) => Ok(DEFAULT_BACKGROUND),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(DEFAULT_BACKGROUND),
        Some(Value::String(s)) => parse_color(s),
        Some(Value::Array(items)) => parse_triple(items),
        Some(other) => Err(ColorError::Unknown(other.to_string())),
    }
}

/// Parse a color name, hex code or `rgb()` expression.
pub fn parse_color(text: &str) -> Result<Rgb<u8>, ColorError> {
    let trimmed = text.trim();
    let lower = trimmed.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex).ok_or_else(|| ColorError::Unknown(text.to_string()));
    }
    if let Some(args) = lower
        .strip_prefix("rgb(")
        .or_else(|| lower.strip_prefix("rgba("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        return parse_functional(args, text);
    }
    named_color(&lower).ok_or_else(|| ColorError::Unknown(text.to_string()))
}

fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 | 4 => {
            let mut out = [0u8; 3];
            for (i, c) in hex.chars().take(3).enumerate() {
                let v = channel(&c.to_string())?;
                out[i] = v * 17;
            }
            Some(Rgb(out))
        }
        6 | 8 => Some(Rgb([
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
        ])),
        _ => None,
    }
}

fn parse_functional(args: &str, text: &str) -> Result<Rgb<u8>, ColorError> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    if parts.len() != 3 && parts.len() != 4 {
        return Err(ColorError::Unknown(text.to_string()));
    }
    let mut out = [0u8; 3];
    for (slot, part) in out.iter_mut().zip(&parts[..3]) {
        let value = if let Some(pct) = part.strip_suffix('%') {
            let pct: f64 = pct
                .trim()
                .parse()
                .map_err(|_| ColorError::Unknown(text.to_string()))?;
            if !(0.0..=100.0).contains(&pct) {
                return Err(ColorError::OutOfRange(text.to_string()));
            }
            (pct * 255.0 / 100.0).round() as i64
        } else {
            part.parse::<i64>()
                .map_err(|_| ColorError::Unknown(text.to_string()))?
        };
        *slot = u8::try_from(value).map_err(|_| ColorError::OutOfRange(text.to_string()))?;
    }
    Ok(Rgb(out))
}

fn parse_triple(items: &[Value]) -> Result<Rgb<u8>, ColorError> {
    let text = || Value::Array(items.to_vec()).to_string();
    if items.len() != 3 && items.len() != 4 {
        return Err(ColorError::Unknown(text()));
    }
    let mut out = [0u8; 3];
    for (slot, item) in out.iter_mut().zip(items) {
        let v = item.as_i64().ok_or_else(|| ColorError::Unknown(text()))?;
        *slot = u8::try_from(v).map_err(|_| ColorError::OutOfRange(text()))?;
    }
    Ok(Rgb(out))
}

/// CSS named colors, looked up in `palette`'s SVG/CSS3 table.
fn named_color(name: &str) -> Option<Rgb<u8>> {
    palette::named::from_str(name).map(|c| Rgb([c.red, c.green, c.blue]))
}
