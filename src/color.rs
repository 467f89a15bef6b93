use palette::Srgb;

use crate::error::{ExtractError, Result};

/// Weighted luma of an sRGB triple (0.299 R + 0.587 G + 0.114 B).
#[inline]
pub fn brightness(c: Srgb<u8>) -> f64 {
    0.299 * c.red as f64 + 0.587 * c.green as f64 + 0.114 * c.blue as f64
}

/// Saturation as a percentage: `(max - min) / max * 100`, or 0 for black.
#[inline]
pub fn saturation(c: Srgb<u8>) -> f64 {
    let max = c.red.max(c.green).max(c.blue);
    let min = c.red.min(c.green).min(c.blue);
    if max == 0 {
        return 0.0;
    }
    (max - min) as f64 / max as f64 * 100.0
}

/// Euclidean distance between two colors in plain RGB space.
#[inline]
pub fn distance(a: Srgb<u8>, b: Srgb<u8>) -> f64 {
    let dr = a.red as i32 - b.red as i32;
    let dg = a.green as i32 - b.green as i32;
    let db = a.blue as i32 - b.blue as i32;
    ((dr * dr + dg * dg + db * db) as f64).sqrt()
}

/// Canonical `#RRGGBB` (uppercase) key for a color.
pub fn to_hex(c: Srgb<u8>) -> String {
    format!("#{:02X}{:02X}{:02X}", c.red, c.green, c.blue)
}

/// `rgb(R, G, B)` with decimal channels.
pub fn to_rgb_string(c: Srgb<u8>) -> String {
    format!("rgb({}, {}, {})", c.red, c.green, c.blue)
}

/// Parse `#RRGGBB` or `RRGGBB` back into channels.
pub fn parse_hex(s: &str) -> Result<Srgb<u8>> {
    let invalid = || ExtractError::InvalidParameter {
        parameter: "color".to_string(),
        value: s.to_string(),
    };
    let hex = s.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let r = u8::from_str_radix(&hex[0..2], 16).map_err(|_| invalid())?;
    let g = u8::from_str_radix(&hex[2..4], 16).map_err(|_| invalid())?;
    let b = u8::from_str_radix(&hex[4..6], 16).map_err(|_| invalid())?;
    Ok(Srgb::new(r, g, b))
}
