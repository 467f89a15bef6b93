use image::{GenericImageView, imageops::FilterType};

use crate::error::{ExtractError, Result};

/// Decoded image drawn onto a scaled RGBA surface.
pub struct Surface {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Surface size for an image drawn at `scale`. Fractional sides are truncated,
/// so very small images can end up with a zero-sized surface.
pub fn scaled_dimensions(width: u32, height: u32, scale: f64) -> (u32, u32) {
    (
        (width as f64 * scale).floor() as u32,
        (height as f64 * scale).floor() as u32,
    )
}

/// Decode `input` and draw it onto a surface `scale` times its size.
pub fn draw_scaled(input: &[u8], scale: f64) -> Result<Surface> {
    let img = image::load_from_memory(input)
        .map_err(|e| ExtractError::image_load("Unable to decode image", e))?;
    let (orig_w, orig_h) = img.dimensions();

    let (width, height) = scaled_dimensions(orig_w, orig_h, scale);
    if width == 0 || height == 0 {
        return Err(ExtractError::SurfaceUnavailable { width, height });
    }

    let pixels = if (width, height) == (orig_w, orig_h) {
        img.to_rgba8().into_raw()
    } else {
        image::imageops::resize(&img, width, height, FilterType::Triangle).into_raw()
    };

    Ok(Surface { width, height, pixels })
}
