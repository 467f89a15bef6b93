//! Vibrant palette extraction for decoded images.
//!
//! A fixed grid of sample points is read from an RGBA buffer. Achromatic,
//! washed-out and (optionally) dark samples are dropped, the rest are tallied
//! per distinct color, ranked by brightness then frequency, and greedily
//! thinned so that no two palette entries are closer than 100 in RGB space.
//!
//! ```no_run
//! use vibrant_colors_wasm::{extract_vibrant_colors_bytes, ExtractionConfig};
//!
//! let bytes = std::fs::read("cover.png")?;
//! let palette = extract_vibrant_colors_bytes(&bytes, &ExtractionConfig::default())?;
//! println!("{:?} in {:.2}ms", palette.colors, palette.elapsed_ms);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use js_sys::{Array, Object, Reflect};
use wasm_bindgen::prelude::*;

pub mod color;
pub mod config;
pub mod error;
pub mod extract;
pub mod surface;

pub use config::{ColorFormat, ExtractionConfig};
pub use error::{ExtractError, Result};
pub use extract::{ColorStat, Palette, extract_from_rgba};

use extract::Stopwatch;

/// Decode `input`, draw it at `config.sample_scale` and extract its palette.
///
/// `elapsed_ms` covers decoding and scaling as well as sampling.
pub fn extract_vibrant_colors_bytes(input: &[u8], config: &ExtractionConfig) -> Result<Palette> {
    let stopwatch = Stopwatch::start();
    config.validate()?;
    let surface = surface::draw_scaled(input, config.sample_scale)?;
    extract::extract_timed(
        &surface.pixels,
        surface.width,
        surface.height,
        config,
        stopwatch,
    )
}

// ------------------------------------------------------------
// JavaScript bindings
// ------------------------------------------------------------

fn config_from_js(
    max_colors: Option<usize>,
    sample_scale: Option<f64>,
    saturation_threshold: Option<f64>,
    color_format: Option<String>,
    exclude_dark_colors: Option<bool>,
    skip_tiles: Option<u32>,
    grid_size: Option<u32>,
) -> Result<ExtractionConfig> {
    let defaults = ExtractionConfig::default();
    let color_format = match color_format {
        Some(s) => s.parse()?,
        None => defaults.color_format,
    };
    Ok(ExtractionConfig {
        max_colors: max_colors.unwrap_or(defaults.max_colors),
        sample_scale: sample_scale.unwrap_or(defaults.sample_scale),
        saturation_threshold: saturation_threshold.unwrap_or(defaults.saturation_threshold),
        color_format,
        exclude_dark_colors: exclude_dark_colors.unwrap_or(defaults.exclude_dark_colors),
        skip_tiles: skip_tiles.unwrap_or(defaults.skip_tiles),
        grid_size: grid_size.unwrap_or(defaults.grid_size),
    })
}

fn to_js_error(err: ExtractError) -> JsValue {
    JsValue::from_str(&format!("{}: {err}", err.kind()))
}

fn palette_to_js(palette: &Palette) -> Result<Object, JsValue> {
    let colors = Array::new();
    for c in &palette.colors {
        colors.push(&JsValue::from_str(c));
    }

    let result = Object::new();
    Reflect::set(&result, &JsValue::from_str("colors"), &colors)?;
    Reflect::set(
        &result,
        &JsValue::from_str("elapsedTimeMs"),
        &JsValue::from_f64(palette.elapsed_ms),
    )?;
    Reflect::set(
        &result,
        &JsValue::from_str("suggestedSkipTiles"),
        &JsValue::from_f64(palette.suggested_skip_tiles as f64),
    )?;
    Ok(result)
}

/// Extract vibrant colors from encoded image bytes (PNG, JPEG, ...).
///
/// Every parameter after `input` is optional and falls back to its default.
/// Resolves to `{ colors, elapsedTimeMs, suggestedSkipTiles }`; errors are
/// strings prefixed with `LoadError`, `ResourceError`, `GrayscaleError`,
/// `TaintError` or `InvalidParameter`.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn extract_vibrant_colors(
    input: Vec<u8>,
    max_colors: Option<usize>,
    sample_scale: Option<f64>,
    saturation_threshold: Option<f64>,
    color_format: Option<String>,
    exclude_dark_colors: Option<bool>,
    skip_tiles: Option<u32>,
    grid_size: Option<u32>,
) -> Result<Object, JsValue> {
    let config = config_from_js(
        max_colors,
        sample_scale,
        saturation_threshold,
        color_format,
        exclude_dark_colors,
        skip_tiles,
        grid_size,
    )
    .map_err(to_js_error)?;
    let palette = extract_vibrant_colors_bytes(&input, &config).map_err(to_js_error)?;
    palette_to_js(&palette)
}

/// Same as [`extract_vibrant_colors`] for pixels already read back from a
/// canvas (`ImageData.data`). `sampleScale` is ignored.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn extract_vibrant_colors_from_pixels(
    pixels: Vec<u8>,
    width: u32,
    height: u32,
    max_colors: Option<usize>,
    saturation_threshold: Option<f64>,
    color_format: Option<String>,
    exclude_dark_colors: Option<bool>,
    skip_tiles: Option<u32>,
    grid_size: Option<u32>,
) -> Result<Object, JsValue> {
    let config = config_from_js(
        max_colors,
        None,
        saturation_threshold,
        color_format,
        exclude_dark_colors,
        skip_tiles,
        grid_size,
    )
    .map_err(to_js_error)?;
    let palette = extract_from_rgba(&pixels, width, height, &config).map_err(to_js_error)?;
    palette_to_js(&palette)
}
