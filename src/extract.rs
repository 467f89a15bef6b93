use std::collections::HashMap;

use log::{debug, info};
use palette::Srgb;
use web_time::Instant;

use crate::color::{self, brightness, distance, saturation};
use crate::config::{ColorFormat, ExtractionConfig};
use crate::error::{ExtractError, Result};

/// Samples darker than this count toward the adaptive skip-tile suggestion.
const DARK_SAMPLE_BRIGHTNESS: f64 = 30.0;
/// More dark samples than this in one pass raises `suggested_skip_tiles`.
const DARK_SAMPLE_LIMIT: usize = 100;
/// Cut-off used by `exclude_dark_colors`.
const EXCLUDED_DARK_BRIGHTNESS: f64 = 60.0;
/// Minimum RGB distance between any two palette entries.
const MIN_PALETTE_DISTANCE: f64 = 100.0;

/// Outcome of one extraction call.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    /// Formatted colors, best first. Never longer than `max_colors`.
    pub colors: Vec<String>,
    /// Wall-clock duration of the call in milliseconds.
    pub elapsed_ms: f64,
    /// `skip_tiles` to feed into the next call for the same source. One more
    /// than the input when the pass saw many dark samples.
    pub suggested_skip_tiles: u32,
}

/// Aggregate for one distinct sampled color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorStat {
    pub color: String,
    pub rgb: Srgb<u8>,
    pub count: u32,
    pub brightness: f64,
    pub saturation: f64,
}

// ------------------------------------------------------------
// Timing
// ------------------------------------------------------------

/// Monotonic timer; `web_time` maps to `performance.now()` on wasm32.
pub(crate) struct Stopwatch(Instant);

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self(Instant::now())
    }

    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.0.elapsed().as_secs_f64() * 1000.0
    }
}

// ------------------------------------------------------------
// Pixel filtering
// ------------------------------------------------------------

/// Pure black, near-white or near-gray: never a palette candidate, and the
/// only thing a "grayscale" image contains.
#[inline]
fn is_achromatic(c: Srgb<u8>) -> bool {
    let (r, g, b) = (c.red as i16, c.green as i16, c.blue as i16);
    let black = r == 0 && g == 0 && b == 0;
    let near_white = r > 200 && g > 200 && b > 200;
    let near_gray = (r - g).abs() <= 10 && (r - b).abs() <= 10 && (g - b).abs() <= 10;
    black || near_white || near_gray
}

/// Center pixel of tile `(tx, ty)`, rounded down and kept inside the image.
#[inline]
fn tile_center(tx: u32, ty: u32, grid: u32, width: u32, height: u32) -> (u32, u32) {
    let cx = ((tx as f64 + 0.5) * width as f64 / grid as f64).floor() as u32;
    let cy = ((ty as f64 + 0.5) * height as f64 / grid as f64).floor() as u32;
    (cx.min(width - 1), cy.min(height - 1))
}

#[inline]
fn is_skipped(tx: u32, ty: u32, skip_tiles: u32) -> bool {
    skip_tiles > 0 && (tx as u64 + ty as u64) % (skip_tiles as u64 + 1) == 0
}

fn read_pixel(pixels: &[u8], x: u32, y: u32, width: u32) -> Result<Srgb<u8>> {
    let index = (y as usize * width as usize + x as usize) * 4;
    let px = pixels
        .get(index..index + 4)
        .ok_or(ExtractError::PixelReadback { index, len: pixels.len() })?;
    // Transparent pixels read back as black, like an unpainted canvas.
    if px[3] == 0 {
        return Ok(Srgb::new(0, 0, 0));
    }
    Ok(Srgb::new(px[0], px[1], px[2]))
}

// ------------------------------------------------------------
// Aggregation
// ------------------------------------------------------------

/// Distinct colors in first-seen order, keyed by canonical hex.
#[derive(Default)]
struct ColorTally {
    index: HashMap<String, usize>,
    stats: Vec<ColorStat>,
}

impl ColorTally {
    fn add(&mut self, rgb: Srgb<u8>, brightness: f64, saturation: f64) {
        let key = color::to_hex(rgb);
        match self.index.get(&key) {
            Some(&i) => self.stats[i].count += 1,
            None => {
                self.index.insert(key.clone(), self.stats.len());
                self.stats.push(ColorStat {
                    color: key,
                    rgb,
                    count: 1,
                    brightness,
                    saturation,
                });
            }
        }
    }
}

/// Brightest first, then most frequent. Stable, so full ties keep first-seen order.
pub fn rank(stats: &mut [ColorStat]) {
    stats.sort_by(|a, b| {
        b.brightness
            .total_cmp(&a.brightness)
            .then(b.count.cmp(&a.count))
    });
}

/// Greedy pass over ranked candidates: keep a color only if it is at least
/// `MIN_PALETTE_DISTANCE` away from everything already kept.
pub fn select_distinct(ranked: &[ColorStat], max_colors: usize) -> Vec<&ColorStat> {
    let mut accepted: Vec<&ColorStat> = Vec::with_capacity(max_colors);
    let mut seen: Vec<&str> = Vec::with_capacity(max_colors);

    for candidate in ranked {
        if accepted.len() >= max_colors {
            break;
        }
        if seen.contains(&candidate.color.as_str()) {
            continue;
        }
        let far_enough = accepted
            .iter()
            .all(|kept| distance(kept.rgb, candidate.rgb) >= MIN_PALETTE_DISTANCE);
        if far_enough {
            seen.push(&candidate.color);
            accepted.push(candidate);
        }
    }
    accepted
}

fn format_color(stat: &ColorStat, format: ColorFormat) -> String {
    match format {
        ColorFormat::Hex => stat.color.clone(),
        ColorFormat::Rgb => color::to_rgb_string(stat.rgb),
    }
}

// ------------------------------------------------------------
// Extraction
// ------------------------------------------------------------

/// Extract a vibrant palette from a row-major RGBA buffer of `width * height` pixels.
///
/// The buffer is treated as already scaled, so `config.sample_scale` is not
/// applied here. Work is bounded by `grid_size²` samples whatever the
/// resolution.
pub fn extract_from_rgba(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &ExtractionConfig,
) -> Result<Palette> {
    let stopwatch = Stopwatch::start();
    config.validate()?;
    extract_timed(pixels, width, height, config, stopwatch)
}

/// Runs the pass with an already validated `config`.
pub(crate) fn extract_timed(
    pixels: &[u8],
    width: u32,
    height: u32,
    config: &ExtractionConfig,
    stopwatch: Stopwatch,
) -> Result<Palette> {
    if width == 0 || height == 0 {
        return Err(ExtractError::SurfaceUnavailable { width, height });
    }

    let grid = config.grid_size;
    let mut tally = ColorTally::default();
    let mut chromatic_seen = false;
    let mut dark_samples = 0usize;
    let mut sampled = 0usize;

    for ty in 0..grid {
        for tx in 0..grid {
            if is_skipped(tx, ty, config.skip_tiles) {
                continue;
            }
            let (x, y) = tile_center(tx, ty, grid, width, height);
            let rgb = read_pixel(pixels, x, y, width)?;
            sampled += 1;

            if is_achromatic(rgb) {
                continue;
            }
            chromatic_seen = true;

            let sat = saturation(rgb);
            if sat < config.saturation_threshold {
                continue;
            }
            let lum = brightness(rgb);
            if config.exclude_dark_colors && lum < EXCLUDED_DARK_BRIGHTNESS {
                continue;
            }
            if lum < DARK_SAMPLE_BRIGHTNESS {
                dark_samples += 1;
            }
            tally.add(rgb, lum, sat);
        }
    }

    debug!(
        "sampled {sampled} of {} tiles on {width}x{height}: {} distinct colors, {dark_samples} dark",
        grid as u64 * grid as u64,
        tally.stats.len()
    );

    if !chromatic_seen {
        return Err(ExtractError::Grayscale);
    }

    let mut suggested_skip_tiles = config.skip_tiles;
    if dark_samples > DARK_SAMPLE_LIMIT {
        suggested_skip_tiles = suggested_skip_tiles.saturating_add(1);
        info!("{dark_samples} dark samples; suggesting skip_tiles = {suggested_skip_tiles}");
    }

    let mut stats = tally.stats;
    rank(&mut stats);
    let colors = select_distinct(&stats, config.max_colors)
        .into_iter()
        .map(|stat| format_color(stat, config.color_format))
        .collect();

    Ok(Palette {
        colors,
        elapsed_ms: stopwatch.elapsed_ms(),
        suggested_skip_tiles,
    })
}
