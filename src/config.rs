//! Tunable parameters for one extraction call.

use std::fmt;
use std::str::FromStr;

use crate::error::{ExtractError, Result};

/// Output string encoding for palette entries.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorFormat {
    /// `#RRGGBB`, uppercase.
    #[default]
    Hex,
    /// `rgb(R, G, B)`.
    Rgb,
}

impl FromStr for ColorFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            _ => Err(ExtractError::invalid("color_format", s)),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorFormat::Hex => f.write_str("hex"),
            ColorFormat::Rgb => f.write_str("rgb"),
        }
    }
}

/// Immutable input for one extraction call.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionConfig {
    /// Upper bound on returned palette size.
    pub max_colors: usize,
    /// Linear scale of the drawing surface relative to the decoded image.
    /// Only used when starting from encoded bytes.
    pub sample_scale: f64,
    /// Samples with saturation strictly below this (0-100) are dropped.
    pub saturation_threshold: f64,
    pub color_format: ColorFormat,
    /// Drop samples with brightness below 60.
    pub exclude_dark_colors: bool,
    /// Tiles with `(x + y) % (skip_tiles + 1) == 0` are skipped; 0 disables skipping.
    pub skip_tiles: u32,
    /// The buffer is split into `grid_size x grid_size` tiles, one sample each.
    pub grid_size: u32,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            max_colors: 5,
            sample_scale: 0.1,
            saturation_threshold: 60.0,
            color_format: ColorFormat::Hex,
            exclude_dark_colors: false,
            skip_tiles: 0,
            grid_size: 6,
        }
    }
}

impl ExtractionConfig {
    pub fn validate(&self) -> Result<()> {
        if self.grid_size == 0 {
            return Err(ExtractError::invalid("grid_size", self.grid_size));
        }
        if self.max_colors == 0 {
            return Err(ExtractError::invalid("max_colors", self.max_colors));
        }
        if !self.sample_scale.is_finite() || self.sample_scale <= 0.0 || self.sample_scale > 1.0 {
            return Err(ExtractError::invalid("sample_scale", self.sample_scale));
        }
        if !(0.0..=100.0).contains(&self.saturation_threshold) {
            return Err(ExtractError::invalid(
                "saturation_threshold",
                self.saturation_threshold,
            ));
        }
        Ok(())
    }
}
