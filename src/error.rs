//! Error types for vibrant color extraction

use thiserror::Error;

pub type Result<T, E = ExtractError> = std::result::Result<T, E>;

/// Every way an extraction call can fail. None of these are retried and none
/// carry a partial palette.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Encoded image bytes could not be decoded
    #[error("Image loading failed: {message}")]
    ImageLoad {
        message: String,
        #[source]
        source: Option<image::ImageError>,
    },

    /// The scaled drawing surface could not be created
    #[error("Unable to obtain a {width}x{height} drawing surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    /// No sampled pixel was chromatic
    #[error("Image is fully grayscale")]
    Grayscale,

    /// A sampled pixel lies outside the readable buffer
    #[error("Pixel readback failed at byte {index} of a {len}-byte buffer")]
    PixelReadback { index: usize, len: usize },

    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl ExtractError {
    pub fn image_load(message: impl Into<String>, source: image::ImageError) -> Self {
        Self::ImageLoad {
            message: message.into(),
            source: Some(source),
        }
    }

    pub fn invalid(parameter: &str, value: impl ToString) -> Self {
        Self::InvalidParameter {
            parameter: parameter.to_string(),
            value: value.to_string(),
        }
    }

    /// Stable tag callers can branch on (used at the JS boundary and by the CLI).
    pub fn kind(&self) -> &'static str {
        match self {
            ExtractError::ImageLoad { .. } => "LoadError",
            ExtractError::SurfaceUnavailable { .. } => "ResourceError",
            ExtractError::Grayscale => "GrayscaleError",
            ExtractError::PixelReadback { .. } => "TaintError",
            ExtractError::InvalidParameter { .. } => "InvalidParameter",
        }
    }
}
