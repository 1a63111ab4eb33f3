//! Error types for particle-canvas.
//!
//! Drawing never fails: missing data on the frame path is skipped silently.
//! These errors cover the fallible work done outside the frame loop, namely
//! loading configuration and loading image assets.

use thiserror::Error;

/// Errors that can occur while loading or validating a [`DrawConfig`](crate::DrawConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be parsed.
    #[error("Failed to parse draw configuration: {0}")]
    Parse(#[from] serde_json::Error),
    /// Polygon and star shapes need at least three sides.
    #[error("Polygon side count must be at least 3, got {0}")]
    TooFewSides(u32),
    /// Side counts above the limit would make the path walk unbounded.
    #[error("Polygon side count must be at most {max}, got {sides}")]
    TooManySides {
        /// The configured side count.
        sides: u32,
        /// The accepted maximum.
        max: u32,
    },
    /// A distance or width that must be finite and non-negative was not.
    #[error("`{field}` must be finite and non-negative, got {value}")]
    InvalidValue {
        /// Dotted path of the offending field.
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// The character shape was configured with an empty glyph set.
    #[error("Character shape needs at least one glyph")]
    EmptyGlyphSet,
}

/// Errors that can occur while loading an image asset.
#[derive(Debug, Error)]
pub enum AssetError {
    /// Failed to decode the image.
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),
    /// Failed to read the file from disk.
    #[error("Failed to read image file: {0}")]
    Io(#[from] std::io::Error),
    /// The image has a zero dimension, so no aspect ratio exists.
    #[error("Image has zero size ({width}x{height})")]
    EmptyImage {
        /// Width in pixels.
        width: u32,
        /// Height in pixels.
        height: u32,
    },
}
