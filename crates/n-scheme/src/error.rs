//! Error types for color system generation.

use n_hct::ParseColorError;
use thiserror::Error;

/// Everything that can make a generation call fail.
///
/// Generation is atomic: any of these aborts the whole call and no
/// partial color system is returned. Nothing is retried internally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ColorError {
    /// Seed text was not `#RRGGBB` or an in-range `r,g,b` triple.
    #[error("invalid color format: {0}")]
    InvalidColorFormat(String),

    /// The image had no fully opaque pixels to sample. Pixels with any
    /// transparency (alpha below 255) are skipped, so an image that is
    /// entirely semi-transparent also ends up here.
    #[error("image source has no opaque pixels")]
    EmptyImageSource,

    /// Pixel data could not be decoded or had the wrong size.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// A requested tone stop was outside 0..=100.
    #[error("tone {0} is outside 0..=100")]
    ToneOutOfRange(i32),

    /// Contrast level was outside -1.0..=1.0 (or not a number).
    #[error("contrast level {0} is outside -1.0..=1.0")]
    InvalidContrastLevel(f64),

    /// Variant name did not match any known variant.
    #[error("unsupported variant {0:?}")]
    UnsupportedVariant(String),

    /// A minimum contrast ratio below 1:1 can never fail and is rejected.
    #[error("minimum contrast ratio {0} must be a finite value of at least 1.0")]
    InvalidContrastRatio(f64),
}

impl From<ParseColorError> for ColorError {
    fn from(err: ParseColorError) -> Self {
        Self::InvalidColorFormat(err.input)
    }
}

impl From<image::ImageError> for ColorError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageDecode(err.to_string())
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ColorError>;
