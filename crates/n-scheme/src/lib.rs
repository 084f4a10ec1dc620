//! # n-scheme — Tonal Color System Engine
//!
//! Turns one seed (a color, or an image) into a complete tonal color
//! system: six semantic roles, each with a tone scale, plus optional
//! light and dark themes whose text/background pairs are checked against
//! WCAG contrast.
//!
//! # Architecture
//!
//! ```text
//! SeedSource (hex | rgb | pixels)
//!     │
//!     ▼
//! quantize.rs:  median-cut the pixels into weighted candidates
//!     │
//!     ▼
//! score.rs:     pick the most usable candidate (or the default seed)
//!     │
//!     ▼
//! variant.rs:   policy table, one hue/chroma rule per (variant, role)
//!     │
//!     ▼
//! palette.rs:   seed + rule (+ contrast level) → role hue/chroma
//!     │
//!     ▼
//! tonal.rs:     role hue/chroma × tone stops → tone scale
//!     │
//!     ▼
//! theme.rs:     fixed tone per theme color, light and dark
//!     │
//!     ▼
//! system.rs:    assemble ColorSystem + metadata
//! ```
//!
//! # Color Space
//!
//! All tonal math happens in HCT (see `n-hct`). Contrast is measured on
//! the final 8-bit sRGB colors, exactly as WCAG defines it.
//!
//! Everything here is synchronous and pure. The one exception is
//! [`source`], which decodes images on tokio's blocking pool before
//! handing pixels to the synchronous core.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Pixel counts and channel sums are cast to f64 for averaging.
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
// Policy tables hold one row per variant.
#![allow(clippy::too_many_lines)]

pub mod contrast;
pub mod error;
pub mod palette;
pub mod quantize;
pub mod score;
pub mod source;
pub mod system;
pub mod theme;
pub mod tonal;
pub mod variant;

pub use contrast::{ContrastPair, ContrastValidationResult, PairResult, validate_pairs as validate_contrast};
pub use error::{ColorError, Result};
pub use palette::{RoleTarget, generate_palette};
pub use quantize::{PixelBuffer, QuantizedColor};
pub use source::{BytesSource, FileSource, PixelSource, generate_color_system_from};
pub use system::{ColorSystem, GenerationOptions, SeedSource, generate_color_system};
pub use theme::{Theme, ThemeMode, Themes};
pub use tonal::{DEFAULT_TONES, TonalScale, ToneEntry, build_tonal_scale, generate_tonal_palette};
pub use variant::{ColorVariant, Role};
