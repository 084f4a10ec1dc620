//! Color system assembly — the one call that ties every stage together.
//!
//! `generate_color_system` validates options, resolves the seed, derives
//! six role targets, sweeps each across the requested tones, optionally
//! composes themes, and stamps metadata. It either returns a complete
//! system or an error; nothing partial escapes.

use std::str::FromStr;

use n_hct::{Argb, Hct};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ColorError, Result};
use crate::palette::generate_palettes;
use crate::quantize::{DEFAULT_MAX_COLORS, PixelBuffer, quantize};
use crate::score::score;
use crate::theme::{THEME_POLICY_VERSION, Themes, compose_themes};
use crate::tonal::{DEFAULT_TONES, TonalScale, normalize_tones, scale_from_stops};
use crate::variant::{ColorVariant, Role};

/// Version stamped into every generated system's metadata.
pub const GENERATOR_VERSION: &str = env!("CARGO_PKG_VERSION");

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Where the seed color comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedSource {
    /// `#RRGGBB`, validated when the system is generated.
    Hex(String),
    Rgb { r: u8, g: u8, b: u8 },
    /// Decoded pixels; the seed is extracted by quantize + score.
    Image(PixelBuffer),
}

impl FromStr for SeedSource {
    type Err = ColorError;

    /// Accepts `#RRGGBB` or `r,g,b` with each channel in 0..=255.
    fn from_str(s: &str) -> Result<Self> {
        let text = s.trim();
        if text.starts_with('#') {
            Argb::from_hex(text)?;
            return Ok(Self::Hex(text.to_string()));
        }

        let invalid = || ColorError::InvalidColorFormat(s.to_string());
        let channels: Vec<u8> = text
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<_>>()?;
        match channels[..] {
            [r, g, b] => Ok(Self::Rgb { r, g, b }),
            _ => Err(invalid()),
        }
    }
}

/// How the seed origin is reported in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SeedOrigin {
    Hex,
    Rgb,
    Image,
}

/// Knobs for one generation call.
///
/// Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct GenerationOptions {
    pub variant: ColorVariant,
    pub tones: Vec<i32>,
    /// -1.0 (softer) ..= 1.0 (stronger).
    pub contrast_level: f64,
    pub include_themes: bool,
    pub max_image_colors: usize,
    /// Caller-supplied timestamp, echoed into the metadata.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at_ms: Option<u64>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            variant: ColorVariant::default(),
            tones: DEFAULT_TONES.to_vec(),
            contrast_level: 0.0,
            include_themes: false,
            max_image_colors: DEFAULT_MAX_COLORS,
            generated_at_ms: None,
        }
    }
}

impl GenerationOptions {
    /// Check the contrast level and tones, returning the normalized stops.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidContrastLevel`] or [`ColorError::ToneOutOfRange`].
    pub fn validate(&self) -> Result<Vec<u8>> {
        if !(-1.0..=1.0).contains(&self.contrast_level) {
            return Err(ColorError::InvalidContrastLevel(self.contrast_level));
        }
        normalize_tones(&self.tones)
    }
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// The seed the system was built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceInfo {
    pub seed_argb: Argb,
    pub resolved_hex: String,
    pub origin: SeedOrigin,
    pub fell_back_to_default: bool,
}

/// One tone scale per role.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palettes {
    pub primary: TonalScale,
    pub secondary: TonalScale,
    pub tertiary: TonalScale,
    pub neutral: TonalScale,
    pub neutral_variant: TonalScale,
    pub error: TonalScale,
}

impl Palettes {
    #[must_use]
    pub const fn get(&self, role: Role) -> &TonalScale {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Tertiary => &self.tertiary,
            Role::Neutral => &self.neutral,
            Role::NeutralVariant => &self.neutral_variant,
            Role::Error => &self.error,
        }
    }

    /// Scales in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &TonalScale)> {
        Role::ALL.into_iter().map(move |role| (role, self.get(role)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub generated_at_ms: Option<u64>,
    pub generator_version: String,
    pub theme_policy_version: u32,
    pub options: GenerationOptions,
}

/// A complete generated color system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorSystem {
    pub source: SourceInfo,
    pub palettes: Palettes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub themes: Option<Themes>,
    pub metadata: Metadata,
}

// ---------------------------------------------------------------------------
// Assembly
// ---------------------------------------------------------------------------

/// Generate a full color system from one seed.
///
/// Identical inputs always produce identical output.
///
/// # Errors
///
/// - [`ColorError::InvalidContrastLevel`] / [`ColorError::ToneOutOfRange`]
///   before any work is done
/// - [`ColorError::InvalidColorFormat`] for a malformed hex seed
/// - [`ColorError::EmptyImageSource`] for an image with no opaque pixels
pub fn generate_color_system(source: &SeedSource, options: &GenerationOptions) -> Result<ColorSystem> {
    let stops = options.validate()?;
    let resolved = resolve_seed(source, options.max_image_colors)?;
    if resolved.fell_back {
        warn!(seed = %resolved.argb, "no usable image color, using default seed");
    }

    let seed = Hct::from_argb(resolved.argb);
    debug!(
        seed = %resolved.argb,
        hue = seed.hue(),
        chroma = seed.chroma(),
        tone = seed.tone(),
        variant = %options.variant,
        "seed resolved"
    );

    let targets = generate_palettes(&seed, options.variant, options.contrast_level);
    for t in &targets {
        debug!(role = %t.role, hue = t.hue, chroma = t.chroma, "role target");
    }

    let [primary, secondary, tertiary, neutral, neutral_variant, error] =
        targets.map(|t| scale_from_stops(t.role.name(), t.hue, t.chroma, &stops));
    let palettes = Palettes { primary, secondary, tertiary, neutral, neutral_variant, error };

    let themes = options.include_themes.then(|| compose_themes(&targets));

    Ok(ColorSystem {
        source: SourceInfo {
            seed_argb: resolved.argb,
            resolved_hex: resolved.argb.to_hex(),
            origin: resolved.origin,
            fell_back_to_default: resolved.fell_back,
        },
        palettes,
        themes,
        metadata: Metadata {
            generated_at_ms: options.generated_at_ms,
            generator_version: GENERATOR_VERSION.to_string(),
            theme_policy_version: THEME_POLICY_VERSION,
            options: options.clone(),
        },
    })
}

struct ResolvedSeed {
    argb: Argb,
    origin: SeedOrigin,
    fell_back: bool,
}

fn resolve_seed(source: &SeedSource, max_colors: usize) -> Result<ResolvedSeed> {
    match source {
        SeedSource::Hex(hex) => Ok(ResolvedSeed {
            argb: Argb::from_hex(hex.trim())?,
            origin: SeedOrigin::Hex,
            fell_back: false,
        }),
        SeedSource::Rgb { r, g, b } => Ok(ResolvedSeed {
            argb: Argb::from_rgb(*r, *g, *b),
            origin: SeedOrigin::Rgb,
            fell_back: false,
        }),
        SeedSource::Image(pixels) => {
            let candidates = quantize(pixels, max_colors)?;
            let scored = score(&candidates);
            debug!(candidates = candidates.len(), score = scored.score, "image seed scored");
            Ok(ResolvedSeed { argb: scored.argb, origin: SeedOrigin::Image, fell_back: scored.fell_back })
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
