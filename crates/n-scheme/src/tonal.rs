//! Tone scales — one hue/chroma target swept across tone stops.
//!
//! Every entry carries its WCAG contrast against pure black and pure
//! white, so a consumer can pick text colors without recomputing.

use n_hct::{Argb, Hct};
use serde::Serialize;

use crate::contrast::contrast_ratio;
use crate::error::{ColorError, Result};

/// The tone stops used when none are requested.
pub const DEFAULT_TONES: [i32; 13] = [0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 95, 99, 100];

/// One color in a tone scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToneEntry {
    pub tone: u8,
    pub argb: Argb,
    pub hex: String,
    pub contrast_against_black: f64,
    pub contrast_against_white: f64,
}

impl ToneEntry {
    fn new(tone: u8, argb: Argb) -> Self {
        Self {
            tone,
            argb,
            hex: argb.to_hex(),
            contrast_against_black: contrast_ratio(argb, Argb::BLACK),
            contrast_against_white: contrast_ratio(argb, Argb::WHITE),
        }
    }
}

/// A role's colors at each requested tone, in request order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TonalScale {
    pub role_name: String,
    pub hue: f64,
    pub chroma: f64,
    pub tones: Vec<ToneEntry>,
}

impl TonalScale {
    /// Entry at exactly `tone`, if that stop was requested.
    #[must_use]
    pub fn get(&self, tone: u8) -> Option<&ToneEntry> {
        self.tones.iter().find(|e| e.tone == tone)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToneEntry> {
        self.tones.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tones.is_empty()
    }
}

/// Validate tone stops and drop duplicates, keeping first-seen order.
///
/// # Errors
///
/// Returns [`ColorError::ToneOutOfRange`] for the first stop outside
/// 0..=100.
pub fn normalize_tones(tones: &[i32]) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::with_capacity(tones.len());
    for &tone in tones {
        let t = u8::try_from(tone)
            .ok()
            .filter(|t| *t <= 100)
            .ok_or(ColorError::ToneOutOfRange(tone))?;
        if !out.contains(&t) {
            out.push(t);
        }
    }
    Ok(out)
}

/// Build a scale from stops that were already validated.
pub(crate) fn scale_from_stops(role_name: &str, hue: f64, chroma: f64, stops: &[u8]) -> TonalScale {
    let tones = stops
        .iter()
        .map(|&t| ToneEntry::new(t, Hct::new(hue, chroma, f64::from(t)).to_argb()))
        .collect();
    TonalScale { role_name: role_name.to_string(), hue, chroma, tones }
}

/// Sweep one hue/chroma target across `tones`.
///
/// Hue and chroma are fixed; only tone varies. Chroma is clamped per tone
/// to what sRGB can display, so the extremes are always black and white.
///
/// # Errors
///
/// Returns [`ColorError::ToneOutOfRange`] if any stop is outside 0..=100.
/// Nothing is computed in that case.
pub fn build_tonal_scale(role_name: &str, hue: f64, chroma: f64, tones: &[i32]) -> Result<TonalScale> {
    let stops = normalize_tones(tones)?;
    Ok(scale_from_stops(role_name, hue, chroma, &stops))
}

/// Tone scale at a single color's own hue and chroma.
///
/// The scale's role name is the normalized hex of the input color.
///
/// # Errors
///
/// Returns [`ColorError::InvalidColorFormat`] for a malformed hex, or
/// [`ColorError::ToneOutOfRange`] for a bad stop.
pub fn generate_tonal_palette(hex: &str, tones: &[i32]) -> Result<TonalScale> {
    let argb = Argb::from_hex(hex)?;
    let hct = Hct::from_argb(argb);
    build_tonal_scale(&argb.to_hex(), hct.hue(), hct.chroma(), tones)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
