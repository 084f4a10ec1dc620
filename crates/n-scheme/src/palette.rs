//! Palette targets — the hue and chroma each role is built from.
//!
//! A [`RoleTarget`] is the seed pushed through one policy rule. It is not
//! yet a color: the chroma is a request that the solver clamps separately
//! at every tone, so a single target produces a whole tone scale.

use n_hct::Hct;
use serde::Serialize;

use crate::variant::{ColorVariant, Role, policy};

/// Chroma gain per unit of contrast level.
///
/// A level of +1 asks for 25% more chroma, -1 for 25% less.
pub const CONTRAST_CHROMA_GAIN: f64 = 0.25;

/// Hue and chroma target for one palette role.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RoleTarget {
    pub role: Role,
    /// Degrees, [0, 360).
    pub hue: f64,
    /// Requested chroma before per-tone gamut clamping.
    pub chroma: f64,
}

impl RoleTarget {
    /// Scale the chroma target by the contrast level.
    ///
    /// The factor is `max(0, 1 + 0.25 * level)`, so chroma never goes
    /// negative. A level of 0 returns the target unchanged.
    #[must_use]
    pub fn with_contrast_level(self, level: f64) -> Self {
        let factor = CONTRAST_CHROMA_GAIN.mul_add(level, 1.0).max(0.0);
        Self { chroma: self.chroma * factor, ..self }
    }

    /// Solve this target at a tone.
    #[must_use]
    pub fn at_tone(&self, tone: f64) -> Hct {
        Hct::new(self.hue, self.chroma, tone)
    }
}

/// Derive one role's target from the seed under a variant.
#[must_use]
pub fn generate_palette(seed: &Hct, role: Role, variant: ColorVariant) -> RoleTarget {
    let (hue, chroma) = policy(variant, role).resolve(seed.hue(), seed.chroma());
    RoleTarget { role, hue, chroma }
}

/// All six targets in [`Role::ALL`] order, with the contrast level applied.
#[must_use]
pub fn generate_palettes(seed: &Hct, variant: ColorVariant, contrast_level: f64) -> [RoleTarget; 6] {
    Role::ALL.map(|role| generate_palette(seed, role, variant).with_contrast_level(contrast_level))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
