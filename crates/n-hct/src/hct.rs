// SPDX-License-Identifier: MIT
//
// HCT — hue, chroma, tone.
//
// Hue and chroma come from CAM16, tone is CIE L*. Holding hue and
// chroma fixed while sweeping tone gives a tonal palette whose steps are
// perceptually even and whose luminance contrast is predictable from the
// tone difference alone.

use std::fmt;

use serde::Serialize;

use crate::cam16::Cam16;
use crate::color::Argb;
use crate::solver::{sanitize_degrees, solve_to_argb};

/// A color in HCT space.
///
/// An `Hct` always describes a displayable sRGB color: constructing one
/// from a requested hue/chroma/tone solves for the nearest sRGB color
/// and stores that color's measured coordinates. Out-of-gamut chroma is
/// clamped, never wrapped.
///
/// # Examples
///
/// ```
/// use n_hct::{Argb, Hct};
///
/// let seed = Hct::from_argb(Argb::from_hex("#1976D2").unwrap());
/// let light = Hct::new(seed.hue(), seed.chroma(), 90.0);
/// assert!((light.tone() - 90.0).abs() < 0.5);
/// ```
#[derive(Clone, Copy, PartialEq, Serialize)]
pub struct Hct {
    hue: f64,
    chroma: f64,
    tone: f64,
    #[serde(skip)]
    argb: Argb,
}

impl Hct {
    /// Solve for the displayable color closest to the requested values.
    ///
    /// - `hue`: any angle in degrees (normalized to [0, 360))
    /// - `chroma`: requested chroma, clamped to the sRGB maximum at this
    ///   hue and tone
    /// - `tone`: clamped to [0, 100]
    #[must_use]
    pub fn new(hue: f64, chroma: f64, tone: f64) -> Self {
        let tone = if tone.is_nan() { 0.0 } else { tone.clamp(0.0, 100.0) };
        let chroma = if chroma.is_nan() { 0.0 } else { chroma.max(0.0) };
        Self::from_argb(solve_to_argb(sanitize_degrees(hue), chroma, tone))
    }

    /// Measure an sRGB color.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        let cam = Cam16::from_argb(argb);
        Self {
            hue: cam.hue,
            chroma: cam.chroma,
            tone: argb.lstar().clamp(0.0, 100.0),
            argb,
        }
    }

    /// Hue angle in degrees, [0, 360).
    #[inline]
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Achieved chroma (may be below the requested chroma).
    #[inline]
    #[must_use]
    pub const fn chroma(&self) -> f64 {
        self.chroma
    }

    /// Tone (CIE L*), [0, 100].
    #[inline]
    #[must_use]
    pub const fn tone(&self) -> f64 {
        self.tone
    }

    /// The sRGB color this value was measured from.
    #[inline]
    #[must_use]
    pub const fn to_argb(&self) -> Argb {
        self.argb
    }

    /// Same hue and chroma target at a different tone.
    ///
    /// The chroma passed to the solver is this value's achieved chroma,
    /// which may in turn be clamped further at the new tone.
    #[must_use]
    pub fn with_tone(&self, tone: f64) -> Self {
        Self::new(self.hue, self.chroma, tone)
    }

    /// Same hue and tone with a different chroma target.
    #[must_use]
    pub fn with_chroma(&self, chroma: f64) -> Self {
        Self::new(self.hue, chroma, self.tone)
    }

    /// Same chroma and tone at a different hue.
    #[must_use]
    pub fn with_hue(&self, hue: f64) -> Self {
        Self::new(hue, self.chroma, self.tone)
    }
}

/// The most chroma sRGB can display at `hue` and `tone`.
///
/// This is the clamping curve applied by [`Hct::new`].
#[must_use]
pub fn max_chroma(hue: f64, tone: f64) -> f64 {
    // 200 exceeds every displayable chroma; the solver clamps it.
    Hct::new(hue, 200.0, tone).chroma()
}

impl fmt::Debug for Hct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hct(h: {:.2}, c: {:.2}, t: {:.2}, {})",
            self.hue,
            self.chroma,
            self.tone,
            self.argb.to_hex()
        )
    }
}

impl From<Argb> for Hct {
    fn from(argb: Argb) -> Self {
        Self::from_argb(argb)
    }
}

impl From<Hct> for Argb {
    fn from(hct: Hct) -> Self {
        hct.to_argb()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
