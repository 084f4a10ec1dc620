// SPDX-License-Identifier: MIT
//
// Packed ARGB colors, hex strings, and the sRGB transfer functions.
//
// Conversion pipeline (this module covers the left half):
//
//   "#RRGGBB" ↔ Argb (0xAARRGGBB) ↔ linear sRGB (0–100) ↔ XYZ ↔ L*
//
// Linear components are kept on a 0–100 scale (Y of white = 100), the
// convention shared by CAM16 and CIE L*. Relative luminance for WCAG
// contrast uses the same curve on a 0–1 scale via [`srgb_to_linear`].

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Linear sRGB → CIE XYZ (D65).
pub const SRGB_TO_XYZ: [[f64; 3]; 3] = [
    [0.41233895, 0.35762064, 0.18051042],
    [0.2126, 0.7152, 0.0722],
    [0.01932141, 0.11916382, 0.95034478],
];

/// D65 white point, Y normalized to 100.
pub const WHITE_POINT_D65: [f64; 3] = [95.047, 100.0, 108.883];

/// Contribution of each linear channel to luminance Y.
pub const Y_FROM_LINEAR_RGB: [f64; 3] = [0.2126, 0.7152, 0.0722];

// ─── Errors ──────────────────────────────────────────────────────────────────

/// A color string did not match `#RRGGBB`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid color {input:?}: expected #RRGGBB")]
pub struct ParseColorError {
    pub input: String,
}

// ─── Argb ────────────────────────────────────────────────────────────────────

/// A packed 32-bit color, `0xAARRGGBB`.
///
/// This is the interchange format for every color the generator emits.
/// Colors produced by the solver are always opaque.
///
/// # Examples
///
/// ```
/// use n_hct::Argb;
///
/// let blue = Argb::from_hex("#1976d2").unwrap();
/// assert_eq!(blue.to_hex(), "#1976D2");
/// assert_eq!((blue.red(), blue.green(), blue.blue()), (0x19, 0x76, 0xd2));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque black.
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);

    /// Opaque white.
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Pack opaque 8-bit channels.
    #[inline]
    #[must_use]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self(0xff00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    /// Pack 8-bit channels with alpha.
    #[inline]
    #[must_use]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self((a as u32) << 24 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    #[inline]
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[inline]
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[inline]
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[inline]
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Whether alpha is 255.
    #[inline]
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.alpha() == 0xff
    }

    /// Parse a `#RRGGBB` string (hex digits are case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ParseColorError`] for anything other than a `#` followed
    /// by exactly six hex digits.
    pub fn from_hex(s: &str) -> Result<Self, ParseColorError> {
        parse_hex(s).ok_or_else(|| ParseColorError { input: s.to_string() })
    }

    /// Format as upper-case `#RRGGBB` (alpha is dropped).
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.red(), self.green(), self.blue())
    }

    /// Linear sRGB components on a 0–100 scale.
    #[must_use]
    pub fn to_linear_rgb(self) -> [f64; 3] {
        [
            linearized(self.red()),
            linearized(self.green()),
            linearized(self.blue()),
        ]
    }

    /// Quantize linear sRGB (0–100 scale) to an opaque color.
    ///
    /// Out-of-range components clamp to the nearest channel value.
    #[must_use]
    pub fn from_linear_rgb(linear: [f64; 3]) -> Self {
        Self::from_rgb(
            delinearized(linear[0]),
            delinearized(linear[1]),
            delinearized(linear[2]),
        )
    }

    /// CIE XYZ (D65, Y of white = 100).
    #[must_use]
    pub fn to_xyz(self) -> [f64; 3] {
        matrix_multiply(self.to_linear_rgb(), &SRGB_TO_XYZ)
    }

    /// CIE L* (perceptual lightness, 0–100). This is HCT tone.
    #[must_use]
    pub fn lstar(self) -> f64 {
        lstar_from_y(self.to_xyz()[1])
    }

    /// The neutral gray with the given L*.
    #[must_use]
    pub fn from_lstar(lstar: f64) -> Self {
        let component = delinearized(y_from_lstar(lstar));
        Self::from_rgb(component, component, component)
    }
}

impl FromStr for Argb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Argb({:#010x})", self.0)
    }
}

impl fmt::Display for Argb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

// ─── Transfer functions ──────────────────────────────────────────────────────

/// sRGB gamma decode for a component in 0.0–1.0 (WCAG 2.1 curve).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB gamma encode for a linear component in 0.0–1.0.
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// 8-bit channel → linear component on a 0–100 scale.
#[inline]
#[must_use]
pub fn linearized(component: u8) -> f64 {
    srgb_to_linear(f64::from(component) / 255.0) * 100.0
}

/// Linear component (0–100) → unrounded 8-bit channel value.
///
/// May fall outside 0–255 for out-of-gamut input.
#[inline]
#[must_use]
pub fn true_delinearized(component: f64) -> f64 {
    linear_to_srgb(component / 100.0) * 255.0
}

/// Linear component (0–100) → 8-bit channel, rounding half-to-even.
#[inline]
#[must_use]
pub fn delinearized(component: f64) -> u8 {
    to_u8(true_delinearized(component))
}

/// CIE L* → relative luminance Y (0–100).
#[must_use]
pub fn y_from_lstar(lstar: f64) -> f64 {
    100.0 * lab_inv_f((lstar + 16.0) / 116.0)
}

/// Relative luminance Y (0–100) → CIE L*.
#[must_use]
pub fn lstar_from_y(y: f64) -> f64 {
    lab_f(y / 100.0).mul_add(116.0, -16.0)
}

/// Multiply a row vector by a 3x3 matrix (`m · v`).
#[inline]
#[must_use]
pub fn matrix_multiply(v: [f64; 3], m: &[[f64; 3]; 3]) -> [f64; 3] {
    [
        m[0][2].mul_add(v[2], m[0][0].mul_add(v[0], m[0][1] * v[1])),
        m[1][2].mul_add(v[2], m[1][0].mul_add(v[0], m[1][1] * v[1])),
        m[2][2].mul_add(v[2], m[2][0].mul_add(v[0], m[2][1] * v[1])),
    ]
}

const LAB_EPSILON: f64 = 216.0 / 24389.0;
const LAB_KAPPA: f64 = 24389.0 / 27.0;

fn lab_f(t: f64) -> f64 {
    if t > LAB_EPSILON {
        t.cbrt()
    } else {
        LAB_KAPPA.mul_add(t, 16.0) / 116.0
    }
}

fn lab_inv_f(ft: f64) -> f64 {
    let ft3 = ft * ft * ft;
    if ft3 > LAB_EPSILON {
        ft3
    } else {
        116.0f64.mul_add(ft, -16.0) / LAB_KAPPA
    }
}

/// Round half-to-even and clamp into a channel value.
#[inline]
fn to_u8(v: f64) -> u8 {
    v.round_ties_even().clamp(0.0, 255.0) as u8
}

// ─── Hex parsing ─────────────────────────────────────────────────────────────

fn parse_hex(s: &str) -> Option<Argb> {
    let digits = s.strip_prefix('#')?.as_bytes();
    if digits.len() != 6 {
        return None;
    }
    let r = parse_hex_byte(&digits[0..2])?;
    let g = parse_hex_byte(&digits[2..4])?;
    let b = parse_hex_byte(&digits[4..6])?;
    Some(Argb::from_rgb(r, g, b))
}

const fn parse_hex_digit(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

fn parse_hex_byte(bytes: &[u8]) -> Option<u8> {
    let hi = parse_hex_digit(bytes[0])?;
    let lo = parse_hex_digit(bytes[1])?;
    Some(hi << 4 | lo)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    // ── Hex ──────────────────────────────────────────────────────────

    #[test]
    fn hex_parsing_rrggbb() {
        let c = Argb::from_hex("#1976D2").unwrap();
        assert_eq!(c, Argb(0xff19_76d2));
    }

    #[test]
    fn hex_parsing_is_case_insensitive() {
        assert_eq!(Argb::from_hex("#abcdef"), Argb::from_hex("#ABCDEF"));
    }

    #[test]
    fn hex_parsing_invalid() {
        for bad in ["", "#", "1976D2", "#1976D", "#1976D2F", "#GG0000", "#fff", "# 12345"] {
            let err = Argb::from_hex(bad).unwrap_err();
            assert_eq!(err.input, bad);
        }
    }

    #[test]
    fn hex_output_is_upper_case() {
        assert_eq!(Argb::from_rgb(0xab, 0x0c, 0xff).to_hex(), "#AB0CFF");
    }

    #[test]
    fn from_str_matches_from_hex() {
        let parsed: Argb = "#336699".parse().unwrap();
        assert_eq!(parsed, Argb::from_rgb(0x33, 0x66, 0x99));
    }

    // ── Channels ─────────────────────────────────────────────────────

    #[test]
    fn channel_accessors() {
        let c = Argb::from_rgba(1, 2, 3, 4);
        assert_eq!((c.red(), c.green(), c.blue(), c.alpha()), (1, 2, 3, 4));
        assert!(!c.is_opaque());
        assert!(Argb::from_rgb(1, 2, 3).is_opaque());
    }

    // ── Transfer functions ───────────────────────────────────────────

    #[test]
    fn linearization_roundtrips_every_channel() {
        for v in 0..=255u8 {
            assert_eq!(delinearized(linearized(v)), v, "channel {v}");
        }
    }

    #[test]
    fn delinearized_clamps() {
        assert_eq!(delinearized(-5.0), 0);
        assert_eq!(delinearized(150.0), 255);
    }

    #[test]
    fn rounding_is_half_to_even() {
        assert_eq!(to_u8(2.5), 2);
        assert_eq!(to_u8(3.5), 4);
        assert_eq!(to_u8(254.5), 254);
    }

    // ── L* ───────────────────────────────────────────────────────────

    #[test]
    fn lstar_of_black_and_white() {
        assert!(approx_eq(Argb::BLACK.lstar(), 0.0, 1e-9));
        assert!(approx_eq(Argb::WHITE.lstar(), 100.0, 1e-3));
    }

    #[test]
    fn lstar_y_roundtrip() {
        for l in [0.0, 5.0, 18.0, 50.0, 77.7, 100.0] {
            assert!(approx_eq(lstar_from_y(y_from_lstar(l)), l, 1e-9), "L* {l}");
        }
    }

    #[test]
    fn from_lstar_is_gray() {
        let c = Argb::from_lstar(50.0);
        assert_eq!(c.red(), c.green());
        assert_eq!(c.green(), c.blue());
        assert!(approx_eq(c.lstar(), 50.0, 0.5));
    }

    #[test]
    fn mid_gray_lstar() {
        // sRGB 119 is the classic L* ≈ 50 gray.
        let l = Argb::from_rgb(119, 119, 119).lstar();
        assert!(approx_eq(l, 50.0, 0.5), "L*: {l}");
    }
}
