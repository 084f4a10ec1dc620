//! WCAG contrast ratio measurement and validation.
//!
//! Thresholds follow WCAG 2.1:
//!
//! - Normal text (AA): contrast ratio >= 4.5:1
//! - Large text (AA): contrast ratio >= 3.0:1
//! - Enhanced (AAA): contrast ratio >= 7.0:1
//!
//! Measurement always happens on the final 8-bit sRGB colors. Tone
//! differences in HCT predict contrast well, but the number a user's
//! checker reports comes from these bytes, so that is what gets validated.

use n_hct::Argb;
use n_hct::color::srgb_to_linear;
use serde::Serialize;

use crate::error::{ColorError, Result};

/// Minimum ratio for normal text (WCAG AA).
pub const DEFAULT_MIN_RATIO: f64 = 4.5;

/// Minimum ratio for large text (WCAG AA).
pub const LARGE_TEXT_MIN_RATIO: f64 = 3.0;

/// Minimum ratio for normal text (WCAG AAA).
pub const AAA_MIN_RATIO: f64 = 7.0;

/// WCAG relative luminance of an 8-bit color, from 0.0 (black) to 1.0
/// (white). Alpha is ignored.
///
/// Channels are decoded with the same sRGB transfer curve the HCT solver
/// uses, then weighted 0.2126 / 0.7152 / 0.0722.
#[must_use]
pub fn relative_luminance(color: Argb) -> f64 {
    let r_lin = srgb_to_linear(f64::from(color.red()) / 255.0);
    let g_lin = srgb_to_linear(f64::from(color.green()) / 255.0);
    let b_lin = srgb_to_linear(f64::from(color.blue()) / 255.0);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Contrast ratio between two colors, lighter over darker with the
/// 0.05 flare term. Symmetric in its arguments; black on white is 21.
///
/// This is the number [`validate_pairs`] compares against its minimum.
#[must_use]
pub fn contrast_ratio(a: Argb, b: Argb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// A labelled foreground/background pair to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContrastPair {
    pub label: String,
    pub foreground: Argb,
    pub background: Argb,
}

impl ContrastPair {
    #[must_use]
    pub fn new(label: impl Into<String>, foreground: Argb, background: Argb) -> Self {
        Self { label: label.into(), foreground, background }
    }

    /// Build a pair from `#RRGGBB` strings.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::InvalidColorFormat`] if either color fails
    /// to parse.
    pub fn from_hex(label: impl Into<String>, foreground: &str, background: &str) -> Result<Self> {
        Ok(Self::new(label, Argb::from_hex(foreground)?, Argb::from_hex(background)?))
    }

    #[must_use]
    pub fn ratio(&self) -> f64 {
        contrast_ratio(self.foreground, self.background)
    }
}

/// Outcome for one pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    pub pair_name: String,
    pub ratio: f64,
    pub passes: bool,
}

/// Pairs split by outcome, each list in input order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContrastValidationResult {
    pub passed: Vec<PairResult>,
    pub failed: Vec<PairResult>,
    pub min_contrast_required: f64,
}

impl ContrastValidationResult {
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Check every pair against `min_ratio`.
///
/// A pair passes when its ratio is `>= min_ratio`. An empty input yields
/// empty lists.
///
/// # Errors
///
/// Returns [`ColorError::InvalidContrastRatio`] when `min_ratio` is not
/// finite or is below 1.0.
pub fn validate_pairs(pairs: &[ContrastPair], min_ratio: f64) -> Result<ContrastValidationResult> {
    if !min_ratio.is_finite() || min_ratio < 1.0 {
        return Err(ColorError::InvalidContrastRatio(min_ratio));
    }

    let mut passed = Vec::new();
    let mut failed = Vec::new();
    for pair in pairs {
        let ratio = pair.ratio();
        let result = PairResult {
            pair_name: pair.label.clone(),
            ratio,
            passes: ratio >= min_ratio,
        };
        if result.passes {
            passed.push(result);
        } else {
            failed.push(result);
        }
    }

    Ok(ContrastValidationResult { passed, failed, min_contrast_required: min_ratio })
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    fn hex(s: &str) -> Argb {
        Argb::from_hex(s).unwrap()
    }

    // ── Luminance ──

    #[test]
    fn luminance_extremes() {
        assert!(approx_eq(relative_luminance(Argb::BLACK), 0.0, 1e-12));
        assert!(approx_eq(relative_luminance(Argb::WHITE), 1.0, 1e-12));
    }

    #[test]
    fn luminance_weights_green_most() {
        let r = relative_luminance(hex("#FF0000"));
        let g = relative_luminance(hex("#00FF00"));
        let b = relative_luminance(hex("#0000FF"));
        assert!(g > r && r > b);
        assert!(approx_eq(g, 0.7152, 1e-9));
    }

    #[test]
    fn luminance_uses_linear_segment_below_threshold() {
        // 10/255 = 0.0392, under the 0.04045 knee.
        let expected = (10.0 / 255.0) / 12.92;
        assert!(approx_eq(relative_luminance(Argb::from_rgb(10, 10, 10)), expected, 1e-12));
    }

    // ── Ratio ──

    #[test]
    fn black_on_white_is_21() {
        assert!(approx_eq(contrast_ratio(Argb::BLACK, Argb::WHITE), 21.0, 1e-9));
    }

    #[test]
    fn ratio_is_symmetric() {
        let a = hex("#1976D2");
        let b = hex("#FAFAFA");
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 1e-12));
    }

    #[test]
    fn same_color_is_one() {
        let c = hex("#777777");
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 1e-12));
    }

    #[test]
    fn known_gray_on_white() {
        // #767676 is the classic lightest gray passing AA on white.
        let ratio = contrast_ratio(hex("#767676"), Argb::WHITE);
        assert!(ratio >= DEFAULT_MIN_RATIO && ratio < 4.6, "ratio: {ratio}");
    }

    // ── Validation ──

    #[test]
    fn validate_splits_in_order() {
        let pairs = vec![
            ContrastPair::from_hex("a", "#000000", "#FFFFFF").unwrap(),
            ContrastPair::from_hex("b", "#777777", "#888888").unwrap(),
            ContrastPair::from_hex("c", "#FFFFFF", "#1976D2").unwrap(),
            ContrastPair::from_hex("d", "#FEFEFE", "#FFFFFF").unwrap(),
        ];
        let result = validate_pairs(&pairs, DEFAULT_MIN_RATIO).unwrap();
        let passed: Vec<_> = result.passed.iter().map(|p| p.pair_name.as_str()).collect();
        let failed: Vec<_> = result.failed.iter().map(|p| p.pair_name.as_str()).collect();
        assert_eq!(passed, ["a", "c"]);
        assert_eq!(failed, ["b", "d"]);
        assert!(!result.all_passed());
        assert!(approx_eq(result.min_contrast_required, 4.5, 1e-12));
    }

    #[test]
    fn boundary_ratio_passes() {
        let pair = ContrastPair::new("x", Argb::BLACK, Argb::WHITE);
        let result = validate_pairs(&[pair.clone()], pair.ratio()).unwrap();
        assert_eq!(result.passed.len(), 1);
    }

    #[test]
    fn empty_input_is_empty_result() {
        let result = validate_pairs(&[], LARGE_TEXT_MIN_RATIO).unwrap();
        assert!(result.passed.is_empty() && result.failed.is_empty());
        assert!(result.all_passed());
    }

    #[test]
    fn rejects_bad_min_ratio() {
        assert_eq!(validate_pairs(&[], 0.5), Err(ColorError::InvalidContrastRatio(0.5)));
        assert!(matches!(
            validate_pairs(&[], f64::NAN),
            Err(ColorError::InvalidContrastRatio(_))
        ));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert_eq!(
            ContrastPair::from_hex("x", "#12345", "#FFFFFF"),
            Err(ColorError::InvalidColorFormat("#12345".into()))
        );
    }

    #[test]
    fn aaa_is_stricter() {
        let pair = ContrastPair::from_hex("x", "#666666", "#FFFFFF").unwrap();
        assert!(validate_pairs(&[pair.clone()], DEFAULT_MIN_RATIO).unwrap().all_passed());
        assert!(!validate_pairs(&[pair], AAA_MIN_RATIO).unwrap().all_passed());
    }
}
