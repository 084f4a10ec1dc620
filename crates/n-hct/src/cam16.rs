// SPDX-License-Identifier: MIT
//
// CAM16 color appearance model.
//
// CAM16 predicts how a color looks under a given viewing environment.
// HCT takes its hue and chroma from CAM16 (which stay stable as
// lightness changes) and replaces CAM16's J with CIE L* so that tone
// differences map directly onto WCAG luminance contrast.
//
// Only the forward transform lives here. The inverse, constrained to a
// target luminance, is the solver's job (see `solver.rs`).

use std::f64::consts::PI;
use std::sync::LazyLock;

use crate::color::{Argb, WHITE_POINT_D65, y_from_lstar};

/// XYZ → CAM16 cone space (M16).
pub(crate) const XYZ_TO_CAM16RGB: [[f64; 3]; 3] = [
    [0.401288, 0.650173, -0.051461],
    [-0.250268, 1.204414, 0.045854],
    [-0.002079, 0.048952, 0.953127],
];

// ─── Viewing conditions ──────────────────────────────────────────────────────

/// The environment a color is assumed to be seen in.
///
/// Every HCT value in this crate uses [`ViewingConditions::standard`]:
/// D65 white, an adapting luminance of ~11.7 cd/m² (a gray world at
/// L* 50 under 200 lux), a mid-gray background, and average surround.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewingConditions {
    pub n: f64,
    pub aw: f64,
    pub nbb: f64,
    pub ncb: f64,
    pub c: f64,
    pub nc: f64,
    pub rgb_d: [f64; 3],
    pub fl: f64,
    pub fl_root: f64,
    pub z: f64,
}

static STANDARD: LazyLock<ViewingConditions> = LazyLock::new(|| {
    ViewingConditions::new(
        WHITE_POINT_D65,
        (200.0 / PI) * y_from_lstar(50.0) / 100.0,
        50.0,
        2.0,
        false,
    )
});

impl ViewingConditions {
    /// The shared default environment, computed once.
    #[must_use]
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Derive the model parameters for an environment.
    ///
    /// - `white_point`: XYZ of the adopted white
    /// - `adapting_luminance`: luminance of the adapting field, cd/m²
    /// - `background_lstar`: L* of the background
    /// - `surround`: 0 (dark) to 2 (average)
    /// - `discounting_illuminant`: assume full chromatic adaptation
    #[must_use]
    pub fn new(
        white_point: [f64; 3],
        adapting_luminance: f64,
        background_lstar: f64,
        surround: f64,
        discounting_illuminant: bool,
    ) -> Self {
        let [r_w, g_w, b_w] = crate::color::matrix_multiply(white_point, &XYZ_TO_CAM16RGB);

        let f = 0.8 + surround / 10.0;
        let c = if f >= 0.9 {
            lerp(0.59, 0.69, (f - 0.9) * 10.0)
        } else {
            lerp(0.525, 0.59, (f - 0.8) * 10.0)
        };
        let d = if discounting_illuminant {
            1.0
        } else {
            f * (1.0 - (1.0 / 3.6) * ((-adapting_luminance - 42.0) / 92.0).exp())
        };
        let d = d.clamp(0.0, 1.0);
        let nc = f;
        let rgb_d = [
            d * (100.0 / r_w) + 1.0 - d,
            d * (100.0 / g_w) + 1.0 - d,
            d * (100.0 / b_w) + 1.0 - d,
        ];

        let k = 1.0 / (5.0 * adapting_luminance + 1.0);
        let k4 = k * k * k * k;
        let k4f = 1.0 - k4;
        let fl = (0.1 * k4f * k4f).mul_add((5.0 * adapting_luminance).cbrt(), k4 * adapting_luminance);

        let n = y_from_lstar(background_lstar) / white_point[1];
        let z = 1.48 + n.sqrt();
        let nbb = 0.725 / n.powf(0.2);
        let ncb = nbb;

        let rgb_a = [
            adapted_response(fl * rgb_d[0] * r_w / 100.0),
            adapted_response(fl * rgb_d[1] * g_w / 100.0),
            adapted_response(fl * rgb_d[2] * b_w / 100.0),
        ];
        let aw = 0.05f64.mul_add(rgb_a[2], 2.0f64.mul_add(rgb_a[0], rgb_a[1])) * nbb;

        Self {
            n,
            aw,
            nbb,
            ncb,
            c,
            nc,
            rgb_d,
            fl,
            fl_root: fl.powf(0.25),
            z,
        }
    }
}

// ─── Cam16 ───────────────────────────────────────────────────────────────────

/// Appearance correlates of a color under the standard viewing conditions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cam16 {
    /// Hue angle in degrees, [0, 360).
    pub hue: f64,
    /// Colorfulness relative to the brightness of white.
    pub chroma: f64,
    /// Lightness (CAM16 J, not L*).
    pub j: f64,
}

impl Cam16 {
    /// Model an sRGB color.
    #[must_use]
    pub fn from_argb(argb: Argb) -> Self {
        Self::from_argb_in(argb, ViewingConditions::standard())
    }

    /// Model an sRGB color under explicit viewing conditions.
    #[must_use]
    pub fn from_argb_in(argb: Argb, vc: &ViewingConditions) -> Self {
        let xyz = argb.to_xyz();
        let cone = crate::color::matrix_multiply(xyz, &XYZ_TO_CAM16RGB);

        let r_a = signed_adapted_response(vc.rgb_d[0] * cone[0], vc.fl);
        let g_a = signed_adapted_response(vc.rgb_d[1] * cone[1], vc.fl);
        let b_a = signed_adapted_response(vc.rgb_d[2] * cone[2], vc.fl);

        // Redness-greenness and yellowness-blueness.
        let a = (11.0f64.mul_add(r_a, -12.0 * g_a) + b_a) / 11.0;
        let b = (r_a + g_a - 2.0 * b_a) / 9.0;

        let u = (20.0f64.mul_add(r_a, 20.0 * g_a) + 21.0 * b_a) / 20.0;
        let p2 = (40.0f64.mul_add(r_a, 20.0 * g_a) + b_a) / 20.0;

        let degrees = b.atan2(a).to_degrees();
        let hue = if degrees < 0.0 {
            degrees + 360.0
        } else if degrees >= 360.0 {
            degrees - 360.0
        } else {
            degrees
        };

        let ac = p2 * vc.nbb;
        let j = 100.0 * (ac / vc.aw).powf(vc.c * vc.z);

        let hue_prime = if hue < 20.14 { hue + 360.0 } else { hue };
        let e_hue = 0.25 * ((hue_prime.to_radians() + 2.0).cos() + 3.8);
        let p1 = 50000.0 / 13.0 * e_hue * vc.nc * vc.ncb;
        let t = p1 * a.hypot(b) / (u + 0.305);
        let alpha = t.powf(0.9) * (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
        let chroma = alpha * (j / 100.0).sqrt();

        Self { hue, chroma, j }
    }
}

/// Post-adaptation nonlinear compression for a non-negative input.
#[inline]
fn adapted_response(x: f64) -> f64 {
    let f = x.powf(0.42);
    400.0 * f / (f + 27.13)
}

/// Post-adaptation compression preserving the sign of the cone response.
#[inline]
fn signed_adapted_response(discounted: f64, fl: f64) -> f64 {
    let f = (fl * discounted.abs() / 100.0).powf(0.42);
    sign(discounted) * 400.0 * f / (f + 27.13)
}

/// -1, 0, or 1 (`f64::signum` maps 0.0 to 1.0).
#[inline]
pub(crate) fn sign(x: f64) -> f64 {
    if x < 0.0 {
        -1.0
    } else if x > 0.0 {
        1.0
    } else {
        0.0
    }
}

#[inline]
fn lerp(start: f64, stop: f64, amount: f64) -> f64 {
    (stop - start).mul_add(amount, start)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
