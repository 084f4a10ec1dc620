// SPDX-License-Identifier: MIT
//
// HCT → sRGB solver.
//
// Given a hue, a chroma, and a tone, find the sRGB color that has that
// tone exactly (to 8-bit precision) and the requested hue, with the
// requested chroma if it is displayable or otherwise the most chroma
// sRGB can show at that hue and tone.
//
// Two stages:
//
//   1. Newton iteration on CAM16 J. Tone fixes the target luminance Y.
//      For a candidate J the inverse CAM16 transform gives a linear RGB
//      color; its Y is compared against the target and J corrected.
//      If the color lands inside the sRGB cube, that is the answer.
//
//   2. Gamut clamping. When stage 1 leaves the cube, the requested
//      chroma is not displayable. All colors with luminance Y form a
//      plane slicing the linear sRGB cube into a convex polygon, and the
//      most chromatic color of a given hue sits on that polygon's edge.
//      We find the edge segment the hue falls on, then bisect along it,
//      snapping to the "critical planes" where a channel crosses an
//      8-bit rounding boundary, until the segment is smaller than one
//      code value.
//
// The clamping curve is therefore: chroma(hue, tone) = min(requested,
// max chroma on the constant-Y slice of the sRGB cube at that hue).
// Hue and tone are preserved; only chroma gives way.

use std::f64::consts::PI;

use crate::cam16::{ViewingConditions, sign};
use crate::color::{
    Argb, Y_FROM_LINEAR_RGB, matrix_multiply, srgb_to_linear, true_delinearized, y_from_lstar,
};

/// Linear RGB → CAM16 cone space, pre-scaled by the standard
/// conditions' discount factors.
const SCALED_DISCOUNT_FROM_LINRGB: [[f64; 3]; 3] = [
    [0.001200833568784504, 0.002389694492170889, 0.0002795742885861124],
    [0.0005891086651375999, 0.0029785502573438758, 0.0003270666104008398],
    [0.00010146692491640572, 0.0005364214359186694, 0.0032979401770712076],
];

/// Inverse of [`SCALED_DISCOUNT_FROM_LINRGB`].
const LINRGB_FROM_SCALED_DISCOUNT: [[f64; 3]; 3] = [
    [1373.2198709594231, -1100.4251190754821, -7.278681089101213],
    [-271.815969077903, 559.6580465940733, -32.46047482791194],
    [1.9622899599665666, -57.173814538844006, 308.7233197812385],
];

/// Solve for the sRGB color closest to the requested HCT.
///
/// - `hue_degrees`: any angle; normalized internally
/// - `chroma`: requested chroma, clamped to what sRGB can display
/// - `lstar`: tone, 0–100
#[must_use]
pub fn solve_to_argb(hue_degrees: f64, chroma: f64, lstar: f64) -> Argb {
    if chroma < 0.0001 || lstar < 0.0001 || lstar > 99.9999 {
        return Argb::from_lstar(lstar);
    }
    let hue_radians = sanitize_degrees(hue_degrees).to_radians();
    let y = y_from_lstar(lstar);
    if let Some(exact) = find_result_by_j(hue_radians, chroma, y) {
        return exact;
    }
    Argb::from_linear_rgb(bisect_to_limit(y, hue_radians))
}

/// Normalize an angle in degrees to [0, 360).
#[inline]
#[must_use]
pub fn sanitize_degrees(degrees: f64) -> f64 {
    let d = degrees % 360.0;
    if d < 0.0 { d + 360.0 } else { d }
}

// ─── Stage 1: Newton iteration on J ──────────────────────────────────────────

fn find_result_by_j(hue_radians: f64, chroma: f64, y: f64) -> Option<Argb> {
    // Initial estimate: J grows roughly with sqrt(Y).
    let mut j = y.sqrt() * 11.0;

    let vc = ViewingConditions::standard();
    let t_inner_coeff = 1.0 / (1.64 - 0.29f64.powf(vc.n)).powf(0.73);
    let e_hue = 0.25 * ((hue_radians + 2.0).cos() + 3.8);
    let p1 = e_hue * (50000.0 / 13.0) * vc.nc * vc.ncb;
    let h_sin = hue_radians.sin();
    let h_cos = hue_radians.cos();

    for round in 0..5 {
        let j_normalized = j / 100.0;
        let alpha = if chroma == 0.0 || j == 0.0 {
            0.0
        } else {
            chroma / j_normalized.sqrt()
        };
        let t = (alpha * t_inner_coeff).powf(1.0 / 0.9);
        let ac = vc.aw * j_normalized.powf(1.0 / vc.c / vc.z);
        let p2 = ac / vc.nbb;
        let gamma = 23.0 * (p2 + 0.305) * t / (23.0 * p1 + 11.0 * t * h_cos + 108.0 * t * h_sin);
        let a = gamma * h_cos;
        let b = gamma * h_sin;
        let r_a = (460.0 * p2 + 451.0 * a + 288.0 * b) / 1403.0;
        let g_a = (460.0 * p2 - 891.0 * a - 261.0 * b) / 1403.0;
        let b_a = (460.0 * p2 - 220.0 * a - 6300.0 * b) / 1403.0;
        let scaled = [
            inverse_chromatic_adaptation(r_a),
            inverse_chromatic_adaptation(g_a),
            inverse_chromatic_adaptation(b_a),
        ];
        let linrgb = matrix_multiply(scaled, &LINRGB_FROM_SCALED_DISCOUNT);

        if linrgb.iter().any(|&c| c < 0.0) {
            return None;
        }
        let fnj = luminance_of(linrgb);
        if fnj <= 0.0 {
            return None;
        }
        if round == 4 || (fnj - y).abs() < 0.002 {
            if linrgb.iter().any(|&c| c > 100.01) {
                return None;
            }
            return Some(Argb::from_linear_rgb(linrgb));
        }
        // Newton step, using 2 * fnj / j as the derivative estimate.
        j -= (fnj - y) * j / (2.0 * fnj);
    }
    None
}

fn inverse_chromatic_adaptation(adapted: f64) -> f64 {
    let adapted_abs = adapted.abs();
    let base = (27.13 * adapted_abs / (400.0 - adapted_abs)).max(0.0);
    sign(adapted) * base.powf(1.0 / 0.42)
}

// ─── Stage 2: bisection on the gamut boundary ────────────────────────────────

/// Bisect along the Y-plane polygon edge containing the target hue down
/// to sub-code-value precision. Returns linear RGB (0–100 scale).
fn bisect_to_limit(y: f64, target_hue: f64) -> [f64; 3] {
    let (mut left, mut right) = bisect_to_segment(y, target_hue);
    let mut left_hue = hue_of(left);

    for axis in 0..3 {
        if left[axis] == right[axis] {
            continue;
        }
        let (mut l_plane, mut r_plane) = if left[axis] < right[axis] {
            (
                critical_plane_below(true_delinearized(left[axis])),
                critical_plane_above(true_delinearized(right[axis])),
            )
        } else {
            (
                critical_plane_above(true_delinearized(left[axis])),
                critical_plane_below(true_delinearized(right[axis])),
            )
        };
        for _ in 0..8 {
            if (r_plane - l_plane).abs() <= 1 {
                break;
            }
            let m_plane = (l_plane + r_plane).div_euclid(2);
            let mid = set_coordinate(left, critical_plane(m_plane), right, axis);
            let mid_hue = hue_of(mid);
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                r_plane = m_plane;
            } else {
                left = mid;
                left_hue = mid_hue;
                l_plane = m_plane;
            }
        }
    }

    midpoint(left, right)
}

/// Walk the (up to 12) vertices where the Y-plane meets the cube's edges
/// and narrow down to the two that bracket the target hue.
fn bisect_to_segment(y: f64, target_hue: f64) -> ([f64; 3], [f64; 3]) {
    let mut left = [-1.0; 3];
    let mut right = left;
    let mut left_hue = 0.0;
    let mut right_hue = 0.0;
    let mut initialized = false;
    let mut uncut = true;

    for n in 0..12 {
        let Some(mid) = nth_vertex(y, n) else {
            continue;
        };
        let mid_hue = hue_of(mid);
        if !initialized {
            left = mid;
            right = mid;
            left_hue = mid_hue;
            right_hue = mid_hue;
            initialized = true;
            continue;
        }
        if uncut || are_in_cyclic_order(left_hue, mid_hue, right_hue) {
            uncut = false;
            if are_in_cyclic_order(left_hue, target_hue, mid_hue) {
                right = mid;
                right_hue = mid_hue;
            } else {
                left = mid;
                left_hue = mid_hue;
            }
        }
    }

    (left, right)
}

/// The n-th intersection of the plane of constant `y` with the 12 edges
/// of the linear RGB cube, if it lies on the edge.
fn nth_vertex(y: f64, n: usize) -> Option<[f64; 3]> {
    let [k_r, k_g, k_b] = Y_FROM_LINEAR_RGB;
    let coord_a = if n % 4 <= 1 { 0.0 } else { 100.0 };
    let coord_b = if n % 2 == 0 { 0.0 } else { 100.0 };
    let bounded = |x: f64| (0.0..=100.0).contains(&x);

    if n < 4 {
        let (g, b) = (coord_a, coord_b);
        let r = (y - g * k_g - b * k_b) / k_r;
        bounded(r).then_some([r, g, b])
    } else if n < 8 {
        let (b, r) = (coord_a, coord_b);
        let g = (y - r * k_r - b * k_b) / k_g;
        bounded(g).then_some([r, g, b])
    } else {
        let (r, g) = (coord_a, coord_b);
        let b = (y - r * k_r - g * k_g) / k_b;
        bounded(b).then_some([r, g, b])
    }
}

/// CAM16 hue (radians, -π..π) of a linear RGB color.
fn hue_of(linrgb: [f64; 3]) -> f64 {
    let scaled = matrix_multiply(linrgb, &SCALED_DISCOUNT_FROM_LINRGB);
    let r_a = chromatic_adaptation(scaled[0]);
    let g_a = chromatic_adaptation(scaled[1]);
    let b_a = chromatic_adaptation(scaled[2]);
    let a = (11.0 * r_a - 12.0 * g_a + b_a) / 11.0;
    let b = (r_a + g_a - 2.0 * b_a) / 9.0;
    b.atan2(a)
}

fn chromatic_adaptation(component: f64) -> f64 {
    let af = component.abs().powf(0.42);
    sign(component) * 400.0 * af / (af + 27.13)
}

/// Whether `b` is reached before `c` going counter-clockwise from `a`.
fn are_in_cyclic_order(a: f64, b: f64, c: f64) -> bool {
    sanitize_radians(b - a) < sanitize_radians(c - a)
}

fn sanitize_radians(angle: f64) -> f64 {
    (angle + PI * 8.0) % (PI * 2.0)
}

fn luminance_of(linrgb: [f64; 3]) -> f64 {
    let [k_r, k_g, k_b] = Y_FROM_LINEAR_RGB;
    k_b.mul_add(linrgb[2], k_r.mul_add(linrgb[0], k_g * linrgb[1]))
}

/// Linear value at which channel code `i` rounds up to `i + 1`.
fn critical_plane(i: i32) -> f64 {
    srgb_to_linear((f64::from(i) + 0.5) / 255.0) * 100.0
}

fn critical_plane_below(x: f64) -> i32 {
    (x - 0.5).floor() as i32
}

fn critical_plane_above(x: f64) -> i32 {
    (x - 0.5).ceil() as i32
}

fn set_coordinate(source: [f64; 3], coordinate: f64, target: [f64; 3], axis: usize) -> [f64; 3] {
    let t = (coordinate - source[axis]) / (target[axis] - source[axis]);
    [
        (target[0] - source[0]).mul_add(t, source[0]),
        (target[1] - source[1]).mul_add(t, source[1]),
        (target[2] - source[2]).mul_add(t, source[2]),
    ]
}

fn midpoint(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [(a[0] + b[0]) / 2.0, (a[1] + b[1]) / 2.0, (a[2] + b[2]) / 2.0]
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cam16::Cam16;
    use crate::color::linearized;

    #[test]
    fn achromatic_requests_are_gray() {
        let c = solve_to_argb(120.0, 0.0, 50.0);
        assert_eq!(c.red(), c.green());
        assert_eq!(c.green(), c.blue());
    }

    #[test]
    fn tone_extremes() {
        assert_eq!(solve_to_argb(200.0, 48.0, 0.0), Argb::BLACK);
        assert_eq!(solve_to_argb(200.0, 48.0, 100.0), Argb::WHITE);
    }

    #[test]
    fn in_gamut_request_hits_target() {
        let argb = solve_to_argb(259.37, 36.0, 40.0);
        let cam = Cam16::from_argb(argb);
        assert!((cam.chroma - 36.0).abs() < 1.0, "chroma: {}", cam.chroma);
        assert!((cam.hue - 259.37).abs() < 1.5, "hue: {}", cam.hue);
        assert!((argb.lstar() - 40.0).abs() < 0.5, "tone: {}", argb.lstar());
    }

    #[test]
    fn out_of_gamut_request_is_clamped() {
        // Nothing in sRGB reaches chroma 200; the result must still have
        // the requested tone and hue, with whatever chroma fits.
        let argb = solve_to_argb(259.37, 200.0, 40.0);
        let cam = Cam16::from_argb(argb);
        assert!(cam.chroma < 200.0);
        assert!(cam.chroma > 36.0, "clamped chroma too low: {}", cam.chroma);
        assert!((argb.lstar() - 40.0).abs() < 0.5, "tone: {}", argb.lstar());
        assert!((cam.hue - 259.37).abs() < 2.0, "hue: {}", cam.hue);
    }

    #[test]
    fn error_red_reference() {
        assert_eq!(solve_to_argb(25.0, 84.0, 40.0).to_hex(), "#BA1A1A");
    }

    #[test]
    fn hue_is_normalized() {
        assert_eq!(solve_to_argb(-100.0, 30.0, 60.0), solve_to_argb(260.0, 30.0, 60.0));
        assert_eq!(solve_to_argb(620.0, 30.0, 60.0), solve_to_argb(260.0, 30.0, 60.0));
    }

    #[test]
    fn sanitize_degrees_wraps() {
        assert!((sanitize_degrees(370.0) - 10.0).abs() < 1e-9);
        assert!((sanitize_degrees(-10.0) - 350.0).abs() < 1e-9);
        assert!(sanitize_degrees(360.0).abs() < 1e-9);
    }

    #[test]
    fn critical_planes_sit_between_codes() {
        for code in [0u8, 10, 128, 254] {
            let plane = critical_plane(i32::from(code));
            assert!(plane > linearized(code));
            assert!(plane < linearized(code + 1));
        }
    }

    #[test]
    fn every_tone_level_has_a_segment() {
        for tone in [1.0, 25.0, 50.0, 75.0, 99.0] {
            let y = y_from_lstar(tone);
            let vertices = (0..12).filter_map(|n| nth_vertex(y, n)).count();
            assert!(vertices >= 3, "tone {tone}: only {vertices} vertices");
        }
    }
}
