// SPDX-License-Identifier: MIT
//
// n-hct — Color science core for n-chroma.
//
// Everything the tonal color system needs to move between the 8-bit
// sRGB world and HCT (hue, chroma, tone): packed ARGB values, hex
// parsing, sRGB linearization, CIE L*, the CAM16 appearance model, and
// the solver that turns a requested hue/chroma/tone back into the
// closest displayable sRGB color.
//
//   hex ↔ Argb ↔ linear sRGB ↔ XYZ ↔ CAM16 (hue, chroma) + L* (tone) = HCT
//
// All math is f64 and fully deterministic. Quantization to 8-bit
// channels rounds half-to-even so the same HCT always lands on the same
// hex string.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Channel math casts between f64 and small integers constantly.
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
// CAM16 names (rA, gA, bA, ...) are inherently similar.
#![allow(clippy::similar_names)]
// Published matrix constants are kept at full precision.
#![allow(clippy::excessive_precision)]
#![allow(clippy::unreadable_literal)]

pub mod cam16;
pub mod color;
pub mod hct;
pub mod solver;

pub use color::{Argb, ParseColorError};
pub use hct::{Hct, max_chroma};
