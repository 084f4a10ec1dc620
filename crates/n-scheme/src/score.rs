//! Seed scoring — choosing the one candidate a color system grows from.
//!
//! A good seed is colorful, covers a meaningful share of the image, and
//! sits in a hue family that the image actually uses. Near-grays,
//! near-blacks, near-whites, and specks under 1% of the image are never
//! chosen. When nothing qualifies, a fixed default blue is used instead.

use n_hct::{Argb, Hct};
use serde::Serialize;

use crate::quantize::QuantizedColor;

/// Fallback seed when no candidate is usable.
pub const DEFAULT_SEED: Argb = Argb(0xFF42_85F4);

/// Chroma the scorer considers ideal.
pub const TARGET_CHROMA: f64 = 48.0;

const WEIGHT_PROPORTION: f64 = 0.7;
const WEIGHT_CHROMA_ABOVE: f64 = 0.3;
const WEIGHT_CHROMA_BELOW: f64 = 0.1;
const HUE_WINDOW: i32 = 15;

const MIN_CHROMA: f64 = 5.0;
const MIN_TONE: f64 = 10.0;
const MAX_TONE: f64 = 90.0;
const MIN_SHARE: f64 = 0.01;

/// The winning seed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoredSeed {
    pub argb: Argb,
    pub score: f64,
    /// True when no candidate was usable and [`DEFAULT_SEED`] was returned.
    pub fell_back: bool,
}

impl ScoredSeed {
    const fn fallback() -> Self {
        Self { argb: DEFAULT_SEED, score: 0.0, fell_back: true }
    }
}

/// Pick the highest-scoring usable candidate.
///
/// Ties keep the earlier candidate, so the quantizer's ordering decides.
#[must_use]
pub fn score(candidates: &[QuantizedColor]) -> ScoredSeed {
    let total: u64 = candidates.iter().map(|c| u64::from(c.population)).sum();
    if total == 0 {
        return ScoredSeed::fallback();
    }
    let total = total as f64;

    let hcts: Vec<Hct> = candidates.iter().map(|c| Hct::from_argb(c.argb)).collect();

    let mut hue_population = [0u64; 360];
    for (c, hct) in candidates.iter().zip(&hcts) {
        hue_population[hue_bucket(hct.hue())] += u64::from(c.population);
    }

    let values: Vec<Option<f64>> = candidates
        .iter()
        .zip(&hcts)
        .map(|(c, hct)| {
            let share = f64::from(c.population) / total;
            if hct.chroma() < MIN_CHROMA
                || hct.tone() < MIN_TONE
                || hct.tone() > MAX_TONE
                || share < MIN_SHARE
            {
                return None;
            }

            let center = hue_bucket(hct.hue()) as i32;
            let neighbors: u64 = (center - HUE_WINDOW..=center + HUE_WINDOW)
                .map(|h| hue_population[h.rem_euclid(360) as usize])
                .sum();
            let excitement = neighbors as f64 / total;

            let weight = if hct.chroma() < TARGET_CHROMA { WEIGHT_CHROMA_BELOW } else { WEIGHT_CHROMA_ABOVE };
            Some((excitement * 100.0).mul_add(WEIGHT_PROPORTION, (hct.chroma() - TARGET_CHROMA) * weight))
        })
        .collect();

    match best_index(&values) {
        Some((index, score)) => ScoredSeed { argb: candidates[index].argb, score, fell_back: false },
        None => ScoredSeed::fallback(),
    }
}

/// Index and value of the highest usable score. Equal scores keep the
/// earlier index.
fn best_index(values: &[Option<f64>]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, value) in values.iter().enumerate() {
        let Some(value) = *value else { continue };
        if best.is_none_or(|(_, b)| value > b) {
            best = Some((index, value));
        }
    }
    best
}

/// Integer degree bucket for a hue in [0, 360).
fn hue_bucket(hue: f64) -> usize {
    (hue.floor() as usize).min(359)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
