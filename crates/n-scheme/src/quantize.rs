//! Median-cut quantization of image pixels into weighted candidates.
//!
//! Only fully opaque pixels count. The exact-color histogram lives in an
//! ordered map keyed by RGB, so the candidate list depends only on the
//! pixel values, never on hashing or iteration accidents.

use std::collections::BTreeMap;

use n_hct::Argb;
use serde::Serialize;
use tracing::trace;

use crate::error::{ColorError, Result};

/// Candidate cap when the caller does not choose one.
pub const DEFAULT_MAX_COLORS: usize = 128;

/// Raw RGBA pixels, row-major, four bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap decoded pixel bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError::ImageDecode`] when `rgba.len()` is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        let expected = u64::from(width) * u64::from(height) * 4;
        if rgba.len() as u64 != expected {
            return Err(ColorError::ImageDecode(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height} RGBA",
                rgba.len()
            )));
        }
        Ok(Self { width, height, rgba })
    }

    /// Build a buffer from packed colors, row-major.
    ///
    /// # Errors
    ///
    /// Same size check as [`PixelBuffer::new`].
    pub fn from_argb(width: u32, height: u32, pixels: &[Argb]) -> Result<Self> {
        let rgba = pixels
            .iter()
            .flat_map(|p| [p.red(), p.green(), p.blue(), p.alpha()])
            .collect();
        Self::new(width, height, rgba)
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Every pixel, row-major.
    pub fn pixels(&self) -> impl Iterator<Item = Argb> + '_ {
        self.rgba
            .chunks_exact(4)
            .map(|px| Argb::from_rgba(px[0], px[1], px[2], px[3]))
    }
}

/// A representative color and how many pixels it stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuantizedColor {
    pub argb: Argb,
    pub population: u32,
}

/// One distinct opaque color and its pixel count.
#[derive(Clone, Copy)]
struct Entry {
    rgb: [u8; 3],
    count: u32,
}

/// A contiguous run of histogram entries.
#[derive(Clone, Copy)]
struct ColorBox {
    start: usize,
    end: usize,
    population: u64,
}

impl ColorBox {
    const fn is_splittable(&self) -> bool {
        self.end - self.start > 1
    }
}

/// Reduce an image to at most `max_colors` weighted candidates.
///
/// Boxes are split largest-population first, on the channel with the
/// widest range, at the population median. The result is sorted by
/// population descending; equal populations keep box creation order.
///
/// # Errors
///
/// Returns [`ColorError::EmptyImageSource`] when no pixel is fully
/// opaque.
pub fn quantize(image: &PixelBuffer, max_colors: usize) -> Result<Vec<QuantizedColor>> {
    let max_colors = max_colors.max(1);

    let mut histogram: BTreeMap<[u8; 3], u32> = BTreeMap::new();
    for px in image.pixels().filter(|p| p.is_opaque()) {
        *histogram.entry([px.red(), px.green(), px.blue()]).or_default() += 1;
    }
    if histogram.is_empty() {
        return Err(ColorError::EmptyImageSource);
    }

    let mut entries: Vec<Entry> = histogram
        .into_iter()
        .map(|(rgb, count)| Entry { rgb, count })
        .collect();
    let total: u64 = entries.iter().map(|e| u64::from(e.count)).sum();

    let mut boxes = vec![ColorBox { start: 0, end: entries.len(), population: total }];
    while boxes.len() < max_colors {
        let Some(index) = largest_splittable(&boxes) else {
            break;
        };
        let (left, right) = split(&mut entries, boxes[index]);
        boxes[index] = left;
        boxes.push(right);
    }

    trace!(
        distinct = entries.len(),
        boxes = boxes.len(),
        max_colors,
        "median cut complete"
    );

    let mut colors: Vec<QuantizedColor> = boxes
        .iter()
        .map(|b| QuantizedColor {
            argb: average(&entries[b.start..b.end], b.population),
            population: u32::try_from(b.population).unwrap_or(u32::MAX),
        })
        .collect();
    // Stable sort: ties stay in creation order.
    colors.sort_by(|a, b| b.population.cmp(&a.population));
    Ok(colors)
}

/// First box with the greatest population among those with more than one
/// distinct color.
fn largest_splittable(boxes: &[ColorBox]) -> Option<usize> {
    let mut best: Option<usize> = None;
    for (i, b) in boxes.iter().enumerate() {
        if !b.is_splittable() {
            continue;
        }
        if best.is_none_or(|j| b.population > boxes[j].population) {
            best = Some(i);
        }
    }
    best
}

/// Split a box at its population median along its widest channel.
fn split(entries: &mut [Entry], b: ColorBox) -> (ColorBox, ColorBox) {
    let slice = &mut entries[b.start..b.end];
    let axis = widest_channel(slice);
    slice.sort_by_key(|e| (e.rgb[axis], e.rgb));

    let half = b.population.div_ceil(2);
    let mut running = 0u64;
    let mut cut = slice.len() - 1;
    for (i, e) in slice.iter().enumerate() {
        running += u64::from(e.count);
        if running >= half {
            cut = i + 1;
            break;
        }
    }
    // Both halves must keep at least one color.
    let cut = cut.clamp(1, slice.len() - 1);

    let left_population: u64 = slice[..cut].iter().map(|e| u64::from(e.count)).sum();
    let mid = b.start + cut;
    (
        ColorBox { start: b.start, end: mid, population: left_population },
        ColorBox { start: mid, end: b.end, population: b.population - left_population },
    )
}

/// Channel index (0 = red, 1 = green, 2 = blue) with the largest spread.
/// Ties prefer the earlier channel.
fn widest_channel(entries: &[Entry]) -> usize {
    let mut lo = [u8::MAX; 3];
    let mut hi = [u8::MIN; 3];
    for e in entries {
        for c in 0..3 {
            lo[c] = lo[c].min(e.rgb[c]);
            hi[c] = hi[c].max(e.rgb[c]);
        }
    }
    let mut axis = 0;
    for c in 1..3 {
        if hi[c] - lo[c] > hi[axis] - lo[axis] {
            axis = c;
        }
    }
    axis
}

/// Population-weighted mean color, rounded half-to-even.
fn average(entries: &[Entry], population: u64) -> Argb {
    let mut sums = [0u64; 3];
    for e in entries {
        for c in 0..3 {
            sums[c] += u64::from(e.rgb[c]) * u64::from(e.count);
        }
    }
    let channel = |sum: u64| (sum as f64 / population as f64).round_ties_even().clamp(0.0, 255.0) as u8;
    Argb::from_rgb(channel(sums[0]), channel(sums[1]), channel(sums[2]))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
