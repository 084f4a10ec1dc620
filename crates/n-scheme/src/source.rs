//! Image acquisition — the only asynchronous edge of the crate.
//!
//! A [`PixelSource`] produces decoded RGBA pixels. Decoding is CPU-bound
//! and may touch the filesystem, so the provided sources run it on
//! tokio's blocking pool and hand the finished buffer back to the caller.
//! Everything after that point is the synchronous core.

use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;

use image::DynamicImage;
use image::imageops::FilterType;
use tracing::debug;

use crate::error::{ColorError, Result};
use crate::quantize::PixelBuffer;
use crate::system::{ColorSystem, GenerationOptions, SeedSource, generate_color_system};

/// Something that can produce decoded pixels.
pub trait PixelSource {
    fn load(&self) -> impl Future<Output = Result<PixelBuffer>> + Send;
}

/// An already-decoded buffer is its own source.
impl PixelSource for PixelBuffer {
    fn load(&self) -> impl Future<Output = Result<PixelBuffer>> + Send {
        let pixels = self.clone();
        async move { Ok(pixels) }
    }
}

/// An image file on disk (PNG, JPEG or WebP).
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    max_dimension: Option<u32>,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), max_dimension: None }
    }

    /// Downscale so neither side exceeds `max` pixels before sampling.
    #[must_use]
    pub const fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = Some(max);
        self
    }
}

impl PixelSource for FileSource {
    fn load(&self) -> impl Future<Output = Result<PixelBuffer>> + Send {
        let path = self.path.clone();
        let max_dimension = self.max_dimension;
        async move {
            tokio::task::spawn_blocking(move || {
                let image = image::open(&path)
                    .map_err(|e| ColorError::ImageDecode(format!("{}: {e}", path.display())))?;
                to_pixels(image, max_dimension)
            })
            .await
            .map_err(|e| ColorError::ImageDecode(format!("decode task failed: {e}")))?
        }
    }
}

/// Encoded image bytes already in memory.
#[derive(Debug, Clone)]
pub struct BytesSource {
    bytes: Arc<[u8]>,
    max_dimension: Option<u32>,
}

impl BytesSource {
    #[must_use]
    pub fn new(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self { bytes: bytes.into(), max_dimension: None }
    }

    /// Downscale so neither side exceeds `max` pixels before sampling.
    #[must_use]
    pub const fn with_max_dimension(mut self, max: u32) -> Self {
        self.max_dimension = Some(max);
        self
    }
}

impl PixelSource for BytesSource {
    fn load(&self) -> impl Future<Output = Result<PixelBuffer>> + Send {
        let bytes = Arc::clone(&self.bytes);
        let max_dimension = self.max_dimension;
        async move {
            tokio::task::spawn_blocking(move || {
                let image = image::load_from_memory(&bytes)?;
                to_pixels(image, max_dimension)
            })
            .await
            .map_err(|e| ColorError::ImageDecode(format!("decode task failed: {e}")))?
        }
    }
}

fn to_pixels(image: DynamicImage, max_dimension: Option<u32>) -> Result<PixelBuffer> {
    let (width, height) = (image.width(), image.height());
    let image = match max_dimension {
        Some(max) if max > 0 && (width > max || height > max) => image.resize(max, max, FilterType::Triangle),
        _ => image,
    };
    let rgba = image.to_rgba8();
    debug!(
        width,
        height,
        sampled_width = rgba.width(),
        sampled_height = rgba.height(),
        "image decoded"
    );
    PixelBuffer::new(rgba.width(), rgba.height(), rgba.into_raw())
}

/// Load pixels from `source`, then generate a color system from them.
///
/// # Errors
///
/// Any load error ([`ColorError::ImageDecode`]) plus everything
/// [`generate_color_system`] can return.
pub async fn generate_color_system_from<S: PixelSource>(
    source: &S,
    options: &GenerationOptions,
) -> Result<ColorSystem> {
    let pixels = source.load().await?;
    generate_color_system(&SeedSource::Image(pixels), options)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
