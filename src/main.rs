// SPDX-License-Identifier: MIT
//
// n-chroma — generate a tonal color system from a seed color or image.
//
// This is the command-line wrapper around the two library crates:
//
//   n-hct    → color science (CAM16, HCT, gamut clamping)
//   n-scheme → palettes, tone scales, themes, contrast validation
//
// Options are layered: built-in defaults, then an optional JSON config
// file, then command-line flags. The resulting color system is printed
// to stdout as JSON; logs go to stderr.
//
//   n-chroma "#1976D2" --themes
//   n-chroma --image wallpaper.png --variant vibrant --tones 10,40,90
//   n-chroma 25,118,210 --check 4.5     # exit 1 if any theme pair fails

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser};
use n_scheme::{
    ColorSystem, ColorVariant, FileSource, GenerationOptions, SeedSource, generate_color_system,
    generate_color_system_from,
};
use tracing::{debug, info};

/// Generate tonal color systems and light/dark themes.
#[derive(Parser, Debug)]
#[command(name = "n-chroma", version, about)]
struct Cli {
    /// Seed color: `#RRGGBB` or `r,g,b`
    #[arg(conflicts_with = "image")]
    seed: Option<String>,

    /// Extract the seed from an image (PNG, JPEG, WebP)
    #[arg(long, value_name = "PATH")]
    image: Option<PathBuf>,

    /// Downscale the image so neither side exceeds this many pixels
    #[arg(long, value_name = "PX", requires = "image")]
    max_dimension: Option<u32>,

    /// Palette variant: tonal-spot, vibrant, expressive, neutral, monochrome, fidelity
    #[arg(long)]
    variant: Option<String>,

    /// Comma-separated tone stops, e.g. 0,10,50,90,100
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    tones: Option<Vec<i32>>,

    /// Contrast level in -1.0..=1.0
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f64>,

    /// Include light and dark themes
    #[arg(long)]
    themes: bool,

    /// Validate theme text/background pairs against this ratio (implies --themes)
    #[arg(long, value_name = "RATIO")]
    check: Option<f64>,

    /// JSON file with generation options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Record the current time in the output metadata
    #[arg(long)]
    stamp: bool,

    /// Print JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);
    run(&cli).await
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let mut options = match &cli.config {
        Some(path) => load_options(path).await?,
        None => GenerationOptions::default(),
    };
    apply_overrides(&mut options, cli)?;
    debug!(?options, "generation options");

    let system = match (&cli.image, &cli.seed) {
        (Some(path), _) => {
            let mut source = FileSource::new(path);
            if let Some(max) = cli.max_dimension {
                source = source.with_max_dimension(max);
            }
            generate_color_system_from(&source, &options)
                .await
                .with_context(|| format!("failed to generate from image {}", path.display()))?
        }
        (None, Some(seed)) => {
            let source: SeedSource = seed.parse()?;
            generate_color_system(&source, &options)?
        }
        (None, None) => bail!("provide a seed color or --image PATH"),
    };
    info!(seed = %system.source.resolved_hex, "color system generated");

    let json = if cli.compact {
        serde_json::to_string(&system)?
    } else {
        serde_json::to_string_pretty(&system)?
    };
    println!("{json}");

    match cli.check {
        Some(min_ratio) => check_contrast(&system, min_ratio),
        None => Ok(ExitCode::SUCCESS),
    }
}

async fn load_options(path: &Path) -> Result<GenerationOptions> {
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Layer command-line flags over file/default options.
fn apply_overrides(options: &mut GenerationOptions, cli: &Cli) -> Result<()> {
    if let Some(name) = &cli.variant {
        options.variant = name.parse::<ColorVariant>()?;
    }
    if let Some(tones) = &cli.tones {
        options.tones.clone_from(tones);
    }
    if let Some(level) = cli.contrast {
        options.contrast_level = level;
    }
    if cli.themes || cli.check.is_some() {
        options.include_themes = true;
    }
    if cli.stamp {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).context("system clock is before 1970")?;
        options.generated_at_ms = Some(u64::try_from(now.as_millis()).unwrap_or(u64::MAX));
    }
    Ok(())
}

/// Validate both themes; failing pairs are reported on stderr.
fn check_contrast(system: &ColorSystem, min_ratio: f64) -> Result<ExitCode> {
    let Some(themes) = &system.themes else {
        bail!("contrast check needs themes");
    };

    let mut failures = 0;
    for theme in [&themes.light, &themes.dark] {
        let result = theme.validate(min_ratio)?;
        for pair in &result.failed {
            debug!(mode = ?theme.mode, pair = %pair.pair_name, ratio = pair.ratio, "contrast below minimum");
            eprintln!("{:?} {}: {:.2} < {min_ratio}", theme.mode, pair.pair_name, pair.ratio);
        }
        failures += result.failed.len();
    }

    if failures == 0 {
        info!(min_ratio, "all theme pairs pass");
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
