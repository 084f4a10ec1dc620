//! End-to-end tests for color system generation.
//!
//! Reference values come from seed #1976D2 under the tonal-spot variant.

use n_hct::{Argb, Hct};
use n_scheme::contrast::{DEFAULT_MIN_RATIO, contrast_ratio};
use n_scheme::quantize::quantize;
use n_scheme::{
    BytesSource, ColorError, ColorSystem, ColorVariant, ContrastPair, GenerationOptions, PixelBuffer, Role,
    SeedSource, ThemeMode, generate_color_system, generate_color_system_from, generate_tonal_palette,
    validate_contrast,
};
use pretty_assertions::assert_eq;

fn hex_seed(hex: &str) -> SeedSource {
    SeedSource::Hex(hex.to_string())
}

fn system(hex: &str, options: &GenerationOptions) -> ColorSystem {
    generate_color_system(&hex_seed(hex), options).unwrap()
}

fn with_themes() -> GenerationOptions {
    GenerationOptions { include_themes: true, ..Default::default() }
}

// ============================================================================
// Reference values
// ============================================================================

#[test]
fn tonal_spot_reference_colors() {
    let s = system("#1976D2", &GenerationOptions::default());
    assert_eq!(s.source.resolved_hex, "#1976D2");
    assert!(!s.source.fell_back_to_default);
    assert_eq!(s.palettes.primary.get(40).unwrap().hex, "#3C6090");
    assert_eq!(s.palettes.primary.get(90).unwrap().hex, "#D4E3FF");
    assert_eq!(s.palettes.error.get(40).unwrap().hex, "#BA1A1A");
}

#[test]
fn scale_endpoints_are_black_and_white() {
    let s = system("#1976D2", &GenerationOptions::default());
    for (role, scale) in s.palettes.iter() {
        assert_eq!(scale.get(0).unwrap().hex, "#000000", "{role}");
        assert_eq!(scale.get(100).unwrap().hex, "#FFFFFF", "{role}");
    }
}

#[test]
fn themes_use_fixed_tones() {
    let s = system("#1976D2", &with_themes());
    let themes = s.themes.unwrap();
    let light = themes.light.get("primary").unwrap();
    let dark = themes.dark.get("primary").unwrap();
    assert_eq!(light.tone, 40);
    assert_eq!(dark.tone, 80);
    assert_eq!(light.hex, "#3C6090");
    assert_eq!(themes.light.mode, ThemeMode::Light);
}

#[test]
fn themes_ignore_requested_stops() {
    let options = GenerationOptions { tones: vec![50], include_themes: true, ..Default::default() };
    let s = system("#1976D2", &options);
    assert_eq!(s.palettes.primary.len(), 1);
    assert_eq!(s.themes.unwrap().light.get("primary").unwrap().hex, "#3C6090");
}

#[test]
fn theme_pairs_pass_aa() {
    let s = system("#1976D2", &with_themes());
    let themes = s.themes.unwrap();
    for theme in [&themes.light, &themes.dark] {
        let result = validate_contrast(&theme.contrast_pairs(), DEFAULT_MIN_RATIO).unwrap();
        assert!(result.all_passed(), "{:?}: {:?}", theme.mode, result.failed);
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn deterministic_output() {
    let options = GenerationOptions { include_themes: true, generated_at_ms: Some(42), ..Default::default() };
    let a = serde_json::to_string(&system("#1976D2", &options)).unwrap();
    let b = serde_json::to_string(&system("#1976D2", &options)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn luminance_is_monotonic_in_every_variant() {
    for &variant in ColorVariant::all() {
        for hex in ["#1976D2", "#D32F2F", "#FFEB3B", "#00897B"] {
            let options = GenerationOptions { variant, ..Default::default() };
            let s = system(hex, &options);
            for (role, scale) in s.palettes.iter() {
                for pair in scale.tones.windows(2) {
                    assert!(
                        pair[1].contrast_against_black >= pair[0].contrast_against_black,
                        "{variant} {hex} {role}: {} -> {}",
                        pair[0].hex,
                        pair[1].hex
                    );
                    assert!(
                        pair[1].contrast_against_white <= pair[0].contrast_against_white,
                        "{variant} {hex} {role}: {} -> {}",
                        pair[0].hex,
                        pair[1].hex
                    );
                }
            }
        }
    }
}

#[test]
fn monochrome_is_gray() {
    let options = GenerationOptions { variant: ColorVariant::Monochrome, include_themes: true, ..Default::default() };
    let s = system("#1976D2", &options);
    for (role, scale) in s.palettes.iter() {
        for entry in scale.iter() {
            let c = entry.argb;
            assert!(c.red() == c.green() && c.green() == c.blue(), "{role} {}", entry.hex);
        }
    }
    for entry in &s.themes.unwrap().dark.colors {
        let c = entry.argb;
        assert!(c.red() == c.green() && c.green() == c.blue(), "{}", entry.name);
    }
}

#[test]
fn vibrant_primary_is_more_chromatic() {
    let chroma_at_40 = |variant| {
        let s = system("#1976D2", &GenerationOptions { variant, ..Default::default() });
        Hct::from_argb(s.palettes.get(Role::Primary).get(40).unwrap().argb).chroma()
    };
    assert!(chroma_at_40(ColorVariant::Vibrant) > chroma_at_40(ColorVariant::TonalSpot));
}

#[test]
fn contrast_level_raises_chroma() {
    let chroma_at_60 = |contrast_level| {
        let s = system("#1976D2", &GenerationOptions { contrast_level, ..Default::default() });
        Hct::from_argb(s.palettes.secondary.get(60).unwrap().argb).chroma()
    };
    assert!(chroma_at_60(1.0) > chroma_at_60(0.0));
    assert!(chroma_at_60(0.0) > chroma_at_60(-1.0));
}

#[test]
fn duplicate_stops_keep_first_seen_order() {
    let options = GenerationOptions { tones: vec![90, 10, 90, 40], ..Default::default() };
    let s = system("#1976D2", &options);
    let tones: Vec<u8> = s.palettes.neutral.iter().map(|e| e.tone).collect();
    assert_eq!(tones, vec![90, 10, 40]);
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn tone_out_of_range() {
    for bad in [101, -1] {
        let options = GenerationOptions { tones: vec![0, 50, bad], ..Default::default() };
        assert_eq!(
            generate_color_system(&hex_seed("#1976D2"), &options),
            Err(ColorError::ToneOutOfRange(bad))
        );
    }
}

#[test]
fn contrast_level_out_of_range() {
    let options = GenerationOptions { contrast_level: 1.5, ..Default::default() };
    assert_eq!(
        generate_color_system(&hex_seed("#1976D2"), &options),
        Err(ColorError::InvalidContrastLevel(1.5))
    );
}

#[test]
fn options_are_checked_before_the_seed() {
    let options = GenerationOptions { tones: vec![200], ..Default::default() };
    assert_eq!(
        generate_color_system(&hex_seed("nope"), &options),
        Err(ColorError::ToneOutOfRange(200))
    );
}

#[test]
fn malformed_hex() {
    assert_eq!(
        generate_color_system(&hex_seed("#GG0000"), &GenerationOptions::default()),
        Err(ColorError::InvalidColorFormat("#GG0000".into()))
    );
}

#[test]
fn unknown_variant_name() {
    assert_eq!(
        "pastel".parse::<ColorVariant>(),
        Err(ColorError::UnsupportedVariant("pastel".into()))
    );
}

// ============================================================================
// Image seeds
// ============================================================================

fn two_halves() -> PixelBuffer {
    let red = Argb::from_rgb(211, 47, 47);
    let blue = Argb::from_rgb(25, 118, 210);
    let mut px = Vec::new();
    for _ in 0..4 {
        px.extend([red, red, blue, blue]);
    }
    PixelBuffer::from_argb(4, 4, &px).unwrap()
}

#[test]
fn quantizer_finds_both_halves() {
    let colors = quantize(&two_halves(), 128).unwrap();
    assert_eq!(colors.len(), 2);
    assert_eq!(colors.iter().map(|c| c.population).sum::<u32>(), 16);
}

#[test]
fn image_seed_is_one_of_its_colors() {
    let s = generate_color_system(&SeedSource::Image(two_halves()), &GenerationOptions::default()).unwrap();
    assert!(!s.source.fell_back_to_default);
    assert!(["#D32F2F", "#1976D2"].contains(&s.source.resolved_hex.as_str()));
}

#[test]
fn transparent_image_is_empty() {
    let pixels = PixelBuffer::from_argb(2, 1, &[Argb::from_rgba(1, 2, 3, 0); 2]).unwrap();
    assert_eq!(
        generate_color_system(&SeedSource::Image(pixels), &GenerationOptions::default()),
        Err(ColorError::EmptyImageSource)
    );
}

#[tokio::test]
async fn png_bytes_end_to_end() {
    use image::{ImageFormat, Rgba, RgbaImage};

    let img = RgbaImage::from_pixel(8, 8, Rgba([25, 118, 210, 255]));
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), ImageFormat::Png).unwrap();

    let s = generate_color_system_from(&BytesSource::new(bytes), &GenerationOptions::default())
        .await
        .unwrap();
    assert_eq!(s.source.resolved_hex, "#1976D2");
    assert_eq!(s.palettes.primary.get(40).unwrap().hex, "#3C6090");
}

// ============================================================================
// Secondary operations
// ============================================================================

#[test]
fn standalone_tonal_palette() {
    let scale = generate_tonal_palette("#D32F2F", &[0, 50, 100]).unwrap();
    assert_eq!(scale.len(), 3);
    assert_eq!(scale.get(0).unwrap().hex, "#000000");
    assert_eq!(scale.get(100).unwrap().hex, "#FFFFFF");
}

#[test]
fn black_on_white() {
    let ratio = contrast_ratio(Argb::BLACK, Argb::WHITE);
    assert!((ratio - 21.0).abs() < 1e-9);
    let pair = ContrastPair::from_hex("text", "#000000", "#FFFFFF").unwrap();
    let result = validate_contrast(&[pair], 21.0).unwrap();
    assert_eq!(result.passed.len(), 1);
}

#[test]
fn serialized_shape() {
    let s = system("#1976D2", &with_themes());
    let json = serde_json::to_value(&s).unwrap();
    assert_eq!(json["source"]["resolved_hex"], "#1976D2");
    assert_eq!(json["source"]["origin"], "hex");
    assert_eq!(json["palettes"]["neutral_variant"]["role_name"], "neutral-variant");
    assert_eq!(json["themes"]["dark"]["primary"]["tone"], 80);
    assert_eq!(json["metadata"]["options"]["variant"], "tonal-spot");
    assert_eq!(json["metadata"]["theme_policy_version"], 1);
}
