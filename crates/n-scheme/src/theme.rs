//! Theme composition — named light and dark colors from the role targets.
//!
//! Each theme color is a (role, light tone, dark tone) triple from a fixed,
//! versioned table. Colors are solved from the role's hue and chroma at
//! that exact tone, so themes never depend on which tone stops the caller
//! asked for in the scales.
//!
//! The table pairs every "on-X" color with its "X" background at a tone
//! distance of at least 50, which is what keeps text readable.

use n_hct::Argb;
use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};

use crate::contrast::{ContrastPair, ContrastValidationResult, validate_pairs};
use crate::error::Result;
use crate::palette::RoleTarget;
use crate::variant::Role;

/// Bumped whenever a tone in [`THEME_POLICY`] changes.
pub const THEME_POLICY_VERSION: u32 = 1;

// ---------------------------------------------------------------------------
// Policy table
// ---------------------------------------------------------------------------

/// One named theme color and where it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeSlot {
    pub name: &'static str,
    pub role: Role,
    pub light_tone: u8,
    pub dark_tone: u8,
}

impl ThemeSlot {
    #[must_use]
    pub const fn tone(&self, mode: ThemeMode) -> u8 {
        match mode {
            ThemeMode::Light => self.light_tone,
            ThemeMode::Dark => self.dark_tone,
        }
    }
}

const fn slot(name: &'static str, role: Role, light_tone: u8, dark_tone: u8) -> ThemeSlot {
    ThemeSlot { name, role, light_tone, dark_tone }
}

/// Theme colors in output order.
pub const THEME_POLICY: [ThemeSlot; 29] = [
    slot("primary", Role::Primary, 40, 80),
    slot("on-primary", Role::Primary, 100, 20),
    slot("primary-container", Role::Primary, 90, 30),
    slot("on-primary-container", Role::Primary, 10, 90),
    slot("secondary", Role::Secondary, 40, 80),
    slot("on-secondary", Role::Secondary, 100, 20),
    slot("secondary-container", Role::Secondary, 90, 30),
    slot("on-secondary-container", Role::Secondary, 10, 90),
    slot("tertiary", Role::Tertiary, 40, 80),
    slot("on-tertiary", Role::Tertiary, 100, 20),
    slot("tertiary-container", Role::Tertiary, 90, 30),
    slot("on-tertiary-container", Role::Tertiary, 10, 90),
    slot("error", Role::Error, 40, 80),
    slot("on-error", Role::Error, 100, 20),
    slot("error-container", Role::Error, 90, 30),
    slot("on-error-container", Role::Error, 10, 90),
    slot("background", Role::Neutral, 99, 10),
    slot("on-background", Role::Neutral, 10, 90),
    slot("surface", Role::Neutral, 99, 10),
    slot("on-surface", Role::Neutral, 10, 90),
    slot("surface-variant", Role::NeutralVariant, 90, 30),
    slot("on-surface-variant", Role::NeutralVariant, 30, 80),
    slot("outline", Role::NeutralVariant, 50, 60),
    slot("outline-variant", Role::NeutralVariant, 80, 30),
    slot("shadow", Role::Neutral, 0, 0),
    slot("scrim", Role::Neutral, 0, 0),
    slot("inverse-surface", Role::Neutral, 20, 90),
    slot("inverse-on-surface", Role::Neutral, 95, 20),
    slot("inverse-primary", Role::Primary, 80, 40),
];

/// Text/background pairs that must stay readable: (foreground, background).
pub const CONTRAST_PAIRS: [(&str, &str); 12] = [
    ("on-primary", "primary"),
    ("on-primary-container", "primary-container"),
    ("on-secondary", "secondary"),
    ("on-secondary-container", "secondary-container"),
    ("on-tertiary", "tertiary"),
    ("on-tertiary-container", "tertiary-container"),
    ("on-error", "error"),
    ("on-error-container", "error-container"),
    ("on-background", "background"),
    ("on-surface", "surface"),
    ("on-surface-variant", "surface-variant"),
    ("inverse-on-surface", "inverse-surface"),
];

// ---------------------------------------------------------------------------
// Theme
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

/// One resolved theme color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeColorEntry {
    pub name: &'static str,
    pub role: Role,
    pub tone: u8,
    pub argb: Argb,
    pub hex: String,
    pub mode: ThemeMode,
}

/// All theme colors for one mode, in [`THEME_POLICY`] order.
///
/// Serializes as a map from color name to entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub mode: ThemeMode,
    pub colors: Vec<ThemeColorEntry>,
}

impl Theme {
    /// Resolve every slot of the policy table for `mode`.
    ///
    /// `targets` must be in [`Role::ALL`] order.
    #[must_use]
    pub fn compose(mode: ThemeMode, targets: &[RoleTarget; 6]) -> Self {
        let colors = THEME_POLICY
            .iter()
            .map(|slot| {
                let tone = slot.tone(mode);
                let argb = targets[slot.role.index()].at_tone(f64::from(tone)).to_argb();
                ThemeColorEntry {
                    name: slot.name,
                    role: slot.role,
                    tone,
                    argb,
                    hex: argb.to_hex(),
                    mode,
                }
            })
            .collect();
        Self { mode, colors }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ThemeColorEntry> {
        self.colors.iter().find(|c| c.name == name)
    }

    /// Every text/background pair this theme promises to keep readable.
    ///
    /// Labels read `"on-primary/primary"`.
    #[must_use]
    pub fn contrast_pairs(&self) -> Vec<ContrastPair> {
        CONTRAST_PAIRS
            .iter()
            .filter_map(|&(fg, bg)| {
                let fg_entry = self.get(fg)?;
                let bg_entry = self.get(bg)?;
                Some(ContrastPair::new(format!("{fg}/{bg}"), fg_entry.argb, bg_entry.argb))
            })
            .collect()
    }

    /// Validate [`Theme::contrast_pairs`] against `min_ratio`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ColorError::InvalidContrastRatio`] for a bad
    /// `min_ratio`.
    pub fn validate(&self, min_ratio: f64) -> Result<ContrastValidationResult> {
        validate_pairs(&self.contrast_pairs(), min_ratio)
    }
}

impl Serialize for Theme {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.colors.len()))?;
        for entry in &self.colors {
            map.serialize_entry(entry.name, entry)?;
        }
        map.end()
    }
}

/// The light and dark themes of one color system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Themes {
    pub light: Theme,
    pub dark: Theme,
}

/// Compose both themes from the six role targets.
#[must_use]
pub fn compose_themes(targets: &[RoleTarget; 6]) -> Themes {
    Themes {
        light: Theme::compose(ThemeMode::Light, targets),
        dark: Theme::compose(ThemeMode::Dark, targets),
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::DEFAULT_MIN_RATIO;
    use crate::palette::generate_palettes;
    use crate::variant::ColorVariant;
    use n_hct::Hct;
    use pretty_assertions::assert_eq;

    fn themes(hex: &str, variant: ColorVariant) -> Themes {
        let seed = Hct::from_argb(Argb::from_hex(hex).unwrap());
        compose_themes(&generate_palettes(&seed, variant, 0.0))
    }

    #[test]
    fn table_has_unique_names() {
        let mut names: Vec<_> = THEME_POLICY.iter().map(|s| s.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), THEME_POLICY.len());
    }

    #[test]
    fn pairs_reference_known_names() {
        for (fg, bg) in &CONTRAST_PAIRS {
            assert!(THEME_POLICY.iter().any(|s| s.name == *fg), "{fg}");
            assert!(THEME_POLICY.iter().any(|s| s.name == *bg), "{bg}");
        }
    }

    #[test]
    fn primary_uses_fixed_tones() {
        let t = themes("#1976D2", ColorVariant::TonalSpot);
        let light = t.light.get("primary").unwrap();
        let dark = t.dark.get("primary").unwrap();
        assert_eq!((light.tone, dark.tone), (40, 80));
        assert_eq!(light.hex, "#3C6090");
        assert_eq!(light.mode, ThemeMode::Light);
        assert_eq!(dark.mode, ThemeMode::Dark);
    }

    #[test]
    fn on_primary_is_white_in_light() {
        let t = themes("#1976D2", ColorVariant::TonalSpot);
        assert_eq!(t.light.get("on-primary").unwrap().hex, "#FFFFFF");
        assert_eq!(t.light.get("shadow").unwrap().hex, "#000000");
    }

    #[test]
    fn all_colors_present_in_order() {
        let t = themes("#1976D2", ColorVariant::TonalSpot);
        let names: Vec<_> = t.dark.colors.iter().map(|c| c.name).collect();
        let expected: Vec<_> = THEME_POLICY.iter().map(|s| s.name).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn reference_pairs_pass_aa() {
        for hex in ["#1976D2", "#D32F2F", "#4CAF50", "#FFEB3B", "#9C27B0"] {
            let t = themes(hex, ColorVariant::TonalSpot);
            for theme in [&t.light, &t.dark] {
                let result = theme.validate(DEFAULT_MIN_RATIO).unwrap();
                assert!(result.all_passed(), "{hex} {:?}: {:?}", theme.mode, result.failed);
                assert_eq!(result.passed.len(), 12);
            }
        }
    }

    #[test]
    fn pair_labels() {
        let t = themes("#1976D2", ColorVariant::TonalSpot);
        let pairs = t.light.contrast_pairs();
        assert_eq!(pairs[0].label, "on-primary/primary");
        assert_eq!(pairs.len(), 12);
    }

    #[test]
    fn serializes_as_named_map() {
        let t = themes("#1976D2", ColorVariant::TonalSpot);
        let json = serde_json::to_value(&t.light).unwrap();
        assert_eq!(json["primary"]["hex"], "#3C6090");
        assert_eq!(json["primary"]["role"], "primary");
        assert_eq!(json["surface-variant"]["role"], "neutral-variant");
        assert_eq!(json["on-surface"]["mode"], "light");
    }
}
