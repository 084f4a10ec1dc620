//! Variant policy — how each palette role derives its hue and chroma.
//!
//! A variant is a row in a constant table: six rules, one per role. A
//! rule says where the role's hue comes from (an offset from the seed, or
//! a fixed angle) and how much chroma it targets (a fixed value, a
//! fraction of the seed's chroma, or none at all). Adding a variant means
//! adding a row, nothing else.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// A named policy for deriving the six palettes from a seed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorVariant {
    /// Calm: primary near the seed hue at moderate chroma.
    #[default]
    TonalSpot,
    /// Saturated: primary at the highest chroma the gamut allows.
    Vibrant,
    /// Playful: every role is rotated away from the seed hue.
    Expressive,
    /// Nearly gray with a hint of the seed hue.
    Neutral,
    /// Pure grays in every role, error included.
    Monochrome,
    /// Chroma follows the seed instead of fixed targets.
    Fidelity,
}

impl ColorVariant {
    /// Kebab-case name, as used on the command line and in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TonalSpot => "tonal-spot",
            Self::Vibrant => "vibrant",
            Self::Expressive => "expressive",
            Self::Neutral => "neutral",
            Self::Monochrome => "monochrome",
            Self::Fidelity => "fidelity",
        }
    }

    /// Parse a variant from its name (case-insensitive).
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_lowercase();
        Self::all().iter().find(|v| v.name() == lower).copied()
    }

    /// All variants, in table order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::TonalSpot, Self::Vibrant, Self::Expressive,
            Self::Neutral, Self::Monochrome, Self::Fidelity,
        ]
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl FromStr for ColorVariant {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| ColorError::UnsupportedVariant(s.to_string()))
    }
}

impl fmt::Display for ColorVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The six semantic palette roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Role {
    Primary,
    Secondary,
    Tertiary,
    Neutral,
    NeutralVariant,
    Error,
}

impl Role {
    /// Every role, in the order palettes are built and reported.
    pub const ALL: [Self; 6] = [
        Self::Primary,
        Self::Secondary,
        Self::Tertiary,
        Self::Neutral,
        Self::NeutralVariant,
        Self::Error,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::Neutral => "neutral",
            Self::NeutralVariant => "neutral-variant",
            Self::Error => "error",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a role's hue comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HueRule {
    /// Seed hue plus this many degrees.
    Offset(f64),
    /// A fixed hue, independent of the seed.
    Absolute(f64),
}

/// How much chroma a role asks for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChromaRule {
    /// A fixed chroma target.
    Fixed(f64),
    /// The seed's chroma times this factor.
    SeedScaled(f64),
    /// Achromatic.
    Zero,
}

/// One cell of the policy table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoleRule {
    pub hue: HueRule,
    pub chroma: ChromaRule,
}

impl RoleRule {
    /// Resolve this rule against a seed's hue and chroma.
    ///
    /// The returned hue is normalized to [0, 360). The chroma is the raw
    /// target; gamut clamping happens per tone.
    #[must_use]
    pub fn resolve(self, seed_hue: f64, seed_chroma: f64) -> (f64, f64) {
        let hue = match self.hue {
            HueRule::Offset(deg) => n_hct::solver::sanitize_degrees(seed_hue + deg),
            HueRule::Absolute(deg) => n_hct::solver::sanitize_degrees(deg),
        };
        let chroma = match self.chroma {
            ChromaRule::Fixed(c) => c,
            ChromaRule::SeedScaled(k) => seed_chroma * k,
            ChromaRule::Zero => 0.0,
        };
        (hue, chroma)
    }
}

const fn rule(hue: HueRule, chroma: ChromaRule) -> RoleRule {
    RoleRule { hue, chroma }
}

const fn offset(deg: f64, chroma: f64) -> RoleRule {
    rule(HueRule::Offset(deg), ChromaRule::Fixed(chroma))
}

const fn scaled(deg: f64, factor: f64) -> RoleRule {
    rule(HueRule::Offset(deg), ChromaRule::SeedScaled(factor))
}

const fn gray() -> RoleRule {
    rule(HueRule::Offset(0.0), ChromaRule::Zero)
}

/// Error is red in every variant except monochrome.
const ERROR: RoleRule = rule(HueRule::Absolute(25.0), ChromaRule::Fixed(84.0));

// Rows follow `ColorVariant` order, columns follow `Role::ALL`.
const POLICY: [[RoleRule; 6]; 6] = [
    // tonal-spot
    [offset(0.0, 36.0), offset(0.0, 16.0), offset(60.0, 24.0), offset(0.0, 6.0), offset(0.0, 8.0), ERROR],
    // vibrant
    [offset(0.0, 200.0), offset(15.0, 24.0), offset(30.0, 32.0), offset(0.0, 10.0), offset(0.0, 12.0), ERROR],
    // expressive
    [offset(240.0, 40.0), offset(45.0, 24.0), offset(120.0, 32.0), offset(15.0, 8.0), offset(15.0, 12.0), ERROR],
    // neutral
    [offset(0.0, 12.0), offset(0.0, 8.0), offset(0.0, 16.0), offset(0.0, 2.0), offset(0.0, 2.0), ERROR],
    // monochrome
    [gray(), gray(), gray(), gray(), gray(), rule(HueRule::Absolute(25.0), ChromaRule::Zero)],
    // fidelity: primary is the seed itself, the rest scale from its chroma
    [scaled(0.0, 1.0), scaled(0.0, 0.5), scaled(60.0, 1.0), scaled(0.0, 0.125), scaled(0.0, 0.25), ERROR],
];

/// Look up the rule for one role under one variant.
#[must_use]
pub const fn policy(variant: ColorVariant, role: Role) -> RoleRule {
    POLICY[variant.index()][role.index()]
}

// ─── Tests ───────────────────────────────────────────────────────────────────
