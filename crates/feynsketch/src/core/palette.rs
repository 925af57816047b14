//! Fixed particle color table
//!
//! The palette is the configuration surface shared with the drawing host:
//! it drives the particle selector, the active stroke color and the color
//! legend, and it is read back by the classifier to type drawn shapes.

use serde::Serialize;

use super::ParticleType;

/// One (particle, color) association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaletteEntry {
    pub particle: ParticleType,
    /// Lowercase `#rrggbb` color
    pub color: &'static str,
}

impl PaletteEntry {
    pub const fn new(particle: ParticleType, color: &'static str) -> Self {
        Self { particle, color }
    }

    /// Color without the leading `#`
    pub fn hex_digits(&self) -> &'static str {
        self.color.trim_start_matches('#')
    }
}

/// Process-wide color table, in classification order
pub const PALETTE: [PaletteEntry; 6] = [
    PaletteEntry::new(ParticleType::Vertex, "#000000"),
    PaletteEntry::new(ParticleType::Fermion, "#1f77b4"),
    PaletteEntry::new(ParticleType::Antifermion, "#ff7f0e"),
    PaletteEntry::new(ParticleType::Photon, "#2ca02c"),
    PaletteEntry::new(ParticleType::Gluon, "#d62728"),
    PaletteEntry::new(ParticleType::NeutralLine, "#9467bd"),
];

/// Stroke color used for shapes whose category is unknown
pub const UNKNOWN_COLOR: &str = "#222222";

/// Read-only view over a color table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    entries: &'static [PaletteEntry],
}

impl Palette {
    /// The standard six-entry table
    pub const fn standard() -> Self {
        Self { entries: &PALETTE }
    }

    pub fn entries(&self) -> &'static [PaletteEntry] {
        self.entries
    }

    /// Palette color for a particle, `None` for [`ParticleType::Unknown`]
    pub fn color_of(&self, particle: ParticleType) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|entry| entry.particle == particle)
            .map(|entry| entry.color)
    }

    /// Legend rows as (display name, color) pairs, in palette order
    pub fn legend(&self) -> Vec<(&'static str, &'static str)> {
        self.entries
            .iter()
            .map(|entry| (entry.particle.display_name(), entry.color))
            .collect()
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::standard()
    }
}

impl ParticleType {
    /// Fixed display color from the standard palette
    pub fn color(&self) -> Option<&'static str> {
        Palette::standard().color_of(*self)
    }

    /// Color used when drawing this category, gray for unknown
    pub fn stroke_color(&self) -> &'static str {
        self.color().unwrap_or(UNKNOWN_COLOR)
    }
}

/// Parse a `#rrggbb` string into its components
pub fn parse_hex_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let digits = color.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;
    Some((r, g, b))
}
