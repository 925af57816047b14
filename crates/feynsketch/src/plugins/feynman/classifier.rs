//! Stroke-color classifier
//!
//! Maps the stroke color of a drawn shape back to the particle category the
//! user had selected when drawing it.

use tracing::trace;

use crate::core::{Palette, ParticleType};

/// Classify a stroke color against the standard palette
///
/// See [`Palette::classify`].
pub fn classify(stroke: &str) -> ParticleType {
    Palette::standard().classify(stroke)
}

impl Palette {
    /// Classify a stroke color
    ///
    /// 1. Exact case-insensitive match against a palette color.
    /// 2. Case-insensitive containment of a palette color's hex digits
    ///    anywhere in the input (`rgb`-less exports, `#1f77b4ff`, ...).
    /// 3. [`ParticleType::Unknown`].
    ///
    /// Both passes walk the palette in table order; the first hit wins.
    pub fn classify(&self, stroke: &str) -> ParticleType {
        let stroke = stroke.trim().to_lowercase();
        if stroke.is_empty() {
            return ParticleType::Unknown;
        }

        if let Some(entry) = self
            .entries()
            .iter()
            .find(|entry| entry.color.eq_ignore_ascii_case(&stroke))
        {
            return entry.particle;
        }

        if let Some(entry) = self
            .entries()
            .iter()
            .find(|entry| stroke.contains(&entry.hex_digits().to_lowercase()))
        {
            trace!(stroke = %stroke, particle = %entry.particle, "Classified by hex substring");
            return entry.particle;
        }

        trace!(stroke = %stroke, "Stroke color matches no palette entry");
        ParticleType::Unknown
    }
}
