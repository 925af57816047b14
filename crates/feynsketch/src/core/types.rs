//! Core type definitions for diagram processing
//!
//! This module contains the fundamental types used throughout Feynsketch:
//! particle categories and the vertex/propagator records reconstructed
//! from a drawn canvas.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Semantic category of a drawn shape, derived from its stroke color
///
/// The declaration order is the palette order used when classifying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticleType {
    /// Interaction point, drawn with the circle tool
    Vertex,
    /// Matter line with an arrow along the drawing direction
    Fermion,
    /// Antimatter line with an arrow against the drawing direction
    Antifermion,
    /// Wavy force-carrier line
    Photon,
    /// Coiled force-carrier line
    Gluon,
    /// Plain undirected line
    NeutralLine,
    /// Stroke color matched nothing in the palette
    #[default]
    Unknown,
}

impl ParticleType {
    /// Every category a user can pick, in palette order
    pub const SELECTABLE: [ParticleType; 6] = [
        ParticleType::Vertex,
        ParticleType::Fermion,
        ParticleType::Antifermion,
        ParticleType::Photon,
        ParticleType::Gluon,
        ParticleType::NeutralLine,
    ];

    /// Human-readable name shown in selectors, legends and summaries
    pub fn display_name(&self) -> &'static str {
        match self {
            ParticleType::Vertex => "vertex",
            ParticleType::Fermion => "fermion (→/←)",
            ParticleType::Antifermion => "antifermion (←/→)",
            ParticleType::Photon => "photon",
            ParticleType::Gluon => "gluon",
            ParticleType::NeutralLine => "neutral (plain line)",
            ParticleType::Unknown => "unknown",
        }
    }

    /// Short label drawn next to a vertex marker
    ///
    /// First whitespace-delimited token of the display name, `N` for unknown.
    pub fn short_label(&self) -> &'static str {
        match self {
            ParticleType::Unknown => "N",
            other => other
                .display_name()
                .split_whitespace()
                .next()
                .unwrap_or("N"),
        }
    }

    /// Returns true for line categories drawn with an arrowhead
    pub fn is_directed(&self) -> bool {
        matches!(self, ParticleType::Fermion | ParticleType::Antifermion)
    }

    /// Returns true when the arrow points from the second endpoint back to the first
    pub fn is_reversed(&self) -> bool {
        matches!(self, ParticleType::Antifermion)
    }
}

impl fmt::Display for ParticleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParticleType::Vertex => write!(f, "vertex"),
            ParticleType::Fermion => write!(f, "fermion"),
            ParticleType::Antifermion => write!(f, "antifermion"),
            ParticleType::Photon => write!(f, "photon"),
            ParticleType::Gluon => write!(f, "gluon"),
            ParticleType::NeutralLine => write!(f, "neutral"),
            ParticleType::Unknown => write!(f, "unknown"),
        }
    }
}

impl FromStr for ParticleType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vertex" => Ok(ParticleType::Vertex),
            "fermion" => Ok(ParticleType::Fermion),
            "antifermion" => Ok(ParticleType::Antifermion),
            "photon" => Ok(ParticleType::Photon),
            "gluon" => Ok(ParticleType::Gluon),
            "neutral" | "neutral_line" | "neutral-line" => Ok(ParticleType::NeutralLine),
            "unknown" => Ok(ParticleType::Unknown),
            _ => Err(format!("Unknown particle type: {}", s)),
        }
    }
}

/// A point in canvas pixel coordinates (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point at fraction `t` of the way from `self` to `other`
    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + t * (other.x - self.x), self.y + t * (other.y - self.y))
    }

    pub fn offset(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

/// A vertex marker reconstructed from a circle or ellipse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Sequential id in scan order, starting at 0
    pub id: usize,
    /// Bounding-box center, x
    pub x: f64,
    /// Bounding-box center, y
    pub y: f64,
    pub particle: ParticleType,
    /// Originating canvas record, kept for traceability only
    #[serde(default)]
    pub raw: Value,
}

impl Node {
    pub fn new(id: usize, x: f64, y: f64, particle: ParticleType) -> Self {
        Self {
            id,
            x,
            y,
            particle,
            raw: Value::Null,
        }
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = raw;
        self
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A propagator segment reconstructed from a line or path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    pub particle: ParticleType,
    /// Originating canvas record, kept for traceability only
    #[serde(default)]
    pub raw: Value,
}

impl Edge {
    pub fn new(start: Point, end: Point, particle: ParticleType) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            particle,
            raw: Value::Null,
        }
    }

    pub fn with_raw(mut self, raw: Value) -> Self {
        self.raw = raw;
        self
    }

    pub fn start(&self) -> Point {
        Point::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Point {
        Point::new(self.x2, self.y2)
    }

    pub fn length(&self) -> f64 {
        (self.x2 - self.x1).hypot(self.y2 - self.y1)
    }
}
