//! Render and drawing configuration
//!
//! `RenderConfig` sizes the exported artifacts. `DrawingSettings` is what the
//! core hands back to the drawing surface: stroke color, stroke width and
//! the active tool.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParticleType;

/// Default drawing-surface width in pixels
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
/// Default drawing-surface height in pixels
pub const DEFAULT_CANVAS_HEIGHT: u32 = 400;

/// Configuration shared by the raster and markup renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Canvas width in pixels
    pub canvas_width: u32,
    /// Canvas height in pixels; also the axis used to flip y for TikZ
    pub canvas_height: u32,
    /// Load system fonts so raster vertex labels can be drawn
    pub load_system_fonts: bool,
    /// Wrap TikZ output in a compilable `standalone` LaTeX document
    pub standalone: bool,
}

impl RenderConfig {
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }

    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    pub fn with_system_fonts(mut self, load: bool) -> Self {
        self.load_system_fonts = load;
        self
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            load_system_fonts: true,
            standalone: false,
        }
    }
}

/// Tool active on the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrawingMode {
    Selection,
    #[default]
    Line,
    Rect,
    Circle,
    Freedraw,
    Eraser,
}

impl DrawingMode {
    /// Get all valid mode names
    pub fn variants() -> &'static [&'static str] {
        &["selection", "line", "rect", "circle", "freedraw", "eraser"]
    }
}

impl fmt::Display for DrawingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawingMode::Selection => write!(f, "selection"),
            DrawingMode::Line => write!(f, "line"),
            DrawingMode::Rect => write!(f, "rect"),
            DrawingMode::Circle => write!(f, "circle"),
            DrawingMode::Freedraw => write!(f, "freedraw"),
            DrawingMode::Eraser => write!(f, "eraser"),
        }
    }
}

impl FromStr for DrawingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "selection" => Ok(DrawingMode::Selection),
            "line" => Ok(DrawingMode::Line),
            "rect" => Ok(DrawingMode::Rect),
            "circle" => Ok(DrawingMode::Circle),
            "freedraw" => Ok(DrawingMode::Freedraw),
            "eraser" => Ok(DrawingMode::Eraser),
            _ => Err(format!("Unknown drawing mode: {}", s)),
        }
    }
}

/// Stroke configuration pushed to the drawing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawingSettings {
    pub particle: ParticleType,
    stroke_width: u8,
    pub mode: DrawingMode,
}

impl DrawingSettings {
    pub const MIN_STROKE_WIDTH: u8 = 1;
    pub const MAX_STROKE_WIDTH: u8 = 6;
    pub const DEFAULT_STROKE_WIDTH: u8 = 3;
    /// Canvas background
    pub const BACKGROUND_COLOR: &'static str = "#ffffff";
    /// Shape fill, transparent so drawn circles stay rings
    pub const FILL_COLOR: &'static str = "rgba(255, 255, 255, 0)";

    pub fn new(particle: ParticleType, stroke_width: u8, mode: DrawingMode) -> Self {
        Self {
            particle,
            stroke_width: stroke_width.clamp(Self::MIN_STROKE_WIDTH, Self::MAX_STROKE_WIDTH),
            mode,
        }
    }

    /// Stroke color for new shapes; a palette-less category draws black
    pub fn stroke_color(&self) -> &'static str {
        self.particle.color().unwrap_or("#000000")
    }

    pub fn stroke_width(&self) -> u8 {
        self.stroke_width
    }

    pub fn set_stroke_width(&mut self, width: u8) {
        self.stroke_width = width.clamp(Self::MIN_STROKE_WIDTH, Self::MAX_STROKE_WIDTH);
    }
}

impl Default for DrawingSettings {
    fn default() -> Self {
        Self::new(
            ParticleType::Vertex,
            Self::DEFAULT_STROKE_WIDTH,
            DrawingMode::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_config_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.canvas_width, 800);
        assert_eq!(config.canvas_height, 400);
        assert!(!config.standalone);
    }

    #[test]
    fn test_render_config_builders() {
        let config = RenderConfig::new(640, 480)
            .with_standalone(true)
            .with_system_fonts(false);
        assert_eq!(config.canvas_width, 640);
        assert_eq!(config.canvas_height, 480);
        assert!(config.standalone);
        assert!(!config.load_system_fonts);
    }

    #[test]
    fn test_stroke_width_is_clamped() {
        assert_eq!(
            DrawingSettings::new(ParticleType::Photon, 0, DrawingMode::Line).stroke_width(),
            1
        );
        assert_eq!(
            DrawingSettings::new(ParticleType::Photon, 12, DrawingMode::Line).stroke_width(),
            6
        );
        let mut settings = DrawingSettings::default();
        assert_eq!(settings.stroke_width(), 3);
        settings.set_stroke_width(5);
        assert_eq!(settings.stroke_width(), 5);
    }

    #[test]
    fn test_stroke_color_follows_particle() {
        let settings = DrawingSettings::new(ParticleType::Gluon, 3, DrawingMode::Line);
        assert_eq!(settings.stroke_color(), "#d62728");
        let unknown = DrawingSettings::new(ParticleType::Unknown, 3, DrawingMode::Line);
        assert_eq!(unknown.stroke_color(), "#000000");
    }

    #[test]
    fn test_drawing_mode_parsing() {
        for name in DrawingMode::variants() {
            let mode: DrawingMode = name.parse().unwrap();
            assert_eq!(mode.to_string(), *name);
        }
        assert_eq!("CIRCLE".parse::<DrawingMode>().unwrap(), DrawingMode::Circle);
        assert!("lasso".parse::<DrawingMode>().is_err());
    }
}
