//! Feynsketch - Turn hand-drawn Feynman diagram sketches into PNG and TikZ
//!
//! A library that reads the shape list of a drawing canvas, classifies each
//! circle and line by its stroke color, and renders the reconstructed
//! vertices and propagators as a raster image or as TikZ source.
//!
//! # Quick Start
//!
//! ```rust
//! use feynsketch::render_tikz;
//!
//! let canvas = r##"{"objects": [
//!     {"type": "line", "x1": 0, "y1": 0, "x2": 100, "y2": 0, "stroke": "#2ca02c"}
//! ]}"##;
//! let tikz = render_tikz(canvas).unwrap();
//! assert!(tikz.contains("\\draw[photon]"));
//! ```
//!
//! # Advanced Usage
//!
//! For more control, use the individual components:
//!
//! ```rust
//! use feynsketch::prelude::*;
//!
//! let canvas = r##"{"objects": [
//!     {"type": "circle", "left": 10, "top": 20, "radiusX": 5, "radiusY": 5, "stroke": "#1f77b4"}
//! ]}"##;
//!
//! // Parse into a database
//! let parser = FeynmanParser::new();
//! let mut database = FeynmanDatabase::new();
//! parser.parse(canvas, &mut database).unwrap();
//!
//! // Access the reconstructed data
//! let node = database.get_node(0).unwrap();
//! assert_eq!((node.x, node.y), (15.0, 25.0));
//! assert_eq!(node.particle, ParticleType::Fermion);
//!
//! // Render to TikZ
//! let renderer = TikzRenderer::with_config(RenderConfig::new(800, 400));
//! let tikz = renderer.render(&database).unwrap();
//! assert!(tikz.contains("(n0) at (15.0,375.0)"));
//! ```

pub mod core;
pub mod plugins;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use core::*;
pub use plugins::orchestrator::ExportFormat;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::core::{
        Database, Detector, DiagramError, DrawingMode, DrawingSettings, Edge, Node, Palette,
        ParticleType, Parser, Point, RenderConfig, Renderer,
    };
    pub use crate::plugins::feynman::{
        classify, CanvasDetector, FeynmanDatabase, FeynmanParser, RasterRenderer, TikzRenderer,
    };
    pub use crate::plugins::orchestrator::{ExportFormat, Orchestrator};
}

/// Reconstruct vertices and propagators from canvas JSON
///
/// Blank input or `null` yields an empty database.
///
/// # Example
/// ```rust
/// use feynsketch::parse;
/// use feynsketch::prelude::Database;
///
/// let db = parse(r##"{"objects": [{"type": "circle", "stroke": "#000000"}]}"##).unwrap();
/// assert_eq!(db.node_count(), 1);
/// assert_eq!(db.edge_count(), 0);
/// ```
pub fn parse(input: &str) -> anyhow::Result<plugins::feynman::FeynmanDatabase> {
    use crate::core::Parser as _;
    use crate::plugins::feynman::{FeynmanDatabase, FeynmanParser};

    let parser = FeynmanParser::new();
    let mut database = FeynmanDatabase::new();
    parser.parse(input, &mut database)?;
    Ok(database)
}

/// Render canvas JSON to PNG bytes at the default canvas size
///
/// Fails with [`DiagramError::EmptyDiagram`] when nothing was drawn.
pub fn render_png(input: &str) -> anyhow::Result<Vec<u8>> {
    render_png_with_config(input, RenderConfig::default())
}

/// Render canvas JSON to PNG bytes for a specific canvas configuration
pub fn render_png_with_config(input: &str, config: RenderConfig) -> anyhow::Result<Vec<u8>> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_feynman_plugins(config).export_png(input)
}

/// Render canvas JSON to TikZ source at the default canvas size
///
/// Fails with [`DiagramError::EmptyDiagram`] when nothing was drawn.
pub fn render_tikz(input: &str) -> anyhow::Result<String> {
    render_tikz_with_config(input, RenderConfig::default())
}

/// Render canvas JSON to TikZ source for a specific canvas configuration
///
/// # Example
/// ```rust
/// use feynsketch::{render_tikz_with_config, RenderConfig};
///
/// let canvas = r##"{"objects": [{"type": "circle", "left": 0, "top": 40, "stroke": "#000000"}]}"##;
/// let tikz = render_tikz_with_config(canvas, RenderConfig::new(200, 100).with_standalone(true)).unwrap();
/// assert!(tikz.starts_with("\\documentclass[tikz]{standalone}"));
/// assert!(tikz.contains("at (10.0,50.0)"));
/// ```
pub fn render_tikz_with_config(input: &str, config: RenderConfig) -> anyhow::Result<String> {
    use crate::plugins::orchestrator::Orchestrator;

    Orchestrator::with_feynman_plugins(config).export_tikz(input)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: &str = r##"{"objects": [
        {"type": "circle", "left": 90, "top": 90, "stroke": "#000000"},
        {"type": "line", "x1": 0, "y1": 100, "x2": 100, "y2": 100, "stroke": "#d62728"}
    ]}"##;

    #[test]
    fn test_parse_canvas() {
        let db = parse(CANVAS).unwrap();
        assert_eq!(db.node_count(), 1);
        assert_eq!(db.edge_count(), 1);
        assert_eq!(db.edge_list()[0].particle, ParticleType::Gluon);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").unwrap().is_empty());
        assert!(parse("null").unwrap().is_empty());
    }

    #[test]
    fn test_render_tikz() {
        let tikz = render_tikz(CANVAS).unwrap();
        assert!(tikz.contains("(n0) at (100.0,300.0) {0};"));
        assert!(tikz.contains("\\draw[gluon] (0.0,300.0) -- (100.0,300.0);"));
    }

    #[test]
    fn test_render_png() {
        let config = RenderConfig::new(300, 200).with_system_fonts(false);
        let png = render_png_with_config(CANVAS, config).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (300, 200));
    }

    #[test]
    fn test_empty_exports_are_refused() {
        let err = render_tikz(r#"{"objects": []}"#).unwrap_err();
        assert!(err
            .downcast_ref::<DiagramError>()
            .is_some_and(DiagramError::is_empty_diagram));
    }

    #[test]
    fn test_canvas_without_shapes_is_empty_for_both_exports() {
        let config = RenderConfig::new(200, 100).with_system_fonts(false);
        for input in ["{}", r#"{"objects": null}"#, r#"{"version": "4.4.0"}"#, r#"[{"left": 5}]"#] {
            for err in [
                render_tikz(input).unwrap_err(),
                render_png_with_config(input, config).unwrap_err(),
            ] {
                assert!(
                    err.downcast_ref::<DiagramError>()
                        .is_some_and(DiagramError::is_empty_diagram),
                    "{}: {}",
                    input,
                    err
                );
            }
        }
    }

    #[test]
    fn test_invalid_json() {
        let err = parse("{not json").unwrap_err();
        assert!(err.to_string().starts_with("Parse error: Invalid canvas JSON"));
    }
}
