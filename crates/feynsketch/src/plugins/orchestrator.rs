//! Plugin orchestrator for coordinating the diagram processing pipeline
//!
//! The orchestrator manages the flow of data through all plugins:
//! Detector → Parser → Database → Renderer (PNG or TikZ)

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, info, span, trace, warn, Level};

use crate::core::{Database, Detector, DiagramError, Parser, RenderConfig, Renderer};
use crate::plugins::feynman::{
    CanvasDetector, FeynmanDatabase, FeynmanParser, RasterRenderer, TikzRenderer,
};

/// Artifact kinds the pipeline can export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Tikz,
}

impl ExportFormat {
    /// Suggested file name for a downloaded artifact
    pub fn file_name(&self) -> &'static str {
        match self {
            ExportFormat::Png => "feynman_diagram.png",
            ExportFormat::Tikz => "feynman_diagram.tex",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Tikz => "text/x-tex",
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ExportFormat::Png)
    }

    pub fn variants() -> &'static [&'static str] {
        &["png", "tikz"]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Png => write!(f, "png"),
            ExportFormat::Tikz => write!(f, "tikz"),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "png" => Ok(ExportFormat::Png),
            "tikz" | "tex" | "latex" => Ok(ExportFormat::Tikz),
            _ => Err(format!(
                "Invalid export format '{}'. Valid options: {}",
                s,
                Self::variants().join(", ")
            )),
        }
    }
}

/// Plugin orchestrator that coordinates the entire pipeline
///
/// The orchestrator wires the canvas detector, parser and both renderers
/// together so callers can go from canvas JSON to an artifact in one call.
pub struct Orchestrator {
    detectors: HashMap<String, Box<dyn Detector>>,
    parser: FeynmanParser,
    raster_renderer: RasterRenderer,
    markup_renderer: TikzRenderer,
    config: RenderConfig,
}

impl Orchestrator {
    /// Create an orchestrator with no detectors and the default canvas size
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create an orchestrator for a specific canvas configuration
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            detectors: HashMap::new(),
            parser: FeynmanParser::new(),
            raster_renderer: RasterRenderer::with_config(config),
            markup_renderer: TikzRenderer::with_config(config),
            config,
        }
    }

    /// Create an orchestrator with the canvas detector registered
    pub fn with_feynman_plugins(config: RenderConfig) -> Self {
        let mut orchestrator = Self::with_config(config);
        orchestrator.register_detector("feynman".to_string(), Box::new(CanvasDetector::new()));
        orchestrator
    }

    /// Register a detector plugin
    pub fn register_detector(&mut self, name: String, detector: Box<dyn Detector>) {
        self.detectors.insert(name, detector);
    }

    /// Get available detector names
    pub fn get_detectors(&self) -> Vec<String> {
        self.detectors.keys().cloned().collect()
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Detect diagram type from input text
    pub fn detect_diagram_type(&self, input: &str) -> Result<String> {
        let detect_span = span!(Level::INFO, "detect_diagram_type", input_len = input.len());
        let _enter = detect_span.enter();

        trace!("Starting diagram type detection");

        for (name, detector) in &self.detectors {
            let confidence = detector.confidence(input);
            trace!(detector = name, confidence, "Checking detector");
            if detector.detect(input) {
                info!(detector = name, confidence, "Detected diagram type");
                return Ok(name.clone());
            }
        }

        warn!("No suitable detector found for input");
        Err(DiagramError::detection_error("No suitable detector found for input").into())
    }

    /// Rebuild vertices and propagators from canvas JSON
    ///
    /// Blank input and `null` stand for an empty canvas and skip detection.
    /// Any other JSON document is a canvas, with a missing shape list read as
    /// empty. Text that is not JSON fails detection.
    pub fn reconstruct(&self, input: &str) -> Result<FeynmanDatabase> {
        let reconstruct_span = span!(Level::INFO, "reconstruct", input_len = input.len());
        let _enter = reconstruct_span.enter();

        let trimmed = input.trim();
        let mut database = FeynmanDatabase::new();
        if trimmed.is_empty() || trimmed == "null" {
            debug!("Empty canvas, nothing to reconstruct");
            return Ok(database);
        }

        if !self.detectors.is_empty() {
            let diagram_type = self.detect_diagram_type(input)?;
            debug!(diagram_type, "Diagram type detected");
        }

        self.parser.parse(input, &mut database)?;
        debug!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            "Parsing completed"
        );
        Ok(database)
    }

    /// Run the full pipeline and produce the requested artifact
    pub fn export(&self, input: &str, format: ExportFormat) -> Result<Vec<u8>> {
        let export_span = span!(Level::INFO, "export", %format, input_len = input.len());
        let _enter = export_span.enter();

        info!("Starting export pipeline");

        let database = self.reconstruct(input)?;
        let artifact = self.render_database(&database, format)?;

        info!(artifact_len = artifact.len(), "Pipeline completed successfully");
        Ok(artifact)
    }

    /// Render an already reconstructed diagram
    ///
    /// Refuses with [`DiagramError::EmptyDiagram`] when there is nothing to draw.
    pub fn render_database(&self, database: &FeynmanDatabase, format: ExportFormat) -> Result<Vec<u8>> {
        if database.is_empty() {
            warn!(%format, "Refusing to export an empty diagram");
            return Err(DiagramError::EmptyDiagram.into());
        }

        let render_span = span!(Level::DEBUG, "pipeline_render", %format);
        let _render_enter = render_span.enter();

        let artifact = match format {
            ExportFormat::Png => self.raster_renderer.render(database)?,
            ExportFormat::Tikz => self.markup_renderer.render(database)?.into_bytes(),
        };
        debug!(output_len = artifact.len(), "Rendering completed");
        Ok(artifact)
    }

    /// Canvas JSON to PNG bytes
    pub fn export_png(&self, input: &str) -> Result<Vec<u8>> {
        self.export(input, ExportFormat::Png)
    }

    /// Canvas JSON to TikZ source
    pub fn export_tikz(&self, input: &str) -> Result<String> {
        let database = self.reconstruct(input)?;
        if database.is_empty() {
            warn!("Refusing to export an empty diagram");
            return Err(DiagramError::EmptyDiagram.into());
        }
        self.markup_renderer.render(&database)
    }
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANVAS: &str = r##"{"objects": [
        {"type": "circle", "left": 10, "top": 20, "radiusX": 5, "radiusY": 5, "stroke": "#1f77b4"},
        {"type": "line", "x1": 0, "y1": 0, "x2": 100, "y2": 0, "stroke": "#2ca02c"}
    ]}"##;

    fn orchestrator() -> Orchestrator {
        Orchestrator::with_feynman_plugins(RenderConfig::default().with_system_fonts(false))
    }

    fn is_empty_diagram(err: &anyhow::Error) -> bool {
        err.downcast_ref::<DiagramError>()
            .is_some_and(DiagramError::is_empty_diagram)
    }

    #[test]
    fn test_orchestrator_creation() {
        let orchestrator = Orchestrator::new();
        assert_eq!(orchestrator.get_detectors().len(), 0);
        assert_eq!(orchestrator.config().canvas_width, 800);
    }

    #[test]
    fn test_register_detector() {
        let mut orchestrator = Orchestrator::new();
        orchestrator.register_detector("feynman".to_string(), Box::new(CanvasDetector::new()));
        assert_eq!(orchestrator.get_detectors(), vec!["feynman"]);
    }

    #[test]
    fn test_detect_diagram_type_with_no_detectors() {
        let result = Orchestrator::new().detect_diagram_type(CANVAS);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Detection error: No suitable detector found for input"
        );
    }

    #[test]
    fn test_detect_canvas() {
        assert_eq!(orchestrator().detect_diagram_type(CANVAS).unwrap(), "feynman");
    }

    #[test]
    fn test_reconstruct() {
        let database = orchestrator().reconstruct(CANVAS).unwrap();
        assert_eq!(database.node_count(), 1);
        assert_eq!(database.edge_count(), 1);
    }

    #[test]
    fn test_reconstruct_empty_canvas() {
        for input in ["", "  \n", "null"] {
            assert!(orchestrator().reconstruct(input).unwrap().is_empty());
        }
        assert!(orchestrator().reconstruct(r#"{"objects": []}"#).unwrap().is_empty());
    }

    #[test]
    fn test_reconstruct_without_shape_list_is_empty() {
        let orchestrator = orchestrator();
        for input in ["{}", r#"{"objects": null}"#, r#"{"version": "4.4.0"}"#, r#"[{"left": 5}]"#] {
            assert!(orchestrator.reconstruct(input).unwrap().is_empty(), "{}", input);
            assert!(is_empty_diagram(&orchestrator.export_png(input).unwrap_err()));
            assert!(is_empty_diagram(&orchestrator.export_tikz(input).unwrap_err()));
        }
    }

    #[test]
    fn test_reconstruct_rejects_non_json() {
        let err = orchestrator().reconstruct("{not json").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Detection error: No suitable detector found for input"
        );
    }

    #[test]
    fn test_exports_refuse_empty_diagram() {
        let orchestrator = orchestrator();
        for input in ["", r#"{"objects": []}"#, r#"{"objects": [{"type": "rect"}]}"#] {
            assert!(is_empty_diagram(&orchestrator.export_png(input).unwrap_err()));
            assert!(is_empty_diagram(&orchestrator.export_tikz(input).unwrap_err()));
        }
    }

    #[test]
    fn test_export_tikz() {
        let tikz = orchestrator().export_tikz(CANVAS).unwrap();
        assert!(tikz.contains("(n0) at (15.0,375.0) {0};"));
        assert!(tikz.contains("\\draw[photon] (0.0,400.0) -- (100.0,400.0);"));

        let bytes = orchestrator().export(CANVAS, ExportFormat::Tikz).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), tikz);
    }

    #[test]
    fn test_export_png() {
        let png = orchestrator().export_png(CANVAS).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_export_format_metadata() {
        assert_eq!(ExportFormat::Png.file_name(), "feynman_diagram.png");
        assert_eq!(ExportFormat::Tikz.file_name(), "feynman_diagram.tex");
        assert_eq!(ExportFormat::Png.mime_type(), "image/png");
        assert_eq!(ExportFormat::Tikz.mime_type(), "text/x-tex");
        assert!(ExportFormat::Png.is_binary());
        assert_eq!("TikZ".parse::<ExportFormat>(), Ok(ExportFormat::Tikz));
        assert!("svg".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::Png.to_string(), "png");
    }
}
