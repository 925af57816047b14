//! PNG rendering
//!
//! The diagram is first laid out as an SVG scene and then rasterized with
//! `resvg` onto a `tiny-skia` pixmap the size of the canvas. SVG user space
//! already has its origin top-left with y growing downward, the same
//! convention as the drawing surface, so coordinates are copied verbatim.

use anyhow::Result;
use std::sync::{Arc, OnceLock};
use svg::node::element::{Circle, Line, Polygon, Rectangle, Text};
use svg::Document;
use tracing::{debug, info, span, trace, Level};

use super::FeynmanDatabase;
use crate::core::{
    Database, DiagramError, Edge, Node, ParticleType, Point, RenderConfig, Renderer, UNKNOWN_COLOR,
};

/// Stroke width of every propagator
pub const LINE_WIDTH: f64 = 2.0;
/// Radius of the vertex marker
pub const NODE_RADIUS: f64 = 8.0;
/// Fraction of the segment at which the arrowhead tip sits
pub const ARROW_POSITION: f64 = 0.7;
/// Offset of a vertex label from the vertex center
pub const LABEL_OFFSET: (f64, f64) = (10.0, -10.0);

const ARROW_LENGTH: f64 = 12.0;
const ARROW_HALF_WIDTH: f64 = 5.0;
const LABEL_FONT_SIZE: f64 = 11.0;
const PHOTON_DASH: &str = "12.8 3.2 2 3.2";
const GLUON_DASH: &str = "7.4 3.2";

/// PNG renderer
///
/// The font database used for vertex labels is loaded on first render.
#[derive(Clone)]
pub struct RasterRenderer {
    config: RenderConfig,
    fontdb: OnceLock<Arc<fontdb::Database>>,
}

impl RasterRenderer {
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            config,
            fontdb: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the intermediate SVG scene
    ///
    /// Edges are emitted before nodes so vertex markers sit on top.
    pub fn svg_document(&self, database: &FeynmanDatabase) -> Document {
        let width = self.config.canvas_width;
        let height = self.config.canvas_height;

        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {} {}", width, height))
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", "#ffffff"),
            );

        for edge in database.edges() {
            document = document.add(edge_line(edge));
            if let Some(head) = arrowhead(edge) {
                document = document.add(head);
            }
        }

        for node in database.nodes() {
            let (marker, label) = node_marker(node);
            document = document.add(marker).add(label);
        }

        document
    }

    fn fontdb(&self) -> Arc<fontdb::Database> {
        let fontdb = self.fontdb.get_or_init(|| {
            let mut fontdb = fontdb::Database::new();
            if self.config.load_system_fonts {
                fontdb.load_system_fonts();
            }
            debug!(face_count = fontdb.len(), "Loaded font database");
            Arc::new(fontdb)
        });
        Arc::clone(fontdb)
    }

    fn rasterize(&self, svg_text: &str) -> Result<Vec<u8>> {
        let mut options = usvg::Options::default();
        options.fontdb = self.fontdb();

        let tree = usvg::Tree::from_str(svg_text, &options)
            .map_err(|e| DiagramError::render_error(format!("Failed to parse scene: {}", e)))?;

        let (width, height) = (self.config.canvas_width, self.config.canvas_height);
        let mut pixmap = tiny_skia::Pixmap::new(width, height).ok_or_else(|| {
            DiagramError::render_error(format!("Failed to allocate {}x{} pixmap", width, height))
        })?;
        pixmap.fill(tiny_skia::Color::WHITE);

        resvg::render(&tree, tiny_skia::Transform::identity(), &mut pixmap.as_mut());

        let png = pixmap
            .encode_png()
            .map_err(|e| DiagramError::render_error(format!("Failed to encode PNG: {}", e)))?;
        Ok(png)
    }
}

impl Default for RasterRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RasterRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterRenderer")
            .field("config", &self.config)
            .field("fonts_loaded", &self.fontdb.get().is_some())
            .finish()
    }
}

fn dash_pattern(particle: ParticleType) -> Option<&'static str> {
    match particle {
        ParticleType::Photon => Some(PHOTON_DASH),
        ParticleType::Gluon => Some(GLUON_DASH),
        _ => None,
    }
}

/// Stroke color of a propagator
///
/// A line drawn in the vertex color has no propagator style and falls back
/// to the unknown color.
fn edge_color(particle: ParticleType) -> &'static str {
    match particle {
        ParticleType::Vertex => UNKNOWN_COLOR,
        other => other.stroke_color(),
    }
}

fn edge_line(edge: &Edge) -> Line {
    let line = Line::new()
        .set("x1", edge.x1)
        .set("y1", edge.y1)
        .set("x2", edge.x2)
        .set("y2", edge.y2)
        .set("stroke", edge_color(edge.particle))
        .set("stroke-width", LINE_WIDTH)
        .set("fill", "none");
    match dash_pattern(edge.particle) {
        Some(dash) => line.set("stroke-dasharray", dash),
        None => line,
    }
}

/// Filled triangle marking the flow direction of a directed propagator
///
/// Fermions point from the first endpoint to the second with the tip at 70%
/// of the way. Antifermions mirror that: the tip sits at 70% of the way from
/// the second endpoint and points back toward the first.
fn arrowhead(edge: &Edge) -> Option<Polygon> {
    if !edge.particle.is_directed() {
        return None;
    }
    let length = edge.length();
    if length <= f64::EPSILON {
        trace!("Skipping arrowhead on zero-length propagator");
        return None;
    }

    let (from, to) = if edge.particle.is_reversed() {
        (edge.end(), edge.start())
    } else {
        (edge.start(), edge.end())
    };
    let tip = from.lerp(to, ARROW_POSITION);
    let (dx, dy) = ((to.x - from.x) / length, (to.y - from.y) / length);
    let base = tip.offset(-dx * ARROW_LENGTH, -dy * ARROW_LENGTH);
    let left = base.offset(-dy * ARROW_HALF_WIDTH, dx * ARROW_HALF_WIDTH);
    let right = base.offset(dy * ARROW_HALF_WIDTH, -dx * ARROW_HALF_WIDTH);

    Some(
        Polygon::new()
            .set("points", polygon_points(&[tip, left, right]))
            .set("fill", edge.particle.stroke_color())
            .set("stroke", "none"),
    )
}

fn polygon_points(points: &[Point]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", p.x, p.y))
        .collect::<Vec<_>>()
        .join(" ")
}

fn node_marker(node: &Node) -> (Circle, Text) {
    let marker = Circle::new()
        .set("cx", node.x)
        .set("cy", node.y)
        .set("r", NODE_RADIUS)
        .set("fill", "#000000");
    let label = Text::new(node.particle.short_label())
        .set("x", node.x + LABEL_OFFSET.0)
        .set("y", node.y + LABEL_OFFSET.1)
        .set("font-family", "sans-serif")
        .set("font-size", LABEL_FONT_SIZE)
        .set("fill", "#000000");
    (marker, label)
}

impl Renderer<FeynmanDatabase> for RasterRenderer {
    type Output = Vec<u8>;

    fn render(&self, database: &FeynmanDatabase) -> Result<Vec<u8>> {
        let render_span = span!(
            Level::INFO,
            "render_png",
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            width = self.config.canvas_width,
            height = self.config.canvas_height
        );
        let _enter = render_span.enter();

        let svg_text = self.svg_document(database).to_string();
        debug!(svg_len = svg_text.len(), "Built SVG scene");

        let png = self.rasterize(&svg_text)?;
        info!(png_len = png.len(), "PNG rendering completed");
        Ok(png)
    }

    fn name(&self) -> &'static str {
        "raster"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "png"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer(width: u32, height: u32) -> RasterRenderer {
        RasterRenderer::with_config(RenderConfig::new(width, height).with_system_fonts(false))
    }

    fn line(particle: ParticleType) -> Edge {
        Edge::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0), particle)
    }

    #[test]
    fn test_fermion_arrow_points_forward() {
        let head = arrowhead(&line(ParticleType::Fermion)).unwrap().to_string();
        assert!(head.contains("70,0 58,5 58,-5"), "{}", head);
    }

    #[test]
    fn test_antifermion_arrow_points_backward() {
        let head = arrowhead(&line(ParticleType::Antifermion)).unwrap().to_string();
        assert!(head.contains("30,0 42,-5 42,5"), "{}", head);
    }

    #[test]
    fn test_undirected_lines_have_no_arrow() {
        for particle in [
            ParticleType::Photon,
            ParticleType::Gluon,
            ParticleType::NeutralLine,
            ParticleType::Unknown,
        ] {
            assert!(arrowhead(&line(particle)).is_none());
        }
        let degenerate = Edge::new(Point::new(5.0, 5.0), Point::new(5.0, 5.0), ParticleType::Fermion);
        assert!(arrowhead(&degenerate).is_none());
    }

    #[test]
    fn test_dash_patterns() {
        assert_eq!(dash_pattern(ParticleType::Photon), Some(PHOTON_DASH));
        assert_eq!(dash_pattern(ParticleType::Gluon), Some(GLUON_DASH));
        assert_eq!(dash_pattern(ParticleType::Fermion), None);
        let svg = edge_line(&line(ParticleType::Unknown)).to_string();
        assert!(svg.contains("#222222"));
        assert!(!svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_vertex_colored_line_uses_unknown_color() {
        let svg = edge_line(&line(ParticleType::Vertex)).to_string();
        assert!(svg.contains(UNKNOWN_COLOR), "{}", svg);
        assert!(!svg.contains("#000000"), "{}", svg);
        assert!(!svg.contains("stroke-dasharray"));
        assert_eq!(edge_color(ParticleType::Fermion), "#1f77b4");
    }

    #[test]
    fn test_nodes_are_drawn_after_edges() {
        let db = FeynmanDatabase::from_parts(
            vec![Node::new(0, 50.0, 0.0, ParticleType::Vertex)],
            vec![line(ParticleType::Photon)],
        )
        .unwrap();
        let svg = renderer(200, 100).svg_document(&db).to_string();
        let line_at = svg.find("<line").unwrap();
        let circle_at = svg.find("<circle").unwrap();
        assert!(line_at < circle_at);
        assert!(svg.contains("vertex"));
        assert!(svg.contains("stroke-dasharray"));
    }

    #[test]
    fn test_png_has_canvas_dimensions() {
        let db = FeynmanDatabase::from_parts(
            vec![Node::new(0, 40.0, 30.0, ParticleType::Unknown)],
            vec![],
        )
        .unwrap();
        let png = renderer(120, 80).render(&db).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (120, 80));

        let center = pixmap.pixel(40, 30).unwrap();
        assert_eq!((center.red(), center.green(), center.blue()), (0, 0, 0));
        let corner = pixmap.pixel(119, 79).unwrap();
        assert_eq!((corner.red(), corner.green(), corner.blue()), (255, 255, 255));
    }

    #[test]
    fn test_zero_sized_canvas_is_a_render_error() {
        let err = renderer(0, 0).render(&FeynmanDatabase::new()).unwrap_err();
        assert!(err.to_string().contains("Render error"));
    }
}
