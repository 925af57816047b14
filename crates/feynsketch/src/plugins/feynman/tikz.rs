//! TikZ source generation
//!
//! Emits a `tikzpicture` describing the reconstructed diagram. TikZ puts the
//! origin bottom-left with y growing upward, so every y coordinate is
//! flipped against the canvas height to keep the drawn layout.

use anyhow::Result;
use std::fmt::Write as _;
use tracing::{debug, info, span, Level};

use super::FeynmanDatabase;
use crate::core::{Database, Edge, Node, ParticleType, RenderConfig, Renderer};

/// Libraries the preamble styles depend on
pub const TIKZ_LIBRARIES: &str = "decorations.pathmorphing,arrows.meta";

const PREAMBLE: &str = "\\begin{tikzpicture}[scale=0.035, >=Stealth]\n\
\\tikzset{photon/.style={decorate, decoration={snake, amplitude=1.2mm}, line width=1pt}}\n\
\\tikzset{gluon/.style={decorate, decoration={coil, aspect=0.6, segment length=2pt}, line width=1pt}}\n";

const CLOSING: &str = "\\end{tikzpicture}\n";

/// TikZ markup renderer
#[derive(Debug, Clone, Copy, Default)]
pub struct TikzRenderer {
    config: RenderConfig,
}

impl TikzRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    fn flip_y(&self, y: f64) -> f64 {
        f64::from(self.config.canvas_height) - y
    }

    fn node_line(&self, node: &Node) -> String {
        format!(
            "\\node[draw, circle, inner sep=1pt] (n{id}) at ({x:.1},{y:.1}) {{{id}}};",
            id = node.id,
            x = node.x,
            y = self.flip_y(node.y),
        )
    }

    fn edge_line(&self, edge: &Edge) -> String {
        let options = match edge.particle {
            ParticleType::Fermion => "[->]",
            ParticleType::Antifermion => "[<-]",
            ParticleType::Photon => "[photon]",
            ParticleType::Gluon => "[gluon]",
            ParticleType::NeutralLine | ParticleType::Unknown | ParticleType::Vertex => "",
        };
        format!(
            "\\draw{} ({:.1},{:.1}) -- ({:.1},{:.1});",
            options,
            edge.x1,
            self.flip_y(edge.y1),
            edge.x2,
            self.flip_y(edge.y2),
        )
    }
}

impl Renderer<FeynmanDatabase> for TikzRenderer {
    type Output = String;

    fn render(&self, database: &FeynmanDatabase) -> Result<String> {
        let render_span = span!(
            Level::INFO,
            "render_tikz",
            node_count = database.node_count(),
            edge_count = database.edge_count()
        );
        let _enter = render_span.enter();

        let mut out = String::new();

        if self.config.standalone {
            out.push_str("\\documentclass[tikz]{standalone}\n");
            let _ = writeln!(out, "\\usetikzlibrary{{{}}}", TIKZ_LIBRARIES);
            out.push_str("\\begin{document}\n");
        }

        out.push_str("% TikZ generated by feynsketch\n");
        out.push_str(PREAMBLE);

        for node in database.nodes() {
            let _ = writeln!(out, "{}", self.node_line(node));
        }
        debug!("Emitted node declarations");

        for edge in database.edges() {
            let _ = writeln!(out, "{}", self.edge_line(edge));
        }
        debug!("Emitted edge paths");

        out.push_str(CLOSING);

        if self.config.standalone {
            out.push_str("\\end{document}\n");
        }

        info!(output_len = out.len(), "TikZ rendering completed");
        Ok(out)
    }

    fn name(&self) -> &'static str {
        "tikz"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn format(&self) -> &'static str {
        "tikz"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Point;

    fn edge(particle: ParticleType) -> Edge {
        Edge::new(Point::new(0.0, 0.0), Point::new(100.0, 50.0), particle)
    }

    #[test]
    fn test_node_y_is_flipped() {
        let renderer = TikzRenderer::new();
        let line = renderer.node_line(&Node::new(3, 10.0, 50.0, ParticleType::Vertex));
        assert_eq!(
            line,
            "\\node[draw, circle, inner sep=1pt] (n3) at (10.0,350.0) {3};"
        );
    }

    #[test]
    fn test_edge_directives_per_particle() {
        let renderer = TikzRenderer::with_config(RenderConfig::new(200, 100));
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::Fermion)),
            "\\draw[->] (0.0,100.0) -- (100.0,50.0);"
        );
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::Antifermion)),
            "\\draw[<-] (0.0,100.0) -- (100.0,50.0);"
        );
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::Photon)),
            "\\draw[photon] (0.0,100.0) -- (100.0,50.0);"
        );
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::Gluon)),
            "\\draw[gluon] (0.0,100.0) -- (100.0,50.0);"
        );
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::NeutralLine)),
            "\\draw (0.0,100.0) -- (100.0,50.0);"
        );
        assert_eq!(
            renderer.edge_line(&edge(ParticleType::Unknown)),
            "\\draw (0.0,100.0) -- (100.0,50.0);"
        );
    }

    #[test]
    fn test_one_decimal_precision() {
        let renderer = TikzRenderer::new();
        let line = renderer.node_line(&Node::new(0, 12.345, 0.06, ParticleType::Vertex));
        assert!(line.contains("(12.3,399.9)"), "{}", line);
    }

    #[test]
    fn test_document_structure() {
        let db = FeynmanDatabase::from_parts(
            vec![Node::new(0, 15.0, 25.0, ParticleType::Vertex)],
            vec![edge(ParticleType::Photon)],
        )
        .unwrap();
        let tikz = TikzRenderer::new().render(&db).unwrap();
        let lines: Vec<&str> = tikz.lines().collect();
        assert!(lines[0].starts_with('%'));
        assert!(lines[1].starts_with("\\begin{tikzpicture}"));
        assert!(lines[2].starts_with("\\tikzset{photon/.style"));
        assert!(lines[3].starts_with("\\tikzset{gluon/.style"));
        assert!(lines[4].starts_with("\\node"));
        assert!(lines[5].starts_with("\\draw[photon]"));
        assert_eq!(lines[6], "\\end{tikzpicture}");
        assert_eq!(lines.len(), 7);
        assert!(!tikz.contains("documentclass"));
    }

    #[test]
    fn test_standalone_wrapper() {
        let renderer = TikzRenderer::with_config(RenderConfig::default().with_standalone(true));
        let tikz = renderer.render(&FeynmanDatabase::new()).unwrap();
        assert!(tikz.starts_with("\\documentclass[tikz]{standalone}\n"));
        assert!(tikz.contains("\\usetikzlibrary{decorations.pathmorphing,arrows.meta}"));
        assert!(tikz.ends_with("\\end{tikzpicture}\n\\end{document}\n"));
    }

    #[test]
    fn test_renderer_metadata() {
        let renderer = TikzRenderer::new();
        assert_eq!(renderer.name(), "tikz");
        assert_eq!(renderer.format(), "tikz");
        assert_eq!(renderer.config().canvas_height, 400);
    }
}
