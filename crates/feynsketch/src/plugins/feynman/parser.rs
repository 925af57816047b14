//! Canvas-object parser
//!
//! Reconstructs vertices and propagators from the drawing surface's shape
//! list. Circles and ellipses become nodes, lines and paths become edges,
//! everything else is dropped. The particle type of each record comes from
//! its stroke color alone.

use anyhow::Result;
use serde_json::Value;
use tracing::{debug, info, span, trace, Level};

use super::shape::Shape;
use super::FeynmanDatabase;
use crate::core::{Database, DiagramError, Edge, Node, Palette, Parser};

/// Parser for canvas JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct FeynmanParser {
    palette: Palette,
}

impl FeynmanParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn palette(&self) -> Palette {
        self.palette
    }

    /// Extract the shape list from canvas JSON text
    ///
    /// Accepts `{"objects": [...]}` or a bare array. Blank text, `null`, a
    /// missing `objects` key or a non-array `objects` value all mean "no
    /// shapes". Text that is not JSON is an error.
    pub fn shape_list(input: &str) -> Result<Vec<Value>> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(Vec::new());
        }

        let document: Value = serde_json::from_str(input)
            .map_err(|e| DiagramError::parse_error(format!("Invalid canvas JSON: {}", e)))?;

        let objects = match document {
            Value::Array(objects) => objects,
            Value::Object(mut map) => match map.remove("objects") {
                Some(Value::Array(objects)) => objects,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };
        Ok(objects)
    }

    /// Reconstruct nodes and edges from raw canvas records
    ///
    /// Pure: the same slice always yields the same result. Node ids start at
    /// 0 and follow input order; edges keep input order.
    pub fn parse_objects(&self, objects: &[Value]) -> (Vec<Node>, Vec<Edge>) {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        for (index, object) in objects.iter().enumerate() {
            let shape = Shape::from_value(object);
            let particle = self.palette.classify(shape.stroke());

            match &shape {
                Shape::Circle(circle) => {
                    let center = circle.center();
                    nodes.push(
                        Node::new(nodes.len(), center.x, center.y, particle).with_raw(object.clone()),
                    );
                }
                Shape::Line(_) | Shape::Path(_) => {
                    if let Some((start, end)) = shape.segment() {
                        edges.push(Edge::new(start, end, particle).with_raw(object.clone()));
                    }
                }
                Shape::Other { .. } => {
                    trace!(index, kind = shape.kind(), "Skipping unsupported shape");
                }
            }
        }

        (nodes, edges)
    }
}

impl Parser<FeynmanDatabase> for FeynmanParser {
    fn parse(&self, input: &str, database: &mut FeynmanDatabase) -> Result<()> {
        let parse_span = span!(Level::INFO, "parse_canvas", input_len = input.len());
        let _enter = parse_span.enter();

        trace!("Starting canvas parsing");

        // Each reconstruction starts over; ids restart at 0.
        database.clear();

        let objects = Self::shape_list(input)?;
        debug!(object_count = objects.len(), "Extracted canvas objects");

        let (nodes, edges) = self.parse_objects(&objects);
        let skipped = objects.len() - nodes.len() - edges.len();

        for node in nodes {
            database.add_node(node)?;
        }
        for edge in edges {
            database.add_edge(edge)?;
        }

        info!(
            node_count = database.node_count(),
            edge_count = database.edge_count(),
            skipped,
            "Canvas parsing completed"
        );

        Ok(())
    }

    fn name(&self) -> &'static str {
        "feynman"
    }

    fn version(&self) -> &'static str {
        "0.1.0"
    }

    fn can_parse(&self, input: &str) -> bool {
        Self::shape_list(input).is_ok()
    }
}
