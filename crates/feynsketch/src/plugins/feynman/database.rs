//! Reconstructed diagram storage
//!
//! Holds the vertices and propagators produced by one parse of the canvas.

use anyhow::Result;
use serde::Serialize;
use std::fmt;
use tracing::debug;

use crate::core::{Database, DiagramError, Edge, Node};

/// Vertices and propagators of one reconstruction cycle
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FeynmanDatabase {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
}

impl FeynmanDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a database from already reconstructed parts
    ///
    /// Fails if node ids are not exactly `0..nodes.len()` in order.
    pub fn from_parts(nodes: Vec<Node>, edges: Vec<Edge>) -> Result<Self> {
        let mut database = Self::new();
        for node in nodes {
            database.add_node(node)?;
        }
        for edge in edges {
            database.add_edge(edge)?;
        }
        Ok(database)
    }

    /// Id the next vertex will receive
    pub fn next_node_id(&self) -> usize {
        self.nodes.len()
    }

    pub fn node_list(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edge_list(&self) -> &[Edge] {
        &self.edges
    }

    /// Human-readable listing of what was detected
    pub fn summary(&self) -> Summary<'_> {
        Summary { database: self }
    }
}

impl Database for FeynmanDatabase {
    type Node = Node;
    type Edge = Edge;

    fn add_node(&mut self, node: Node) -> Result<()> {
        if node.id != self.nodes.len() {
            return Err(DiagramError::parse_error(format!(
                "Node id {} out of sequence, expected {}",
                node.id,
                self.nodes.len()
            ))
            .into());
        }
        debug!(node_id = node.id, particle = %node.particle, "Added vertex");
        self.nodes.push(node);
        Ok(())
    }

    fn add_edge(&mut self, edge: Edge) -> Result<()> {
        debug!(edge_index = self.edges.len(), particle = %edge.particle, "Added propagator");
        self.edges.push(edge);
        Ok(())
    }

    fn get_node(&self, id: usize) -> Option<&Node> {
        self.nodes.get(id)
    }

    fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

/// Display adapter listing vertices and propagators
///
/// ```text
/// 1 vertices, 1 propagators
/// Node 0: (15, 25) — fermion (→/←)
/// Edge 0: (0,0) → (100,0) — photon
/// ```
pub struct Summary<'a> {
    database: &'a FeynmanDatabase,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} vertices, {} propagators",
            self.database.node_count(),
            self.database.edge_count()
        )?;
        for node in &self.database.nodes {
            write!(
                f,
                "\nNode {}: ({}, {}) — {}",
                node.id,
                node.x as i64,
                node.y as i64,
                node.particle.display_name()
            )?;
        }
        for (index, edge) in self.database.edges.iter().enumerate() {
            write!(
                f,
                "\nEdge {}: ({},{}) → ({},{}) — {}",
                index,
                edge.x1 as i64,
                edge.y1 as i64,
                edge.x2 as i64,
                edge.y2 as i64,
                edge.particle.display_name()
            )?;
        }
        Ok(())
    }
}
