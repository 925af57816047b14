//! Core diagram trait for all diagram types
//!
//! This trait ties together the detector, parser, database and renderers
//! that make up one diagram plugin.

use super::{Database, Detector, Parser, Renderer};
use std::sync::Arc;

/// Core trait for diagram types
///
/// # Example
/// ```
/// use feynsketch::core::Diagram;
/// use feynsketch::plugins::feynman::FeynmanDiagram;
///
/// assert_eq!(FeynmanDiagram::name(), "feynman");
/// ```
pub trait Diagram: Send + Sync {
    /// The specific database type for this diagram
    type Database: Database + Send + Sync;

    /// The parser type for this diagram
    type Parser: Parser<Self::Database> + Send + Sync;

    /// The raster renderer type for this diagram
    type RasterRenderer: Renderer<Self::Database, Output = Vec<u8>> + Send + Sync;

    /// The markup renderer type for this diagram
    type MarkupRenderer: Renderer<Self::Database, Output = String> + Send + Sync;

    /// Get the detector for this diagram type
    fn detector() -> Arc<dyn Detector>;

    /// Create a new parser instance
    fn create_parser() -> Self::Parser;

    /// Create a new database instance
    fn create_database() -> Self::Database;

    /// Create a new raster renderer instance
    fn create_raster_renderer() -> Self::RasterRenderer;

    /// Create a new markup renderer instance
    fn create_markup_renderer() -> Self::MarkupRenderer;

    /// Get the name of this diagram type
    fn name() -> &'static str;

    /// Get the version of this diagram type
    fn version() -> &'static str;
}
