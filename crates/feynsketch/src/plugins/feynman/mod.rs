//! Feynman diagram plugin
//!
//! Turns the shapes of a drawn canvas into typed vertices and propagators,
//! then renders them as a PNG image or as TikZ source.

use crate::core::{Detector, Diagram};
use std::sync::Arc;

mod classifier;
mod database;
mod detector;
mod parser;
mod raster;
mod shape;
mod tikz;

pub use classifier::*;
pub use database::*;
pub use detector::*;
pub use parser::*;
pub use raster::*;
pub use shape::*;
pub use tikz::*;

/// Feynman diagram implementation
pub struct FeynmanDiagram;

impl Diagram for FeynmanDiagram {
    type Database = FeynmanDatabase;
    type Parser = FeynmanParser;
    type RasterRenderer = RasterRenderer;
    type MarkupRenderer = TikzRenderer;

    fn detector() -> Arc<dyn Detector> {
        Arc::new(CanvasDetector::new())
    }

    fn create_parser() -> Self::Parser {
        FeynmanParser::new()
    }

    fn create_database() -> Self::Database {
        FeynmanDatabase::new()
    }

    fn create_raster_renderer() -> Self::RasterRenderer {
        RasterRenderer::new()
    }

    fn create_markup_renderer() -> Self::MarkupRenderer {
        TikzRenderer::new()
    }

    fn name() -> &'static str {
        "feynman"
    }

    fn version() -> &'static str {
        "0.1.0"
    }
}
