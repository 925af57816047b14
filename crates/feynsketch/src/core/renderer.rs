//! Core renderer trait for diagram output
//!
//! This trait defines the interface for rendering diagram data
//! into output formats (PNG bytes, TikZ text).

use anyhow::Result;

use super::Database;

/// Core trait for diagram renderers
///
/// Renderers are pure: they read the database and return the artifact,
/// leaving persistence to the caller.
pub trait Renderer<D: Database>: Send + Sync {
    /// The output type of this renderer
    type Output;

    /// Render the diagram database into the output format
    fn render(&self, database: &D) -> Result<Self::Output>;

    /// Get the name of this renderer
    fn name(&self) -> &'static str;

    /// Get the version of this renderer
    fn version(&self) -> &'static str;

    /// Get the supported output format
    fn format(&self) -> &'static str;
}
