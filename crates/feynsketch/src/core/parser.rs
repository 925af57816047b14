//! Core parser trait for canvas documents
//!
//! This trait defines the interface for turning the drawing surface's
//! serialized shape list into structured data stored in a database.

use anyhow::Result;

use super::Database;

/// Core trait for diagram parsers
///
/// # Example
/// ```
/// use feynsketch::core::{Database, Parser};
/// use feynsketch::plugins::feynman::{FeynmanDatabase, FeynmanParser};
///
/// let parser = FeynmanParser::new();
/// let mut db = FeynmanDatabase::new();
/// parser
///     .parse(r##"{"objects":[{"type":"circle","left":0,"top":0,"stroke":"#000000"}]}"##, &mut db)
///     .unwrap();
/// assert_eq!(db.node_count(), 1);
/// ```
pub trait Parser<D: Database>: Send + Sync {
    /// Parse a serialized canvas into the provided database
    fn parse(&self, input: &str, database: &mut D) -> Result<()>;

    /// Get the name of this parser
    fn name(&self) -> &'static str;

    /// Get the version of this parser
    fn version(&self) -> &'static str;

    /// Check if the input can be parsed by this parser
    fn can_parse(&self, input: &str) -> bool;
}
