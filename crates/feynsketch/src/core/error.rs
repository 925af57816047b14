//! Core error types for diagram processing
//!
//! This module defines common error types used throughout the reconstruction pipeline.

use thiserror::Error;

/// Core error types for diagram processing
#[derive(Error, Debug)]
pub enum DiagramError {
    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Detection error: {message}")]
    DetectionError { message: String },

    /// Export was requested for a canvas with no vertices and no propagators
    #[error("Nothing to export: the canvas has no vertices or propagators")]
    EmptyDiagram,

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl DiagramError {
    /// Create a new parse error
    pub fn parse_error(message: impl Into<String>) -> Self {
        Self::ParseError {
            message: message.into(),
        }
    }

    /// Create a new render error
    pub fn render_error(message: impl Into<String>) -> Self {
        Self::RenderError {
            message: message.into(),
        }
    }

    /// Create a new detection error
    pub fn detection_error(message: impl Into<String>) -> Self {
        Self::DetectionError {
            message: message.into(),
        }
    }

    /// Returns true for the recoverable "nothing to export" condition
    pub fn is_empty_diagram(&self) -> bool {
        matches!(self, Self::EmptyDiagram)
    }
}
