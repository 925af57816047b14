//! Plugin implementations
//!
//! The Feynman diagram plugin implements the core traits for drawn canvases;
//! the orchestrator runs it end to end.

pub mod feynman;
pub mod orchestrator;

pub use feynman::*;
pub use orchestrator::*;
