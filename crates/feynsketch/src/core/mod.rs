//! Core abstractions for diagram processing
//!
//! This module defines the traits every diagram plugin implements
//! (detector, parser, database, renderer) together with the shared
//! particle types, palette, configuration, errors and logging.

mod config;
mod database;
mod detector;
mod diagram;
mod error;
pub mod logging;
mod palette;
mod parser;
mod renderer;
mod types;

pub use config::*;
pub use database::*;
pub use detector::*;
pub use diagram::*;
pub use error::*;
pub use logging::*;
pub use palette::*;
pub use parser::*;
pub use renderer::*;
pub use types::*;
