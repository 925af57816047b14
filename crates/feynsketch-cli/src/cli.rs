//! Command-line interface for the feynsketch utility
//!
//! Reads the JSON a drawing canvas serializes and turns it into a PNG image
//! or TikZ source, or reports what was reconstructed.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use crate::colorizer::render_legend;
use feynsketch::core::logging::{init_logging, LOG_FORMAT_ENV, LOG_LEVEL_ENV};
use feynsketch::core::Database;
use feynsketch::plugins::Orchestrator;
use feynsketch::{
    ExportFormat, Palette, RenderConfig, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
};

/// Feynsketch - Turn drawn Feynman diagram canvases into PNG and TikZ
#[derive(Parser)]
#[command(name = "feynsketch")]
#[command(about = "Reconstruct hand-drawn Feynman diagrams and export them as PNG or TikZ")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Set log level (trace|debug|info|warn|error)
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Set log format (compact|pretty|json)
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Log level options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

/// Log format options
#[derive(Copy, Clone, Debug, clap::ValueEnum, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Compact => "compact",
            LogFormat::Pretty => "pretty",
            LogFormat::Json => "json",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the vertices and propagators reconstructed from a canvas
    Inspect {
        /// Input file containing canvas JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Print nodes and edges as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export a canvas as PNG or TikZ
    Export {
        /// Input file containing canvas JSON (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output file (use - for stdout). PNG defaults to feynman_diagram.png,
        /// TikZ defaults to stdout.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Artifact to produce
        #[arg(short, long, value_enum, default_value_t = FormatChoice::Tikz)]
        format: FormatChoice,

        /// Wrap TikZ in a compilable standalone LaTeX document
        #[arg(long)]
        standalone: bool,

        /// Canvas width in pixels
        #[arg(long, default_value_t = DEFAULT_CANVAS_WIDTH)]
        width: u32,

        /// Canvas height in pixels
        #[arg(long, default_value_t = DEFAULT_CANVAS_HEIGHT)]
        height: u32,
    },

    /// Show the color legend of the particle palette
    Legend {
        /// Show in JSON format
        #[arg(long)]
        json: bool,

        /// When to use colors in output
        #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
        color: ColorChoice,
    },

    /// Check that input is a canvas document with something to export
    Validate {
        /// Input file to validate (use - for stdin)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
}

/// Export artifact choices
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum FormatChoice {
    Png,
    Tikz,
}

impl From<FormatChoice> for ExportFormat {
    fn from(value: FormatChoice) -> Self {
        match value {
            FormatChoice::Png => ExportFormat::Png,
            FormatChoice::Tikz => ExportFormat::Tikz,
        }
    }
}

/// When to colorize output
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Use colors if output is a terminal and NO_COLOR is not set
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Main CLI application
pub struct FeynsketchApp {
    orchestrator: Orchestrator,
}

impl FeynsketchApp {
    /// Create a new application instance with default settings
    pub fn new() -> Self {
        Self::with_config(RenderConfig::default())
    }

    /// Create a new application instance with a render config
    pub fn with_config(config: RenderConfig) -> Self {
        Self {
            orchestrator: Orchestrator::with_feynman_plugins(config),
        }
    }

    /// Run the application with the given CLI arguments
    pub fn run(&mut self, cli: Cli) -> Result<()> {
        // Environment variables take precedence over flags
        let log_level_str = std::env::var(LOG_LEVEL_ENV)
            .ok()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .or_else(|| Some(cli.log_level.as_str().to_string()));

        let log_format_str = std::env::var(LOG_FORMAT_ENV)
            .ok()
            .or_else(|| Some(cli.log_format.as_str().to_string()));

        if let Err(e) = init_logging(log_level_str.as_deref(), log_format_str.as_deref()) {
            eprintln!("Warning: Failed to initialize logging: {}", e);
        }

        if cli.verbose {
            eprintln!("Feynsketch v{}", env!("CARGO_PKG_VERSION"));
        }

        match cli.command {
            Commands::Inspect { input, json } => self.inspect_command(input, json, cli.verbose),
            Commands::Export {
                input,
                output,
                format,
                standalone,
                width,
                height,
            } => {
                let config = RenderConfig::new(width, height).with_standalone(standalone);
                self.orchestrator = Orchestrator::with_feynman_plugins(config);
                self.export_command(input, output, format.into(), cli.verbose)
            }
            Commands::Legend { json, color } => self.legend_command(json, color, cli.verbose),
            Commands::Validate { input } => self.validate_command(input, cli.verbose),
        }
    }

    /// Handle the inspect command
    fn inspect_command(&self, input: Option<PathBuf>, json: bool, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let database = self.orchestrator.reconstruct(&content)?;

        if json {
            println!("{}", serde_json::to_string_pretty(&database)?);
        } else {
            println!("{}", database.summary());
        }
        Ok(())
    }

    /// Handle the export command
    fn export_command(
        &self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        format: ExportFormat,
        verbose: bool,
    ) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        let artifact = self.orchestrator.export(&content, format)?;

        let output = match output {
            Some(path) => Some(path),
            None if format.is_binary() => Some(PathBuf::from(format.file_name())),
            None => None,
        };

        if verbose {
            let destination = output
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "stdout".to_string());
            eprintln!(
                "Exported {} bytes of {} ({}) to {}",
                artifact.len(),
                format,
                format.mime_type(),
                destination
            );
        }

        self.write_output(output, &artifact)
    }

    /// Determine if we should colorize based on color choice and terminal
    fn should_colorize(&self, color: ColorChoice) -> bool {
        match color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => {
                if std::env::var("NO_COLOR").is_ok() {
                    return false;
                }
                crossterm::tty::IsTty::is_tty(&std::io::stdout())
            }
        }
    }

    /// Handle the legend command
    fn legend_command(&self, json: bool, color: ColorChoice, verbose: bool) -> Result<()> {
        if verbose {
            eprintln!("Listing particle palette");
        }

        let legend = Palette::standard().legend();

        if json {
            let entries: Vec<_> = Palette::standard()
                .entries()
                .iter()
                .map(|entry| {
                    serde_json::json!({
                        "particle": entry.particle,
                        "name": entry.particle.display_name(),
                        "color": entry.color,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        } else {
            println!("{}", render_legend(&legend, self.should_colorize(color)));
        }

        Ok(())
    }

    /// Handle the validate command
    fn validate_command(&self, input: Option<PathBuf>, verbose: bool) -> Result<()> {
        let content = self.read_input(input)?;

        if verbose {
            eprintln!("Read {} bytes of input", content.len());
        }

        match self.orchestrator.reconstruct(&content) {
            Ok(database) if database.is_empty() => {
                println!("✗ Canvas has nothing to export");
                Err(anyhow!("Nothing to export"))
            }
            Ok(database) => {
                println!(
                    "✓ Valid canvas: {} vertices, {} propagators",
                    database.node_count(),
                    database.edge_count()
                );
                Ok(())
            }
            Err(e) => {
                println!("✗ Invalid canvas: {}", e);
                Err(e)
            }
        }
    }

    /// Read input from file or stdin
    pub fn read_input(&self, input: Option<PathBuf>) -> Result<String> {
        match input {
            Some(path) if path.to_string_lossy() != "-" => fs::read_to_string(&path)
                .map_err(|e| anyhow!("Failed to read input file '{}': {}", path.display(), e)),
            _ => {
                let mut content = String::new();
                io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
        }
    }

    /// Write an artifact to a file or stdout
    pub fn write_output(&self, output: Option<PathBuf>, content: &[u8]) -> Result<()> {
        match output {
            Some(path) if path.to_string_lossy() != "-" => {
                fs::write(&path, content).map_err(|e| {
                    anyhow!("Failed to write output file '{}': {}", path.display(), e)
                })?;
            }
            _ => {
                let mut stdout = io::stdout().lock();
                stdout.write_all(content)?;
                stdout.flush()?;
            }
        }
        Ok(())
    }

    /// Get a reference to the orchestrator (for testing)
    #[cfg(test)]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }
}

impl Default for FeynsketchApp {
    fn default() -> Self {
        Self::new()
    }
}
