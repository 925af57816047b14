//! WebAssembly bindings for Feynsketch
//!
//! Browser-facing wrappers a canvas page calls with the JSON its drawing
//! surface serializes. Errors surface as JavaScript exceptions.

use wasm_bindgen::prelude::*;

use crate::core::{Database, DrawingMode, DrawingSettings, Palette, ParticleType, RenderConfig};
use crate::plugins::Orchestrator;

/// Initialize WASM module
///
/// Sets up panic hooks and logging for better error messages in the browser.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    use crate::core::logging::init_logging;
    let _ = init_logging(Some("info"), None);
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn orchestrator(width: u32, height: u32) -> Orchestrator {
    Orchestrator::with_feynman_plugins(RenderConfig::new(width, height))
}

/// Reconstruct a canvas and return a JSON report
///
/// The report holds the node and edge lists plus the human-readable summary.
#[wasm_bindgen]
pub fn reconstruct(input: &str) -> Result<String, JsValue> {
    let database = Orchestrator::new().reconstruct(input).map_err(to_js_error)?;

    let result = serde_json::json!({
        "node_count": database.node_count(),
        "edge_count": database.edge_count(),
        "nodes": database.node_list(),
        "edges": database.edge_list(),
        "summary": database.summary().to_string(),
    });

    serde_json::to_string(&result).map_err(to_js_error)
}

/// Generate TikZ source for a canvas of the given size
#[wasm_bindgen]
pub fn export_tikz(input: &str, width: u32, height: u32) -> Result<String, JsValue> {
    orchestrator(width, height)
        .export_tikz(input)
        .map_err(to_js_error)
}

/// Rasterize a canvas of the given size to PNG bytes
#[wasm_bindgen]
pub fn export_png(input: &str, width: u32, height: u32) -> Result<Vec<u8>, JsValue> {
    orchestrator(width, height)
        .export_png(input)
        .map_err(to_js_error)
}

/// Palette as JSON for the type selector and legend
#[wasm_bindgen]
pub fn palette_json() -> String {
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
    serde_json::Value::Array(entries).to_string()
}

/// Drawing-surface configuration for the current selector state
#[wasm_bindgen]
pub fn drawing_settings_json(particle: &str, stroke_width: u8, mode: &str) -> Result<String, JsValue> {
    let particle: ParticleType = particle.parse().map_err(to_js_error)?;
    let mode: DrawingMode = mode.parse().map_err(to_js_error)?;
    let settings = DrawingSettings::new(particle, stroke_width, mode);

    let result = serde_json::json!({
        "stroke_color": settings.stroke_color(),
        "stroke_width": settings.stroke_width(),
        "mode": mode.to_string(),
        "background_color": DrawingSettings::BACKGROUND_COLOR,
        "fill_color": DrawingSettings::FILL_COLOR,
    });
    Ok(result.to_string())
}
