//! Canvas document detector
//!
//! Recognises the JSON emitted by the drawing surface before it is parsed.

use serde_json::Value;
use tracing::{debug, info, trace};

use crate::core::Detector;

/// Detector for drawable-canvas JSON documents
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasDetector;

impl CanvasDetector {
    pub fn new() -> Self {
        Self
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl Detector for CanvasDetector {
    fn detect(&self, input: &str) -> bool {
        let input = input.trim();
        trace!(input_len = input.len(), "CanvasDetector::detect called");

        if input.is_empty() {
            debug!("Empty input, detection failed");
            return false;
        }

        // Any JSON document is a canvas; the parser reads a missing or
        // malformed shape list as an empty one.
        match serde_json::from_str::<Value>(input) {
            Ok(Value::Object(map)) => {
                if map.get("objects").is_some_and(Value::is_array) {
                    info!("Detected canvas document via objects list");
                } else {
                    debug!("JSON object without an objects list, treating as empty canvas");
                }
                true
            }
            Ok(Value::Array(items)) => {
                debug!(item_count = items.len(), "Detected bare shape list");
                true
            }
            Ok(other) => {
                debug!(kind = json_kind(&other), "Scalar JSON, treating as empty canvas");
                true
            }
            Err(e) => {
                trace!(error = %e, "Input is not JSON");
                false
            }
        }
    }

    fn confidence(&self, input: &str) -> f64 {
        let input = input.trim();
        if input.is_empty() {
            return 0.0;
        }

        let Ok(document) = serde_json::from_str::<Value>(input) else {
            return 0.0;
        };

        let mut score: f64 = 0.0;
        match &document {
            Value::Object(map) => {
                if map.get("objects").is_some_and(Value::is_array) {
                    score += 0.7;
                }
                // Fabric.js stamps its version on serialized canvases
                if map.contains_key("version") {
                    score += 0.2;
                }
            }
            Value::Array(_) => score += 0.4,
            _ => {}
        }

        let objects = match &document {
            Value::Object(map) => map.get("objects").and_then(Value::as_array),
            Value::Array(items) => Some(items),
            _ => None,
        };
        if let Some(objects) = objects {
            if objects
                .iter()
                .any(|o| o.get("stroke").is_some() || o.get("strokeStyle").is_some())
            {
                score += 0.1;
            }
        }

        score.min(1.0)
    }

    fn diagram_type(&self) -> &'static str {
        "feynman"
    }

    fn patterns(&self) -> Vec<&'static str> {
        vec!["\"objects\"", "\"type\"", "\"stroke\""]
    }
}
