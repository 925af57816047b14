//! Snapshot tests for TikZ output
//!
//! These tests compare generated TikZ against golden files in tests/fixtures/.
//! To update fixtures after changing the generator, run the tests with UPDATE_FIXTURES=1

use feynsketch::{render_tikz_with_config, RenderConfig};
use std::fs;
use std::path::Path;

/// Compare generated TikZ to a fixture file
fn assert_fixture(name: &str, input: &str, config: RenderConfig) {
    let output = render_tikz_with_config(input, config).expect("render should succeed");
    let fixture_path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(format!("{}.tex", name));

    if std::env::var("UPDATE_FIXTURES").is_ok() {
        fs::write(&fixture_path, &output).expect("failed to write fixture");
        println!("Updated fixture: {}", fixture_path.display());
        return;
    }

    let expected = fs::read_to_string(&fixture_path).unwrap_or_else(|_| {
        panic!(
            "Fixture not found: {}\nRun with UPDATE_FIXTURES=1 to create it.\n\nActual output:\n{}",
            fixture_path.display(),
            output
        )
    });

    if output != expected {
        panic!(
            "Snapshot mismatch for '{}'!\n\n=== Expected ===\n{}\n=== Actual ===\n{}\nRun with UPDATE_FIXTURES=1 to update.",
            name, expected, output
        );
    }
}

#[test]
fn test_s_channel_exchange() {
    let input = r##"{"version": "4.4.0", "objects": [
        {"type": "circle", "left": 190, "top": 190, "radiusX": 10, "radiusY": 10, "stroke": "#000000"},
        {"type": "circle", "left": 590, "top": 190, "radiusX": 10, "radiusY": 10, "stroke": "#000000"},
        {"type": "line", "x1": 50, "y1": 50, "x2": 200, "y2": 200, "stroke": "#1f77b4"},
        {"type": "line", "x1": 50, "y1": 350, "x2": 200, "y2": 200, "stroke": "#ff7f0e"},
        {"type": "line", "x1": 200, "y1": 200, "x2": 600, "y2": 200, "stroke": "#2ca02c"},
        {"type": "line", "x1": 600, "y1": 200, "x2": 750, "y2": 50, "stroke": "#1f77b4"},
        {"type": "line", "x1": 600, "y1": 200, "x2": 750, "y2": 350, "stroke": "#ff7f0e"}
    ]}"##;
    assert_fixture("s_channel", input, RenderConfig::default());
}

#[test]
fn test_gluon_standalone_document() {
    let input = r##"{"objects": [
        {"type": "ellipse", "left": 95.5, "top": 45.25, "radiusX": 4.5, "radiusY": 4.75, "stroke": "#000000"},
        {"type": "line", "x1": 100, "y1": 50, "x2": 300, "y2": 50.04, "stroke": "#D62728"},
        {"type": "line", "x1": 300, "y1": 50, "x2": 300, "y2": 250, "stroke": "#9467bd"},
        {"type": "rect", "left": 0, "top": 0, "width": 40, "height": 40, "stroke": "#000000"},
        {"type": "line", "x1": 10, "y1": 10, "x2": 20, "y2": 20, "stroke": "#123456"}
    ]}"##;
    assert_fixture(
        "gluon_standalone",
        input,
        RenderConfig::new(800, 300).with_standalone(true),
    );
}
