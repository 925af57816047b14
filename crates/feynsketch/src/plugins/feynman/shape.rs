//! Drawn-shape records from the canvas host
//!
//! The drawing surface serializes every shape as a loosely typed JSON
//! object. This module is the boundary that turns such a record into a
//! [`Shape`], filling absent or non-numeric fields with fixed defaults so
//! nothing downstream has to probe optional fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::core::Point;

/// Radius assumed when a circle or ellipse carries none
pub const DEFAULT_RADIUS: f64 = 10.0;

/// A drawn shape after boundary parsing
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// `circle` or `ellipse`: becomes a vertex
    Circle(CircleShape),
    /// `line` or `path` with explicit endpoints
    Line(LineShape),
    /// `line` or `path` without explicit endpoints
    Path(PathShape),
    /// Any other kind (`rect`, freehand strokes, missing `type`)
    Other { kind: Option<String> },
}

/// Circle or ellipse, positioned by its bounding-box origin
#[derive(Debug, Clone, PartialEq)]
pub struct CircleShape {
    pub left: f64,
    pub top: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub stroke: String,
}

impl CircleShape {
    pub fn center(&self) -> Point {
        Point::new(self.left + self.radius_x, self.top + self.radius_y)
    }
}

/// Segment with endpoints given in canvas coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct LineShape {
    pub start: Point,
    pub end: Point,
    pub stroke: String,
}

/// Segment described by a bounding box and optional local points
#[derive(Debug, Clone, PartialEq)]
pub struct PathShape {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
    /// Points relative to (`left`, `top`)
    pub points: Vec<Point>,
    pub stroke: String,
}

impl PathShape {
    /// First and last point when there are at least two, else the box diagonal
    pub fn endpoints(&self) -> (Point, Point) {
        let origin = Point::new(self.left, self.top);
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() >= 2 => (
                origin.offset(first.x, first.y),
                origin.offset(last.x, last.y),
            ),
            _ => (origin, origin.offset(self.width, self.height)),
        }
    }
}

impl Shape {
    /// Parse one raw canvas record, never failing
    pub fn from_value(value: &Value) -> Shape {
        let raw = match RawShape::deserialize(value) {
            Ok(raw) => raw,
            Err(_) => return Shape::Other { kind: None },
        };
        raw.into_shape()
    }

    /// Lowercased stroke color, empty when the record had none
    pub fn stroke(&self) -> &str {
        match self {
            Shape::Circle(circle) => &circle.stroke,
            Shape::Line(line) => &line.stroke,
            Shape::Path(path) => &path.stroke,
            Shape::Other { .. } => "",
        }
    }

    /// Segment endpoints for line-like shapes
    pub fn segment(&self) -> Option<(Point, Point)> {
        match self {
            Shape::Line(line) => Some((line.start, line.end)),
            Shape::Path(path) => Some(path.endpoints()),
            _ => None,
        }
    }

    /// Kind name as reported in logs
    pub fn kind(&self) -> &str {
        match self {
            Shape::Circle(_) => "circle",
            Shape::Line(_) => "line",
            Shape::Path(_) => "path",
            Shape::Other { kind } => kind.as_deref().unwrap_or("<none>"),
        }
    }
}

/// Wire form of a canvas record; every field is optional
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawShape {
    #[serde(rename = "type", default, deserialize_with = "lenient_string")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    left: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    top: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    width: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    height: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    radius_x: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    radius_y: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    rx: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    ry: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    x1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    y1: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    x2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    y2: Option<f64>,
    #[serde(default, deserialize_with = "lenient_points")]
    points: Vec<Point>,
    #[serde(default, deserialize_with = "lenient_string")]
    stroke: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    stroke_style: Option<String>,
}

impl RawShape {
    fn stroke(&self) -> String {
        self.stroke
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.stroke_style.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or_default()
            .to_lowercase()
    }

    fn into_shape(self) -> Shape {
        let stroke = self.stroke();
        match self.kind.as_deref() {
            Some("circle") | Some("ellipse") => Shape::Circle(CircleShape {
                left: self.left.unwrap_or(0.0),
                top: self.top.unwrap_or(0.0),
                radius_x: self.radius_x.or(self.rx).unwrap_or(DEFAULT_RADIUS),
                radius_y: self.radius_y.or(self.ry).unwrap_or(DEFAULT_RADIUS),
                stroke,
            }),
            Some("line") | Some("path") => match self.x1 {
                Some(x1) => Shape::Line(LineShape {
                    start: Point::new(x1, self.y1.unwrap_or(0.0)),
                    end: Point::new(self.x2.unwrap_or(0.0), self.y2.unwrap_or(0.0)),
                    stroke,
                }),
                None => Shape::Path(PathShape {
                    left: self.left.unwrap_or(0.0),
                    top: self.top.unwrap_or(0.0),
                    width: self.width.unwrap_or(0.0),
                    height: self.height.unwrap_or(0.0),
                    points: self.points,
                    stroke,
                }),
            },
            _ => Shape::Other { kind: self.kind },
        }
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?.as_f64())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Value::deserialize(deserializer)?
        .as_str()
        .map(|s| s.to_string()))
}

fn lenient_points<'de, D>(deserializer: D) -> Result<Vec<Point>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let points = value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|p| {
                    Point::new(
                        p.get("x").and_then(Value::as_f64).unwrap_or(0.0),
                        p.get("y").and_then(Value::as_f64).unwrap_or(0.0),
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_circle_defaults() {
        let shape = Shape::from_value(&json!({"type": "circle"}));
        match shape {
            Shape::Circle(circle) => {
                assert_eq!(circle.center(), Point::new(10.0, 10.0));
                assert_eq!(circle.stroke, "");
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_ellipse_uses_rx_ry_fallback() {
        let shape = Shape::from_value(&json!({
            "type": "ellipse", "left": 100, "top": 50, "rx": 20, "ry": 5
        }));
        let Shape::Circle(circle) = shape else {
            panic!("expected circle");
        };
        assert_eq!(circle.center(), Point::new(120.0, 55.0));
    }

    #[test]
    fn test_radius_x_takes_precedence_over_rx() {
        let shape = Shape::from_value(&json!({
            "type": "ellipse", "radiusX": 3, "rx": 20, "radiusY": 4
        }));
        let Shape::Circle(circle) = shape else {
            panic!("expected circle");
        };
        assert_eq!(circle.radius_x, 3.0);
        assert_eq!(circle.radius_y, 4.0);
    }

    #[test]
    fn test_line_with_explicit_endpoints() {
        let shape = Shape::from_value(&json!({
            "type": "line", "x1": 1, "y1": 2, "x2": 3.5, "y2": 4, "stroke": "#2CA02C"
        }));
        assert_eq!(
            shape.segment(),
            Some((Point::new(1.0, 2.0), Point::new(3.5, 4.0)))
        );
        assert_eq!(shape.stroke(), "#2ca02c");
    }

    #[test]
    fn test_path_with_points() {
        let shape = Shape::from_value(&json!({
            "type": "path", "left": 10, "top": 20,
            "points": [{"x": 0, "y": 0}, {"x": 5, "y": 5}, {"x": 30, "y": 40}]
        }));
        assert_eq!(
            shape.segment(),
            Some((Point::new(10.0, 20.0), Point::new(40.0, 60.0)))
        );
    }

    #[test]
    fn test_path_falls_back_to_bounding_box() {
        let shape = Shape::from_value(&json!({
            "type": "path", "left": 10, "top": 20, "width": 50, "height": 5,
            "points": [{"x": 1, "y": 1}]
        }));
        assert_eq!(
            shape.segment(),
            Some((Point::new(10.0, 20.0), Point::new(60.0, 25.0)))
        );
    }

    #[test]
    fn test_stroke_style_fallback() {
        let shape = Shape::from_value(&json!({
            "type": "line", "x1": 0, "stroke": "", "strokeStyle": "#FF7F0E"
        }));
        assert_eq!(shape.stroke(), "#ff7f0e");
    }

    #[test]
    fn test_non_numeric_fields_use_defaults() {
        let shape = Shape::from_value(&json!({
            "type": "circle", "left": "oops", "top": null, "radiusX": [1]
        }));
        let Shape::Circle(circle) = shape else {
            panic!("expected circle");
        };
        assert_eq!(circle.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn test_other_kinds() {
        assert_eq!(
            Shape::from_value(&json!({"type": "rect", "width": 10})),
            Shape::Other {
                kind: Some("rect".to_string())
            }
        );
        assert_eq!(Shape::from_value(&json!({})), Shape::Other { kind: None });
        assert_eq!(Shape::from_value(&json!(42)), Shape::Other { kind: None });
        assert_eq!(Shape::from_value(&json!({"type": "rect"})).segment(), None);
    }
}
