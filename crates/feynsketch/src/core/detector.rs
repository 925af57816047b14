//! Core detector trait for input format identification
//!
//! Detectors decide whether a piece of input is something a diagram
//! plugin knows how to parse before the parser runs.

/// Core trait for diagram type detectors
///
/// # Example
/// ```
/// use feynsketch::core::Detector;
/// use feynsketch::plugins::feynman::CanvasDetector;
///
/// let detector = CanvasDetector::new();
/// assert!(detector.detect(r#"{"version":"4.4.0","objects":[]}"#));
/// ```
pub trait Detector: Send + Sync {
    /// Detect if the input matches this diagram type
    fn detect(&self, input: &str) -> bool;

    /// Get the confidence level of the detection (0.0 to 1.0)
    fn confidence(&self, input: &str) -> f64;

    /// Get the diagram type name
    fn diagram_type(&self) -> &'static str;

    /// Get key patterns that this detector looks for
    fn patterns(&self) -> Vec<&'static str>;
}
