//! Terminal colorization for the particle legend
//!
//! Paints palette swatches with ANSI true-color escape codes using crossterm.

use crossterm::style::{Color, Stylize};
use feynsketch::parse_hex_rgb;

const SWATCH: &str = "━━━━";

/// Crossterm color for a `#rrggbb` palette entry
pub fn palette_color(hex: &str) -> Option<Color> {
    parse_hex_rgb(hex).map(|(r, g, b)| Color::Rgb { r, g, b })
}

/// Render the legend, one particle per line
///
/// With `colorize` each line starts with a swatch drawn in the particle's
/// color; without it the swatch is left out and only names and hex codes
/// are printed.
pub fn render_legend(entries: &[(&str, &str)], colorize: bool) -> String {
    let width = entries.iter().map(|(name, _)| name.chars().count()).max().unwrap_or(0);

    entries
        .iter()
        .map(|(name, color)| {
            let padding = " ".repeat(width - name.chars().count());
            match palette_color(color).filter(|_| colorize) {
                Some(swatch_color) => format!(
                    "{} {}{}  {}",
                    SWATCH.with(swatch_color),
                    name,
                    padding,
                    color
                ),
                None => format!("{}{}  {}", name, padding, color),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
