use eframe::egui::Color32;
use palette::Srgb;

use crate::error::VslError;

/// Default spiral colours (the classic category-10 head).
pub const DEFAULT_PALETTE: [&str; 6] = [
    "#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b",
];

// ---------------------------------------------------------------------------
// Hex parsing
// ---------------------------------------------------------------------------

/// Parse a `#rrggbb` (or `#rgb`) string into a [`Color32`].
pub fn parse_hex(hex: &str) -> Result<Color32, VslError> {
    let rgb: Srgb<u8> = hex
        .trim()
        .parse()
        .map_err(|e| VslError::config(format!("invalid colour '{hex}': {e}")))?;
    Ok(Color32::from_rgb(rgb.red, rgb.green, rgb.blue))
}

// ---------------------------------------------------------------------------
// Palette: spiral index → Color32
// ---------------------------------------------------------------------------

/// Ordered spiral colours, assigned cyclically by spiral index.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color32>,
}

impl Palette {
    /// Build a palette from hex strings. An empty list is a configuration error.
    pub fn parse(hex_colors: &[String]) -> Result<Self, VslError> {
        if hex_colors.is_empty() {
            return Err(VslError::config("palette must contain at least one colour"));
        }
        let colors = hex_colors
            .iter()
            .map(|h| parse_hex(h))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Palette { colors })
    }

    /// Colour for spiral `index`. Wraps when there are more spirals than colours.
    pub fn color_for(&self, index: usize) -> Color32 {
        self.colors[index % self.colors.len()]
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }
}
