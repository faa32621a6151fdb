/// Colors and bar sizing shared by the mesh builders
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Multiply every channel by `factor` (clamped to 0..=1).
    pub fn scaled(self, factor: f32) -> Self {
        let f = factor.clamp(0.0, 1.0);
        Self {
            r: (self.r as f32 * f).round() as u8,
            g: (self.g as f32 * f).round() as u8,
            b: (self.b as f32 * f).round() as u8,
        }
    }

    /// Channels as floats in 0..=1, for GPU upload.
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// Material descriptor for a piece.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub bar_color: Color,
    pub panel_color: Color,
    pub partition_color: Color,
    /// Cross-section of the edge bars, in cube units.
    pub bar_thickness: f32,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            bar_color: Color::rgb(30, 30, 36),
            panel_color: Color::rgb(0, 190, 230),
            partition_color: Color::rgb(0, 120, 150),
            bar_thickness: 0.08,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_color() {
        let c = Color::rgb(200, 100, 0).scaled(0.5);
        assert_eq!(c, Color::rgb(100, 50, 0));
        assert_eq!(Color::rgb(10, 10, 10).scaled(3.0), Color::rgb(10, 10, 10));
    }

    #[test]
    fn test_partial_style_from_toml() {
        let style: Style = toml::from_str("bar_thickness = 0.1\n[panel_color]\nr = 1\ng = 2\nb = 3\n").unwrap();
        assert_eq!(style.panel_color, Color::rgb(1, 2, 3));
        assert_eq!(style.bar_color, Style::default().bar_color);
        assert!((style.bar_thickness - 0.1).abs() < 1e-6);
    }
}
