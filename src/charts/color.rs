//! Color encodings keyed by normalized debut year.

use plotters::prelude::{ColorMap, RGBColor, ViridisRGB};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const GRAY: Color = Color::rgb(160, 160, 160);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Component-wise linear interpolation, `t` clamped to [0, 1].
    pub fn lerp(&self, other: &Color, t: f64) -> Color {
        let t = clamp_unit(t);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for RGBColor {
    fn from(c: Color) -> Self {
        RGBColor(c.r, c.g, c.b)
    }
}

/// A color law samples a color for a position `t` in [0, 1].
pub trait ColorLaw {
    fn sample(&self, t: f64) -> Color;
}

/// Selectable color laws.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "kebab-case")]
pub enum ColorScheme {
    /// Perceptually uniform viridis ramp.
    Viridis,
    /// Two-stop RGB gradient.
    Gradient { from: Color, to: Color },
}

impl ColorLaw for ColorScheme {
    fn sample(&self, t: f64) -> Color {
        let t = clamp_unit(t);
        match self {
            ColorScheme::Viridis => {
                let RGBColor(r, g, b) = ViridisRGB {}.get_color(t as f32);
                Color::rgb(r, g, b)
            }
            ColorScheme::Gradient { from, to } => from.lerp(to, t),
        }
    }
}

fn clamp_unit(t: f64) -> f64 {
    if t.is_nan() {
        0.5
    } else {
        t.clamp(0.0, 1.0)
    }
}
