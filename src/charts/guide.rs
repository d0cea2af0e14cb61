//! Axis and legend descriptions handed to render targets.

use crate::charts::color::{Color, ColorLaw, ColorScheme};
use crate::charts::glyph::{GlyphStyle, Shape};
use crate::charts::scale::Scale;
use crate::data::ItemKind;

/// Number of color swatches in a color legend.
pub const LEGEND_STOPS: usize = 10;
/// Encoded size used for shape legend glyphs.
pub const LEGEND_GLYPH_SIZE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tick {
    pub position: f64,
    pub label: String,
}

/// A straight axis line with ticks.
///
/// A horizontal axis runs from `(from, cross)` to `(to, cross)`; a vertical
/// one from `(cross, from)` to `(cross, to)`.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSpec {
    pub orientation: Orientation,
    pub title: String,
    pub from: f64,
    pub to: f64,
    pub cross: f64,
    pub ticks: Vec<Tick>,
}

impl AxisSpec {
    pub fn from_scale(
        scale: &Scale,
        orientation: Orientation,
        title: &str,
        cross: f64,
        tick_count: usize,
    ) -> Self {
        let (from, to) = scale.range();
        let ticks = scale
            .ticks(tick_count)
            .into_iter()
            .map(|value| Tick {
                position: scale.map(value),
                label: format_tick(value),
            })
            .collect();
        Self {
            orientation,
            title: title.to_string(),
            from,
            to,
            cross,
            ticks,
        }
    }
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShapeEntry {
    pub kind: ItemKind,
    pub shape: Shape,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LegendSpec {
    /// Horizontal ramp of equally wide swatches, labelled at both ends.
    Color {
        title: String,
        origin: (f64, f64),
        swatch: (f64, f64),
        stops: Vec<Color>,
        min_label: String,
        max_label: String,
    },
    /// Glyph samples laid out left to right.
    Shape {
        title: String,
        origin: (f64, f64),
        spacing: f64,
        entries: Vec<ShapeEntry>,
    },
}

impl LegendSpec {
    pub fn color_ramp(scheme: &ColorScheme, domain: (f64, f64), origin: (f64, f64)) -> Self {
        let stops = (0..LEGEND_STOPS)
            .map(|i| scheme.sample(i as f64 / (LEGEND_STOPS - 1) as f64))
            .collect();
        LegendSpec::Color {
            title: "Debut Year".to_string(),
            origin,
            swatch: (16.0, 12.0),
            stops,
            min_label: format_tick(domain.0),
            max_label: format_tick(domain.1),
        }
    }

    pub fn shapes(style: GlyphStyle, origin: (f64, f64)) -> Self {
        let entries = [
            (ItemKind::Weapon, "Weapon"),
            (ItemKind::Tool, "Tool"),
            (ItemKind::Armor, "Armor / Other"),
        ]
        .into_iter()
        .map(|(kind, label)| ShapeEntry {
            kind,
            shape: Shape::resolve(kind, LEGEND_GLYPH_SIZE, style),
            label: label.to_string(),
        })
        .collect();
        LegendSpec::Shape {
            title: "Type".to_string(),
            origin,
            spacing: 110.0,
            entries,
        }
    }
}
