//! Encoded Marks
//! One positioned, shaped, colored glyph per valid item, with its tooltip.

use crate::charts::color::Color;
use crate::charts::glyph::Shape;
use crate::data::Item;
use serde::{Deserialize, Serialize};

/// A fully encoded visual unit derived from one valid item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mark {
    pub position: (f64, f64),
    pub shape: Shape,
    /// Encoded size before glyph geometry is applied (radius, half width...).
    pub size: f64,
    pub color: Color,
    pub label: String,
    /// Top-center anchor of the label, below the glyph.
    pub label_anchor: (f64, f64),
    pub item: Item,
}

impl Mark {
    /// Whether a canvas point falls on this mark's glyph bounding box.
    pub fn hit(&self, x: f64, y: f64) -> bool {
        self.shape.contains(x - self.position.0, y - self.position.1)
    }

    /// Tooltip lines: name, type, debut year and durability.
    pub fn describe(&self) -> Vec<String> {
        let year = self
            .item
            .debut_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        vec![
            self.item.name.clone(),
            format!("Type: {}", self.item.type_label),
            format!("Debut: {}", year),
            format!("Durability: {}", self.item.durability),
        ]
    }
}
