//! Glyph Shape Resolver
//! Picks the silhouette family and geometry for an item kind. Pure data,
//! nothing here draws.

use crate::data::ItemKind;
use serde::{Deserialize, Serialize};

/// Glyph policy of a chart profile. One policy per profile, never mixed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "style", rename_all = "kebab-case")]
pub enum GlyphStyle {
    /// Circle, square and triangle. The triangle half-height is
    /// `size * triangle_factor`.
    Geometric { triangle_factor: f64 },
    /// Item silhouettes drawn at `size / reference_size` of their design size.
    Silhouette { reference_size: f64 },
}

impl Default for GlyphStyle {
    fn default() -> Self {
        GlyphStyle::Geometric {
            triangle_factor: 1.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Silhouette {
    Sword,
    Pickaxe,
    Chestplate,
}

// Silhouettes are unions of convex parts designed inside a +-12 box, y
// growing downwards. Every part must stay convex.
const SWORD: [&[(f64, f64)]; 4] = [
    &[(0.0, -12.0), (2.0, -9.0), (2.0, 4.0), (-2.0, 4.0), (-2.0, -9.0)],
    &[(-6.0, 4.0), (6.0, 4.0), (6.0, 6.0), (-6.0, 6.0)],
    &[(-1.5, 6.0), (1.5, 6.0), (1.5, 10.0), (-1.5, 10.0)],
    &[(-3.0, 10.0), (3.0, 10.0), (3.0, 12.0), (-3.0, 12.0)],
];

const PICKAXE: [&[(f64, f64)]; 2] = [
    &[(-12.0, -6.0), (-6.0, -10.0), (0.0, -11.0), (6.0, -10.0), (12.0, -6.0)],
    &[(-1.5, -8.0), (1.5, -8.0), (1.5, 12.0), (-1.5, 12.0)],
];

const CHESTPLATE: [&[(f64, f64)]; 3] = [
    &[(-8.0, -8.0), (8.0, -8.0), (8.0, 12.0), (-8.0, 12.0)],
    &[(-11.0, -9.0), (-5.0, -12.0), (-4.0, -8.0), (-12.0, -3.0)],
    &[(11.0, -9.0), (12.0, -3.0), (4.0, -8.0), (5.0, -12.0)],
];

/// Half extent of the silhouette design box.
pub const SILHOUETTE_HALF_EXTENT: f64 = 12.0;

impl Silhouette {
    pub fn for_kind(kind: ItemKind) -> Self {
        match kind {
            ItemKind::Weapon => Silhouette::Sword,
            ItemKind::Tool => Silhouette::Pickaxe,
            ItemKind::Armor | ItemKind::Other => Silhouette::Chestplate,
        }
    }

    /// Convex parts at design size.
    pub fn parts(&self) -> &'static [&'static [(f64, f64)]] {
        match self {
            Silhouette::Sword => &SWORD,
            Silhouette::Pickaxe => &PICKAXE,
            Silhouette::Chestplate => &CHESTPLATE,
        }
    }
}

/// Resolved glyph geometry, relative to the mark position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle { radius: f64 },
    Square { half_width: f64 },
    /// Apex at `(0, -half_height)`, base corners at `(+-half_base, half_height)`.
    Triangle { half_base: f64, half_height: f64 },
    Path { silhouette: Silhouette, scale: f64 },
}

impl Shape {
    pub fn resolve(kind: ItemKind, size: f64, style: GlyphStyle) -> Self {
        match style {
            GlyphStyle::Geometric { triangle_factor } => match kind {
                ItemKind::Weapon => Shape::Circle { radius: size },
                ItemKind::Tool => Shape::Square { half_width: size },
                ItemKind::Armor | ItemKind::Other => Shape::Triangle {
                    half_base: size,
                    half_height: size * triangle_factor,
                },
            },
            GlyphStyle::Silhouette { reference_size } => Shape::Path {
                silhouette: Silhouette::for_kind(kind),
                scale: size / reference_size,
            },
        }
    }

    /// Convex polygons making up the glyph. Empty for the circle.
    pub fn polygons(&self) -> Vec<Vec<(f64, f64)>> {
        match *self {
            Shape::Circle { .. } => Vec::new(),
            Shape::Square { half_width: w } => vec![vec![(-w, -w), (w, -w), (w, w), (-w, w)]],
            Shape::Triangle {
                half_base,
                half_height,
            } => vec![vec![
                (0.0, -half_height),
                (half_base, half_height),
                (-half_base, half_height),
            ]],
            Shape::Path { silhouette, scale } => silhouette
                .parts()
                .iter()
                .map(|part| part.iter().map(|&(x, y)| (x * scale, y * scale)).collect())
                .collect(),
        }
    }

    /// Bounding box as `(min_x, min_y, max_x, max_y)`.
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        match *self {
            Shape::Circle { radius: r } => (-r, -r, r, r),
            Shape::Square { half_width: w } => (-w, -w, w, w),
            Shape::Triangle {
                half_base,
                half_height,
            } => (-half_base, -half_height, half_base, half_height),
            Shape::Path { scale, .. } => {
                let e = SILHOUETTE_HALF_EXTENT * scale;
                (-e, -e, e, e)
            }
        }
    }

    /// Distance from the mark position to the lowest point of the glyph.
    pub fn bottom(&self) -> f64 {
        self.bounds().3
    }

    pub fn contains(&self, dx: f64, dy: f64) -> bool {
        let (x0, y0, x1, y1) = self.bounds();
        dx >= x0 && dx <= x1 && dy >= y0 && dy <= y1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometric_glyphs_by_kind() {
        let style = GlyphStyle::Geometric {
            triangle_factor: 1.8,
        };
        assert_eq!(
            Shape::resolve(ItemKind::Weapon, 10.0, style),
            Shape::Circle { radius: 10.0 }
        );
        assert_eq!(
            Shape::resolve(ItemKind::Tool, 10.0, style),
            Shape::Square { half_width: 10.0 }
        );
        assert_eq!(
            Shape::resolve(ItemKind::Armor, 10.0, style),
            Shape::Triangle {
                half_base: 10.0,
                half_height: 18.0
            }
        );
        assert_eq!(
            Shape::resolve(ItemKind::Other, 10.0, style),
            Shape::resolve(ItemKind::Armor, 10.0, style)
        );
    }

    #[test]
    fn silhouettes_scale_by_reference_size() {
        let style = GlyphStyle::Silhouette {
            reference_size: 12.0,
        };
        let shape = Shape::resolve(ItemKind::Tool, 24.0, style);
        assert_eq!(
            shape,
            Shape::Path {
                silhouette: Silhouette::Pickaxe,
                scale: 2.0
            }
        );
        let polygons = shape.polygons();
        assert_eq!(polygons.len(), 2);
        assert_eq!(polygons[0][0], (-24.0, -12.0));
        assert_eq!(shape.bottom(), 24.0);
    }

    #[test]
    fn every_silhouette_fits_its_design_box() {
        for silhouette in [Silhouette::Sword, Silhouette::Pickaxe, Silhouette::Chestplate] {
            assert!(silhouette
                .parts()
                .iter()
                .flat_map(|part| part.iter())
                .all(|(x, y)| {
                    x.abs() <= SILHOUETTE_HALF_EXTENT && y.abs() <= SILHOUETTE_HALF_EXTENT
                }));
        }
    }

    #[test]
    fn triangle_outline_and_hit_test() {
        let shape = Shape::Triangle {
            half_base: 5.0,
            half_height: 9.0,
        };
        assert_eq!(
            shape.polygons(),
            vec![vec![(0.0, -9.0), (5.0, 9.0), (-5.0, 9.0)]]
        );
        assert!(shape.contains(0.0, 8.0));
        assert!(!shape.contains(6.0, 0.0));
        assert!(Shape::Circle { radius: 3.0 }.polygons().is_empty());
    }
}
