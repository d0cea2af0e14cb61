//! Layout Strategy
//! Grid and scatter placement. Both are pure functions of item and index.

use crate::charts::scale::{Scale, ScaleLaw};
use crate::config::{ChartConfig, LayoutConfig};
use crate::data::{Field, Item};
use crate::error::PipelineError;

/// Assigns a canvas position to the `index`-th valid item.
pub trait LayoutPolicy {
    fn position(&self, item: &Item, index: usize) -> (f64, f64);
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: usize,
    pub cell_size: f64,
    pub padding: f64,
}

impl GridLayout {
    pub fn rows_for(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1))
    }
}

impl LayoutPolicy for GridLayout {
    fn position(&self, _item: &Item, index: usize) -> (f64, f64) {
        let columns = self.columns.max(1);
        let col = index % columns;
        let row = index / columns;
        (
            col as f64 * self.cell_size + self.padding,
            row as f64 * self.cell_size + self.padding,
        )
    }
}

/// Debut year along x, durability along y (larger values higher up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterLayout {
    pub x: Scale,
    pub y: Scale,
}

impl ScatterLayout {
    /// Fit both position scales over the valid items.
    ///
    /// When no item has a debut year the x scale collapses onto the middle of
    /// the plot; items without a year sit at the left edge of the x range.
    pub fn fit(
        items: &[Item],
        width: f64,
        height: f64,
        padding: f64,
    ) -> Result<Self, PipelineError> {
        let x_range = (padding, width - padding);
        let x = match Scale::fit(items, Field::DebutYear, x_range, ScaleLaw::Linear) {
            Ok(scale) => scale,
            Err(_) if !items.is_empty() => Scale::linear((0.0, 0.0), x_range),
            Err(e) => return Err(e),
        };
        let y = Scale::fit(
            items,
            Field::Durability,
            (height - padding, padding),
            ScaleLaw::Linear,
        )?;
        Ok(Self { x, y })
    }
}

impl LayoutPolicy for ScatterLayout {
    fn position(&self, item: &Item, _index: usize) -> (f64, f64) {
        let x = match item.debut_year {
            Some(year) => self.x.map(f64::from(year)),
            None => self.x.range().0,
        };
        (x, self.y.map(item.durability))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Layout {
    Grid(GridLayout),
    Scatter(ScatterLayout),
}

impl Layout {
    pub fn fit(config: &ChartConfig, items: &[Item]) -> Result<Self, PipelineError> {
        match config.layout {
            LayoutConfig::Grid {
                columns,
                cell_size,
                padding,
            } => Ok(Layout::Grid(GridLayout {
                columns,
                cell_size,
                padding,
            })),
            LayoutConfig::Scatter { padding } => Ok(Layout::Scatter(ScatterLayout::fit(
                items,
                config.width,
                config.height,
                padding,
            )?)),
        }
    }
}

impl LayoutPolicy for Layout {
    fn position(&self, item: &Item, index: usize) -> (f64, f64) {
        match self {
            Layout::Grid(grid) => grid.position(item, index),
            Layout::Scatter(scatter) => scatter.position(item, index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::RawRecord;

    fn item(year: Option<&str>, durability: &str) -> Item {
        Item::parse(&RawRecord::new("x", "Tool", year, Some(durability)))
    }

    #[test]
    fn grid_is_row_major() {
        let grid = GridLayout {
            columns: 12,
            cell_size: 80.0,
            padding: 40.0,
        };
        let it = item(Some("2011"), "1");
        assert_eq!(grid.position(&it, 0), (40.0, 40.0));
        assert_eq!(grid.position(&it, 11), (920.0, 40.0));
        assert_eq!(grid.position(&it, 12), (40.0, 120.0));
        assert_eq!(grid.position(&it, 27), (280.0, 200.0));
        assert_eq!(grid.rows_for(25), 3);
    }

    #[test]
    fn scatter_maps_year_and_durability() {
        let items = vec![item(Some("2009"), "100"), item(Some("2019"), "300")];
        let layout = ScatterLayout::fit(&items, 1000.0, 700.0, 50.0).unwrap();
        assert_eq!(layout.position(&items[0], 0), (50.0, 650.0));
        assert_eq!(layout.position(&items[1], 1), (950.0, 50.0));
    }

    #[test]
    fn scatter_handles_missing_and_identical_years() {
        let items = vec![item(Some("2015"), "10"), item(None, "10")];
        let layout = ScatterLayout::fit(&items, 1000.0, 700.0, 50.0).unwrap();
        let (x0, y0) = layout.position(&items[0], 0);
        let (x1, y1) = layout.position(&items[1], 1);
        assert_eq!(x0, 500.0);
        assert_eq!(x1, 50.0);
        assert_eq!(y0, 350.0);
        assert!(y1.is_finite());
    }

    #[test]
    fn scatter_on_empty_set_fails() {
        assert!(matches!(
            ScatterLayout::fit(&[], 1000.0, 700.0, 50.0),
            Err(PipelineError::EmptyDataset { .. })
        ));
    }
}
