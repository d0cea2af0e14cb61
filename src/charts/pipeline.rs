//! Encoding Pipeline
//! parse -> filter -> fit scales -> derive marks -> lay out -> guides.
//! Single pass, no state kept between runs.

use crate::charts::color::ColorLaw;
use crate::charts::glyph::Shape;
use crate::charts::guide::{AxisSpec, LegendSpec, Orientation};
use crate::charts::layout::{Layout, LayoutPolicy};
use crate::charts::mark::Mark;
use crate::charts::scale::{Scale, ScaleLaw};
use crate::config::ChartConfig;
use crate::data::{parse_records, DataProcessor, Field, Item, RawRecord, RecordSource};
use crate::error::PipelineError;
use tracing::{debug, info, warn};

const AXIS_TICKS: usize = 8;
/// Vertical room reserved for the legend band.
const LEGEND_BAND: f64 = 70.0;

/// Everything a render target needs for one chart.
#[derive(Debug, Clone)]
pub struct Encoding {
    pub profile: String,
    pub canvas: (f64, f64),
    pub marks: Vec<Mark>,
    pub axes: Vec<AxisSpec>,
    pub legends: Vec<LegendSpec>,
    /// Records screened out by the validity filter.
    pub dropped: usize,
}

impl Encoding {
    /// Topmost mark whose glyph covers the point, if any.
    pub fn mark_at(&self, x: f64, y: f64) -> Option<&Mark> {
        self.marks.iter().rev().find(|m| m.hit(x, y))
    }
}

/// Fitted scales of one run.
#[derive(Debug, Clone, Copy)]
pub struct FittedScales {
    pub size: Scale,
    /// Absent when no valid item carries a debut year.
    pub color: Option<Scale>,
    pub layout: Layout,
}

pub struct Pipeline {
    config: ChartConfig,
}

impl Pipeline {
    pub fn new(config: ChartConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Load from a source and encode. Load errors are passed through as-is.
    pub fn run(&self, source: &dyn RecordSource) -> Result<Encoding, PipelineError> {
        let records = source.load()?;
        info!(source = %source.describe(), records = records.len(), "Encoding records");
        self.encode_records(&records)
    }

    pub fn encode_records(&self, records: &[RawRecord]) -> Result<Encoding, PipelineError> {
        self.encode_items(parse_records(records))
    }

    /// Screen, fit and encode. Fails with `EmptyDataset` when nothing valid remains.
    pub fn encode_items(&self, items: Vec<Item>) -> Result<Encoding, PipelineError> {
        let total = items.len();
        let valid = DataProcessor::filter_valid(items);
        if valid.is_empty() {
            return Err(PipelineError::EmptyDataset { total });
        }

        let scales = self.fit_scales(&valid)?;
        let marks = self.derive_marks(&valid, &scales);
        let (axes, legends, canvas) = self.guides(&valid, &scales);

        debug!(
            marks = marks.len(),
            axes = axes.len(),
            legends = legends.len(),
            "Encoding complete"
        );
        Ok(Encoding {
            profile: self.config.name.clone(),
            canvas,
            marks,
            axes,
            legends,
            dropped: total - valid.len(),
        })
    }

    pub fn fit_scales(&self, valid: &[Item]) -> Result<FittedScales, PipelineError> {
        let size_range = (self.config.size.min, self.config.size.max);
        let mut size = Scale::fit(valid, Field::Durability, size_range, ScaleLaw::Sqrt)?;
        if self.config.size.zero_baseline {
            let (min, max) = size.domain();
            size = Scale::sqrt((min.min(0.0), max), size_range);
        }

        let color = Scale::fit(valid, Field::DebutYear, (0.0, 1.0), ScaleLaw::Linear).ok();
        if color.is_none() {
            warn!("No item has a debut year; every mark uses the unknown color");
        }

        let layout = Layout::fit(&self.config, valid)?;
        Ok(FittedScales {
            size,
            color,
            layout,
        })
    }

    fn derive_marks(&self, valid: &[Item], scales: &FittedScales) -> Vec<Mark> {
        let mut missing_year = 0usize;
        let marks = valid
            .iter()
            .enumerate()
            .map(|(index, item)| {
                let size = scales.size.map(item.durability);
                let shape = Shape::resolve(item.kind, size, self.config.glyphs);
                let color = match (item.debut_year, scales.color) {
                    (Some(year), Some(scale)) => {
                        self.config.color.sample(scale.normalize(f64::from(year)))
                    }
                    _ => {
                        missing_year += 1;
                        self.config.unknown_color
                    }
                };
                let position = scales.layout.position(item, index);
                let label_anchor = (
                    position.0,
                    position.1 + shape.bottom() + self.config.label_offset,
                );
                Mark {
                    position,
                    shape,
                    size,
                    color,
                    label: item.name.clone(),
                    label_anchor,
                    item: item.clone(),
                }
            })
            .collect();
        if missing_year > 0 {
            warn!(missing_year, "Items without a debut year drawn in the unknown color");
        }
        marks
    }

    fn guides(
        &self,
        valid: &[Item],
        scales: &FittedScales,
    ) -> (Vec<AxisSpec>, Vec<LegendSpec>, (f64, f64)) {
        let (width, height) = (self.config.width, self.config.height);
        let mut axes = Vec::new();

        let (legend_y, canvas) = match &scales.layout {
            Layout::Grid(grid) => {
                let rows = grid.rows_for(valid.len());
                // Grid positions are glyph centres, so the last row's glyphs
                // and labels reach roughly one cell below its position.
                let grid_bottom = grid.padding + rows as f64 * grid.cell_size;
                let used_columns = grid.columns.max(1).min(valid.len());
                let grid_right = grid.padding + used_columns as f64 * grid.cell_size;
                let canvas_width = width.max(grid_right + grid.padding);
                let canvas_height = height.max(grid_bottom + LEGEND_BAND + 20.0);
                (grid_bottom + 10.0, (canvas_width, canvas_height))
            }
            Layout::Scatter(scatter) => {
                let (_, bottom) = scatter.y.range();
                let (left, _) = scatter.x.range();
                if !scatter.x.is_degenerate() {
                    axes.push(AxisSpec::from_scale(
                        &scatter.x,
                        Orientation::Horizontal,
                        "Debut Year",
                        bottom,
                        AXIS_TICKS,
                    ));
                }
                axes.push(AxisSpec::from_scale(
                    &scatter.y,
                    Orientation::Vertical,
                    "Durability",
                    left,
                    AXIS_TICKS,
                ));
                (height, (width, height + LEGEND_BAND))
            }
        };

        let left = match &scales.layout {
            Layout::Grid(grid) => grid.padding,
            Layout::Scatter(scatter) => scatter.x.range().0,
        };
        let mut legends = Vec::new();
        if let Some(color) = &scales.color {
            legends.push(LegendSpec::color_ramp(
                &self.config.color,
                color.domain(),
                (left, legend_y),
            ));
        }
        legends.push(LegendSpec::shapes(
            self.config.glyphs,
            (left + 260.0, legend_y),
        ));

        (axes, legends, canvas)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::color::ColorScheme;
    use crate::charts::glyph::GlyphStyle;
    use crate::config::LayoutConfig;
    use crate::data::{InMemorySource, ItemKind};
    use crate::error::LoadError;
    use std::collections::HashMap;

    fn raw(name: &str, kind: &str, date: &str, durability: &str) -> RawRecord {
        RawRecord::new(name, kind, Some(date), Some(durability))
    }

    fn sample() -> Vec<RawRecord> {
        vec![
            raw("Iron Sword", "Weapon", "2011-01-01", "250"),
            raw("Stone Pick", "Tool", "2009-05-01", "abc"),
            raw("Diamond Chestplate", "Armor", "2011-11-18", "528"),
            raw("Shears", "Tool", "2011-10-06", "238"),
            raw("Trident", "Weapon", "2018-07-18", "250"),
            raw("Turtle Shell", "Armor (Helmet)", "2018-07-18", "275"),
        ]
    }

    #[test]
    fn end_to_end_drops_unparseable_durability() {
        let records = vec![
            raw("Iron Sword", "Weapon", "2011-01-01", "250"),
            raw("Stone Pick", "Tool", "2009-05-01", "abc"),
        ];
        let encoding = Pipeline::new(ChartConfig::grid())
            .encode_records(&records)
            .unwrap();
        assert_eq!(encoding.marks.len(), 1);
        assert_eq!(encoding.dropped, 1);

        let item = &encoding.marks[0].item;
        assert_eq!(item.name, "Iron Sword");
        assert_eq!(item.debut_year, Some(2011));
        assert_eq!(item.durability, 250.0);
        assert_eq!(item.kind, ItemKind::Weapon);
    }

    #[test]
    fn empty_after_filter_is_an_error() {
        let records = vec![
            raw("Stone Pick", "Tool", "2009-05-01", "abc"),
            raw("Bow", "Weapon", "2009", ""),
        ];
        let result = Pipeline::new(ChartConfig::grid()).encode_records(&records);
        assert!(matches!(
            result,
            Err(PipelineError::EmptyDataset { total: 2 })
        ));

        let result = Pipeline::new(ChartConfig::scatter()).encode_records(&[]);
        assert!(matches!(
            result,
            Err(PipelineError::EmptyDataset { total: 0 })
        ));
    }

    #[test]
    fn grid_marks_follow_reference_geometry() {
        let encoding = Pipeline::new(ChartConfig::grid())
            .encode_records(&sample())
            .unwrap();
        assert_eq!(encoding.marks.len(), 5);
        let positions: Vec<(f64, f64)> = encoding.marks.iter().map(|m| m.position).collect();
        assert_eq!(positions[0], (40.0, 40.0));
        assert_eq!(positions[4], (360.0, 40.0));

        // Shears has the lowest durability, the chestplate the highest.
        let shears = &encoding.marks[2];
        assert_eq!(shears.size, 6.0);
        assert_eq!(shears.shape, Shape::Square { half_width: 6.0 });
        let chest = &encoding.marks[1];
        assert_eq!(chest.size, 28.0);
        assert_eq!(
            chest.shape,
            Shape::Triangle {
                half_base: 28.0,
                half_height: 28.0 * 1.8
            }
        );
        assert_eq!(chest.label_anchor, (120.0, 40.0 + 28.0 * 1.8 + 12.0));
        assert!(encoding.axes.is_empty());
        assert_eq!(encoding.legends.len(), 2);
    }

    #[test]
    fn colors_span_the_year_domain() {
        let config = ChartConfig::grid_gradient();
        let (from, to) = match config.color {
            ColorScheme::Gradient { from, to } => (from, to),
            ColorScheme::Viridis => unreachable!(),
        };
        let encoding = Pipeline::new(config).encode_records(&sample()).unwrap();
        assert_eq!(encoding.marks[0].color, from);
        assert_eq!(encoding.marks[3].color, to);
    }

    #[test]
    fn identical_values_produce_finite_marks() {
        let records = vec![
            raw("A", "Weapon", "2011", "100"),
            raw("B", "Tool", "2011", "100"),
            raw("C", "Armor", "2011", "100"),
        ];
        for config in ChartConfig::profiles() {
            let encoding = Pipeline::new(config).encode_records(&records).unwrap();
            for mark in &encoding.marks {
                assert!(mark.size.is_finite());
                assert!(mark.position.0.is_finite() && mark.position.1.is_finite());
                assert!(mark.label_anchor.1.is_finite());
            }
        }
    }

    #[test]
    fn missing_year_uses_unknown_color() {
        let records = vec![
            raw("A", "Weapon", "2011", "100"),
            RawRecord::new("B", "Tool", Some("20"), Some("50")),
        ];
        let config = ChartConfig::scatter();
        let unknown = config.unknown_color;
        let encoding = Pipeline::new(config).encode_records(&records).unwrap();
        assert_eq!(encoding.marks[1].color, unknown);
        assert_ne!(encoding.marks[0].color, unknown);
    }

    #[test]
    fn scatter_emits_axes_and_hit_testing_works() {
        let encoding = Pipeline::new(ChartConfig::scatter())
            .encode_records(&sample())
            .unwrap();
        assert_eq!(encoding.axes.len(), 2);
        assert_eq!(encoding.axes[0].title, "Debut Year");
        assert_eq!(encoding.axes[1].title, "Durability");

        let trident = encoding
            .marks
            .iter()
            .find(|m| m.label == "Trident")
            .unwrap();
        let (x, y) = trident.position;
        let hit = encoding.mark_at(x, y).unwrap();
        assert_eq!(hit.item.debut_year, Some(2018));
        assert!(encoding.mark_at(-100.0, -100.0).is_none());
    }

    #[test]
    fn silhouette_profile_uses_paths() {
        let encoding = Pipeline::new(ChartConfig::grid_silhouette())
            .encode_records(&sample())
            .unwrap();
        assert!(encoding
            .marks
            .iter()
            .all(|m| matches!(m.shape, Shape::Path { .. })));
        assert!(matches!(
            Pipeline::new(ChartConfig::grid_silhouette()).config().glyphs,
            GlyphStyle::Silhouette { .. }
        ));
    }

    #[test]
    fn zero_baseline_anchors_size_domain() {
        let mut config = ChartConfig::grid();
        config.size = crate::config::SizeConfig {
            min: 0.0,
            max: 20.0,
            zero_baseline: true,
        };
        let records = vec![raw("A", "Tool", "2011", "100"), raw("B", "Tool", "2012", "400")];
        let encoding = Pipeline::new(config).encode_records(&records).unwrap();
        let (a, b) = (encoding.marks[0].size, encoding.marks[1].size);
        assert!(((b * b) / (a * a) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn wide_grid_grows_the_canvas() {
        let mut config = ChartConfig::grid();
        config.layout = LayoutConfig::Grid {
            columns: 20,
            cell_size: 80.0,
            padding: 40.0,
        };
        let records: Vec<RawRecord> = (0..25)
            .map(|i| raw(&format!("Item {}", i), "Tool", "2011", &(100 + i).to_string()))
            .collect();
        let encoding = Pipeline::new(config).encode_records(&records).unwrap();

        let (width, height) = encoding.canvas;
        assert!(width >= 40.0 + 20.0 * 80.0);
        for mark in &encoding.marks {
            let (x0, y0, x1, y1) = mark.shape.bounds();
            let (x, y) = mark.position;
            assert!(x + x0 >= 0.0 && x + x1 <= width, "{} outside canvas", mark.label);
            assert!(y + y0 >= 0.0 && y + y1 <= height, "{} outside canvas", mark.label);
            assert!(mark.label_anchor.1 <= height);
        }
    }

    #[test]
    fn narrow_grid_keeps_configured_width() {
        let encoding = Pipeline::new(ChartConfig::grid())
            .encode_records(&sample())
            .unwrap();
        assert_eq!(encoding.canvas.0, ChartConfig::grid().width);
    }

    #[test]
    fn scatter_axis_survives_huge_durability() {
        let records = vec![
            raw("A", "Tool", "2011", "100000000000000000"),
            raw("B", "Tool", "2012", "100000000000000032"),
        ];
        let encoding = Pipeline::new(ChartConfig::scatter())
            .encode_records(&records)
            .unwrap();
        let y_axis = encoding
            .axes
            .iter()
            .find(|a| a.orientation == Orientation::Vertical)
            .unwrap();
        assert_eq!(y_axis.ticks.len(), 2);
    }

    #[test]
    fn run_passes_load_errors_through() {
        let mut bad = HashMap::new();
        bad.insert("type".to_string(), "Tool".to_string());
        let source = InMemorySource::new(vec![bad]);
        let result = Pipeline::new(ChartConfig::grid()).run(&source);
        assert!(matches!(
            result,
            Err(PipelineError::Load(LoadError::Record { row: 1, .. }))
        ));
    }
}
