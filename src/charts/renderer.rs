//! Static Chart Renderer
//! The drawing boundary of the pipeline plus a plotters-backed target that
//! writes SVG or PNG files.
//!
//! Layout of an exported chart:
//! 1. Marks: glyph filled with its color, name centred below it
//! 2. Axes (scatter only): line, tick marks, tick labels, title
//! 3. Legends: color ramp with year labels, then the glyph key

use crate::charts::color::Color;
use crate::charts::glyph::Shape;
use crate::charts::guide::{AxisSpec, LegendSpec, Orientation};
use crate::charts::mark::Mark;
use crate::charts::pipeline::Encoding;
use crate::error::RenderError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::Color as _;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;
use tracing::debug;

const FONT: &str = "sans-serif";
const LABEL_SIZE: u32 = 11;
const TICK_LEN: i32 = 5;

/// Anything marks and guides can be drawn on.
pub trait RenderTarget {
    /// Drop whatever an earlier render left behind.
    fn clear(&mut self) -> Result<(), RenderError>;
    fn draw_mark(&mut self, mark: &Mark) -> Result<(), RenderError>;
    fn draw_axis(&mut self, axis: &AxisSpec) -> Result<(), RenderError>;
    fn draw_legend(&mut self, legend: &LegendSpec) -> Result<(), RenderError>;
}

/// Clear the target, then draw marks, axes and legends in that order.
pub fn render<T: RenderTarget + ?Sized>(
    encoding: &Encoding,
    target: &mut T,
) -> Result<(), RenderError> {
    target.clear()?;
    for mark in &encoding.marks {
        target.draw_mark(mark)?;
    }
    for axis in &encoding.axes {
        target.draw_axis(axis)?;
    }
    for legend in &encoding.legends {
        target.draw_legend(legend)?;
    }
    debug!(marks = encoding.marks.len(), profile = %encoding.profile, "Rendered encoding");
    Ok(())
}

fn backend_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Backend(e.to_string())
}

fn px(v: f64) -> i32 {
    v.round() as i32
}

/// Plotters drawing area used as a render target.
pub struct PlottersTarget<DB: DrawingBackend> {
    area: DrawingArea<DB, Shift>,
}

impl<DB: DrawingBackend> PlottersTarget<DB> {
    pub fn new(area: DrawingArea<DB, Shift>) -> Self {
        Self { area }
    }

    /// Flush the backend. SVG and bitmap backends write their output here.
    pub fn present(&self) -> Result<(), RenderError> {
        self.area.present().map_err(backend_err)
    }

    fn text(
        &self,
        text: &str,
        at: (i32, i32),
        size: u32,
        h: HPos,
        v: VPos,
    ) -> Result<(), RenderError> {
        let style = TextStyle::from((FONT, f64::from(size)).into_font())
            .color(&BLACK)
            .pos(Pos::new(h, v));
        self.area
            .draw(&Text::new(text.to_string(), at, style))
            .map_err(backend_err)
    }

    fn fill_shape(
        &self,
        center: (f64, f64),
        shape: &Shape,
        color: Color,
    ) -> Result<(), RenderError> {
        let fill = RGBColor::from(color).filled();
        match shape {
            Shape::Circle { radius } => self
                .area
                .draw(&Circle::new(
                    (px(center.0), px(center.1)),
                    radius.round().max(1.0) as u32,
                    fill,
                ))
                .map_err(backend_err),
            other => {
                for polygon in other.polygons() {
                    let points: Vec<(i32, i32)> = polygon
                        .into_iter()
                        .map(|(dx, dy)| (px(center.0 + dx), px(center.1 + dy)))
                        .collect();
                    self.area
                        .draw(&Polygon::new(points, fill))
                        .map_err(backend_err)?;
                }
                Ok(())
            }
        }
    }

    fn line(&self, from: (i32, i32), to: (i32, i32)) -> Result<(), RenderError> {
        self.area
            .draw(&PathElement::new(vec![from, to], BLACK.stroke_width(1)))
            .map_err(backend_err)
    }
}

impl<DB: DrawingBackend> RenderTarget for PlottersTarget<DB> {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.area.fill(&WHITE).map_err(backend_err)
    }

    fn draw_mark(&mut self, mark: &Mark) -> Result<(), RenderError> {
        self.fill_shape(mark.position, &mark.shape, mark.color)?;
        self.text(
            &mark.label,
            (px(mark.label_anchor.0), px(mark.label_anchor.1)),
            LABEL_SIZE,
            HPos::Center,
            VPos::Top,
        )
    }

    fn draw_axis(&mut self, axis: &AxisSpec) -> Result<(), RenderError> {
        let cross = px(axis.cross);
        match axis.orientation {
            Orientation::Horizontal => {
                self.line((px(axis.from), cross), (px(axis.to), cross))?;
                for tick in &axis.ticks {
                    let x = px(tick.position);
                    self.line((x, cross), (x, cross + TICK_LEN))?;
                    self.text(
                        &tick.label,
                        (x, cross + TICK_LEN + 2),
                        10,
                        HPos::Center,
                        VPos::Top,
                    )?;
                }
                let mid = px((axis.from + axis.to) / 2.0);
                self.text(&axis.title, (mid, cross + 24), 12, HPos::Center, VPos::Top)
            }
            Orientation::Vertical => {
                self.line((cross, px(axis.from)), (cross, px(axis.to)))?;
                for tick in &axis.ticks {
                    let y = px(tick.position);
                    self.line((cross - TICK_LEN, y), (cross, y))?;
                    self.text(
                        &tick.label,
                        (cross - TICK_LEN - 2, y),
                        10,
                        HPos::Right,
                        VPos::Center,
                    )?;
                }
                let top = px(axis.from.min(axis.to));
                self.text(&axis.title, (cross, top - 16), 12, HPos::Center, VPos::Bottom)
            }
        }
    }

    fn draw_legend(&mut self, legend: &LegendSpec) -> Result<(), RenderError> {
        match legend {
            LegendSpec::Color {
                title,
                origin,
                swatch,
                stops,
                min_label,
                max_label,
            } => {
                let (x0, y0) = (px(origin.0), px(origin.1));
                self.text(title, (x0, y0), 12, HPos::Left, VPos::Top)?;
                let top = y0 + 16;
                let (w, h) = (px(swatch.0), px(swatch.1));
                for (i, color) in stops.iter().enumerate() {
                    let left = x0 + i as i32 * w;
                    self.area
                        .draw(&Rectangle::new(
                            [(left, top), (left + w, top + h)],
                            RGBColor::from(*color).filled(),
                        ))
                        .map_err(backend_err)?;
                }
                let right = x0 + stops.len() as i32 * w;
                self.text(min_label, (x0, top + h + 3), 10, HPos::Left, VPos::Top)?;
                self.text(max_label, (right, top + h + 3), 10, HPos::Right, VPos::Top)
            }
            LegendSpec::Shape {
                title,
                origin,
                spacing,
                entries,
            } => {
                let (x0, y0) = (px(origin.0), px(origin.1));
                self.text(title, (x0, y0), 12, HPos::Left, VPos::Top)?;
                for (i, entry) in entries.iter().enumerate() {
                    let cx = origin.0 + 10.0 + i as f64 * spacing;
                    let cy = origin.1 + 30.0;
                    self.fill_shape((cx, cy), &entry.shape, Color::GRAY)?;
                    self.text(
                        &entry.label,
                        (px(cx) + 16, px(cy)),
                        10,
                        HPos::Left,
                        VPos::Center,
                    )?;
                }
                Ok(())
            }
        }
    }
}

fn canvas_size(encoding: &Encoding) -> (u32, u32) {
    (
        encoding.canvas.0.ceil().max(1.0) as u32,
        encoding.canvas.1.ceil().max(1.0) as u32,
    )
}

/// Render an encoding into an SVG document held in memory.
pub fn render_svg_string(encoding: &Encoding) -> Result<String, RenderError> {
    let mut svg = String::new();
    {
        let area = SVGBackend::with_string(&mut svg, canvas_size(encoding)).into_drawing_area();
        let mut target = PlottersTarget::new(area);
        render(encoding, &mut target)?;
        target.present()?;
    }
    Ok(svg)
}

pub fn export_svg(encoding: &Encoding, path: &Path) -> Result<(), RenderError> {
    let area = SVGBackend::new(path, canvas_size(encoding)).into_drawing_area();
    let mut target = PlottersTarget::new(area);
    render(encoding, &mut target)?;
    target.present()
}

pub fn export_png(encoding: &Encoding, path: &Path) -> Result<(), RenderError> {
    let area = BitMapBackend::new(path, canvas_size(encoding)).into_drawing_area();
    let mut target = PlottersTarget::new(area);
    render(encoding, &mut target)?;
    target.present()
}
