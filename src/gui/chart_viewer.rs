//! Chart Viewer Widget
//! Central scrollable canvas. Marks are painted through the same render
//! boundary as file export; hovering a glyph shows the item behind it.

use armory_glyphs::charts::{
    render, AxisSpec, Color, Encoding, LegendSpec, Mark, Orientation, RenderTarget, Shape,
};
use armory_glyphs::error::RenderError;
use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, RichText, ScrollArea, Sense, Stroke};

const LABEL_FONT: f32 = 11.0;
const TICK_LEN: f32 = 5.0;

fn color32(c: Color) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

/// Paints onto an egui painter; canvas `(0, 0)` sits at `canvas.min`.
pub struct EguiTarget<'a> {
    painter: &'a Painter,
    canvas: Rect,
}

impl<'a> EguiTarget<'a> {
    pub fn new(painter: &'a Painter, canvas: Rect) -> Self {
        Self { painter, canvas }
    }

    fn to_screen(&self, x: f64, y: f64) -> Pos2 {
        self.canvas.min + egui::vec2(x as f32, y as f32)
    }

    fn fill_shape(&self, center: (f64, f64), shape: &Shape, color: Color32) {
        match shape {
            Shape::Circle { radius } => {
                self.painter
                    .circle_filled(self.to_screen(center.0, center.1), *radius as f32, color);
            }
            other => {
                for polygon in other.polygons() {
                    let points = polygon
                        .into_iter()
                        .map(|(dx, dy)| self.to_screen(center.0 + dx, center.1 + dy))
                        .collect();
                    self.painter
                        .add(egui::Shape::convex_polygon(points, color, Stroke::NONE));
                }
            }
        }
    }

    fn text(&self, at: Pos2, anchor: Align2, text: &str, size: f32) {
        self.painter
            .text(at, anchor, text, FontId::proportional(size), Color32::BLACK);
    }

    fn line(&self, from: Pos2, to: Pos2) {
        self.painter.line_segment([from, to], Stroke::new(1.0, Color32::BLACK));
    }
}

impl RenderTarget for EguiTarget<'_> {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.painter.rect_filled(self.canvas, 0.0, Color32::WHITE);
        Ok(())
    }

    fn draw_mark(&mut self, mark: &Mark) -> Result<(), RenderError> {
        self.fill_shape(mark.position, &mark.shape, color32(mark.color));
        self.text(
            self.to_screen(mark.label_anchor.0, mark.label_anchor.1),
            Align2::CENTER_TOP,
            &mark.label,
            LABEL_FONT,
        );
        Ok(())
    }

    fn draw_axis(&mut self, axis: &AxisSpec) -> Result<(), RenderError> {
        match axis.orientation {
            Orientation::Horizontal => {
                self.line(
                    self.to_screen(axis.from, axis.cross),
                    self.to_screen(axis.to, axis.cross),
                );
                for tick in &axis.ticks {
                    let at = self.to_screen(tick.position, axis.cross);
                    self.line(at, at + egui::vec2(0.0, TICK_LEN));
                    self.text(
                        at + egui::vec2(0.0, TICK_LEN + 2.0),
                        Align2::CENTER_TOP,
                        &tick.label,
                        10.0,
                    );
                }
                let mid = self.to_screen((axis.from + axis.to) / 2.0, axis.cross);
                self.text(
                    mid + egui::vec2(0.0, 24.0),
                    Align2::CENTER_TOP,
                    &axis.title,
                    12.0,
                );
            }
            Orientation::Vertical => {
                self.line(
                    self.to_screen(axis.cross, axis.from),
                    self.to_screen(axis.cross, axis.to),
                );
                for tick in &axis.ticks {
                    let at = self.to_screen(axis.cross, tick.position);
                    self.line(at - egui::vec2(TICK_LEN, 0.0), at);
                    self.text(
                        at - egui::vec2(TICK_LEN + 2.0, 0.0),
                        Align2::RIGHT_CENTER,
                        &tick.label,
                        10.0,
                    );
                }
                let top = self.to_screen(axis.cross, axis.from.min(axis.to));
                self.text(
                    top - egui::vec2(0.0, 16.0),
                    Align2::CENTER_BOTTOM,
                    &axis.title,
                    12.0,
                );
            }
        }
        Ok(())
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
                let start = self.to_screen(origin.0, origin.1);
                self.text(start, Align2::LEFT_TOP, title, 12.0);
                let top = start + egui::vec2(0.0, 16.0);
                let size = egui::vec2(swatch.0 as f32, swatch.1 as f32);
                for (i, color) in stops.iter().enumerate() {
                    let min = top + egui::vec2(i as f32 * size.x, 0.0);
                    self.painter
                        .rect_filled(Rect::from_min_size(min, size), 0.0, color32(*color));
                }
                let below = top + egui::vec2(0.0, size.y + 3.0);
                self.text(below, Align2::LEFT_TOP, min_label, 10.0);
                let right = below + egui::vec2(stops.len() as f32 * size.x, 0.0);
                self.text(right, Align2::RIGHT_TOP, max_label, 10.0);
            }
            LegendSpec::Shape {
                title,
                origin,
                spacing,
                entries,
            } => {
                let start = self.to_screen(origin.0, origin.1);
                self.text(start, Align2::LEFT_TOP, title, 12.0);
                for (i, entry) in entries.iter().enumerate() {
                    let center = (origin.0 + 10.0 + i as f64 * spacing, origin.1 + 30.0);
                    self.fill_shape(center, &entry.shape, color32(Color::GRAY));
                    self.text(
                        self.to_screen(center.0 + 16.0, center.1),
                        Align2::LEFT_CENTER,
                        &entry.label,
                        10.0,
                    );
                }
            }
        }
        Ok(())
    }
}

/// Scrollable chart display area.
#[derive(Default)]
pub struct ChartViewer {
    encoding: Option<Encoding>,
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.encoding = None;
    }

    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.encoding = Some(encoding);
    }

    pub fn encoding(&self) -> Option<&Encoding> {
        self.encoding.as_ref()
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(encoding) = &self.encoding else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        ScrollArea::both()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                let size = egui::vec2(encoding.canvas.0 as f32, encoding.canvas.1 as f32);
                let (response, painter) = ui.allocate_painter(size, Sense::hover());
                let canvas = response.rect;

                let mut target = EguiTarget::new(&painter, canvas);
                if let Err(e) = render(encoding, &mut target) {
                    tracing::warn!(error = %e, "Canvas render failed");
                }

                let hovered = response.hover_pos().and_then(|pos| {
                    let local = pos - canvas.min;
                    encoding.mark_at(local.x as f64, local.y as f64)
                });

                if let Some(mark) = hovered {
                    let (x0, y0, x1, y1) = mark.shape.bounds();
                    let (cx, cy) = mark.position;
                    let outline = Rect::from_min_max(
                        target.to_screen(cx + x0, cy + y0),
                        target.to_screen(cx + x1, cy + y1),
                    );
                    let stroke = Stroke::new(1.5, Color32::BLACK);
                    painter.rect_stroke(outline.expand(2.0), 2.0, stroke);

                    let lines = mark.describe();
                    response.on_hover_ui_at_pointer(|ui| {
                        if let Some((name, rest)) = lines.split_first() {
                            ui.label(RichText::new(name).strong());
                            for line in rest {
                                ui.label(line);
                            }
                        }
                    });
                }
            });
    }
}
