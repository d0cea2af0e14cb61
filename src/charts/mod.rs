//! Charts module - visual encoding and rendering

mod color;
mod glyph;
mod guide;
mod layout;
mod mark;
mod pipeline;
mod renderer;
mod scale;

pub use color::{Color, ColorLaw, ColorScheme};
pub use glyph::{GlyphStyle, Shape, Silhouette};
pub use guide::{AxisSpec, LegendSpec, Orientation, ShapeEntry, Tick};
pub use layout::{GridLayout, Layout, LayoutPolicy, ScatterLayout};
pub use mark::Mark;
pub use pipeline::{Encoding, FittedScales, Pipeline};
pub use renderer::{
    export_png, export_svg, render, render_svg_string, PlottersTarget, RenderTarget,
};
pub use scale::{nice_step, Scale, ScaleLaw};
