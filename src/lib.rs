//! stagechart renders rhythm-game stage documents into paginated chart
//! images, laid out like sheet music.
//!
//! # Pipeline overview
//!
//! 1. **Parse**: stage JSON → [`ChartDocument`] (start time and chart info are detected here)
//! 2. **Configure**: document defaults + [`LayoutOverrides`] → immutable [`LayoutConfig`]
//! 3. **Strip**: every note drawn onto one continuous strip ([`render_strip`])
//! 4. **Paginate**: the strip cut into ruled columns on one page ([`paginate`])
//!
//! Times become beat positions through a [`TempoModel`], quantized to 1/48 of
//! a beat. Column breaks and gridlines come from the same [`MeasureWalk`], so
//! they always agree.
//!
//! Renderers output **premultiplied** RGBA8 in a [`PixelBuffer`];
//! [`PixelBuffer::save_png`] converts to straight alpha for export.
#![forbid(unsafe_code)]

mod chart;
mod config;
mod foundation;
mod layout;
mod render;
mod session;
mod timing;

pub use chart::model::{
    ChartDocument, ChartInfo, Direction, LANE_COUNT, NoteEvent, NoteKind, mirror_lane,
};
pub use config::layout::{
    ColorStyle, DEFAULT_BEATS_PER_COLUMN, DEFAULT_BPM, DEFAULT_MEASURE_BEATS, LayoutConfig,
    LayoutOverrides,
};
pub use config::overrides::{parse_column_lines, parse_measure_lines, parse_tempo_lines};
pub use foundation::core::{Canvas, Rgba8Premul};
pub use foundation::error::{ChartError, ChartResult};
pub use layout::columns::{Column, compute_columns};
pub use layout::measure::{Measure, MeasureWalk};
pub use render::metrics::{
    BEAT_PX, COLUMN_MARGIN_PX, COLUMN_PX, HOLD_BODY_PX, INFO_PX, LANE_PX, NOTE_AREA_PX,
    NOTE_RADIUS_PX, PADDING_PX, Palette, SLIDE_MAX_GAP_BEATS, SLIDE_PX, lane_center,
};
pub use render::paginate::{ColumnFrame, page_canvas, paginate};
pub use render::pipeline::render_chart;
pub use render::strip::{
    Connector, HoldBody, NoteGlyph, SlideConnector, Strip, connectors, glyphs, render_strip,
    total_beats,
};
pub use render::surface::PixelBuffer;
pub use session::ChartSession;
pub use timing::tempo::{TempoCheckpoint, TempoMap, TempoModel};
