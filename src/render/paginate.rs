//! Pass 2: cut the strip into page columns and lay them out side by side on
//! a ruled page.

use crate::config::layout::LayoutConfig;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::error::ChartResult;
use crate::foundation::math::same_grid_position;
use crate::layout::columns::{Column, compute_columns};
use crate::render::composite::{FadeStop, blit_over, vertical_fade};
use crate::render::metrics::{
    BEAT_LINE, BEAT_PX, COLUMN_MARGIN_PX, COLUMN_PX, HALF_BEAT_LINE, INFO_PX, LABEL,
    MEASURE_LINE, NOTE_AREA_PX, PADDING_PX,
};
use crate::render::painter::Painter;
use crate::render::strip::Strip;
use crate::render::surface::PixelBuffer;

const TOP_FADE: [FadeStop; 3] = [
    FadeStop::new(0.0, 1.0),
    FadeStop::new(0.4, 1.0),
    FadeStop::new(1.0, 0.0),
];
const BOTTOM_FADE: [FadeStop; 3] = [
    FadeStop::new(0.0, 0.0),
    FadeStop::new(0.6, 1.0),
    FadeStop::new(1.0, 1.0),
];

/// Gap between a measure number and the column it labels.
const LABEL_GAP_PX: f64 = 4.0;
/// Baseline of the info bar text.
const INFO_BASELINE_PX: f64 = 42.0;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Where one column sits on the page.
pub struct ColumnFrame {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl ColumnFrame {
    pub fn new(column: &Column, page_height: u32, config: &LayoutConfig) -> Self {
        let left = PADDING_PX + column.index as f64 * COLUMN_PX + COLUMN_MARGIN_PX;
        let mut bottom = f64::from(page_height) - PADDING_PX;
        if column.index != 0 {
            bottom -= config.upbeat * BEAT_PX;
        }
        Self {
            left,
            right: left + NOTE_AREA_PX,
            top: bottom - column.beats * BEAT_PX,
            bottom,
        }
    }

    /// Page row of `beat` (counted from the chart start) inside `column`.
    pub fn row(&self, column: &Column, beat: f64) -> f64 {
        self.bottom - (beat - column.start_beat) * BEAT_PX
    }
}

/// Page size for `column_count` columns.
pub fn page_canvas(column_count: usize, config: &LayoutConfig) -> ChartResult<Canvas> {
    Canvas::from_extent(
        PADDING_PX * 2.0 + column_count as f64 * COLUMN_PX,
        PADDING_PX * 2.0 + config.beats_per_column * BEAT_PX + INFO_PX,
    )
}

/// Lay `strip` out as columns on a white page.
#[tracing::instrument(skip(strip, config))]
pub fn paginate(strip: &Strip, config: &LayoutConfig) -> ChartResult<PixelBuffer> {
    let columns = compute_columns(config, strip.total_beats);
    let canvas = page_canvas(columns.len(), config)?;
    tracing::debug!(
        columns = columns.len(),
        width = canvas.width,
        height = canvas.height,
        "page size"
    );

    let mut painter = Painter::new(canvas)?;
    painter.fill_rect(
        Rect::new(0.0, 0.0, f64::from(canvas.width), f64::from(canvas.height)),
        Rgba8Premul::WHITE,
    );
    if let Some(max_combo) = config.info.max_combo {
        painter.text(
            &max_combo.to_string(),
            Point::new(PADDING_PX, INFO_BASELINE_PX),
            LABEL,
        )?;
    }
    let frames: Vec<ColumnFrame> = columns
        .iter()
        .map(|column| ColumnFrame::new(column, canvas.height, config))
        .collect();
    for (column, frame) in columns.iter().zip(&frames) {
        draw_rules(&mut painter, column, frame)?;
    }
    let mut page = painter.finish();

    for (column, frame) in columns.iter().zip(&frames) {
        place_strip_slice(&mut page, strip, column, frame);
    }
    Ok(page)
}

fn draw_rules(painter: &mut Painter, column: &Column, frame: &ColumnFrame) -> ChartResult<()> {
    painter.vline(frame.left, frame.top, frame.bottom, MEASURE_LINE);
    painter.vline(frame.right, frame.top, frame.bottom, MEASURE_LINE);

    let measure_offsets: Vec<f64> = column
        .measures
        .iter()
        .map(|m| m.start_beat - column.start_beat)
        .collect();

    let half_beats = (column.beats * 2.0).ceil() as u64;
    for k in 0..half_beats {
        let offset = k as f64 / 2.0;
        if measure_offsets
            .iter()
            .any(|&m| same_grid_position(m, offset))
        {
            continue;
        }
        let color = if k % 2 == 0 { BEAT_LINE } else { HALF_BEAT_LINE };
        painter.hline(frame.left, frame.right, frame.bottom - offset * BEAT_PX, color);
    }

    for measure in &column.measures {
        let y = frame.row(column, measure.start_beat);
        painter.hline(frame.left, frame.right, y, MEASURE_LINE);
        painter.text_right(
            &measure.number.to_string(),
            Point::new(frame.left - LABEL_GAP_PX, y),
            LABEL,
        )?;
    }

    painter.hline(frame.left, frame.right, frame.top, MEASURE_LINE);
    painter.hline(frame.left, frame.right, frame.bottom, MEASURE_LINE);
    Ok(())
}

/// Copy the column's beats from the strip with a bleed above and below, then
/// fade the bleeds into the page.
fn place_strip_slice(page: &mut PixelBuffer, strip: &Strip, column: &Column, frame: &ColumnFrame) {
    let src_top = (strip.row(column.end_beat()) - PADDING_PX).round() as i64;
    let src_bottom = (strip.row(column.start_beat) + PADDING_PX).round() as i64;
    let dst_x = (frame.left - PADDING_PX).round() as i64;
    let dst_y = (frame.top - PADDING_PX).round() as i64;
    tracing::trace!(
        column = column.index,
        src_top,
        src_bottom,
        dst_x,
        dst_y,
        "copy strip slice"
    );
    blit_over(page, &strip.pixels, src_top..src_bottom, dst_x, dst_y);

    let cell_left = (frame.left - COLUMN_MARGIN_PX).round() as i64;
    let cells = cell_left..cell_left + COLUMN_PX as i64;
    let top = frame.top.round() as i64;
    let bottom = frame.bottom.round() as i64;
    let bleed = PADDING_PX as i64;
    vertical_fade(
        page,
        cells.clone(),
        top - bleed..top,
        Rgba8Premul::WHITE,
        &TOP_FADE,
    );
    vertical_fade(
        page,
        cells,
        bottom..bottom + bleed,
        Rgba8Premul::WHITE,
        &BOTTOM_FADE,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/paginate.rs"]
mod tests;
