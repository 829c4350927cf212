//! Pass 1: every note of the chart drawn onto one tall strip, beat 0 at the
//! bottom.

use std::collections::HashMap;

use crate::chart::model::{Direction, LANE_COUNT, NoteEvent, NoteKind, mirror_lane};
use crate::config::layout::LayoutConfig;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8Premul};
use crate::foundation::error::ChartResult;
use crate::render::metrics::{
    BEAT_PX, HOLD_BODY_PX, NOTE_AREA_PX, NOTE_RADIUS_PX, PADDING_PX, Palette, SLIDE_MAX_GAP_BEATS,
    SLIDE_PX, TEMPO_MARKER, format_bpm, lane_center,
};
use crate::render::painter::Painter;
use crate::render::surface::PixelBuffer;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Hold body between a hold head and the next note in its lane.
pub struct HoldBody {
    pub lane: u8,
    pub start_beat: f64,
    pub end_beat: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Connector between consecutive points of one slide group.
pub struct SlideConnector {
    pub from_lane: u8,
    pub from_beat: f64,
    pub to_lane: u8,
    pub to_beat: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Shapes drawn beneath the note glyphs, in event order.
pub enum Connector {
    Hold(HoldBody),
    Slide(SlideConnector),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoteGlyph {
    pub lane: u8,
    pub beat: f64,
    pub hold: bool,
    pub direction: Direction,
}

#[derive(Clone, Debug, PartialEq)]
/// Output of pass 1.
pub struct Strip {
    pub pixels: PixelBuffer,
    /// Beats between the chart start and the last event.
    pub total_beats: f64,
}

impl Strip {
    /// Pixel row of `beat`.
    pub fn row(&self, beat: f64) -> f64 {
        strip_bottom(self.pixels.height) - beat * BEAT_PX
    }
}

fn strip_bottom(height: u32) -> f64 {
    f64::from(height) - PADDING_PX
}

fn event_beat(note: &NoteEvent, config: &LayoutConfig) -> f64 {
    config.tempo.beat_at(note.time_or_zero() - config.start)
}

fn display_lane(note: &NoteEvent, config: &LayoutConfig) -> u8 {
    if config.mirror {
        mirror_lane(note.lane)
    } else {
        note.lane
    }
}

/// Beats from the chart start to the last event; never negative.
pub fn total_beats(notes: &[NoteEvent], config: &LayoutConfig) -> f64 {
    notes
        .last()
        .map_or(0.0, |last| event_beat(last, config))
        .max(0.0)
}

/// Hold bodies and slide connectors in the order they are drawn.
///
/// Each lane keeps at most one open hold: a hold opens it, and the next tap or
/// hold in that lane closes it. Each slide group keeps its latest point; a new
/// point closer than [`SLIDE_MAX_GAP_BEATS`] is connected to it.
pub fn connectors(notes: &[NoteEvent], config: &LayoutConfig) -> Vec<Connector> {
    let mut open_holds: [Option<f64>; LANE_COUNT as usize + 1] = [None; LANE_COUNT as usize + 1];
    let mut slide_points: HashMap<i64, (u8, f64)> = HashMap::new();
    let mut out = Vec::new();

    for note in notes.iter().filter(|n| n.has_lane()) {
        let lane = display_lane(note, config);
        let beat = event_beat(note, config);

        if note.is_note() {
            let slot = &mut open_holds[usize::from(lane)];
            match (note.kind, *slot) {
                (NoteKind::Hold, None) => *slot = Some(beat),
                (_, Some(start_beat)) => {
                    out.push(Connector::Hold(HoldBody {
                        lane,
                        start_beat,
                        end_beat: beat,
                    }));
                    *slot = None;
                }
                _ => {}
            }
        }

        if note.group_id != 0 {
            if let Some(&(from_lane, from_beat)) = slide_points.get(&note.group_id)
                && beat - from_beat < SLIDE_MAX_GAP_BEATS
            {
                out.push(Connector::Slide(SlideConnector {
                    from_lane,
                    from_beat,
                    to_lane: lane,
                    to_beat: beat,
                }));
            }
            slide_points.insert(note.group_id, (lane, beat));
        }
    }
    out
}

/// Note heads in event order.
pub fn glyphs(notes: &[NoteEvent], config: &LayoutConfig) -> Vec<NoteGlyph> {
    notes
        .iter()
        .filter(|n| n.is_note() && n.has_lane())
        .map(|note| {
            let direction = note.direction();
            NoteGlyph {
                lane: display_lane(note, config),
                beat: event_beat(note, config),
                hold: note.kind == NoteKind::Hold,
                direction: if config.mirror {
                    direction.mirrored()
                } else {
                    direction
                },
            }
        })
        .collect()
}

/// Draw the whole chart onto one strip.
#[tracing::instrument(skip(notes, config), fields(events = notes.len()))]
pub fn render_strip(notes: &[NoteEvent], config: &LayoutConfig) -> ChartResult<Strip> {
    let total_beats = total_beats(notes, config);
    let canvas = Canvas::from_extent(
        PADDING_PX * 2.0 + NOTE_AREA_PX,
        PADDING_PX * 2.0 + (total_beats * BEAT_PX).round(),
    )?;
    tracing::debug!(
        width = canvas.width,
        height = canvas.height,
        total_beats,
        "strip size"
    );

    let palette = Palette::for_style(config.style);
    let bottom = strip_bottom(canvas.height);
    let row = |beat: f64| bottom - beat * BEAT_PX;
    let x_of = |lane: u8| PADDING_PX + lane_center(lane);
    let mut painter = Painter::new(canvas)?;

    for connector in connectors(notes, config) {
        match connector {
            Connector::Hold(body) => {
                let x = x_of(body.lane);
                painter.fill_rect(
                    Rect::new(
                        x - HOLD_BODY_PX / 2.0,
                        row(body.start_beat),
                        x + HOLD_BODY_PX / 2.0,
                        row(body.end_beat),
                    ),
                    palette.long,
                );
            }
            Connector::Slide(slide) => painter.line(
                Point::new(x_of(slide.from_lane), row(slide.from_beat)),
                Point::new(x_of(slide.to_lane), row(slide.to_beat)),
                SLIDE_PX,
                palette.long,
            ),
        }
    }

    for glyph in glyphs(notes, config) {
        draw_glyph(
            &mut painter,
            Point::new(x_of(glyph.lane), row(glyph.beat)),
            &glyph,
            palette,
        );
    }

    let note_right = PADDING_PX + NOTE_AREA_PX;
    for marker in config.tempo_markers() {
        let y = row(config.tempo.beat_at(marker.time)) - 0.5;
        painter.hline(PADDING_PX, note_right, y, TEMPO_MARKER);
        painter.text(
            &format_bpm(marker.bpm),
            Point::new(note_right + 2.0, y + 4.0),
            TEMPO_MARKER,
        )?;
    }

    Ok(Strip {
        pixels: painter.finish(),
        total_beats,
    })
}

fn draw_glyph(painter: &mut Painter, center: Point, glyph: &NoteGlyph, palette: Palette) {
    painter.circle(center, NOTE_RADIUS_PX, palette.note);
    if glyph.hold {
        painter.circle(center, NOTE_RADIUS_PX - 3.0, Rgba8Premul::WHITE);
        painter.circle(center, NOTE_RADIUS_PX - 3.5, palette.note);
    }
    let r = match glyph.direction {
        Direction::None => return,
        Direction::Left => -1.0,
        Direction::Right => 1.0,
    };
    let Point { x, y } = center;
    painter.polygon(
        &[
            Point::new(x - 5.0 * r, y - 1.0),
            Point::new(x - 5.0 * r, y + 1.0),
            Point::new(x, y + 1.0),
            Point::new(x, y + 4.0),
            Point::new(x + 5.0 * r, y),
            Point::new(x, y - 4.0),
            Point::new(x, y - 1.0),
        ],
        Rgba8Premul::WHITE,
    );
}

#[cfg(test)]
#[path = "../../tests/unit/render/strip.rs"]
mod tests;
