//! Pixel geometry and palettes shared by both passes.

use crate::config::layout::ColorStyle;
use crate::foundation::core::Rgba8Premul;

/// Height of one beat.
pub const BEAT_PX: f64 = 48.0;
/// Width of one lane.
pub const LANE_PX: f64 = 22.0;
/// Width of the five-lane note area.
pub const NOTE_AREA_PX: f64 = LANE_PX * 5.0;
/// Horizontal margin on each side of a page column.
pub const COLUMN_MARGIN_PX: f64 = 20.0;
/// Full width of one page column cell.
pub const COLUMN_PX: f64 = NOTE_AREA_PX + COLUMN_MARGIN_PX * 2.0;
/// Height of the info bar on top of a page.
pub const INFO_PX: f64 = 50.0;
/// Padding around the strip and the page; also the bleed copied above and below a column.
pub const PADDING_PX: f64 = 30.0;

pub const NOTE_RADIUS_PX: f64 = 6.0;
pub const HOLD_BODY_PX: f64 = 12.0;
pub const SLIDE_PX: f64 = 8.0;

/// Slide points further apart than this are treated as a new chain.
pub const SLIDE_MAX_GAP_BEATS: f64 = 4.0;

pub(crate) const MEASURE_LINE: Rgba8Premul = Rgba8Premul::opaque(0x00, 0x00, 0x00);
pub(crate) const BEAT_LINE: Rgba8Premul = Rgba8Premul::opaque(0xaa, 0xaa, 0xaa);
pub(crate) const HALF_BEAT_LINE: Rgba8Premul = Rgba8Premul::opaque(0xdd, 0xdd, 0xdd);
pub(crate) const TEMPO_MARKER: Rgba8Premul = Rgba8Premul::opaque(0xff, 0x00, 0x00);
pub(crate) const LABEL: Rgba8Premul = Rgba8Premul::opaque(0x00, 0x00, 0x00);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Colors a [`ColorStyle`] resolves to.
pub struct Palette {
    /// Note heads.
    pub note: Rgba8Premul,
    /// Hold bodies and slide connectors.
    pub long: Rgba8Premul,
}

impl Palette {
    pub fn for_style(style: ColorStyle) -> Self {
        match style {
            ColorStyle::Pink => Self {
                note: Rgba8Premul::opaque(0xef, 0x32, 0x94),
                long: Rgba8Premul::opaque(0xf0, 0x93, 0xb2),
            },
            ColorStyle::Blue => Self {
                note: Rgba8Premul::opaque(0x24, 0x96, 0xf8),
                long: Rgba8Premul::opaque(0x73, 0xde, 0xf7),
            },
            ColorStyle::Orange => Self {
                note: Rgba8Premul::opaque(0xf7, 0x82, 0x00),
                long: Rgba8Premul::opaque(0xfc, 0xc6, 0x4a),
            },
            ColorStyle::Black => Self {
                note: Rgba8Premul::opaque(0x00, 0x00, 0x00),
                long: Rgba8Premul::opaque(0xaa, 0xaa, 0xaa),
            },
        }
    }
}

/// Horizontal center of `lane` (1..=5) relative to the left edge of its note area.
pub fn lane_center(lane: u8) -> f64 {
    LANE_PX * (f64::from(lane) - 0.5)
}

/// Label text for a tempo value: integral values print without a fraction.
pub(crate) fn format_bpm(bpm: f64) -> String {
    if bpm.fract() == 0.0 && bpm.abs() < 1e15 {
        format!("{}", bpm as i64)
    } else {
        format!("{bpm}")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/metrics.rs"]
mod tests;
