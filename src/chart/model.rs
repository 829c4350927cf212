use serde::Deserialize as _;
use serde::de::Error as _;

use crate::foundation::error::{ChartError, ChartResult};

/// Number of playable lanes in the note area.
pub const LANE_COUNT: u8 = 5;

/// Lane reflection used by mirrored rendering. Index 0 is the unused sentinel.
const MIRROR_LANES: [u8; 6] = [0, 5, 4, 3, 2, 1];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "u32", into = "u32")]
/// Type code of a note record.
pub enum NoteKind {
    /// A single tap (code 1).
    Tap,
    /// Hold head or tail (code 2).
    Hold,
    /// Metadata marker whose `status` carries a statistic (code 100).
    Meta,
    /// Any other code; ignored by rendering.
    Other(u32),
}

impl From<u32> for NoteKind {
    fn from(code: u32) -> Self {
        match code {
            1 => Self::Tap,
            2 => Self::Hold,
            100 => Self::Meta,
            other => Self::Other(other),
        }
    }
}

impl From<NoteKind> for u32 {
    fn from(kind: NoteKind) -> Self {
        match kind {
            NoteKind::Tap => 1,
            NoteKind::Hold => 2,
            NoteKind::Meta => 100,
            NoteKind::Other(code) => code,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
/// Arrow drawn on top of a note glyph.
pub enum Direction {
    #[default]
    None,
    Left,
    Right,
}

impl Direction {
    /// Decode a note `status`: 0 is no arrow, 1 points left, anything else right.
    pub fn from_status(status: i64) -> Self {
        match status {
            0 => Self::None,
            1 => Self::Left,
            _ => Self::Right,
        }
    }

    pub fn mirrored(self) -> Self {
        match self {
            Self::None => Self::None,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Reflect a lane across the note area; the sentinel lane stays 0.
pub fn mirror_lane(lane: u8) -> u8 {
    MIRROR_LANES.get(usize::from(lane)).copied().unwrap_or(lane)
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One record of a stage document.
pub struct NoteEvent {
    /// Absolute time in seconds; `None` for untimed entries (`""`, `null`, missing).
    #[serde(rename = "sec", default, deserialize_with = "deserialize_time")]
    pub time_sec: Option<f64>,
    /// Record type code.
    #[serde(rename = "type")]
    pub kind: NoteKind,
    /// Target lane `1..=5`; 0 when unused.
    #[serde(rename = "finishPos", default)]
    pub lane: u8,
    /// Direction code for notes, statistic for metadata entries.
    #[serde(default)]
    pub status: i64,
    /// Nonzero ids chain notes into a slide.
    #[serde(rename = "groupId", default)]
    pub group_id: i64,
}

impl NoteEvent {
    pub fn new(time_sec: f64, kind: NoteKind, lane: u8) -> Self {
        Self {
            time_sec: Some(time_sec),
            kind,
            lane,
            status: 0,
            group_id: 0,
        }
    }

    pub fn with_status(mut self, status: i64) -> Self {
        self.status = status;
        self
    }

    pub fn with_direction(self, direction: Direction) -> Self {
        let status = match direction {
            Direction::None => 0,
            Direction::Left => 1,
            Direction::Right => 2,
        };
        self.with_status(status)
    }

    pub fn with_group(mut self, group_id: i64) -> Self {
        self.group_id = group_id;
        self
    }

    /// Time used for layout; an unset time counts as 0.
    pub fn time_or_zero(&self) -> f64 {
        self.time_sec.unwrap_or(0.0)
    }

    /// Tap and Hold records produce note glyphs.
    pub fn is_note(&self) -> bool {
        matches!(self.kind, NoteKind::Tap | NoteKind::Hold)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_status(self.status)
    }

    pub fn has_lane(&self) -> bool {
        (1..=LANE_COUNT).contains(&self.lane)
    }
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum RawTime {
    Seconds(f64),
    Text(String),
}

fn deserialize_time<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Option::<RawTime>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawTime::Seconds(s)) => Ok(Some(s)),
        Some(RawTime::Text(t)) => {
            let t = t.trim();
            if t.is_empty() {
                return Ok(None);
            }
            t.parse::<f64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("invalid time '{t}'")))
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Statistics read from metadata records.
pub struct ChartInfo {
    /// Combo count from the metadata record, when one precedes the first note.
    pub max_combo: Option<i64>,
}

#[derive(Clone, Debug, PartialEq)]
/// A validated, time-ordered list of note events.
pub struct ChartDocument {
    events: Vec<NoteEvent>,
}

impl ChartDocument {
    /// Parse a stage document (a JSON array of note records).
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        let events: Vec<NoteEvent> = serde_json::from_str(json)
            .map_err(|e| ChartError::malformed(format!("stage document: {e}")))?;
        Self::from_events(events)
    }

    pub fn from_events(events: Vec<NoteEvent>) -> ChartResult<Self> {
        if events.is_empty() {
            return Err(ChartError::malformed("stage document contains no events"));
        }
        for (i, ev) in events.iter().enumerate() {
            if ev.lane > LANE_COUNT {
                return Err(ChartError::malformed(format!(
                    "event {i}: lane {} is outside 0..={LANE_COUNT}",
                    ev.lane
                )));
            }
            if let Some(t) = ev.time_sec
                && !t.is_finite()
            {
                return Err(ChartError::malformed(format!(
                    "event {i}: time must be finite"
                )));
            }
        }
        Ok(Self { events })
    }

    pub fn events(&self) -> &[NoteEvent] {
        &self.events
    }

    /// Time of the last record, which ends the chart.
    pub fn end_time(&self) -> f64 {
        self.events.last().map_or(0.0, NoteEvent::time_or_zero)
    }

    /// First time that is set and non-zero; 0 when there is none.
    pub fn detect_start(&self) -> f64 {
        self.scan_header().0
    }

    /// Metadata found before the first timed record.
    pub fn info(&self) -> ChartInfo {
        self.scan_header().1
    }

    fn scan_header(&self) -> (f64, ChartInfo) {
        let mut info = ChartInfo::default();
        for ev in &self.events {
            if ev.kind == NoteKind::Meta {
                info.max_combo = Some(ev.status);
            }
            if let Some(t) = ev.time_sec
                && t != 0.0
            {
                return (t, info);
            }
        }
        (0.0, info)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/model.rs"]
mod tests;
