use std::collections::BTreeMap;

use crate::chart::model::{ChartDocument, ChartInfo};
use crate::foundation::error::{ChartError, ChartResult};
use crate::timing::tempo::{TempoCheckpoint, TempoModel, validate_bpm};

/// Beats in a measure without an override.
pub const DEFAULT_MEASURE_BEATS: f64 = 4.0;
/// Column height in beats without an override.
pub const DEFAULT_BEATS_PER_COLUMN: f64 = 16.0;
/// Tempo used when no tempo map is given.
pub const DEFAULT_BPM: f64 = 120.0;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
/// Named note palette.
pub enum ColorStyle {
    Pink,
    Blue,
    Orange,
    #[default]
    Black,
}

impl ColorStyle {
    pub const ALL: [Self; 4] = [Self::Pink, Self::Blue, Self::Orange, Self::Black];

    pub fn name(self) -> &'static str {
        match self {
            Self::Pink => "pink",
            Self::Blue => "blue",
            Self::Orange => "orange",
            Self::Black => "black",
        }
    }
}

impl std::str::FromStr for ColorStyle {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|style| style.name() == wanted)
            .ok_or_else(|| {
                ChartError::configuration(format!(
                    "unknown color style '{s}' (expected pink, blue, orange or black)"
                ))
            })
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
/// User-supplied settings; each present field replaces the computed default.
pub struct LayoutOverrides {
    /// Chart start in seconds.
    pub start: Option<f64>,
    /// Tempo checkpoints (`time` relative to the chart start).
    pub tempo: Option<Vec<TempoCheckpoint>>,
    /// Constant tempo used when no checkpoints are given.
    pub base_bpm: Option<f64>,
    /// Pickup beats before the first full measure.
    pub upbeat: Option<f64>,
    /// Measure number → beats.
    pub measures: Option<BTreeMap<u32, f64>>,
    /// Default column height in beats.
    pub beats_per_column: Option<f64>,
    /// 1-based column index → beats.
    pub columns: Option<BTreeMap<u32, f64>>,
    pub style: Option<ColorStyle>,
    pub mirror: Option<bool>,
}

impl LayoutOverrides {
    pub fn from_json_str(json: &str) -> ChartResult<Self> {
        serde_json::from_str(json).map_err(|e| ChartError::serde(format!("layout overrides: {e}")))
    }

    pub fn to_json_string(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::serde(format!("layout overrides: {e}")))
    }

    /// Layer `other` on top of `self`; fields set in `other` win.
    pub fn merged(self, other: LayoutOverrides) -> Self {
        Self {
            start: other.start.or(self.start),
            tempo: other.tempo.or(self.tempo),
            base_bpm: other.base_bpm.or(self.base_bpm),
            upbeat: other.upbeat.or(self.upbeat),
            measures: other.measures.or(self.measures),
            beats_per_column: other.beats_per_column.or(self.beats_per_column),
            columns: other.columns.or(self.columns),
            style: other.style.or(self.style),
            mirror: other.mirror.or(self.mirror),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Immutable settings for one render.
pub struct LayoutConfig {
    /// Chart start in seconds; event times are measured from here.
    pub start: f64,
    pub tempo: TempoModel,
    /// Pickup beats; when nonzero they form measure 1.
    pub upbeat: f64,
    pub measure_lengths: BTreeMap<u32, f64>,
    pub beats_per_column: f64,
    pub column_lengths: BTreeMap<u32, f64>,
    pub style: ColorStyle,
    pub mirror: bool,
    pub info: ChartInfo,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            tempo: TempoModel::Constant(DEFAULT_BPM),
            upbeat: 0.0,
            measure_lengths: BTreeMap::new(),
            beats_per_column: DEFAULT_BEATS_PER_COLUMN,
            column_lengths: BTreeMap::new(),
            style: ColorStyle::default(),
            mirror: false,
            info: ChartInfo::default(),
        }
    }
}

impl LayoutConfig {
    /// Defaults derived from `doc` with `overrides` applied on top.
    pub fn for_document(doc: &ChartDocument, overrides: &LayoutOverrides) -> ChartResult<Self> {
        let defaults = Self {
            start: doc.detect_start(),
            info: doc.info(),
            ..Self::default()
        };
        defaults.with_overrides(overrides)
    }

    pub fn with_overrides(self, overrides: &LayoutOverrides) -> ChartResult<Self> {
        let tempo = if overrides.tempo.is_some() || overrides.base_bpm.is_some() {
            let base_bpm = match (overrides.base_bpm, &self.tempo) {
                (Some(bpm), _) => bpm,
                (None, TempoModel::Constant(bpm)) => *bpm,
                (None, TempoModel::Map(_)) => DEFAULT_BPM,
            };
            TempoModel::from_parts(overrides.tempo.clone().unwrap_or_default(), base_bpm)?
        } else {
            self.tempo
        };
        let config = Self {
            start: overrides.start.unwrap_or(self.start),
            tempo,
            upbeat: overrides.upbeat.unwrap_or(self.upbeat),
            measure_lengths: overrides
                .measures
                .clone()
                .unwrap_or(self.measure_lengths),
            beats_per_column: overrides.beats_per_column.unwrap_or(self.beats_per_column),
            column_lengths: overrides.columns.clone().unwrap_or(self.column_lengths),
            style: overrides.style.unwrap_or(self.style),
            mirror: overrides.mirror.unwrap_or(self.mirror),
            info: self.info,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.start.is_finite() {
            return Err(ChartError::configuration("start must be finite"));
        }
        if let TempoModel::Constant(bpm) = self.tempo {
            validate_bpm(bpm)?;
        }
        if !self.upbeat.is_finite() || self.upbeat < 0.0 {
            return Err(ChartError::configuration(
                "upbeat must be finite and >= 0",
            ));
        }
        if !self.beats_per_column.is_finite() || self.beats_per_column <= 0.0 {
            return Err(ChartError::configuration(
                "beats_per_column must be finite and > 0",
            ));
        }
        for (what, lengths) in [
            ("measure", &self.measure_lengths),
            ("column", &self.column_lengths),
        ] {
            for (number, beats) in lengths {
                if *number == 0 {
                    return Err(ChartError::configuration(format!(
                        "{what} numbers start at 1"
                    )));
                }
                if !beats.is_finite() || *beats <= 0.0 {
                    return Err(ChartError::configuration(format!(
                        "{what} {number} length must be finite and > 0"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Length of measure `number` (1-based) in beats.
    pub fn measure_length(&self, number: u32) -> f64 {
        self.measure_lengths
            .get(&number)
            .copied()
            .unwrap_or(DEFAULT_MEASURE_BEATS)
    }

    /// Beat budget of column `number` (1-based).
    pub fn column_budget(&self, number: u32) -> f64 {
        self.column_lengths
            .get(&number)
            .copied()
            .unwrap_or(self.beats_per_column)
    }

    pub fn tempo_markers(&self) -> Vec<TempoCheckpoint> {
        self.tempo.markers()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/layout.rs"]
mod tests;
