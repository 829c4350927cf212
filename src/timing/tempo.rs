//! Time → beat mapping under a constant or piecewise tempo.
//!
//! Every lookup walks the tempo map from its first checkpoint, so callers may
//! query times in any order. Results are snapped to the 1/48-beat grid.

use crate::foundation::error::{ChartError, ChartResult};
use crate::foundation::math::{GRID_DIVISIONS, quantize};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A tempo change at `time` seconds (relative to the chart start).
pub struct TempoCheckpoint {
    pub time: f64,
    pub bpm: f64,
}

impl TempoCheckpoint {
    pub fn new(time: f64, bpm: f64) -> Self {
        Self { time, bpm }
    }

    fn beats_per_sec(self) -> f64 {
        self.bpm / 60.0
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Non-empty list of checkpoints, strictly increasing in time.
pub struct TempoMap {
    checkpoints: Vec<TempoCheckpoint>,
}

impl TempoMap {
    pub fn new(checkpoints: Vec<TempoCheckpoint>) -> ChartResult<Self> {
        if checkpoints.is_empty() {
            return Err(ChartError::configuration(
                "tempo map requires at least one checkpoint",
            ));
        }
        for (i, cp) in checkpoints.iter().enumerate() {
            validate_bpm(cp.bpm)?;
            if !cp.time.is_finite() {
                return Err(ChartError::configuration(format!(
                    "tempo checkpoint {i} time must be finite"
                )));
            }
        }
        if let Some(i) = checkpoints
            .windows(2)
            .position(|pair| pair[1].time <= pair[0].time)
        {
            return Err(ChartError::configuration(format!(
                "tempo checkpoint {} at {}s is not after {}s",
                i + 1,
                checkpoints[i + 1].time,
                checkpoints[i].time
            )));
        }
        Ok(Self { checkpoints })
    }

    pub fn checkpoints(&self) -> &[TempoCheckpoint] {
        &self.checkpoints
    }

    fn raw_beat_at(&self, time: f64) -> f64 {
        let mut beat = 0.0;
        let mut elapsed = 0.0;
        for pair in self.checkpoints.windows(2) {
            let (current, next) = (pair[0], pair[1]);
            if time < next.time {
                return beat + current.beats_per_sec() * (time - elapsed);
            }
            beat += current.beats_per_sec() * (next.time - elapsed);
            elapsed = next.time;
        }
        // `new` guarantees at least one checkpoint.
        let last = self.checkpoints[self.checkpoints.len() - 1];
        beat + last.beats_per_sec() * (time - elapsed)
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Tempo used to place events on the beat grid.
pub enum TempoModel {
    /// One BPM for the whole chart.
    Constant(f64),
    /// Piecewise tempo.
    Map(TempoMap),
}

impl TempoModel {
    pub fn constant(bpm: f64) -> ChartResult<Self> {
        validate_bpm(bpm)?;
        Ok(Self::Constant(bpm))
    }

    pub fn map(checkpoints: Vec<TempoCheckpoint>) -> ChartResult<Self> {
        TempoMap::new(checkpoints).map(Self::Map)
    }

    /// Use `checkpoints` when there are any, otherwise the constant `base_bpm`.
    pub fn from_parts(checkpoints: Vec<TempoCheckpoint>, base_bpm: f64) -> ChartResult<Self> {
        if checkpoints.is_empty() {
            Self::constant(base_bpm)
        } else {
            Self::map(checkpoints)
        }
    }

    /// Quantized beat position of `time` seconds after the chart start.
    pub fn beat_at(&self, time: f64) -> f64 {
        quantize(self.raw_beat_at(time), GRID_DIVISIONS)
    }

    fn raw_beat_at(&self, time: f64) -> f64 {
        match self {
            Self::Constant(bpm) => bpm / 60.0 * time,
            Self::Map(map) => map.raw_beat_at(time),
        }
    }

    /// Checkpoints to mark on the chart; a constant tempo yields one at time 0.
    pub fn markers(&self) -> Vec<TempoCheckpoint> {
        match self {
            Self::Constant(bpm) => vec![TempoCheckpoint::new(0.0, *bpm)],
            Self::Map(map) => map.checkpoints().to_vec(),
        }
    }
}

pub(crate) fn validate_bpm(bpm: f64) -> ChartResult<()> {
    if !bpm.is_finite() || bpm <= 0.0 {
        return Err(ChartError::configuration(format!(
            "bpm must be finite and > 0 (got {bpm})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/timing/tempo.rs"]
mod tests;
