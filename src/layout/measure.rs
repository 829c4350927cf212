//! The measure walk: one lazy sequence of measures shared by column break
//! computation and gridline drawing, so both always agree on where measures
//! start.

use crate::config::layout::LayoutConfig;

#[derive(Clone, Copy, Debug, PartialEq)]
/// One measure on the beat grid.
pub struct Measure {
    /// 1-based measure number; the pickup is measure 1 when an upbeat is set.
    pub number: u32,
    /// Length in beats.
    pub length: f64,
    /// Beat at which the measure starts, counted from the chart start.
    pub start_beat: f64,
}

impl Measure {
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.length
    }
}

#[derive(Clone, Debug)]
/// Iterator over the measures needed to cover `total_beats`.
///
/// Clone it (or build a new one) to restart from measure 1.
pub struct MeasureWalk<'a> {
    config: &'a LayoutConfig,
    total_beats: f64,
    next_number: u32,
    cursor: f64,
}

impl<'a> MeasureWalk<'a> {
    pub fn new(config: &'a LayoutConfig, total_beats: f64) -> Self {
        Self {
            config,
            total_beats,
            next_number: 1,
            cursor: 0.0,
        }
    }

    fn length_of(&self, number: u32) -> f64 {
        if number == 1 && self.config.upbeat != 0.0 {
            self.config.upbeat
        } else {
            self.config.measure_length(number)
        }
    }
}

impl Iterator for MeasureWalk<'_> {
    type Item = Measure;

    fn next(&mut self) -> Option<Measure> {
        if self.cursor >= self.total_beats {
            return None;
        }
        let measure = Measure {
            number: self.next_number,
            length: self.length_of(self.next_number),
            start_beat: self.cursor,
        };
        self.cursor += measure.length;
        self.next_number += 1;
        Some(measure)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/measure.rs"]
mod tests;
