use crate::config::layout::LayoutConfig;
use crate::layout::measure::{Measure, MeasureWalk};

#[derive(Clone, Debug, PartialEq)]
/// One page column: a run of whole measures.
pub struct Column {
    /// 0-based column index.
    pub index: usize,
    /// First beat shown in the column.
    pub start_beat: f64,
    /// Beats in the column.
    pub beats: f64,
    /// Measures that start in this column, in order.
    pub measures: Vec<Measure>,
}

impl Column {
    pub fn end_beat(&self) -> f64 {
        self.start_beat + self.beats
    }
}

/// Split the measures covering `total_beats` into columns.
///
/// A column closes before the measure that would push it past its budget
/// (`column_budget(index + 1)`); a column always holds at least one measure.
pub fn compute_columns(config: &LayoutConfig, total_beats: f64) -> Vec<Column> {
    let mut columns: Vec<Column> = Vec::new();
    let mut pending: Vec<Measure> = Vec::new();
    let mut filled = 0.0;

    for measure in MeasureWalk::new(config, total_beats) {
        let budget = config.column_budget(columns.len() as u32 + 1);
        if !pending.is_empty() && budget < filled + measure.length {
            columns.push(close_column(columns.len(), std::mem::take(&mut pending), filled));
            filled = 0.0;
        }
        filled += measure.length;
        pending.push(measure);
    }
    if !pending.is_empty() {
        columns.push(close_column(columns.len(), pending, filled));
    }

    tracing::debug!(
        columns = columns.len(),
        total_beats,
        "computed column breaks"
    );
    columns
}

fn close_column(index: usize, measures: Vec<Measure>, beats: f64) -> Column {
    Column {
        index,
        start_beat: measures.first().map_or(0.0, |m| m.start_beat),
        beats,
        measures,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/columns.rs"]
mod tests;
