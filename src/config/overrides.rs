//! Line-oriented override lists.
//!
//! Each line reads `key :: value`. Lines starting with `;` are comments;
//! lines that do not match are skipped.

use std::collections::BTreeMap;

use crate::timing::tempo::TempoCheckpoint;

/// Marks a comment line.
pub const COMMENT_MARKER: char = ';';

/// `time :: bpm` lines, in the order written.
pub fn parse_tempo_lines(text: &str) -> Vec<TempoCheckpoint> {
    override_pairs(text)
        .filter_map(|(key, value)| Some(TempoCheckpoint::new(decimal(key)?, decimal(value)?)))
        .collect()
}

/// `measure :: beats` lines; later lines replace earlier ones.
pub fn parse_measure_lines(text: &str) -> BTreeMap<u32, f64> {
    numbered_lengths(text)
}

/// `column :: beats` lines; later lines replace earlier ones.
pub fn parse_column_lines(text: &str) -> BTreeMap<u32, f64> {
    numbered_lengths(text)
}

fn numbered_lengths(text: &str) -> BTreeMap<u32, f64> {
    override_pairs(text)
        .filter_map(|(key, value)| Some((integer(key)?, decimal(value)?)))
        .collect()
}

fn override_pairs(text: &str) -> impl Iterator<Item = (&str, &str)> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .filter_map(|line| {
            let pair = line
                .split_once("::")
                .map(|(key, value)| (key.trim(), value.trim()));
            if pair.is_none() {
                tracing::trace!(line, "skipping override line without '::'");
            }
            pair
        })
}

fn integer(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        tracing::trace!(key = s, "skipping non-numeric override key");
        return None;
    }
    s.parse()
        .inspect_err(|_| tracing::trace!(key = s, "skipping out-of-range override key"))
        .ok()
}

/// Plain unsigned decimal: `12` or `12.5`.
fn decimal(s: &str) -> Option<f64> {
    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, Some(frac)),
        None => (s, None),
    };
    let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    if !digits(whole) || frac.is_some_and(|f| !digits(f)) {
        tracing::trace!(value = s, "skipping non-numeric override value");
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
#[path = "../../tests/unit/config/overrides.rs"]
mod tests;
