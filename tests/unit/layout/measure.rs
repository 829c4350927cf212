use std::collections::BTreeMap;

use super::*;

#[test]
fn default_measures_are_four_beats() {
    let config = LayoutConfig::default();
    let measures: Vec<Measure> = MeasureWalk::new(&config, 10.0).collect();
    assert_eq!(measures.len(), 3);
    assert_eq!(
        measures.iter().map(|m| m.start_beat).collect::<Vec<_>>(),
        vec![0.0, 4.0, 8.0]
    );
    assert_eq!(measures[2].number, 3);
    assert_eq!(measures[2].end_beat(), 12.0);
}

#[test]
fn upbeat_becomes_measure_one() {
    let config = LayoutConfig {
        upbeat: 1.5,
        measure_lengths: BTreeMap::from([(1, 7.0), (3, 3.0)]),
        ..LayoutConfig::default()
    };
    let measures: Vec<Measure> = MeasureWalk::new(&config, 9.0).collect();
    let lengths: Vec<f64> = measures.iter().map(|m| m.length).collect();
    assert_eq!(lengths, vec![1.5, 4.0, 3.0, 4.0]);
    assert_eq!(measures[3].start_beat, 8.5);
}

#[test]
fn measure_one_override_applies_without_upbeat() {
    let config = LayoutConfig {
        measure_lengths: BTreeMap::from([(1, 2.0)]),
        ..LayoutConfig::default()
    };
    let first = MeasureWalk::new(&config, 1.0).next().unwrap();
    assert_eq!(first.length, 2.0);
}

#[test]
fn empty_range_yields_nothing() {
    let config = LayoutConfig {
        upbeat: 2.0,
        ..LayoutConfig::default()
    };
    assert_eq!(MeasureWalk::new(&config, 0.0).count(), 0);
}

#[test]
fn walk_restarts_when_cloned() {
    let config = LayoutConfig::default();
    let walk = MeasureWalk::new(&config, 32.0);
    let a: Vec<Measure> = walk.clone().collect();
    let b: Vec<Measure> = walk.collect();
    assert_eq!(a, b);
}
