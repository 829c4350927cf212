use super::*;
use crate::chart::model::{NoteEvent, NoteKind};

fn doc() -> ChartDocument {
    ChartDocument::from_events(vec![
        NoteEvent::new(0.0, NoteKind::Meta, 0).with_status(345),
        NoteEvent::new(1.25, NoteKind::Tap, 2),
        NoteEvent::new(3.0, NoteKind::Tap, 4),
    ])
    .unwrap()
}

#[test]
fn defaults_come_from_document() {
    let config = LayoutConfig::for_document(&doc(), &LayoutOverrides::default()).unwrap();
    assert_eq!(config.start, 1.25);
    assert_eq!(config.info.max_combo, Some(345));
    assert_eq!(config.tempo, TempoModel::Constant(DEFAULT_BPM));
    assert_eq!(config.beats_per_column, DEFAULT_BEATS_PER_COLUMN);
    assert_eq!(config.style, ColorStyle::Black);
    assert!(!config.mirror);
}

#[test]
fn overrides_replace_defaults() {
    let overrides = LayoutOverrides {
        start: Some(0.5),
        base_bpm: Some(150.0),
        upbeat: Some(2.0),
        style: Some(ColorStyle::Pink),
        mirror: Some(true),
        ..LayoutOverrides::default()
    };
    let config = LayoutConfig::for_document(&doc(), &overrides).unwrap();
    assert_eq!(config.start, 0.5);
    assert_eq!(config.tempo, TempoModel::Constant(150.0));
    assert_eq!(config.upbeat, 2.0);
    assert_eq!(config.style, ColorStyle::Pink);
    assert!(config.mirror);
    assert_eq!(config.info.max_combo, Some(345));
}

#[test]
fn tempo_list_builds_map_and_empty_list_falls_back_to_constant() {
    let with_map = LayoutOverrides {
        tempo: Some(vec![
            TempoCheckpoint::new(0.0, 120.0),
            TempoCheckpoint::new(4.0, 180.0),
        ]),
        ..LayoutOverrides::default()
    };
    let config = LayoutConfig::for_document(&doc(), &with_map).unwrap();
    assert!(matches!(config.tempo, TempoModel::Map(_)));
    assert_eq!(config.tempo_markers().len(), 2);

    let empty = LayoutOverrides {
        tempo: Some(vec![]),
        base_bpm: Some(90.0),
        ..LayoutOverrides::default()
    };
    let config = LayoutConfig::for_document(&doc(), &empty).unwrap();
    assert_eq!(config.tempo, TempoModel::Constant(90.0));
}

#[test]
fn measure_and_column_lookups_fall_back() {
    let overrides = LayoutOverrides {
        measures: Some(BTreeMap::from([(3, 3.0)])),
        columns: Some(BTreeMap::from([(2, 8.0)])),
        beats_per_column: Some(12.0),
        ..LayoutOverrides::default()
    };
    let config = LayoutConfig::for_document(&doc(), &overrides).unwrap();
    assert_eq!(config.measure_length(1), 4.0);
    assert_eq!(config.measure_length(3), 3.0);
    assert_eq!(config.column_budget(1), 12.0);
    assert_eq!(config.column_budget(2), 8.0);
}

#[test]
fn invalid_values_are_configuration_errors() {
    let cases = [
        LayoutOverrides {
            beats_per_column: Some(0.0),
            ..LayoutOverrides::default()
        },
        LayoutOverrides {
            upbeat: Some(-1.0),
            ..LayoutOverrides::default()
        },
        LayoutOverrides {
            measures: Some(BTreeMap::from([(2, 0.0)])),
            ..LayoutOverrides::default()
        },
        LayoutOverrides {
            columns: Some(BTreeMap::from([(0, 8.0)])),
            ..LayoutOverrides::default()
        },
        LayoutOverrides {
            base_bpm: Some(-10.0),
            ..LayoutOverrides::default()
        },
        LayoutOverrides {
            tempo: Some(vec![
                TempoCheckpoint::new(3.0, 120.0),
                TempoCheckpoint::new(1.0, 120.0),
            ]),
            ..LayoutOverrides::default()
        },
    ];
    for overrides in cases {
        let err = LayoutConfig::for_document(&doc(), &overrides).unwrap_err();
        assert!(
            matches!(err, ChartError::Configuration(_)),
            "{overrides:?} gave {err}"
        );
    }
}

#[test]
fn overrides_parse_from_json() {
    let overrides = LayoutOverrides::from_json_str(
        r#"{
            "tempo": [{"time": 0, "bpm": 200}],
            "measures": {"5": 2},
            "columns": {"1": 20},
            "style": "orange",
            "mirror": true
        }"#,
    )
    .unwrap();
    assert_eq!(overrides.style, Some(ColorStyle::Orange));
    assert_eq!(overrides.measures, Some(BTreeMap::from([(5, 2.0)])));
    assert_eq!(overrides.columns, Some(BTreeMap::from([(1, 20.0)])));
    assert_eq!(overrides.mirror, Some(true));
    assert_eq!(overrides.start, None);

    let err = LayoutOverrides::from_json_str(r#"{"colour": "pink"}"#).unwrap_err();
    assert!(matches!(err, ChartError::Serde(_)));
}

#[test]
fn merged_prefers_later_layer() {
    let base = LayoutOverrides {
        upbeat: Some(1.0),
        style: Some(ColorStyle::Blue),
        ..LayoutOverrides::default()
    };
    let top = LayoutOverrides {
        style: Some(ColorStyle::Pink),
        ..LayoutOverrides::default()
    };
    let merged = base.merged(top);
    assert_eq!(merged.upbeat, Some(1.0));
    assert_eq!(merged.style, Some(ColorStyle::Pink));
}

#[test]
fn color_style_parses_case_insensitively() {
    assert_eq!("Blue".parse::<ColorStyle>().unwrap(), ColorStyle::Blue);
    assert!("green".parse::<ColorStyle>().is_err());
}
