use super::*;
use crate::chart::model::ChartDocument;
use crate::config::layout::{ColorStyle, LayoutOverrides};
use crate::foundation::error::ChartError;
use crate::render::metrics::BEAT_LINE;

fn tap(t: f64, lane: u8) -> NoteEvent {
    NoteEvent::new(t, NoteKind::Tap, lane)
}

fn hold(t: f64, lane: u8) -> NoteEvent {
    NoteEvent::new(t, NoteKind::Hold, lane)
}

fn holds(connectors: &[Connector]) -> Vec<HoldBody> {
    connectors
        .iter()
        .filter_map(|c| match c {
            Connector::Hold(h) => Some(*h),
            Connector::Slide(_) => None,
        })
        .collect()
}

fn slides(connectors: &[Connector]) -> Vec<SlideConnector> {
    connectors
        .iter()
        .filter_map(|c| match c {
            Connector::Slide(s) => Some(*s),
            Connector::Hold(_) => None,
        })
        .collect()
}

#[test]
fn strip_height_follows_detected_start() {
    let doc = ChartDocument::from_events(vec![tap(0.0, 1), tap(1.0, 3), tap(2.0, 5)]).unwrap();
    let config = LayoutConfig::for_document(&doc, &LayoutOverrides::default()).unwrap();
    assert_eq!(config.start, 1.0);
    let strip = render_strip(doc.events(), &config).unwrap();
    assert_eq!(strip.total_beats, 2.0);
    assert_eq!(strip.pixels.width, 170);
    assert_eq!(strip.pixels.height, 60 + 2 * 48);
}

#[test]
fn events_before_start_give_empty_strip() {
    let config = LayoutConfig {
        start: 5.0,
        ..LayoutConfig::default()
    };
    assert_eq!(total_beats(&[tap(1.0, 1)], &config), 0.0);
    assert_eq!(total_beats(&[], &config), 0.0);
}

#[test]
fn hold_then_note_in_lane_makes_one_body() {
    let config = LayoutConfig::default();
    let notes = [hold(0.0, 3), tap(2.0, 1), tap(4.0, 3)];
    assert_eq!(
        holds(&connectors(&notes, &config)),
        vec![HoldBody {
            lane: 3,
            start_beat: 0.0,
            end_beat: 8.0
        }]
    );
}

#[test]
fn unterminated_hold_draws_nothing() {
    let config = LayoutConfig::default();
    assert!(connectors(&[hold(0.0, 2)], &config).is_empty());
    assert!(connectors(&[tap(0.0, 2), tap(1.0, 2)], &config).is_empty());
}

#[test]
fn second_hold_closes_and_third_reopens() {
    let config = LayoutConfig::default();
    let notes = [hold(0.0, 4), hold(1.0, 4), hold(2.0, 4), tap(3.0, 4)];
    let bodies = holds(&connectors(&notes, &config));
    assert_eq!(bodies.len(), 2);
    assert_eq!((bodies[0].start_beat, bodies[0].end_beat), (0.0, 2.0));
    assert_eq!((bodies[1].start_beat, bodies[1].end_beat), (4.0, 6.0));
}

#[test]
fn sentinel_lane_is_not_drawable() {
    let config = LayoutConfig::default();
    let notes = [hold(0.0, 0).with_group(3), hold(1.0, 0).with_group(3)];
    assert!(connectors(&notes, &config).is_empty());
    assert!(glyphs(&notes, &config).is_empty());
}

#[test]
fn slide_points_far_apart_are_not_connected() {
    let config = LayoutConfig::default();
    let far = [tap(0.0, 1).with_group(5), tap(50.0, 2).with_group(5)];
    assert!(slides(&connectors(&far, &config)).is_empty());

    let near = [tap(0.0, 1).with_group(5), tap(1.0, 2).with_group(5)];
    assert_eq!(
        slides(&connectors(&near, &config)),
        vec![SlideConnector {
            from_lane: 1,
            from_beat: 0.0,
            to_lane: 2,
            to_beat: 2.0
        }]
    );
}

#[test]
fn slide_point_is_replaced_even_when_skipped() {
    let config = LayoutConfig::default();
    let notes = [
        tap(0.0, 1).with_group(5),
        tap(50.0, 2).with_group(5),
        tap(51.0, 3).with_group(5),
    ];
    let found = slides(&connectors(&notes, &config));
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].from_beat, found[0].to_beat), (100.0, 102.0));
}

#[test]
fn slide_groups_are_independent() {
    let config = LayoutConfig::default();
    let notes = [
        tap(0.0, 1).with_group(1),
        tap(0.0, 5).with_group(2),
        tap(0.5, 2).with_group(1),
        tap(0.5, 4).with_group(2),
    ];
    let found = slides(&connectors(&notes, &config));
    assert_eq!(found.len(), 2);
    assert_eq!((found[0].from_lane, found[0].to_lane), (1, 2));
    assert_eq!((found[1].from_lane, found[1].to_lane), (5, 4));
}

#[test]
fn mirror_reflects_lanes_and_arrows() {
    let config = LayoutConfig {
        mirror: true,
        ..LayoutConfig::default()
    };
    let notes = [tap(0.0, 2).with_direction(Direction::Left), hold(0.5, 5)];
    let found = glyphs(&notes, &config);
    assert_eq!(found[0].lane, 4);
    assert_eq!(found[0].direction, Direction::Right);
    assert_eq!(found[1].lane, 1);
    assert!(found[1].hold);
}

#[test]
fn mirrored_render_matches_reflected_chart() {
    let notes = vec![
        hold(0.0, 1).with_direction(Direction::Left),
        tap(0.5, 2).with_group(7),
        tap(0.75, 3).with_group(7).with_direction(Direction::Right),
        tap(1.0, 1),
        tap(1.5, 5),
    ];
    let reflected: Vec<NoteEvent> = notes
        .iter()
        .map(|n| {
            let mut r = n.with_direction(n.direction().mirrored());
            r.lane = 6 - n.lane;
            r
        })
        .collect();
    let mirrored = LayoutConfig {
        mirror: true,
        ..LayoutConfig::default()
    };
    let plain = LayoutConfig::default();
    assert_eq!(
        render_strip(&notes, &mirrored).unwrap(),
        render_strip(&reflected, &plain).unwrap()
    );
}

#[test]
fn tap_glyph_and_tempo_marker_pixels() {
    let strip = render_strip(&[tap(0.0, 3)], &LayoutConfig::default()).unwrap();
    assert_eq!(strip.pixels.height, 60);
    assert_eq!(strip.row(0.0), 30.0);
    // note head centered in lane 3 on the beat-0 row
    assert_eq!(strip.pixels.pixel(85, 32), Some(Rgba8Premul::opaque(0, 0, 0)));
    // tempo guideline one row above beat 0
    assert_eq!(
        strip.pixels.pixel(40, 29),
        Some(Rgba8Premul::opaque(0xff, 0, 0))
    );
    assert_eq!(strip.pixels.pixel(40, 31).unwrap().a, 0);
}

#[test]
fn hold_body_pixels_use_long_color() {
    let notes = [hold(0.0, 1), tap(1.0, 1)];
    let strip = render_strip(&notes, &LayoutConfig::default()).unwrap();
    assert_eq!(strip.pixels.height, 156);
    assert_eq!(strip.pixels.pixel(41, 80), Some(BEAT_LINE));
    assert_eq!(strip.pixels.pixel(50, 80).unwrap().a, 0);
}

#[test]
fn style_changes_note_color() {
    let config = LayoutConfig {
        style: ColorStyle::Blue,
        ..LayoutConfig::default()
    };
    let strip = render_strip(&[tap(0.0, 3)], &config).unwrap();
    assert_eq!(
        strip.pixels.pixel(85, 33),
        Some(Rgba8Premul::opaque(0x24, 0x96, 0xf8))
    );
}

#[test]
fn overly_long_strip_is_a_render_error() {
    let err = render_strip(&[tap(10_000.0, 1)], &LayoutConfig::default()).unwrap_err();
    assert!(matches!(err, ChartError::Render(_)));
}
