use super::*;
use crate::foundation::core::Canvas;

#[test]
fn over_opaque_source_replaces() {
    assert_eq!(over([1, 2, 3, 4], [10, 20, 30, 255], 1.0), [10, 20, 30, 255]);
}

#[test]
fn over_transparent_source_keeps_destination() {
    assert_eq!(over([1, 2, 3, 4], [0, 0, 0, 0], 1.0), [1, 2, 3, 4]);
    assert_eq!(over([1, 2, 3, 4], [9, 9, 9, 255], 0.0), [1, 2, 3, 4]);
}

#[test]
fn over_half_white_on_black() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out[3], 255);
    assert!((127..=129).contains(&out[0]));
}

#[test]
fn blit_clips_and_offsets() {
    let mut src = PixelBuffer::new(Canvas::new(2, 4));
    for y in 0..4u32 {
        let px = src.pixel_mut(0, y).unwrap();
        px.copy_from_slice(&[0, 0, (y * 10) as u8 + 10, 255]);
    }
    let mut dst = PixelBuffer::filled(Canvas::new(3, 3), Rgba8Premul::WHITE);
    blit_over(&mut dst, &src, 1..5, 1, -1);
    // source row 1 lands above the destination; row 2 lands on y = 0
    assert_eq!(dst.pixel(1, 0).unwrap().b, 30);
    assert_eq!(dst.pixel(1, 1).unwrap().b, 40);
    // transparent source column keeps white
    assert_eq!(dst.pixel(2, 0), Some(Rgba8Premul::WHITE));
    // untouched column
    assert_eq!(dst.pixel(0, 1), Some(Rgba8Premul::WHITE));
    // source row 4 does not exist
    assert_eq!(dst.pixel(1, 2), Some(Rgba8Premul::WHITE));
}

#[test]
fn fade_interpolates_between_stops() {
    let stops = [
        FadeStop::new(0.0, 1.0),
        FadeStop::new(0.4, 1.0),
        FadeStop::new(1.0, 0.0),
    ];
    assert_eq!(fade_opacity(&stops, 0.2), 1.0);
    assert!((fade_opacity(&stops, 0.7) - 0.5).abs() < 1e-9);
    assert_eq!(fade_opacity(&stops, 1.5), 0.0);
    assert_eq!(fade_opacity(&[], 0.5), 0.0);
}

#[test]
fn vertical_fade_whitens_top_rows_first() {
    let mut dst = PixelBuffer::filled(Canvas::new(2, 10), Rgba8Premul::opaque(0, 0, 0));
    let stops = [
        FadeStop::new(0.0, 1.0),
        FadeStop::new(0.4, 1.0),
        FadeStop::new(1.0, 0.0),
    ];
    vertical_fade(&mut dst, -5..50, 0..10, Rgba8Premul::WHITE, &stops);
    assert_eq!(dst.pixel(0, 0), Some(Rgba8Premul::WHITE));
    assert_eq!(dst.pixel(1, 3), Some(Rgba8Premul::WHITE));
    let low = dst.pixel(0, 9).unwrap();
    let mid = dst.pixel(0, 6).unwrap();
    assert!(low.r < mid.r);
    assert!(mid.r < 255);
}
