use std::ops::Range;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::{mul_div255_u8, mul_div255_u16};
use crate::render::surface::PixelBuffer;

pub(crate) type PremulRgba8 = [u8; 4];

/// Source-over of premultiplied `src` onto `dst`, scaled by `opacity`.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u16(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255 - sa;

    let mut out = [0u8; 4];
    out[3] = (sa as u8).saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Composite rows `src_rows` of `src` onto `dst` with their top-left corner at
/// `(dst_x, dst_y)`. Anything falling outside either buffer is clipped.
pub(crate) fn blit_over(
    dst: &mut PixelBuffer,
    src: &PixelBuffer,
    src_rows: Range<i64>,
    dst_x: i64,
    dst_y: i64,
) {
    for src_y in src_rows.clone() {
        if src_y < 0 || src_y >= i64::from(src.height) {
            continue;
        }
        let y = dst_y + (src_y - src_rows.start);
        if y < 0 || y >= i64::from(dst.height) {
            continue;
        }
        for src_x in 0..i64::from(src.width) {
            let x = dst_x + src_x;
            if x < 0 || x >= i64::from(dst.width) {
                continue;
            }
            let Some(s) = src.pixel(src_x as u32, src_y as u32) else {
                continue;
            };
            if s.a == 0 {
                continue;
            }
            if let Some(d) = dst.pixel_mut(x as u32, y as u32) {
                let out = over([d[0], d[1], d[2], d[3]], s.to_array(), 1.0);
                d.copy_from_slice(&out);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Opacity at a relative offset (0 = first row, 1 = past the last row).
pub(crate) struct FadeStop {
    pub offset: f64,
    pub opacity: f64,
}

impl FadeStop {
    pub(crate) const fn new(offset: f64, opacity: f64) -> Self {
        Self { offset, opacity }
    }
}

/// Piecewise-linear opacity at `t`; clamps to the first and last stop.
pub(crate) fn fade_opacity(stops: &[FadeStop], t: f64) -> f64 {
    let (Some(first), Some(last)) = (stops.first(), stops.last()) else {
        return 0.0;
    };
    if t <= first.offset {
        return first.opacity;
    }
    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.offset {
            let span = b.offset - a.offset;
            if span <= 0.0 {
                return b.opacity;
            }
            return a.opacity + (b.opacity - a.opacity) * (t - a.offset) / span;
        }
    }
    last.opacity
}

/// Paint `color` over the band `xs` × `ys`, fading vertically along `stops`.
/// Each row is sampled at its center.
pub(crate) fn vertical_fade(
    dst: &mut PixelBuffer,
    xs: Range<i64>,
    ys: Range<i64>,
    color: Rgba8Premul,
    stops: &[FadeStop],
) {
    let height = (ys.end - ys.start) as f64;
    if height <= 0.0 {
        return;
    }
    let x0 = xs.start.max(0);
    let x1 = xs.end.min(i64::from(dst.width));
    for y in ys.clone() {
        if y < 0 || y >= i64::from(dst.height) {
            continue;
        }
        let t = ((y - ys.start) as f64 + 0.5) / height;
        let opacity = fade_opacity(stops, t) as f32;
        if opacity <= 0.0 {
            continue;
        }
        for x in x0..x1 {
            if let Some(d) = dst.pixel_mut(x as u32, y as u32) {
                let out = over([d[0], d[1], d[2], d[3]], color.to_array(), opacity);
                d.copy_from_slice(&out);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
