use crate::foundation::error::{ChartError, ChartResult};

pub use kurbo::{BezPath, Point, Rect, Vec2};

/// Pixel dimensions of a render surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Canvas for a layout size in (possibly fractional) pixels, rounded up.
    pub fn from_extent(width: f64, height: f64) -> ChartResult<Self> {
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ChartError::render(format!(
                "surface extent {width}x{height} is not a finite, non-negative size"
            )));
        }
        Ok(Self {
            width: width.ceil() as u32,
            height: height.ceil() as u32,
        })
    }

    /// Both dimensions narrowed to the rasterizer's `u16` range.
    pub fn to_u16(self) -> ChartResult<(u16, u16)> {
        let w: u16 = self
            .width
            .try_into()
            .map_err(|_| ChartError::render("surface width exceeds u16"))?;
        let h: u16 = self
            .height
            .try_into()
            .map_err(|_| ChartError::render("surface height exceeds u16"))?;
        Ok((w, h))
    }

    pub fn byte_len(self) -> usize {
        (self.width as usize)
            .saturating_mul(self.height as usize)
            .saturating_mul(4)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a). Defaults to transparent black.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8Premul {
    pub const WHITE: Self = Self::opaque(0xff, 0xff, 0xff);

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
