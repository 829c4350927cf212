use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Canvas, Rgba8Premul};
use crate::foundation::error::{ChartError, ChartResult};

#[derive(Clone, Debug, PartialEq, Eq)]
/// Premultiplied RGBA8 pixels, row-major, top row first.
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    /// Fully transparent buffer.
    pub fn new(canvas: Canvas) -> Self {
        Self {
            width: canvas.width,
            height: canvas.height,
            data: vec![0; canvas.byte_len()],
        }
    }

    pub fn filled(canvas: Canvas, color: Rgba8Premul) -> Self {
        let mut buffer = Self::new(canvas);
        for px in buffer.data.chunks_exact_mut(4) {
            px.copy_from_slice(&color.to_array());
        }
        buffer
    }

    pub(crate) fn from_pixmap(pixmap: &vello_cpu::Pixmap) -> Self {
        Self {
            width: u32::from(pixmap.width()),
            height: u32::from(pixmap.height()),
            data: pixmap.data_as_u8_slice().to_vec(),
        }
    }

    pub fn canvas(&self) -> Canvas {
        Canvas::new(self.width, self.height)
    }

    /// Pixel at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    pub(crate) fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        self.data.get_mut(i..i + 4)
    }

    /// Straight-alpha copy for export.
    pub fn to_rgba_image(&self) -> ChartResult<image::RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_in_place(&mut straight);
        image::RgbaImage::from_raw(self.width, self.height, straight).ok_or_else(|| {
            ChartError::render(format!(
                "pixel buffer holds {} bytes, expected {} for {}x{}",
                self.data.len(),
                self.canvas().byte_len(),
                self.width,
                self.height
            ))
        })
    }

    pub fn save_png(&self, path: impl AsRef<Path>) -> ChartResult<()> {
        let path = path.as_ref();
        let img = self.to_rgba_image()?;
        img.save_with_format(path, image::ImageFormat::Png)
            .with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}

fn unpremultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
