//! Label shaping with parley over an embedded bold face.
//!
//! Labels never touch system fonts, so every host renders the same pixels.

use std::borrow::Cow;

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{ChartError, ChartResult};

/// DejaVu Sans Bold.
const LABEL_FONT: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

pub(crate) const LABEL_SIZE_PX: f32 = 14.0;

pub(crate) type LabelLayout = parley::Layout<Rgba8Premul>;

/// Parley contexts plus the rasterizer's handle on the same font bytes.
pub(crate) struct LabelEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<Rgba8Premul>,
    family: String,
    font: vello_cpu::peniko::FontData,
}

impl LabelEngine {
    pub(crate) fn new() -> ChartResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(LABEL_FONT.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| ChartError::render("label font registered no families"))?;
        let family = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ChartError::render("label font family has no name"))?
            .to_string();

        let font =
            vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(LABEL_FONT.to_vec()), 0);

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family,
            font,
        })
    }

    pub(crate) fn font(&self) -> &vello_cpu::peniko::FontData {
        &self.font
    }

    /// Single-line layout of `text`, origin at the top-left of the line box.
    pub(crate) fn layout(&mut self, text: &str, color: Rgba8Premul) -> LabelLayout {
        let family = Cow::Owned(self.family.clone());
        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(family),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(LABEL_SIZE_PX));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: LabelLayout = builder.build(text);
        layout.break_all_lines(None);
        layout
    }
}

/// Distance from the top of the layout to its first baseline.
pub(crate) fn first_baseline(layout: &LabelLayout) -> f64 {
    layout
        .lines()
        .next()
        .map_or(0.0, |line| f64::from(line.metrics().baseline))
}

/// Advance width of the whole label.
pub(crate) fn label_width(layout: &LabelLayout) -> f64 {
    f64::from(layout.width())
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
