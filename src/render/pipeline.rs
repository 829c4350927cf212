use crate::chart::model::ChartDocument;
use crate::config::layout::LayoutConfig;
use crate::foundation::error::ChartResult;
use crate::render::paginate::paginate;
use crate::render::strip::render_strip;
use crate::render::surface::PixelBuffer;

/// Render `doc` into a finished chart page.
///
/// Pipeline:
/// 1. [`render_strip`](crate::render_strip): all notes on one continuous strip
/// 2. [`paginate`](crate::paginate): strip cut into ruled page columns
///
/// Returns **premultiplied** RGBA8 pixels; use
/// [`PixelBuffer::save_png`](crate::PixelBuffer::save_png) to export.
#[tracing::instrument(skip(doc, config), fields(events = doc.events().len()))]
pub fn render_chart(doc: &ChartDocument, config: &LayoutConfig) -> ChartResult<PixelBuffer> {
    let strip = render_strip(doc.events(), config)?;
    paginate(&strip, config)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
