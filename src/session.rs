use std::path::Path;

use anyhow::Context;

use crate::chart::model::{ChartDocument, ChartInfo};
use crate::config::layout::{LayoutConfig, LayoutOverrides};
use crate::foundation::error::ChartResult;
use crate::render::pipeline::render_chart;
use crate::render::surface::PixelBuffer;

/// A loaded stage document that can be rendered repeatedly with different
/// settings.
///
/// The raw text is kept and parsed again for each render, so renders never
/// share intermediate state.
#[derive(Clone, Debug)]
pub struct ChartSession {
    source: String,
}

impl ChartSession {
    /// Keep `source` after checking that it parses.
    pub fn new(source: impl Into<String>) -> ChartResult<Self> {
        let source = source.into();
        ChartDocument::from_json_str(&source)?;
        Ok(Self { source })
    }

    pub fn open(path: impl AsRef<Path>) -> ChartResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("read stage document '{}'", path.display()))?;
        Self::new(source)
    }

    pub fn document(&self) -> ChartResult<ChartDocument> {
        ChartDocument::from_json_str(&self.source)
    }

    pub fn info(&self) -> ChartResult<ChartInfo> {
        Ok(self.document()?.info())
    }

    /// Settings for one render: document defaults with `overrides` on top.
    pub fn config(&self, overrides: &LayoutOverrides) -> ChartResult<LayoutConfig> {
        LayoutConfig::for_document(&self.document()?, overrides)
    }

    #[tracing::instrument(skip(self, overrides))]
    pub fn render(&self, overrides: &LayoutOverrides) -> ChartResult<PixelBuffer> {
        let doc = self.document()?;
        let config = LayoutConfig::for_document(&doc, overrides)?;
        render_chart(&doc, &config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
