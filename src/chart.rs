use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::page::{chart_config_id, Document};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
}

/// Chart.js-shaped chart description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub background_color: Vec<String>,
}

/// A live chart instance. Not `Clone`: each instance is disposed exactly once.
#[derive(Debug, PartialEq, Eq)]
pub struct ChartHandle {
    pub canvas: String,
    pub id: u64,
}

/// Charting capability the dashboard draws through.
pub trait ChartBackend {
    /// Draws `config` on `canvas`. `None` when the canvas is not on the page.
    fn create(&mut self, doc: &mut Document, canvas: &str, config: &ChartConfig) -> Option<ChartHandle>;

    fn destroy(&mut self, doc: &mut Document, handle: ChartHandle);
}

/// Owns at most one chart instance for a canvas.
#[derive(Debug, Default)]
pub struct ChartSlot {
    handle: Option<ChartHandle>,
}

impl ChartSlot {
    /// Destroys the current instance, if any, then installs a new one.
    pub fn replace<B: ChartBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        doc: &mut Document,
        canvas: &str,
        config: &ChartConfig,
    ) -> bool {
        self.dispose(backend, doc);
        self.handle = backend.create(doc, canvas, config);
        self.handle.is_some()
    }

    pub fn dispose<B: ChartBackend + ?Sized>(&mut self, backend: &mut B, doc: &mut Document) {
        if let Some(old) = self.handle.take() {
            backend.destroy(doc, old);
        }
    }

    #[cfg(test)]
    pub fn handle(&self) -> Option<&ChartHandle> {
        self.handle.as_ref()
    }
}

/// Embeds each chart's config as JSON next to its canvas; the page script
/// instantiates Chart.js from it on load.
#[derive(Debug, Default)]
pub struct InlineChartBackend {
    next_id: u64,
    live: HashSet<u64>,
    destroyed: u64,
}

impl InlineChartBackend {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn live_count(&self) -> usize {
        self.live.len()
    }

    #[cfg(test)]
    pub fn destroyed_count(&self) -> u64 {
        self.destroyed
    }
}

impl ChartBackend for InlineChartBackend {
    fn create(&mut self, doc: &mut Document, canvas: &str, config: &ChartConfig) -> Option<ChartHandle> {
        let json = match serde_json::to_string(config) {
            Ok(j) => j,
            Err(e) => {
                tracing::warn!(canvas, error = %e, "chart config not serialisable");
                return None;
            }
        };
        // keep the payload from closing its <script> element
        let json = json.replace("</", "<\\/");
        if !doc.replace_raw(&chart_config_id(canvas), json) {
            tracing::debug!(canvas, "no canvas on page, chart skipped");
            return None;
        }

        self.next_id += 1;
        self.live.insert(self.next_id);
        Some(ChartHandle {
            canvas: canvas.to_string(),
            id: self.next_id,
        })
    }

    fn destroy(&mut self, doc: &mut Document, handle: ChartHandle) {
        doc.clear(&chart_config_id(&handle.canvas));
        if self.live.remove(&handle.id) {
            self.destroyed += 1;
            tracing::debug!(
                canvas = %handle.canvas,
                chart = handle.id,
                destroyed = self.destroyed,
                "chart destroyed"
            );
        }
    }
}
