//! View renderers.
//!
//! Each renderer maps one slice of the snapshot to markup and replaces its
//! container wholesale. A container missing from the page is skipped, so the
//! same set runs against layouts that implement only some of the views.

pub mod dashboard;
pub mod fixtures;
pub mod landing;
pub mod players;
pub mod teams;

use crate::chart::{ChartBackend, InlineChartBackend};
use crate::error::FetchError;
use crate::page::{Document, HIDDEN, LOADER};
use crate::types::Snapshot;

use dashboard::DashboardRenderer;

/// Which views one application of a snapshot touched.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RenderReport {
    pub rendered: Vec<&'static str>,
    pub skipped: Vec<&'static str>,
}

impl RenderReport {
    fn record(&mut self, view: &'static str, done: bool) {
        if done {
            self.rendered.push(view);
        } else {
            tracing::debug!(view, "container absent, view skipped");
            self.skipped.push(view);
        }
    }
}

/// The page document plus the renderer state that outlives a single cycle.
pub struct Board<B: ChartBackend = InlineChartBackend> {
    doc: Document,
    dashboard: DashboardRenderer,
    charts: B,
}

impl Board<InlineChartBackend> {
    pub fn new(doc: Document) -> Self {
        Self::with_backend(doc, InlineChartBackend::new())
    }
}

impl<B: ChartBackend> Board<B> {
    pub fn with_backend(doc: Document, charts: B) -> Self {
        Self {
            doc,
            dashboard: DashboardRenderer::default(),
            charts,
        }
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    #[cfg(test)]
    pub fn charts(&self) -> &B {
        &self.charts
    }

    /// Runs every renderer against `snap` in a fixed order, then hides the
    /// loader. A snapshot flagged with an error touches nothing.
    pub fn apply(&mut self, snap: &Snapshot) -> Result<RenderReport, FetchError> {
        if let Some(msg) = snap.error_message() {
            return Err(FetchError::Application(msg));
        }

        let mut report = RenderReport::default();
        let doc = &mut self.doc;

        report.record("landing", landing::render(doc, &snap.landing_page_data));
        if let Some(d) = &snap.dashboard_data {
            report.record("dashboard", self.dashboard.render(doc, &mut self.charts, d));
        }
        report.record("fixtures", fixtures::render(doc, &snap.fixtures_data));
        report.record("teams", teams::render(doc, &snap.teams_data));
        report.record("players", players::render(doc, &snap.players_data));

        doc.add_class(LOADER, HIDDEN);
        Ok(report)
    }

    /// Disposes the chart instances held by the dashboard.
    pub fn teardown(&mut self) {
        self.dashboard.dispose(&mut self.doc, &mut self.charts);
    }
}

/// Visible text of a markup fragment, whitespace collapsed.
#[cfg(test)]
pub(crate) fn text(html: &str) -> String {
    let mut out = String::new();
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                out.push(' ');
            }
            '>' => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
