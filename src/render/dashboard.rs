use maud::html;
use serde_json::json;

use crate::chart::{ChartBackend, ChartConfig, ChartData, ChartKind, ChartSlot, Dataset};
use crate::page::{
    Document, BUDGET_CANVAS, STATUS_CANVAS, STAT_SOLD, STAT_TEAMS, STAT_UNSOLD, STAT_UPCOMING,
};
use crate::types::{DashboardData, PlayerStats, Scalar};

const TEAM_COLORS: [&str; 8] = [
    "#3498db", "#e74c3c", "#2ecc71", "#f1c40f", "#9b59b6", "#1abc9c", "#e67e22", "#95a5a6",
];

/// Stat cards plus the budget and status charts. Owns one chart slot per
/// canvas so each redraw disposes the instance it replaces.
#[derive(Debug, Default)]
pub struct DashboardRenderer {
    budget: ChartSlot,
    status: ChartSlot,
}

impl DashboardRenderer {
    pub fn render<B: ChartBackend + ?Sized>(
        &mut self,
        doc: &mut Document,
        charts: &mut B,
        data: &DashboardData,
    ) -> bool {
        let stats = &data.player_stats;
        let cards = [
            doc.replace(STAT_SOLD, html! { (stats.sold) }),
            doc.replace(STAT_UNSOLD, html! { (stats.unsold) }),
            doc.replace(STAT_UPCOMING, html! { (stats.upcoming) }),
            doc.replace(STAT_TEAMS, html! { (data.team_budgets.len()) }),
        ];

        let budget = self.budget.replace(charts, doc, BUDGET_CANVAS, &budget_chart(data));
        let status = self.status.replace(charts, doc, STATUS_CANVAS, &status_chart(stats));

        cards.iter().any(|c| *c) || budget || status
    }

    pub fn dispose<B: ChartBackend + ?Sized>(&mut self, doc: &mut Document, charts: &mut B) {
        self.budget.dispose(charts, doc);
        self.status.dispose(charts, doc);
    }
}

fn amount(s: &Scalar) -> f64 {
    s.as_f64().unwrap_or(0.0)
}

/// Remaining budget per team, bars ordered by team name.
pub fn budget_chart(data: &DashboardData) -> ChartConfig {
    let mut teams: Vec<_> = data.team_budgets.iter().collect();
    teams.sort_by(|a, b| a.name.cmp(&b.name));

    let mut y = json!({ "beginAtZero": true });
    if let Some(max) = data.starting_budget.as_f64().filter(|m| *m > 0.0) {
        y["max"] = json!(max);
    }

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: teams.iter().map(|t| t.name.clone()).collect(),
            datasets: vec![Dataset {
                label: "Budget Remaining".into(),
                data: teams.iter().map(|t| amount(&t.remaining)).collect(),
                background_color: (0..teams.len())
                    .map(|i| TEAM_COLORS[i % TEAM_COLORS.len()].to_string())
                    .collect(),
            }],
        },
        options: json!({
            "responsive": true,
            "plugins": { "legend": { "display": false } },
            "scales": { "y": y }
        }),
    }
}

pub fn status_chart(stats: &PlayerStats) -> ChartConfig {
    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: ["Sold", "Unsold", "Active", "Upcoming"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            datasets: vec![Dataset {
                label: "Players".into(),
                data: vec![
                    amount(&stats.sold),
                    amount(&stats.unsold),
                    amount(&stats.active),
                    amount(&stats.upcoming),
                ],
                background_color: ["#27ae60", "#c0392b", "#f39c12", "#7f8c8d"]
                    .iter()
                    .map(|s| s.to_string())
                    .collect(),
            }],
        },
        options: json!({
            "responsive": true,
            "plugins": { "legend": { "position": "bottom" } }
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::InlineChartBackend;
    use crate::config::Variant;
    use crate::page::chart_config_id;
    use crate::render::fixture;

    fn data() -> DashboardData {
        fixture::snapshot().dashboard_data.unwrap()
    }

    #[test]
    fn stat_cards_show_counts() {
        let mut doc = Document::for_variant(Variant::Live);
        let mut charts = InlineChartBackend::new();
        let mut r = DashboardRenderer::default();
        assert!(r.render(&mut doc, &mut charts, &data()));

        assert_eq!(doc.html(STAT_SOLD), Some("2"));
        assert_eq!(doc.html(STAT_UNSOLD), Some("1"));
        assert_eq!(doc.html(STAT_UPCOMING), Some("6"));
        assert_eq!(doc.html(STAT_TEAMS), Some("2"));
    }

    #[test]
    fn budget_bars_sorted_by_team_name() {
        let cfg = budget_chart(&data());
        assert_eq!(cfg.data.labels, vec!["Falcons", "Hawks"]);
        assert_eq!(cfg.data.datasets[0].data, vec![550.0, 700.0]);
        assert_eq!(cfg.options["scales"]["y"]["max"], json!(1000.0));
    }

    #[test]
    fn status_doughnut_has_four_slices() {
        let cfg = status_chart(&data().player_stats);
        assert_eq!(cfg.kind, ChartKind::Doughnut);
        assert_eq!(cfg.data.datasets[0].data, vec![2.0, 1.0, 1.0, 6.0]);
    }

    #[test]
    fn rerender_replaces_charts() {
        let mut doc = Document::for_variant(Variant::Live);
        let mut charts = InlineChartBackend::new();
        let mut r = DashboardRenderer::default();
        r.render(&mut doc, &mut charts, &data());
        r.render(&mut doc, &mut charts, &data());
        assert_eq!(charts.live_count(), 2);
        assert_eq!(charts.destroyed_count(), 2);

        r.dispose(&mut doc, &mut charts);
        assert_eq!(charts.live_count(), 0);
        assert_eq!(doc.html(&chart_config_id(BUDGET_CANVAS)), Some(""));
    }

    #[test]
    fn no_budget_cap_without_starting_budget() {
        let mut d = data();
        d.starting_budget = Scalar::from("");
        let cfg = budget_chart(&d);
        assert!(cfg.options["scales"]["y"].get("max").is_none());
    }
}
