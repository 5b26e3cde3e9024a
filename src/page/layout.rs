use maud::{html, Markup, PreEscaped, DOCTYPE};

use super::*;

const TITLE: &str = "Game-e-Shabab Auction";

const STYLES: &str = r#"
:root { --bg: #0f1419; --card: #1a1f2e; --text: #e7e9ea; --dim: #7f8c8d; --accent: #f1c40f; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--bg); color: var(--text); }
.hidden { display: none !important; }
.page { display: none; padding: 16px; }
.page.active { display: block; }
nav { display: flex; gap: 16px; padding: 12px 16px; background: var(--card); }
.nav-link { color: var(--dim); text-decoration: none; }
.nav-link.active { color: var(--accent); }
.stat-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 12px; }
.stat-card, .top-buy-card, .team-roster-card { background: var(--card); border-radius: 8px; padding: 12px; }
.top-buy-card { display: flex; justify-content: space-between; margin-bottom: 8px; }
.fixture-table, .player-table { width: 100%; border-collapse: collapse; }
.fixture-table td, .player-table td { padding: 6px 8px; border-bottom: 1px solid #2a2f3e; }
.vs { color: var(--dim); font-weight: normal; }
.status-badge { padding: 2px 8px; border-radius: 10px; font-size: 0.8em; }
.status-sold { background: #27ae60; }
.status-unsold { background: #c0392b; }
.status-active { background: #f39c12; }
#loader { padding: 32px; text-align: center; color: var(--dim); }
"#;

const CHART_BOOT: &str = r#"
document.querySelectorAll('script[data-chart]').forEach(function (el) {
    var canvas = document.getElementById(el.dataset.chart);
    if (!canvas || !el.textContent.trim()) return;
    new Chart(canvas, JSON.parse(el.textContent));
});
"#;

fn slot(doc: &Document, id: &str) -> Markup {
    PreEscaped(doc.html(id).unwrap_or_default().to_string())
}

fn class_of(doc: &Document, id: &str) -> String {
    doc.region(id).map(Region::class_attr).unwrap_or_default()
}

fn page_label(page: &str) -> &'static str {
    match page {
        "dashboard" => "Dashboard",
        "fixtures" => "Fixtures",
        "teams" => "Teams",
        "players" => "Players",
        _ => "",
    }
}

fn stat_card(doc: &Document, id: &str, label: &str) -> Markup {
    html! {
        div.stat-card {
            div.stat-label { (label) }
            div.stat-value id=(id) { (slot(doc, id)) }
        }
    }
}

fn chart(doc: &Document, canvas: &str, title: &str) -> Markup {
    let config = chart_config_id(canvas);
    html! {
        div.chart-card {
            h3 { (title) }
            canvas id=(canvas) {}
            script type="application/json" id=(config) data-chart=(canvas) { (slot(doc, &config)) }
        }
    }
}

fn dashboard(doc: &Document) -> Markup {
    html! {
        section id="dashboard" class=(class_of(doc, "dashboard")) {
            div.stat-grid {
                (stat_card(doc, STAT_SOLD, "Players Sold"))
                (stat_card(doc, STAT_UNSOLD, "Unsold"))
                (stat_card(doc, STAT_UPCOMING, "Upcoming"))
                (stat_card(doc, STAT_TEAMS, "Teams"))
            }
            (chart(doc, BUDGET_CANVAS, "Budget Remaining"))
            (chart(doc, STATUS_CANVAS, "Player Status"))
        }
    }
}

pub(super) fn page(doc: &Document) -> Markup {
    let live = doc.variant().has_dashboard();
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                @if let Some(secs) = doc.reload_secs() {
                    meta http-equiv="refresh" content=(secs);
                }
                title { (TITLE) }
                style { (PreEscaped(STYLES)) }
                @if live {
                    script src="https://cdn.jsdelivr.net/npm/chart.js" {}
                }
            }
            body {
                div id=(LOADER) class=(class_of(doc, LOADER)) { "Loading auction data..." }

                section id=(LANDING_PAGE) class=(class_of(doc, LANDING_PAGE)) {
                    h1 { (TITLE) }
                    @if doc.has(ACTIVE_PLAYER) {
                        div id=(ACTIVE_PLAYER) { (slot(doc, ACTIVE_PLAYER)) }
                    }
                    h2 { "Top Buys" }
                    div id=(TOP_BUYS) { (slot(doc, TOP_BUYS)) }
                }

                div id=(APP_CONTAINER) class=(class_of(doc, APP_CONTAINER)) {
                    nav {
                        @for p in page_ids(doc.variant()) {
                            @let link = nav_link_id(p);
                            a id=(link) class=(class_of(doc, &link)) href={ "#" (p) } { (page_label(p)) }
                        }
                    }
                    @if live {
                        (dashboard(doc))
                    }
                    section id="fixtures" class=(class_of(doc, "fixtures")) {
                        div id=(FIXTURES) { (slot(doc, FIXTURES)) }
                    }
                    section id="teams" class=(class_of(doc, "teams")) {
                        div id=(TEAMS) { (slot(doc, TEAMS)) }
                    }
                    section id="players" class=(class_of(doc, "players")) {
                        table.player-table {
                            thead {
                                tr {
                                    th { "Name" }
                                    th { "Category" }
                                    th { "Base Price" }
                                    th { "Status" }
                                    th { "Winning Price" }
                                    th { "Winning Team" }
                                }
                            }
                            tbody id=(PLAYER_TABLE_BODY) { (slot(doc, PLAYER_TABLE_BODY)) }
                        }
                    }
                }

                @if live {
                    script { (PreEscaped(CHART_BOOT)) }
                }
            }
        }
    }
}
