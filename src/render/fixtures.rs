use indexmap::IndexMap;
use maud::{html, Markup};

use crate::page::{Document, FIXTURES};
use crate::types::{filled, Fixture};

/// Groups fixtures by tournament name. Groups keep first-seen order and each
/// group keeps input order. Keys compare exactly: "Chess" and "chess" are two groups.
pub fn group_by_tournament(fixtures: &[Fixture]) -> IndexMap<&str, Vec<&Fixture>> {
    let mut groups: IndexMap<&str, Vec<&Fixture>> = IndexMap::new();
    for f in fixtures {
        groups.entry(f.tournament.as_str()).or_default().push(f);
    }
    groups
}

pub fn render(doc: &mut Document, fixtures: &[Fixture]) -> bool {
    doc.replace(FIXTURES, markup(fixtures))
}

pub fn markup(fixtures: &[Fixture]) -> Markup {
    html! {
        @for (tournament, matches) in &group_by_tournament(fixtures) {
            div.fixture-tournament {
                h3.fixture-tournament-title { (tournament) }
                table.fixture-table {
                    thead {
                        tr {
                            th { "Match" }
                            th { "Teams / Event" }
                            th { "Time & Venue" }
                            th { "Winner" }
                        }
                    }
                    tbody {
                        @for m in matches {
                            (row(m))
                        }
                    }
                }
            }
        }
    }
}

fn row(m: &Fixture) -> Markup {
    html! {
        tr {
            td { (m.match_num) }
            @match filled(&m.team2) {
                Some(team2) => {
                    td { (m.team1) " " span.vs { "vs" } " " (team2) }
                },
                None => {
                    td.single-entrant { (m.team1) }
                },
            }
            td { (m.time_venue) }
            td.winner-col {
                @match filled(&m.winner) {
                    Some(w) => {
                        i.fas.fa-trophy {}
                        " " (w)
                    },
                    None => { "TBD" },
                }
            }
        }
    }
}
