use maud::{html, Markup};

use crate::page::{Document, PLAYER_TABLE_BODY};
use crate::types::{filled, Player};

const MISSING: &str = "N/A";

pub fn render(doc: &mut Document, players: &[Player]) -> bool {
    doc.replace(PLAYER_TABLE_BODY, markup(players))
}

pub fn markup(players: &[Player]) -> Markup {
    html! {
        @for p in players {
            (row(p))
        }
    }
}

/// Badge class for a status. Lower-cased and hyphenated for styling only.
fn status_class(status: &str) -> String {
    let slug = status
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
        .to_lowercase();
    format!("status-badge status-{slug}")
}

fn row(p: &Player) -> Markup {
    let status = filled(&p.status).map(|s| s.to_string());
    html! {
        tr {
            td { (p.name) }
            td { (p.category) }
            td { (p.base_price) }
            td {
                @match status {
                    Some(s) => {
                        span class=(status_class(&s)) { (s) }
                    },
                    None => { (MISSING) },
                }
            }
            td {
                @match filled(&p.winning_price) {
                    Some(v) => { (v) },
                    None => { (MISSING) },
                }
            }
            td {
                @match filled(&p.winning_team) {
                    Some(v) => { (v) },
                    None => { (MISSING) },
                }
            }
        }
    }
}
