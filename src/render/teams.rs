use maud::{html, Markup};

use crate::page::{Document, TEAMS};
use crate::types::{filled, RosterPlayer, Team};

pub fn render(doc: &mut Document, teams: &[Team]) -> bool {
    doc.replace(TEAMS, markup(teams))
}

pub fn markup(teams: &[Team]) -> Markup {
    html! {
        @for team in teams {
            div.team-roster-card {
                div.team-roster-header {
                    div.team-roster-name { (team.name) }
                    div.team-roster-stats {
                        p { "Players: " (team.players_bought_count) }
                        p { "Budget Left: " (team.budget_remaining) }
                    }
                }
                div.team-roster-body {
                    @if team.roster.is_empty() {
                        div.player-row { p { "No players were bought by this team." } }
                    } @else {
                        @for p in &team.roster {
                            (roster_row(p))
                        }
                    }
                }
            }
        }
    }
}

fn roster_row(p: &RosterPlayer) -> Markup {
    html! {
        div.player-row {
            div.player-info {
                div.player-name { (p.name) }
                div.player-category { (p.category) }
            }
            div.player-price {
                @match filled(&p.price) {
                    Some(price) => { (price) },
                    None => { "N/A" },
                }
            }
        }
    }
}
