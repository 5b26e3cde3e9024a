use maud::{html, Markup};

use crate::page::{Document, ACTIVE_PLAYER, TOP_BUYS};
use crate::types::{ActivePlayer, LandingPageData, TopBuy};

pub fn render(doc: &mut Document, data: &LandingPageData) -> bool {
    let block = doc.replace(ACTIVE_PLAYER, on_the_block(data.active_player.as_ref()));
    let buys = doc.replace(TOP_BUYS, top_buys(&data.top_buys));
    block || buys
}

pub fn on_the_block(player: Option<&ActivePlayer>) -> Markup {
    match player {
        Some(p) => html! {
            div.on-the-block {
                div.block-label { "On the Block" }
                div.block-name { (p.name) }
                div.block-category { (p.category) }
                div.block-price { "Base Price: " (p.base_price) }
            }
        },
        None => html! {
            div.on-the-block.paused {
                p { "Auction is paused. Waiting for the next player..." }
            }
        },
    }
}

pub fn top_buys(buys: &[TopBuy]) -> Markup {
    html! {
        @if buys.is_empty() {
            p { "Auction results are being finalized." }
        } @else {
            @for (i, b) in buys.iter().enumerate() {
                div.top-buy-card {
                    div.top-buy-info {
                        div.top-buy-rank { "#" (i + 1) }
                        div.top-buy-details {
                            div.top-buy-name { (b.name) }
                            div.top-buy-category { (b.category) }
                        }
                    }
                    div.top-buy-price { (b.winning_price) }
                }
            }
        }
    }
}
