//! In-memory page document.
//!
//! The board is a fixed set of regions addressed by element id. Renderers
//! replace a region's markup wholesale; navigation only toggles classes.
//! `to_html` lays the regions out into the full page that gets written to disk.

mod layout;

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use maud::Markup;

use crate::config::Variant;

pub const LOADER: &str = "loader";
pub const LANDING_PAGE: &str = "landing-page";
pub const APP_CONTAINER: &str = "app-container";

pub const ACTIVE_PLAYER: &str = "active-player-container";
pub const TOP_BUYS: &str = "top-buys-container";
pub const FIXTURES: &str = "fixtures-container";
pub const TEAMS: &str = "teams-container";
pub const PLAYER_TABLE_BODY: &str = "player-table-body";

pub const STAT_SOLD: &str = "stat-sold";
pub const STAT_UNSOLD: &str = "stat-unsold";
pub const STAT_UPCOMING: &str = "stat-upcoming";
pub const STAT_TEAMS: &str = "stat-teams";
pub const BUDGET_CANVAS: &str = "budget-chart";
pub const STATUS_CANVAS: &str = "status-chart";

pub const HIDDEN: &str = "hidden";
pub const ACTIVE: &str = "active";
pub const PAGE_CLASS: &str = "page";
pub const NAV_LINK_CLASS: &str = "nav-link";

/// Page sections reachable from the navigation bar, in display order.
pub fn page_ids(variant: Variant) -> Vec<&'static str> {
    let mut ids = vec![];
    if variant.has_dashboard() {
        ids.push("dashboard");
    }
    ids.extend(["fixtures", "teams", "players"]);
    ids
}

/// Region holding the serialised config of the chart drawn on `canvas`.
pub fn chart_config_id(canvas: &str) -> String {
    format!("{canvas}-config")
}

pub fn nav_link_id(page: &str) -> String {
    format!("nav-{page}")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Region {
    pub html: String,
    pub classes: BTreeSet<String>,
    pub href: Option<String>,
}

impl Region {
    fn with_classes(classes: &[&str]) -> Self {
        Self {
            classes: classes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub fn class_attr(&self) -> String {
        self.classes.iter().cloned().collect::<Vec<_>>().join(" ")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    variant: Variant,
    reload_secs: Option<u64>,
    regions: IndexMap<String, Region>,
}

impl Document {
    /// The full container set of the variant's layout.
    pub fn for_variant(variant: Variant) -> Self {
        let mut regions: IndexMap<String, Region> = IndexMap::new();
        regions.insert(LOADER.into(), Region::default());
        regions.insert(LANDING_PAGE.into(), Region::default());
        regions.insert(APP_CONTAINER.into(), Region::with_classes(&[HIDDEN]));

        if variant.has_dashboard() {
            regions.insert(ACTIVE_PLAYER.into(), Region::default());
        }
        regions.insert(TOP_BUYS.into(), Region::default());

        for page in page_ids(variant) {
            regions.insert(page.into(), Region::with_classes(&[PAGE_CLASS]));
            let mut link = Region::with_classes(&[NAV_LINK_CLASS]);
            link.href = Some(format!("#{page}"));
            regions.insert(nav_link_id(page), link);
        }

        if variant.has_dashboard() {
            for id in [STAT_SOLD, STAT_UNSOLD, STAT_UPCOMING, STAT_TEAMS] {
                regions.insert(id.into(), Region::default());
            }
            for canvas in [BUDGET_CANVAS, STATUS_CANVAS] {
                regions.insert(chart_config_id(canvas), Region::default());
            }
        }

        regions.insert(FIXTURES.into(), Region::default());
        regions.insert(TEAMS.into(), Region::default());
        regions.insert(PLAYER_TABLE_BODY.into(), Region::default());

        Self {
            variant,
            reload_secs: None,
            regions,
        }
    }

    /// A document with only the given containers, for hosts implementing a subset of views.
    #[cfg(test)]
    pub fn with_regions(variant: Variant, ids: &[&str]) -> Self {
        Self {
            variant,
            reload_secs: None,
            regions: ids.iter().map(|id| (id.to_string(), Region::default())).collect(),
        }
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// Emit a meta refresh so an open browser tab follows the rewritten file.
    pub fn set_reload_secs(&mut self, secs: Option<u64>) {
        self.reload_secs = secs;
    }

    pub fn reload_secs(&self) -> Option<u64> {
        self.reload_secs
    }

    pub fn has(&self, id: &str) -> bool {
        self.regions.contains_key(id)
    }

    pub fn region(&self, id: &str) -> Option<&Region> {
        self.regions.get(id)
    }

    pub fn html(&self, id: &str) -> Option<&str> {
        self.regions.get(id).map(|r| r.html.as_str())
    }

    /// Replaces the whole content of `id`. Returns false when the container is absent.
    pub fn replace(&mut self, id: &str, markup: Markup) -> bool {
        self.replace_raw(id, markup.into_string())
    }

    pub fn replace_raw(&mut self, id: &str, html: String) -> bool {
        match self.regions.get_mut(id) {
            Some(r) => {
                r.html = html;
                true
            }
            None => false,
        }
    }

    pub fn clear(&mut self, id: &str) -> bool {
        self.replace_raw(id, String::new())
    }

    pub fn add_class(&mut self, id: &str, class: &str) -> bool {
        match self.regions.get_mut(id) {
            Some(r) => {
                r.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) -> bool {
        match self.regions.get_mut(id) {
            Some(r) => {
                r.classes.remove(class);
                true
            }
            None => false,
        }
    }

    pub fn has_class(&self, id: &str, class: &str) -> bool {
        self.regions.get(id).is_some_and(|r| r.classes.contains(class))
    }

    /// Ids of every region carrying `class`, in layout order.
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.regions
            .iter()
            .filter(|(_, r)| r.classes.contains(class))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn to_html(&self) -> String {
        layout::page(self).into_string()
    }
}

/// Writes the page next to its destination and renames it into place, so a
/// reader never sees a half-written file.
pub async fn write_page(path: &Path, html: &str) -> Result<()> {
    let tmp = path.with_extension("html.tmp");
    tokio::fs::write(&tmp, html.as_bytes())
        .await
        .with_context(|| format!("write {}", tmp.display()))?;
    tokio::fs::rename(&tmp, path)
        .await
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
