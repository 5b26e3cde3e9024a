use std::str::FromStr;

use crate::error::NavError;
use crate::page::{Document, ACTIVE, APP_CONTAINER, HIDDEN, LANDING_PAGE, NAV_LINK_CLASS, PAGE_CLASS};

/// Section shown when the visitor leaves the landing page.
pub const DEFAULT_PAGE: &str = "fixtures";

/// Makes `page_id` the only active page section and highlights the
/// navigation links pointing at it.
pub fn show_page(doc: &mut Document, page_id: &str) -> Result<(), NavError> {
    if !doc.has_class(page_id, PAGE_CLASS) {
        return Err(NavError::UnknownPage(page_id.to_string()));
    }

    for id in doc.ids_with_class(PAGE_CLASS) {
        doc.remove_class(&id, ACTIVE);
    }
    doc.add_class(page_id, ACTIVE);

    let target = format!("#{page_id}");
    for id in doc.ids_with_class(NAV_LINK_CLASS) {
        doc.remove_class(&id, ACTIVE);
        let points_here = doc
            .region(&id)
            .and_then(|r| r.href.as_deref())
            .is_some_and(|href| href.contains(&target));
        if points_here {
            doc.add_class(&id, ACTIVE);
        }
    }
    Ok(())
}

/// Leaves the landing page for the app and opens the default section.
pub fn enter_app(doc: &mut Document) -> Result<(), NavError> {
    doc.add_class(LANDING_PAGE, HIDDEN);
    doc.remove_class(APP_CONTAINER, HIDDEN);
    show_page(doc, DEFAULT_PAGE)
}

/// A line typed on the control stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Enter,
    Show(String),
    Refresh,
    Quit,
}

impl FromStr for Command {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let cmd = parts.next().unwrap_or_default().to_ascii_lowercase();
        let arg = parts.next();
        match (cmd.as_str(), arg) {
            ("enter", None) => Ok(Command::Enter),
            ("show", Some(page)) => Ok(Command::Show(page.trim_start_matches('#').to_string())),
            ("refresh", None) => Ok(Command::Refresh),
            ("quit" | "exit", None) => Ok(Command::Quit),
            _ => Err(NavError::UnknownCommand(s.trim().to_string())),
        }
    }
}
