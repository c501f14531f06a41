//! Click events on the history panel.
//!
//! Each history row is an entry button with a delete control nested inside
//! it. A click carries the path of elements it passes through, innermost
//! first; the controller routes it by role and stops at the first handler
//! that returns `Propagation::Stop`.

use skycast_services::HistoryEntry;

/// What an element does when clicked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementRole {
    /// Re-fetches weather for the city named by the element's text.
    HistoryEntry,
    /// Deletes the entry serialized in the element's data.
    DeleteControl,
    /// The history panel itself.
    Container,
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub role: ElementRole,
    pub text: String,
    /// Attached data; a delete control carries its entry as JSON.
    pub data: Option<String>,
}

impl Element {
    pub fn history_entry(entry: &HistoryEntry) -> Self {
        Self {
            role: ElementRole::HistoryEntry,
            text: entry.name.clone(),
            data: None,
        }
    }

    pub fn delete_control(entry: &HistoryEntry) -> Self {
        Self {
            role: ElementRole::DeleteControl,
            text: String::new(),
            data: serde_json::to_string(entry).ok(),
        }
    }

    pub fn container() -> Self {
        Self {
            role: ElementRole::Container,
            text: String::new(),
            data: None,
        }
    }
}

/// Whether outer elements still see a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Propagation {
    Continue,
    Stop,
}

/// A click and the elements it bubbles through, innermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub path: Vec<Element>,
}

/// One rendered history row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRow {
    pub entry: Element,
    pub delete: Element,
}

impl HistoryRow {
    pub fn new(entry: &HistoryEntry) -> Self {
        Self {
            entry: Element::history_entry(entry),
            delete: Element::delete_control(entry),
        }
    }

    /// Click on the city name.
    pub fn click_entry(&self) -> ClickEvent {
        ClickEvent {
            path: vec![self.entry.clone(), Element::container()],
        }
    }

    /// Click on the delete control, which sits inside the entry.
    pub fn click_delete(&self) -> ClickEvent {
        ClickEvent {
            path: vec![self.delete.clone(), self.entry.clone(), Element::container()],
        }
    }
}

/// Rows for a history list, in display order.
pub fn history_rows(entries: &[HistoryEntry]) -> Vec<HistoryRow> {
    entries.iter().map(HistoryRow::new).collect()
}

/// The entry attached to a delete control, if it carries a readable one.
pub fn attached_entry(element: &Element) -> Option<HistoryEntry> {
    let data = element.data.as_deref()?;
    match serde_json::from_str(data) {
        Ok(entry) => Some(entry),
        Err(e) => {
            tracing::warn!("Unreadable entry on delete control: {}", e);
            None
        }
    }
}
