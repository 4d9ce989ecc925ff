//! Scheduled events read from the events database.

use crate::error::{RollcallError, RollcallResult};
use crate::notion::Page;

pub const TITLE_PROPERTY: &str = "Name";
pub const DATE_PROPERTY: &str = "Date";

/// The fields of an event page that end up in an attendance row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: String,
    pub title: String,
    /// `YYYY-MM-DD`
    pub date: String,
}

impl Event {
    pub fn from_page(page: &Page) -> RollcallResult<Self> {
        let title = page
            .title(TITLE_PROPERTY)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| RollcallError::MalformedEvent(page.id.clone()))?;
        let start = page
            .date_start(DATE_PROPERTY)
            .ok_or_else(|| RollcallError::MalformedEvent(page.id.clone()))?;

        Ok(Event {
            id: page.id.clone(),
            title,
            date: start.chars().take(10).collect(),
        })
    }
}
