//! Conversion between attendance rows and Notion table-row blocks.

use chrono::NaiveDate;

use crate::error::{RollcallError, RollcallResult};
use crate::notion::{Block, NewBlock};

/// Column labels of an attendance table, in order.
pub const HEADER: [&str; 5] = ["Event Name", "Event ID", "Date", "Attendance Status", "Comments"];

/// Only the `YYYY-MM-DD` prefix of a date cell is significant.
const DATE_PREFIX_LEN: usize = 10;

/// One body row of a member's attendance table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttendanceRow {
    pub event_name: String,
    pub event_id: String,
    pub date: String,
    pub status: String,
    pub comments: String,
}

impl AttendanceRow {
    pub fn new(
        event_name: impl Into<String>,
        event_id: impl Into<String>,
        date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        AttendanceRow {
            event_name: event_name.into(),
            event_id: event_id.into(),
            date: date.into(),
            status: status.into(),
            comments: String::new(),
        }
    }

    pub fn with_comments(mut self, comments: impl Into<String>) -> Self {
        self.comments = comments.into();
        self
    }

    /// The fixed header row every attendance table starts with.
    pub fn header_block() -> NewBlock {
        NewBlock::table_row(&HEADER)
    }

    pub fn encode(&self) -> NewBlock {
        NewBlock::table_row(&[
            self.event_name.as_str(),
            self.event_id.as_str(),
            self.date.as_str(),
            self.status.as_str(),
            self.comments.as_str(),
        ])
    }

    /// Read a row back from a `table_row` block. Empty or missing cells
    /// decode as empty strings.
    pub fn decode(block: &Block) -> RollcallResult<Self> {
        let row = block.table_row.as_ref().ok_or_else(|| {
            RollcallError::MalformedRow(format!("{} (block type '{}')", block.id, block.kind))
        })?;

        let cell = |i: usize| -> String {
            row.cells
                .get(i)
                .map(|segments| segments.iter().map(|s| s.content()).collect())
                .unwrap_or_default()
        };

        Ok(AttendanceRow {
            event_name: cell(0),
            event_id: cell(1),
            date: cell(2),
            status: cell(3),
            comments: cell(4),
        })
    }

    /// True unless `other` records exactly the same attendance.
    ///
    /// Rows for different events always count as conflicting; for the same
    /// event, name, date (day precision) and status must all match. Comments
    /// are ignored.
    pub fn conflicts_with(&self, other: &AttendanceRow) -> bool {
        self.event_id != other.event_id
            || self.event_name != other.event_name
            || self.day() != other.day()
            || self.status != other.status
    }

    fn day(&self) -> &str {
        match self.date.char_indices().nth(DATE_PREFIX_LEN) {
            Some((end, _)) => &self.date[..end],
            None => &self.date,
        }
    }

    /// Calendar date used to order rows before appending.
    pub fn date_key(&self) -> RollcallResult<NaiveDate> {
        NaiveDate::parse_from_str(self.day(), "%Y-%m-%d").map_err(|_| RollcallError::InvalidDate {
            event_id: self.event_id.clone(),
            date: self.date.clone(),
        })
    }
}
