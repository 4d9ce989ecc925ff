//! Creation of per-member attendance sheets.

use serde_json::{Map, Value, json};

use crate::codec::{AttendanceRow, HEADER};
use crate::error::{RollcallError, RollcallResult};
use crate::notion::{NewBlock, Page, User};
use crate::session::{SHEET_PERSON_PROPERTY, SHEET_TITLE_PROPERTY, Session};
use crate::status::AttendanceStatus;

impl Session {
    /// Create a member's attendance sheet: a page in the attendance database
    /// with zeroed counters, holding a single five-column table whose first
    /// row is the header.
    ///
    /// Fails without touching the API if a sheet is already cached for the
    /// member. The two creation calls are not atomic: if the table cannot be
    /// added, the page is left behind without one.
    pub async fn create_attendance_sheet(&mut self, member_id: &str) -> RollcallResult<Page> {
        if self.sheets.contains_key(member_id) {
            return Err(RollcallError::AlreadyExists(format!(
                "attendance sheet for member {member_id}"
            )));
        }

        let member = self.get_member(member_id).await?;
        let name = member.display_name().to_string();

        let sheet = self
            .client
            .create_page(&sheet_payload(&self.config.attendance_database_id, &member))
            .await
            .map_err(|e| {
                RollcallError::Remote(format!(
                    "unable to create attendance page for member {member_id} ({name}): {e}"
                ))
            })?;

        let table = NewBlock::table(AttendanceRow::header_block(), HEADER.len());
        let created = self
            .client
            .append_block_children(&sheet.id, &[table])
            .await
            .map_err(|e| {
                tracing::warn!(sheet_id = %sheet.id, "attendance page created without a table");
                RollcallError::Remote(format!(
                    "could not create attendance table on sheet {}: {e}",
                    sheet.id
                ))
            })?;

        let table = created
            .into_iter()
            .find(|b| b.is_table())
            .ok_or_else(|| {
                RollcallError::Remote(format!(
                    "Notion did not return the table created on sheet {}",
                    sheet.id
                ))
            })?;

        tracing::info!(member = %name, sheet_id = %sheet.id, "created attendance sheet");

        self.tables.insert(member_id.to_string(), table);
        self.sheets.insert(member_id.to_string(), sheet.clone());
        Ok(sheet)
    }
}

fn sheet_payload(database_id: &str, member: &User) -> Value {
    let mut properties = Map::new();

    properties.insert(
        SHEET_TITLE_PROPERTY.to_string(),
        json!({
            "title": [{"text": {"content": format!("{}'s Attendance", member.display_name())}}]
        }),
    );
    properties.insert(
        SHEET_PERSON_PROPERTY.to_string(),
        json!({"people": [{"object": "user", "id": member.id}]}),
    );
    for status in AttendanceStatus::ALL {
        properties.insert(status.label().to_string(), json!({"number": 0}));
    }

    json!({
        "parent": {"database_id": database_id},
        "properties": properties,
    })
}
