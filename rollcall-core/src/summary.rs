//! Per-member attendance counters and their sheet properties.

use serde_json::{Map, Value, json};

use crate::error::{RollcallError, RollcallResult};
use crate::notion::Page;
use crate::session::Session;
use crate::status::AttendanceStatus;

/// Totals per outcome for one reconciliation call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub attended: u32,
    pub late: u32,
    pub approved_absence: u32,
    pub excused_absence: u32,
    pub unexcused_absence: u32,
}

impl Counters {
    pub fn record(&mut self, status: AttendanceStatus) {
        *self.slot(status) += 1;
    }

    pub fn get(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Attended => self.attended,
            AttendanceStatus::Late => self.late,
            AttendanceStatus::ApprovedAbsence => self.approved_absence,
            AttendanceStatus::ExcusedAbsence => self.excused_absence,
            AttendanceStatus::UnexcusedAbsence => self.unexcused_absence,
        }
    }

    fn slot(&mut self, status: AttendanceStatus) -> &mut u32 {
        match status {
            AttendanceStatus::Attended => &mut self.attended,
            AttendanceStatus::Late => &mut self.late,
            AttendanceStatus::ApprovedAbsence => &mut self.approved_absence,
            AttendanceStatus::ExcusedAbsence => &mut self.excused_absence,
            AttendanceStatus::UnexcusedAbsence => &mut self.unexcused_absence,
        }
    }

    /// Counters as currently stored on an attendance sheet. Missing values
    /// read as zero.
    pub fn from_sheet(sheet: &Page) -> Self {
        let mut counters = Counters::default();
        for status in AttendanceStatus::ALL {
            let stored = sheet.number(status.label()).unwrap_or(0);
            *counters.slot(status) = u32::try_from(stored).unwrap_or(0);
        }
        counters
    }

    pub fn total(&self) -> u32 {
        AttendanceStatus::ALL.iter().map(|s| self.get(*s)).sum()
    }

    /// Number properties for a page update, one per outcome.
    fn to_properties(self) -> Value {
        let properties: Map<String, Value> = AttendanceStatus::ALL
            .into_iter()
            .map(|s| (s.label().to_string(), json!({"number": self.get(s)})))
            .collect();
        Value::Object(properties)
    }
}

impl FromIterator<AttendanceStatus> for Counters {
    fn from_iter<I: IntoIterator<Item = AttendanceStatus>>(iter: I) -> Self {
        let mut counters = Counters::default();
        for status in iter {
            counters.record(status);
        }
        counters
    }
}

impl Session {
    /// Overwrite the five counters on a member's sheet with `counters`.
    pub async fn update_counters(
        &self,
        member_id: &str,
        counters: &Counters,
    ) -> RollcallResult<()> {
        let sheet = self.sheet(member_id).ok_or_else(|| {
            RollcallError::NotFound(format!("attendance sheet for member {member_id}"))
        })?;

        self.client
            .update_page_properties(&sheet.id, counters.to_properties())
            .await
            .map_err(|e| {
                RollcallError::Remote(format!(
                    "failed to update counters on sheet {} for member {member_id}: {e}",
                    sheet.id
                ))
            })?;

        tracing::info!(
            member_id,
            sheet_id = %sheet.id,
            total = counters.total(),
            "updated attendance counters"
        );
        Ok(())
    }
}
