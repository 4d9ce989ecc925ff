//! Reconciliation of a member's event logs against their attendance table.

use std::collections::HashMap;

use crate::codec::AttendanceRow;
use crate::error::{RollcallError, RollcallResult};
use crate::event::Event;
use crate::session::Session;
use crate::status::AttendanceStatus;
use crate::summary::Counters;

/// One outcome to record for a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub event_id: String,
    pub status: AttendanceStatus,
}

impl EventLog {
    pub fn new(event_id: impl Into<String>, status: AttendanceStatus) -> Self {
        EventLog {
            event_id: event_id.into(),
            status,
        }
    }
}

/// What to do with a new row whose event already has a different row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Append the new row. The old row stays and has to be removed by hand.
    AppendNew,
    /// Drop the new row.
    KeepExisting,
}

/// Decides row conflicts during reconciliation.
pub trait ConflictResolver {
    fn resolve(
        &mut self,
        candidate: &AttendanceRow,
        existing: &AttendanceRow,
    ) -> RollcallResult<Resolution>;
}

impl<F> ConflictResolver for F
where
    F: FnMut(&AttendanceRow, &AttendanceRow) -> RollcallResult<Resolution>,
{
    fn resolve(
        &mut self,
        candidate: &AttendanceRow,
        existing: &AttendanceRow,
    ) -> RollcallResult<Resolution> {
        self(candidate, existing)
    }
}

/// Always keeps what is already in the table.
pub struct KeepExisting;

impl ConflictResolver for KeepExisting {
    fn resolve(&mut self, _: &AttendanceRow, _: &AttendanceRow) -> RollcallResult<Resolution> {
        Ok(Resolution::KeepExisting)
    }
}

/// Always appends the incoming row.
pub struct AppendNew;

impl ConflictResolver for AppendNew {
    fn resolve(&mut self, _: &AttendanceRow, _: &AttendanceRow) -> RollcallResult<Resolution> {
        Ok(Resolution::AppendNew)
    }
}

/// Result of merging candidate rows into a table.
#[derive(Debug, Default, Clone)]
pub struct AppendOutcome {
    /// Rows sent to Notion, in the order they were appended.
    pub appended: Vec<AttendanceRow>,
    /// Candidates identical to a row already in the table.
    pub already_recorded: usize,
    /// Conflicting candidates dropped in favour of the existing row.
    pub kept_existing: usize,
    /// Conflicting candidates appended next to a row already in the table.
    pub replaced: usize,
    /// Staged candidates overridden by a later candidate in the same batch.
    pub superseded: usize,
}

#[derive(Debug, Clone)]
pub struct ReconcileReport {
    pub member_id: String,
    pub member_name: String,
    pub outcome: AppendOutcome,
    pub counters: Counters,
}

impl Session {
    /// Record `logs` for a member: append any new rows to their table and
    /// overwrite their counters with totals computed from `logs` alone.
    ///
    /// Every event in `logs` must already be loaded.
    pub async fn update_attendance(
        &mut self,
        member_id: &str,
        logs: &[EventLog],
        resolver: &mut dyn ConflictResolver,
    ) -> RollcallResult<ReconcileReport> {
        let member = self.get_member(member_id).await?;
        tracing::info!(member = member.display_name(), member_id, "updating attendance");

        let mut rows = Vec::with_capacity(logs.len());
        let mut counters = Counters::default();

        for log in logs {
            let page = self
                .event(&log.event_id)
                .ok_or_else(|| RollcallError::UnknownEvent(log.event_id.clone()))?;
            let event = Event::from_page(page)?;

            rows.push(AttendanceRow::new(
                event.title,
                event.id,
                event.date,
                log.status.label(),
            ));
            counters.record(log.status);
        }

        let outcome = self.append_rows(member_id, rows, resolver).await?;
        self.update_counters(member_id, &counters).await?;

        Ok(ReconcileReport {
            member_id: member_id.to_string(),
            member_name: member.display_name().to_string(),
            outcome,
            counters,
        })
    }

    /// Merge `rows` into a member's attendance table.
    ///
    /// Existing rows are re-read first. A candidate whose event has no row is
    /// staged; one identical to the existing row is dropped; one that differs
    /// is handed to `resolver`. Staged rows are appended in date order in a
    /// single request. The member's sheet is created first if they have none.
    pub async fn append_rows(
        &mut self,
        member_id: &str,
        rows: Vec<AttendanceRow>,
        resolver: &mut dyn ConflictResolver,
    ) -> RollcallResult<AppendOutcome> {
        if self.sheet(member_id).is_none() {
            self.create_attendance_sheet(member_id).await?;
        }

        let table_id = match self.table(member_id) {
            Some(table) => table.id.clone(),
            None => {
                let sheet_id = self.sheet(member_id).map(|s| s.id.as_str()).unwrap_or_default();
                return Err(RollcallError::NotFound(format!(
                    "attendance table on sheet {sheet_id} for member {member_id}"
                )));
            }
        };

        let mut existing: HashMap<String, AttendanceRow> = HashMap::new();
        for block in self.table_rows(&table_id).await?.iter().skip(1) {
            let row = AttendanceRow::decode(block)?;
            existing.insert(row.event_id.clone(), row);
        }

        let mut outcome = AppendOutcome::default();
        let mut staged: Vec<AttendanceRow> = Vec::new();
        let mut staged_at: HashMap<String, usize> = HashMap::new();

        for candidate in rows {
            let stage = match existing.get(&candidate.event_id) {
                None => true,
                Some(current) if candidate.conflicts_with(current) => {
                    match resolver.resolve(&candidate, current)? {
                        Resolution::AppendNew => {
                            if staged_at.contains_key(&candidate.event_id) {
                                outcome.superseded += 1;
                            } else {
                                outcome.replaced += 1;
                            }
                            true
                        }
                        Resolution::KeepExisting => {
                            outcome.kept_existing += 1;
                            false
                        }
                    }
                }
                Some(_) => {
                    outcome.already_recorded += 1;
                    false
                }
            };

            if !stage {
                continue;
            }

            existing.insert(candidate.event_id.clone(), candidate.clone());
            match staged_at.get(&candidate.event_id) {
                Some(&i) => staged[i] = candidate,
                None => {
                    staged_at.insert(candidate.event_id.clone(), staged.len());
                    staged.push(candidate);
                }
            }
        }

        let mut keyed = staged
            .into_iter()
            .map(|row| Ok((row.date_key()?, row)))
            .collect::<RollcallResult<Vec<_>>>()?;
        keyed.sort_by_key(|(date, _)| *date);
        let staged: Vec<AttendanceRow> = keyed.into_iter().map(|(_, row)| row).collect();

        let Some(last) = staged.last() else {
            tracing::debug!(member_id, "no new attendance rows");
            return Ok(outcome);
        };

        let children: Vec<_> = staged.iter().map(AttendanceRow::encode).collect();
        self.client
            .append_block_children(&table_id, &children)
            .await
            .map_err(|e| {
                RollcallError::Remote(format!(
                    "failed to update table {table_id} with event {}: {e}",
                    last.event_name
                ))
            })?;

        tracing::info!(member_id, rows = staged.len(), "appended attendance rows");
        outcome.appended = staged;
        Ok(outcome)
    }
}
