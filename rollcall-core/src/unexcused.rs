//! Per-event audit of members with no recorded outcome.

use std::collections::{HashMap, HashSet};

use crate::error::{RollcallError, RollcallResult};
use crate::notion::{Listing, PropertyItem, User};
use crate::session::Session;
use crate::status::AttendanceStatus;

/// Members marked on one event page, per tracked outcome.
#[derive(Debug, Clone, Default)]
pub struct EventAttendance {
    pub event_id: String,
    pub marked: HashMap<AttendanceStatus, Vec<String>>,
}

impl EventAttendance {
    /// Union of every member id marked with any tracked outcome.
    pub fn tracked(&self) -> HashSet<&str> {
        self.marked
            .values()
            .flatten()
            .map(String::as_str)
            .collect()
    }
}

impl Session {
    /// Property ids of the tracked outcome columns on the events database.
    /// Fetched once per session.
    async fn status_property_ids(&mut self) -> RollcallResult<HashMap<AttendanceStatus, String>> {
        if let Some(ids) = &self.status_properties {
            return Ok(ids.clone());
        }

        let database_id = self.config.events_database_id.clone();
        let database = self.client.retrieve_database(&database_id).await?;

        let mut ids = HashMap::new();
        for status in AttendanceStatus::TRACKED {
            let id = database.property_id(status.label()).ok_or_else(|| {
                RollcallError::NotFound(format!(
                    "property '{}' on events database {database_id}",
                    status.label()
                ))
            })?;
            ids.insert(status, id.to_string());
        }

        self.status_properties = Some(ids.clone());
        Ok(ids)
    }

    /// Read the full people list of each tracked outcome on an event page.
    pub async fn event_attendance(
        &mut self,
        event_page_id: &str,
    ) -> RollcallResult<EventAttendance> {
        let property_ids = self.status_property_ids().await?;

        let mut attendance = EventAttendance {
            event_id: event_page_id.to_string(),
            marked: HashMap::new(),
        };

        for status in AttendanceStatus::TRACKED {
            let items: Vec<PropertyItem> = self
                .client
                .pages(Listing::PropertyItems {
                    page_id: event_page_id.to_string(),
                    property_id: property_ids[&status].clone(),
                })
                .collect_all()
                .await?;

            let people = items
                .into_iter()
                .filter_map(|item| item.people)
                .map(|user| user.id)
                .collect();
            attendance.marked.insert(status, people);
        }

        Ok(attendance)
    }

    /// Roster members with no tracked outcome on `event_page_id`, skipping
    /// the configured ignore-list. Returned in roster order.
    pub async fn find_unexcused(&mut self, event_page_id: &str) -> RollcallResult<Vec<User>> {
        let attendance = self.event_attendance(event_page_id).await?;
        let tracked = attendance.tracked();
        let roster = self.list_members().await?;

        Ok(roster
            .into_iter()
            .filter(|m| !self.config.is_ignored(m.display_name()))
            .filter(|m| !tracked.contains(m.id.as_str()))
            .collect())
    }
}
