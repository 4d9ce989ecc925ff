//! Process-lifetime caches over the workspace.
//!
//! A `Session` owns the Notion client and four lookups: members by id,
//! events by id, attendance sheets by member and attendance tables by member.
//!
//! Load order matters. `load_events` and `load_members` must run before
//! reconciling, and `load_sheets` must run before provisioning so that
//! members who already have a sheet are not given a second one.

use std::collections::HashMap;

use crate::config::RollcallConfig;
use crate::error::RollcallResult;
use crate::notion::{Block, Listing, NotionClient, Page, User};
use crate::status::AttendanceStatus;

/// Property on an attendance sheet holding the member it belongs to.
pub const SHEET_PERSON_PROPERTY: &str = "Person";
pub const SHEET_TITLE_PROPERTY: &str = "Title";

pub struct Session {
    pub(crate) client: NotionClient,
    pub(crate) config: RollcallConfig,
    pub(crate) members: HashMap<String, User>,
    pub(crate) events: HashMap<String, Page>,
    pub(crate) sheets: HashMap<String, Page>,
    pub(crate) tables: HashMap<String, Block>,
    /// Events database property ids, fetched on first use.
    pub(crate) status_properties: Option<HashMap<AttendanceStatus, String>>,
}

impl Session {
    pub fn new(config: RollcallConfig) -> Self {
        Session {
            client: NotionClient::new(&config),
            config,
            members: HashMap::new(),
            events: HashMap::new(),
            sheets: HashMap::new(),
            tables: HashMap::new(),
            status_properties: None,
        }
    }

    pub fn config(&self) -> &RollcallConfig {
        &self.config
    }

    pub fn client(&self) -> &NotionClient {
        &self.client
    }

    /// Cache every page of the events database. Returns the number loaded.
    pub async fn load_events(&mut self) -> RollcallResult<usize> {
        let events = self.list_events().await?;
        let count = events.len();
        self.events
            .extend(events.into_iter().map(|page| (page.id.clone(), page)));
        tracing::info!(count, "loaded events");
        Ok(count)
    }

    /// Cache the workspace roster. Returns the number loaded.
    pub async fn load_members(&mut self) -> RollcallResult<usize> {
        let members = self.list_members().await?;
        let count = members.len();
        self.members
            .extend(members.into_iter().map(|user| (user.id.clone(), user)));
        tracing::info!(count, "loaded members");
        Ok(count)
    }

    /// Cache every existing attendance sheet and its table, keyed by member.
    pub async fn load_sheets(&mut self) -> RollcallResult<usize> {
        let sheets: Vec<Page> = self
            .client
            .pages(Listing::Database(self.config.attendance_database_id.clone()))
            .collect_all()
            .await?;

        let mut count = 0;
        for sheet in sheets {
            let Some(person) = sheet.people(SHEET_PERSON_PROPERTY).into_iter().next() else {
                tracing::warn!(sheet_id = %sheet.id, "attendance sheet has no person; skipping");
                continue;
            };

            match self.attendance_table_block(&sheet.id).await? {
                Some(table) => {
                    self.tables.insert(person.id.clone(), table);
                }
                None => {
                    tracing::warn!(
                        sheet_id = %sheet.id,
                        member = person.display_name(),
                        "attendance sheet has no table"
                    );
                }
            }

            tracing::info!(member = person.display_name(), "loaded attendance sheet");
            self.sheets.insert(person.id.clone(), sheet);
            count += 1;
        }

        Ok(count)
    }

    pub fn event(&self, event_id: &str) -> Option<&Page> {
        self.events.get(event_id)
    }

    pub fn events(&self) -> impl Iterator<Item = &Page> {
        self.events.values()
    }

    pub fn cached_member(&self, member_id: &str) -> Option<&User> {
        self.members.get(member_id)
    }

    pub fn members(&self) -> impl Iterator<Item = &User> {
        self.members.values()
    }

    pub fn sheet(&self, member_id: &str) -> Option<&Page> {
        self.sheets.get(member_id)
    }

    pub fn table(&self, member_id: &str) -> Option<&Block> {
        self.tables.get(member_id)
    }
}
