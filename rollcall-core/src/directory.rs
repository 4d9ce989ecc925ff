//! Lookups against the events database, the workspace roster and
//! attendance sheets.

use crate::error::{RollcallError, RollcallResult};
use crate::notion::{Block, Listing, Page, User};
use crate::session::Session;

impl Session {
    /// Every page of the events database.
    pub async fn list_events(&self) -> RollcallResult<Vec<Page>> {
        self.client
            .pages(Listing::Database(self.config.events_database_id.clone()))
            .collect_all()
            .await
    }

    /// At most `limit` events from a single request.
    pub async fn list_events_bounded(&self, limit: u32) -> RollcallResult<Vec<Page>> {
        let listing = Listing::Database(self.config.events_database_id.clone());
        let page = self
            .client
            .list_page::<Page>(&listing, bounded(limit), None)
            .await?;
        Ok(page.results)
    }

    /// The full workspace roster.
    pub async fn list_members(&self) -> RollcallResult<Vec<User>> {
        self.client.pages(Listing::Users).collect_all().await
    }

    /// At most `limit` members from a single request.
    pub async fn list_members_bounded(&self, limit: u32) -> RollcallResult<Vec<User>> {
        let page = self
            .client
            .list_page::<User>(&Listing::Users, bounded(limit), None)
            .await?;
        Ok(page.results)
    }

    /// Cache-first member lookup; falls back to the users endpoint and
    /// caches the answer.
    pub async fn get_member(&mut self, member_id: &str) -> RollcallResult<User> {
        if let Some(member) = self.members.get(member_id) {
            return Ok(member.clone());
        }

        tracing::warn!(member_id, "member not in roster cache, querying workspace");

        let member = self
            .client
            .retrieve_user(member_id)
            .await
            .map_err(|e| not_found(e, format!("member {member_id}")))?;

        self.members.insert(member_id.to_string(), member.clone());
        Ok(member)
    }

    /// The single table block on an attendance sheet, if it has one.
    pub async fn attendance_table_block(&self, page_id: &str) -> RollcallResult<Option<Block>> {
        let blocks: Vec<Block> = self
            .client
            .pages(Listing::BlockChildren(page_id.to_string()))
            .collect_all()
            .await
            .map_err(|e| not_found(e, format!("page {page_id}")))?;

        let mut tables = blocks.into_iter().filter(Block::is_table);
        let table = tables.next();

        if tables.next().is_some() {
            return Err(RollcallError::Conflict(format!(
                "found more than one table on attendance sheet {page_id}"
            )));
        }

        Ok(table)
    }

    /// Every row of a table block, header row included.
    pub async fn table_rows(&self, table_id: &str) -> RollcallResult<Vec<Block>> {
        self.client
            .pages(Listing::BlockChildren(table_id.to_string()))
            .collect_all()
            .await
            .map_err(|e| not_found(e, format!("table {table_id}")))
    }
}

fn bounded(limit: u32) -> u32 {
    limit.clamp(1, crate::constants::MAX_PAGE_SIZE)
}

/// Reinterpret Notion's `object_not_found` on a by-id lookup as a missing
/// resource. Every other failure passes through.
fn not_found(err: RollcallError, what: String) -> RollcallError {
    if err.is_object_not_found() {
        RollcallError::NotFound(format!("{what}: {err}"))
    } else {
        err
    }
}
