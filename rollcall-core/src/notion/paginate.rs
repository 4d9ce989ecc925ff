//! Cursor-following over Notion list endpoints.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;

use crate::error::{RollcallError, RollcallResult};
use crate::notion::client::NotionClient;
use crate::notion::types::List;

/// Which list endpoint a `Pages` cursor walks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Listing {
    Database(String),
    Users,
    BlockChildren(String),
    PropertyItems { page_id: String, property_id: String },
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Listing::Database(id) => write!(f, "database {id}"),
            Listing::Users => write!(f, "workspace users"),
            Listing::BlockChildren(id) => write!(f, "children of block {id}"),
            Listing::PropertyItems {
                page_id,
                property_id,
            } => write!(f, "property {property_id} of page {page_id}"),
        }
    }
}

/// Lazy sequence of result pages.
///
/// Nothing is fetched until `next_page` is called. The cursor refuses to go
/// past `max_pages` pages and stops with an error if Notion reports more
/// results without handing out a new cursor.
pub struct Pages<'c, T> {
    client: &'c NotionClient,
    listing: Listing,
    page_size: u32,
    max_pages: usize,
    cursor: Option<String>,
    fetched: usize,
    done: bool,
    _item: PhantomData<T>,
}

impl<'c, T: DeserializeOwned> Pages<'c, T> {
    pub fn new(
        client: &'c NotionClient,
        listing: Listing,
        page_size: u32,
        max_pages: usize,
    ) -> Self {
        Pages {
            client,
            listing,
            page_size,
            max_pages,
            cursor: None,
            fetched: 0,
            done: false,
            _item: PhantomData,
        }
    }

    pub fn pages_fetched(&self) -> usize {
        self.fetched
    }

    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> RollcallResult<Option<Vec<T>>> {
        if self.done {
            return Ok(None);
        }

        if self.fetched >= self.max_pages {
            return Err(RollcallError::PageLimit(self.fetched));
        }

        let page: List<T> = self
            .client
            .list_page(&self.listing, self.page_size, self.cursor.as_deref())
            .await?;
        self.fetched += 1;

        tracing::debug!(
            listing = %self.listing,
            page = self.fetched,
            results = page.results.len(),
            has_more = page.has_more,
            "fetched page"
        );

        self.advance(page.has_more, page.next_cursor)?;

        Ok(Some(page.results))
    }

    fn advance(&mut self, has_more: bool, next_cursor: Option<String>) -> RollcallResult<()> {
        if !has_more {
            self.done = true;
            return Ok(());
        }

        match next_cursor {
            Some(next) if self.cursor.as_deref() != Some(next.as_str()) => {
                self.cursor = Some(next);
                Ok(())
            }
            _ => {
                self.done = true;
                Err(RollcallError::Remote(format!(
                    "{} reported more results without a new cursor",
                    self.listing
                )))
            }
        }
    }

    /// Rewind to the first page.
    pub fn restart(&mut self) {
        self.cursor = None;
        self.fetched = 0;
        self.done = false;
    }

    /// Drain every remaining page into one vector.
    pub async fn collect_all(mut self) -> RollcallResult<Vec<T>> {
        let mut results = Vec::new();
        while let Some(page) = self.next_page().await? {
            results.extend(page);
        }
        Ok(results)
    }
}
