//! Notion API access: wire types, HTTP client and pagination.

mod client;
mod paginate;
mod types;

pub use client::NotionClient;
pub use paginate::{Listing, Pages};
pub use types::{
    ApiError, Block, Database, List, NewBlock, Page, PropertyItem, RichText, TableRow, TextContent,
    User,
};
