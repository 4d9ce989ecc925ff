/// Notion REST API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.notion.com/v1";

/// Pinned `Notion-Version` header value.
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Notion caps `page_size` at 100 for every list endpoint.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Upper bound on pages followed by a single listing before giving up.
pub const DEFAULT_MAX_PAGES: usize = 50;
