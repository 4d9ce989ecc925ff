//! Notion object shapes used by rollcall.
//!
//! Only the fields rollcall reads are modelled. Page properties stay as raw
//! JSON because their shape depends on the property type.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Paginated list envelope returned by every Notion list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct List<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// Body of a response whose `object` is `"error"`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub status: u16,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// A workspace member or bot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

impl User {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("(unnamed)")
    }

    pub fn is_bot(&self) -> bool {
        self.kind.as_deref() == Some("bot")
    }
}

/// A database row (events database entry or attendance sheet).
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Page {
    /// Concatenated plain text of a `title` property.
    pub fn title(&self, property: &str) -> Option<String> {
        let segments = self.properties.get(property)?.get("title")?.as_array()?;
        let text: String = segments.iter().filter_map(rich_text_content).collect();
        Some(text)
    }

    /// `start` of a `date` property, as sent by Notion (date or datetime).
    pub fn date_start(&self, property: &str) -> Option<&str> {
        self.properties
            .get(property)?
            .get("date")?
            .get("start")?
            .as_str()
    }

    /// Users listed in a `people` property.
    ///
    /// Notion truncates people arrays embedded in page objects; use the
    /// property item endpoint when the full list matters.
    pub fn people(&self, property: &str) -> Vec<User> {
        self.properties
            .get(property)
            .and_then(|p| p.get("people"))
            .and_then(|p| p.as_array())
            .map(|people| {
                people
                    .iter()
                    .filter_map(|p| serde_json::from_value(p.clone()).ok())
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn number(&self, property: &str) -> Option<i64> {
        self.properties.get(property)?.get("number")?.as_i64()
    }
}

/// A database schema: only property names and ids are needed.
#[derive(Debug, Clone, Deserialize)]
pub struct Database {
    pub id: String,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

impl Database {
    pub fn property_id(&self, name: &str) -> Option<&str> {
        self.properties.get(name)?.get("id")?.as_str()
    }
}

/// A block as returned by the block children endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub table_row: Option<TableRow>,
}

impl Block {
    pub fn is_table(&self) -> bool {
        self.kind == "table"
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<Vec<RichText>>,
}

/// A rich text segment. Outgoing segments are always plain `text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RichText {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextContent>,
    #[serde(default, skip_serializing)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextContent {
    pub content: String,
    #[serde(default)]
    pub link: Option<Value>,
}

impl RichText {
    pub fn text(content: &str) -> Self {
        RichText {
            kind: "text".to_string(),
            text: Some(TextContent {
                content: content.to_string(),
                link: None,
            }),
            plain_text: None,
        }
    }

    pub fn content(&self) -> &str {
        self.text
            .as_ref()
            .map(|t| t.content.as_str())
            .or(self.plain_text.as_deref())
            .unwrap_or("")
    }
}

fn rich_text_content(segment: &Value) -> Option<&str> {
    segment
        .get("plain_text")
        .or_else(|| segment.get("text").and_then(|t| t.get("content")))
        .and_then(|v| v.as_str())
}

/// One entry of a paginated property value (people properties only).
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyItem {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub people: Option<User>,
}

/// A block to be appended as a child of a page or table.
#[derive(Debug, Clone, Serialize)]
pub struct NewBlock {
    object: &'static str,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    table: Option<TableSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    table_row: Option<TableRow>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TableSpec {
    pub table_width: usize,
    pub has_column_header: bool,
    pub has_row_header: bool,
    pub children: Vec<NewBlock>,
}

impl NewBlock {
    /// A table whose first child row becomes the column header.
    pub fn table(header: NewBlock, table_width: usize) -> Self {
        NewBlock {
            object: "block",
            kind: "table",
            table: Some(TableSpec {
                table_width,
                has_column_header: true,
                has_row_header: true,
                children: vec![header],
            }),
            table_row: None,
        }
    }

    pub fn table_row(cells: &[&str]) -> Self {
        NewBlock {
            object: "block",
            kind: "table_row",
            table: None,
            table_row: Some(TableRow {
                cells: cells.iter().map(|c| vec![RichText::text(c)]).collect(),
            }),
        }
    }
}
