//! HTTP client for the Notion REST API.

use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::config::RollcallConfig;
use crate::error::{RollcallError, RollcallResult};
use crate::notion::paginate::{Listing, Pages};
use crate::notion::types::{ApiError, Block, Database, List, NewBlock, Page, User};

/// Thin wrapper over `reqwest::Client` carrying the fixed Notion header set.
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    notion_version: String,
    page_size: u32,
    max_pages: usize,
}

impl NotionClient {
    pub fn new(config: &RollcallConfig) -> Self {
        NotionClient {
            http: reqwest::Client::new(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.notion_token.clone(),
            notion_version: config.notion_version.clone(),
            page_size: config.effective_page_size(),
            max_pages: config.max_pages,
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        tracing::debug!(method = method.as_str(), url = url.as_str(), "notion request");

        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header("Notion-Version", self.notion_version.as_str())
            .header(reqwest::header::CONTENT_TYPE, "application/json")
    }

    /// Send a request and decode the body, turning `object: "error"` into
    /// `RollcallError::Api`.
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> RollcallResult<T> {
        let response = request.send().await?;
        let body: Value = response.json().await?;

        if body.get("object").and_then(Value::as_str) == Some("error") {
            let err: ApiError = serde_json::from_value(body)
                .map_err(|e| RollcallError::Serialization(e.to_string()))?;
            return Err(RollcallError::Api {
                status: err.status,
                code: err.code,
                message: err.message,
            });
        }

        serde_json::from_value(body).map_err(|e| RollcallError::Serialization(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> RollcallResult<T> {
        self.send(self.request(Method::GET, path)).await
    }

    async fn get_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        page_size: u32,
        cursor: Option<&str>,
    ) -> RollcallResult<T> {
        let mut request = self
            .request(Method::GET, path)
            .query(&[("page_size", page_size.to_string())]);
        if let Some(cursor) = cursor {
            request = request.query(&[("start_cursor", cursor)]);
        }
        self.send(request).await
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RollcallResult<T> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> RollcallResult<T> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    /// Fetch a single page of any list endpoint.
    pub async fn list_page<T: DeserializeOwned>(
        &self,
        listing: &Listing,
        page_size: u32,
        cursor: Option<&str>,
    ) -> RollcallResult<List<T>> {
        match listing {
            Listing::Database(database_id) => {
                let mut body = json!({ "page_size": page_size });
                if let Some(cursor) = cursor {
                    body["start_cursor"] = json!(cursor);
                }
                self.post(&format!("databases/{database_id}/query"), &body)
                    .await
            }
            Listing::Users => self.get_paged("users", page_size, cursor).await,
            Listing::BlockChildren(block_id) => {
                self.get_paged(&format!("blocks/{block_id}/children"), page_size, cursor)
                    .await
            }
            Listing::PropertyItems {
                page_id,
                property_id,
            } => {
                self.get_paged(
                    &format!("pages/{page_id}/properties/{property_id}"),
                    page_size,
                    cursor,
                )
                .await
            }
        }
    }

    /// Lazy, restartable cursor over every page of `listing`.
    pub fn pages<T: DeserializeOwned>(&self, listing: Listing) -> Pages<'_, T> {
        Pages::new(self, listing, self.page_size, self.max_pages)
    }

    pub async fn retrieve_user(&self, user_id: &str) -> RollcallResult<User> {
        self.get(&format!("users/{user_id}")).await
    }

    pub async fn retrieve_database(&self, database_id: &str) -> RollcallResult<Database> {
        self.get(&format!("databases/{database_id}")).await
    }

    pub async fn create_page(&self, body: &Value) -> RollcallResult<Page> {
        self.post("pages", body).await
    }

    pub async fn update_page_properties(
        &self,
        page_id: &str,
        properties: Value,
    ) -> RollcallResult<Page> {
        self.patch(
            &format!("pages/{page_id}"),
            &json!({ "properties": properties }),
        )
        .await
    }

    /// Append children to a page or block; returns the created blocks.
    pub async fn append_block_children(
        &self,
        block_id: &str,
        children: &[NewBlock],
    ) -> RollcallResult<Vec<Block>> {
        let created: List<Block> = self
            .patch(
                &format!("blocks/{block_id}/children"),
                &json!({ "children": children }),
            )
            .await?;
        Ok(created.results)
    }
}
