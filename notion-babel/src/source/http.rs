//! HTTP content source backed by the public REST API.

use std::time::Duration;

use serde_json::{json, Value};
use ureq::tls::{RootCerts, TlsConfig, TlsProvider};
use ureq::Agent;
use url::Url;

use super::{wire, ContentSource, DatabaseMeta, PageMeta, Paginated};
use crate::error::FetchError;
use crate::ir::nodes::Block;

/// Maximum accepted response body (10 MB).
pub const MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Connection settings for [`NotionClient`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClientOptions {
    pub base_url: String,
    /// Value of the `Notion-Version` header.
    pub version: String,
    pub timeout: Duration,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: "https://api.notion.com/v1".to_string(),
            version: "2022-06-28".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Blocking API client.
pub struct NotionClient {
    agent: Agent,
    token: String,
    options: ClientOptions,
}

impl NotionClient {
    pub fn new(token: impl Into<String>, options: ClientOptions) -> Self {
        let tls_config = TlsConfig::builder()
            .provider(TlsProvider::NativeTls)
            .root_certs(RootCerts::PlatformVerifier)
            .build();

        let agent: Agent = Agent::config_builder()
            .tls_config(tls_config)
            .timeout_global(Some(options.timeout))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            token: token.into(),
            options,
        }
    }

    /// Build an endpoint URL below the configured base.
    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        let raw = format!("{}/{}", self.options.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|e| FetchError::Other(format!("invalid URL '{raw}': {e}")))
    }

    fn get(&self, url: Url) -> Result<Value, FetchError> {
        log::debug!("GET {url}");
        let response = self
            .agent
            .get(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", &self.options.version)
            .call()
            .map_err(|e| FetchError::Other(format!("GET {url} failed: {e}")))?;
        read_json(response)
    }

    fn post(&self, url: Url, body: &Value) -> Result<Value, FetchError> {
        log::debug!("POST {url}");
        let response = self
            .agent
            .post(url.as_str())
            .header("Authorization", &format!("Bearer {}", self.token))
            .header("Notion-Version", &self.options.version)
            .header("Content-Type", "application/json")
            .send(body.to_string())
            .map_err(|e| FetchError::Other(format!("POST {url} failed: {e}")))?;
        read_json(response)
    }
}

/// Read a response body, classifying non-success statuses.
fn read_json(mut response: ureq::http::Response<ureq::Body>) -> Result<Value, FetchError> {
    let status = response.status().as_u16();
    let text = response
        .body_mut()
        .with_config()
        .limit(MAX_RESPONSE_SIZE)
        .read_to_string()
        .map_err(|e| FetchError::Other(format!("failed to read response body: {e}")))?;

    if !(200..300).contains(&status) {
        let message = wire::error_message(&text);
        return Err(FetchError::from_status(status, message.as_deref()));
    }

    serde_json::from_str(&text)
        .map_err(|e| FetchError::Other(format!("malformed JSON response: {e}")))
}

impl ContentSource for NotionClient {
    fn list_children(
        &self,
        block_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<Block>, FetchError> {
        let mut url = self.endpoint(&format!("blocks/{block_id}/children"))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page_size", &page_size.to_string());
            if let Some(cursor) = cursor {
                query.append_pair("start_cursor", cursor);
            }
        }
        wire::parse_children_page(&self.get(url)?)
    }

    fn get_page(&self, page_id: &str) -> Result<PageMeta, FetchError> {
        let url = self.endpoint(&format!("pages/{page_id}"))?;
        wire::parse_page(&self.get(url)?)
    }

    fn get_database(&self, database_id: &str) -> Result<DatabaseMeta, FetchError> {
        let url = self.endpoint(&format!("databases/{database_id}"))?;
        wire::parse_database(&self.get(url)?)
    }

    fn query_database(
        &self,
        database_id: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<Paginated<PageMeta>, FetchError> {
        let url = self.endpoint(&format!("databases/{database_id}/query"))?;
        let mut body = json!({ "page_size": page_size });
        if let Some(cursor) = cursor {
            body["start_cursor"] = Value::String(cursor.to_string());
        }
        wire::parse_rows_page(&self.post(url, &body)?)
    }
}
