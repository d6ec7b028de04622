// src/core/notion_client.rs
//! Notion database client - schema fetch, property index, page creation.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use tracing::{error, info};

use crate::error::PipelineError;

const DEFAULT_API_BASE: &str = "https://api.notion.com";
const NOTION_VERSION: &str = "2022-06-28";
const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Database schema as returned by the databases endpoint. Only the property
/// table matters here; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct DatabaseSchema {
    pub properties: HashMap<String, PropertyDescriptor>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PropertyDescriptor {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: PropertyKind,
}

/// The closed set of property types the intake pipeline can write. Anything
/// else deserializes as `Unsupported` and is skipped at payload time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyKind {
    Title,
    RichText,
    Url,
    Select,
    Status,
    #[serde(other)]
    Unsupported,
}

/// Lookup from lowercased logical field name to the remote property. Built
/// once per invocation from a live schema fetch, read-only afterward.
pub type PropertyIndex = HashMap<String, PropertySpec>;

#[derive(Debug, Clone)]
pub struct PropertySpec {
    /// Property name exactly as the database declares it.
    pub name: String,
    pub kind: PropertyKind,
}

/// Build the case-insensitive property index from a fetched schema.
pub fn build_property_index(schema: &DatabaseSchema) -> PropertyIndex {
    schema
        .properties
        .iter()
        .map(|(name, descriptor)| {
            (
                name.trim().to_lowercase(),
                PropertySpec {
                    name: name.clone(),
                    kind: descriptor.kind,
                },
            )
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct CreatedPage {
    pub id: String,
}

pub struct NotionClient {
    client: Client,
    api_base: String,
    database_id: String,
    token: String,
}

impl NotionClient {
    pub fn new(
        token: String,
        database_id: String,
        api_base: Option<String>,
    ) -> Result<Self, PipelineError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("failed to build HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            api_base: api_base.unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            database_id,
            token,
        })
    }

    /// Fetch the target database schema.
    pub async fn fetch_schema(&self) -> Result<DatabaseSchema, PipelineError> {
        let url = format!("{}/v1/databases/{}", self.api_base, self.database_id);

        info!("Fetching database schema: {}", url);

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json::<DatabaseSchema>().await.map_err(|e| {
                PipelineError::RemoteCall(format!("failed to parse database schema: {}", e))
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Schema fetch failed with status {}: {}", status, error_text);
            Err(PipelineError::RemoteCall(format!(
                "schema fetch returned {}: {}",
                status, error_text
            )))
        }
    }

    /// Create one page in the database carrying the prepared property
    /// payload. Returns the created page's identifier.
    pub async fn create_page(
        &self,
        properties: Map<String, Value>,
    ) -> Result<CreatedPage, PipelineError> {
        let url = format!("{}/v1/pages", self.api_base);
        let payload = json!({
            "parent": { "database_id": self.database_id },
            "properties": Value::Object(properties),
        });

        info!("Creating tracker page in database {}", self.database_id);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response.json::<CreatedPage>().await.map_err(|e| {
                PipelineError::RemoteCall(format!("failed to parse create-page response: {}", e))
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Page creation failed with status {}: {}", status, error_text);
            Err(PipelineError::RemoteCall(format!(
                "page creation returned {}: {}",
                status, error_text
            )))
        }
    }
}
