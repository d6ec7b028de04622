// src/intake/mod.rs
//! Intake pipeline: one submitted issue form becomes one tracker record.

pub mod event;
pub mod form;
pub mod payload;

use tracing::info;

use crate::core::config_manager::IntakeConfig;
use crate::core::notion_client::{build_property_index, NotionClient};
use crate::error::PipelineError;

pub use form::{normalize_fields, parse_issue_form, NormalizedForm};

/// Run the whole intake pipeline for one issue event and return the created
/// page id. On success the marker line consumed by the hosting workflow is
/// printed to stdout.
pub async fn run_intake(config: &IntakeConfig) -> Result<String, PipelineError> {
    let event = event::load_event(&config.event_path).await?;

    let sections = form::parse_issue_form(event.body());
    let normalized = form::normalize_fields(&sections);
    normalized.require_complete()?;

    info!(
        "Issue form accepted for {} / {}",
        normalized.company, normalized.role
    );

    let client = NotionClient::new(
        config.notion_token.clone(),
        config.database_id.clone(),
        config.api_base.clone(),
    )?;

    let schema = client.fetch_schema().await?;
    let index = build_property_index(&schema);

    let desired = payload::desired_fields(&normalized);
    let properties = payload::build_properties(&index, &desired);
    let created = client.create_page(properties).await?;

    println!("CREATED_NOTION_PAGE_ID={}", created.id);

    Ok(created.id)
}
