// src/intake/event.rs
//! Workflow event payload carrying the submitted issue.

use serde::Deserialize;
use std::path::Path;

use crate::error::PipelineError;

#[derive(Debug, Deserialize)]
pub struct IssueEvent {
    #[serde(default)]
    pub issue: Option<Issue>,
}

#[derive(Debug, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub body: Option<String>,
}

impl IssueEvent {
    /// Issue body, treating an absent issue or body as empty.
    pub fn body(&self) -> &str {
        self.issue
            .as_ref()
            .and_then(|issue| issue.body.as_deref())
            .unwrap_or("")
    }
}

/// Load the event file the hosting environment points us at. A missing path
/// or unreadable file is a configuration problem, not a form problem.
pub async fn load_event(path: &Path) -> Result<IssueEvent, PipelineError> {
    if !path.exists() {
        return Err(PipelineError::Configuration(format!(
            "event file not found: {}",
            path.display()
        )));
    }

    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        PipelineError::Configuration(format!("failed to read event file {}: {}", path.display(), e))
    })?;

    serde_json::from_str(&raw).map_err(|e| {
        PipelineError::Configuration(format!(
            "failed to parse event file {}: {}",
            path.display(),
            e
        ))
    })
}
