// src/core/config_manager.rs
//! Unified configuration loading for both pipelines.
//!
//! Credentials and targets come from the environment; the optional
//! `config.yaml` only carries local paths. The two pipelines load their
//! configuration independently - neither needs the other's variables set.

use serde::Deserialize;
use std::path::PathBuf;
use tracing::{info, warn};

use crate::core::gemini_client::DEFAULT_MODEL;
use crate::error::PipelineError;

#[derive(Debug, Clone)]
pub struct IntakeConfig {
    pub notion_token: String,
    pub database_id: String,
    pub event_path: PathBuf,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApplyPackConfig {
    pub api_key: String,
    pub model: String,
    pub api_base: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("out"),
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load everything the intake pipeline needs.
    pub fn load_intake() -> Result<IntakeConfig, PipelineError> {
        Ok(IntakeConfig {
            notion_token: Self::required("NOTION_API_KEY")?,
            database_id: Self::required("NOTION_DATABASE_ID")?,
            event_path: PathBuf::from(Self::required("GITHUB_EVENT_PATH")?),
            api_base: std::env::var("NOTION_API_BASE").ok(),
        })
    }

    /// Load everything the apply-pack pipeline needs.
    pub fn load_apply_pack() -> Result<ApplyPackConfig, PipelineError> {
        Ok(ApplyPackConfig {
            api_key: Self::required("GEMINI_API_KEY")?,
            model: std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            api_base: std::env::var("GEMINI_API_BASE").ok(),
        })
    }

    /// Artifact paths, from `config.yaml` when present, defaults otherwise.
    pub fn load_environment() -> EnvironmentConfig {
        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            return EnvironmentConfig::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(content) => match serde_yaml::from_str::<EnvironmentConfig>(&content) {
                Ok(config) => {
                    info!("Loaded environment configuration from config.yaml");
                    config
                }
                Err(e) => {
                    warn!("Failed to parse config.yaml ({}), using defaults", e);
                    EnvironmentConfig::default()
                }
            },
            Err(e) => {
                warn!("Failed to read config.yaml ({}), using defaults", e);
                EnvironmentConfig::default()
            }
        }
    }

    fn required(name: &str) -> Result<String, PipelineError> {
        std::env::var(name).map_err(|_| {
            PipelineError::Configuration(format!("{} environment variable not set", name))
        })
    }
}
