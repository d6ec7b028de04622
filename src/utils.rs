// src/utils.rs
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Normalize a company or role name for file system usage
pub fn normalize_artifact_name(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Build the output file path for one generated artifact
pub fn artifact_file_path(base: &Path, company: &str, role: &str, extension: &str) -> PathBuf {
    base.join(format!(
        "{}_{}_{}.{}",
        normalize_artifact_name(company),
        normalize_artifact_name(role),
        chrono::Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    ))
}

/// Ensure directory exists
pub async fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        tokio::fs::create_dir_all(path)
            .await
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    }
    Ok(())
}

/// Read file content as string with proper error context
pub async fn read_file_content(path: &Path) -> Result<String> {
    tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))
}

/// Write file content with proper error context
pub async fn write_file_content(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        ensure_directory(parent).await?;
    }

    tokio::fs::write(path, content)
        .await
        .with_context(|| format!("Failed to write file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_artifact_name() {
        assert_eq!(normalize_artifact_name("Acme Corp"), "acme_corp");
        assert_eq!(normalize_artifact_name("back-end"), "back-end");
        assert_eq!(normalize_artifact_name("Sales @ Large"), "sales___large");
    }

    #[test]
    fn test_artifact_file_path_shape() {
        let path = artifact_file_path(Path::new("out"), "Acme", "Staff Engineer", "tex");
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("acme_staff_engineer_"));
        assert!(name.ends_with(".tex"));
        assert!(path.starts_with("out"));
    }
}
