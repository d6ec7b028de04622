// src/intake/payload.rs
//! Schema-driven property payload construction for the tracker database.

use serde_json::{json, Map, Value};
use tracing::warn;

use super::form::NormalizedForm;
use crate::core::notion_client::{PropertyIndex, PropertyKind};

/// Overall cap applied before chunking, so an absurdly long job description
/// cannot balloon the create-page request.
pub const MAX_TEXT_LEN: usize = 6000;

/// Per-run ceiling for rich-text fragments; the remote API rejects runs
/// above roughly 2000 characters.
pub const CHUNK_LEN: usize = 1900;

pub const STATUS_NEW: &str = "Not Applied";
pub const SOURCE_FORM: &str = "GitHub Form";

/// Split long text into bounded fragments for a multi-run rich-text field.
/// The input is capped at [`MAX_TEXT_LEN`] characters first; fragments are
/// consecutive with no overlap, and the last one may be shorter. Counted in
/// characters, so multi-byte input never splits inside a code point.
pub fn chunk_text(s: &str) -> Vec<String> {
    let capped: Vec<char> = s.chars().take(MAX_TEXT_LEN).collect();
    capped
        .chunks(CHUNK_LEN)
        .map(|chunk| chunk.iter().collect())
        .collect()
}

/// Desired logical fields for a tracked job, in write order. `Location` and
/// `Notes` are optional in the form and only included when non-empty.
pub fn desired_fields(form: &NormalizedForm) -> Vec<(&'static str, String)> {
    let mut desired = vec![
        ("Company", form.company.clone()),
        ("Role", form.role.clone()),
        ("Job URL", form.job_url.clone()),
        ("Job Description", form.job_description.clone()),
        ("Status", STATUS_NEW.to_string()),
        ("Source", SOURCE_FORM.to_string()),
    ];
    if !form.location.is_empty() {
        desired.push(("Location", form.location.clone()));
    }
    if !form.notes.is_empty() {
        desired.push(("Notes", form.notes.clone()));
    }
    desired
}

fn rich_text_runs(value: &str) -> Value {
    Value::Array(
        chunk_text(value)
            .into_iter()
            .map(|fragment| json!({ "text": { "content": fragment } }))
            .collect(),
    )
}

/// Render the desired fields into typed property fragments keyed by the
/// database's own property names. Dispatch follows the declared property
/// kind, so values land in the right column however it is identified
/// remotely. Fields the schema does not carry are skipped rather than
/// failing the whole create.
pub fn build_properties(
    index: &PropertyIndex,
    desired: &[(&'static str, String)],
) -> Map<String, Value> {
    let mut properties = Map::new();

    for (logical, value) in desired {
        let spec = match index.get(&logical.to_lowercase()) {
            Some(spec) => spec,
            None => {
                warn!("Property '{}' not in database schema, skipping", logical);
                continue;
            }
        };

        let fragment = match spec.kind {
            PropertyKind::Title => json!({ "title": [{ "text": { "content": value } }] }),
            PropertyKind::RichText => json!({ "rich_text": rich_text_runs(value) }),
            PropertyKind::Url => json!({ "url": value }),
            PropertyKind::Select => json!({ "select": { "name": value } }),
            PropertyKind::Status => json!({ "status": { "name": value } }),
            PropertyKind::Unsupported => {
                warn!("Property '{}' has an unsupported type, skipping", spec.name);
                continue;
            }
        };

        properties.insert(spec.name.clone(), fragment);
    }

    properties
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::notion_client::PropertySpec;
    use std::collections::HashMap;

    fn sample_index() -> PropertyIndex {
        let mut index = HashMap::new();
        for (logical, name, kind) in [
            ("company", "Company", PropertyKind::Title),
            ("role", "Role", PropertyKind::RichText),
            ("job url", "Job URL", PropertyKind::Url),
            ("job description", "Job Description", PropertyKind::RichText),
            ("status", "Status", PropertyKind::Status),
            ("source", "Source", PropertyKind::Select),
        ] {
            index.insert(
                logical.to_string(),
                PropertySpec {
                    name: name.to_string(),
                    kind,
                },
            );
        }
        index
    }

    #[test]
    fn test_chunk_empty_input() {
        assert!(chunk_text("").is_empty());
    }

    #[test]
    fn test_chunk_short_input_single_fragment() {
        let fragments = chunk_text("Build things");
        assert_eq!(fragments, vec!["Build things".to_string()]);
    }

    #[test]
    fn test_chunk_reconstructs_input() {
        let input = "x".repeat(4000);
        let fragments = chunk_text(&input);
        assert_eq!(fragments.len(), 3);
        assert_eq!(fragments[0].len(), CHUNK_LEN);
        assert_eq!(fragments[1].len(), CHUNK_LEN);
        assert_eq!(fragments[2].len(), 4000 - 2 * CHUNK_LEN);
        assert_eq!(fragments.concat(), input);
    }

    #[test]
    fn test_chunk_caps_total_length() {
        let input = "y".repeat(10_000);
        let fragments = chunk_text(&input);
        // min(10000, 6000) / 1900, rounded up
        assert_eq!(fragments.len(), 4);
        let total: usize = fragments.iter().map(|f| f.chars().count()).sum();
        assert_eq!(total, MAX_TEXT_LEN);
        assert_eq!(fragments.concat(), input[..MAX_TEXT_LEN]);
        assert!(fragments.iter().all(|f| f.chars().count() <= CHUNK_LEN));
    }

    #[test]
    fn test_chunk_counts_characters_not_bytes() {
        let input = "é".repeat(2000);
        let fragments = chunk_text(&input);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0].chars().count(), CHUNK_LEN);
        assert_eq!(fragments[1].chars().count(), 100);
    }

    #[test]
    fn test_desired_fields_optional_inclusion() {
        let mut form = NormalizedForm {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_url: "http://x".to_string(),
            job_description: "Build things".to_string(),
            ..Default::default()
        };

        let names: Vec<&str> = desired_fields(&form).iter().map(|(n, _)| *n).collect();
        assert_eq!(
            names,
            vec!["Company", "Role", "Job URL", "Job Description", "Status", "Source"]
        );

        form.location = "Remote".to_string();
        form.notes = "Referred by Sam".to_string();
        let names: Vec<&str> = desired_fields(&form).iter().map(|(n, _)| *n).collect();
        assert!(names.contains(&"Location"));
        assert!(names.contains(&"Notes"));
    }

    #[test]
    fn test_build_properties_typed_fragments() {
        let form = NormalizedForm {
            company: "Acme".to_string(),
            role: "Engineer".to_string(),
            job_url: "http://x".to_string(),
            job_description: "Build things".to_string(),
            ..Default::default()
        };

        let properties = build_properties(&sample_index(), &desired_fields(&form));

        assert_eq!(
            properties["Company"]["title"][0]["text"]["content"],
            json!("Acme")
        );
        assert_eq!(properties["Job URL"]["url"], json!("http://x"));
        assert_eq!(properties["Status"]["status"]["name"], json!(STATUS_NEW));
        assert_eq!(properties["Source"]["select"]["name"], json!(SOURCE_FORM));

        // short description stays a single rich-text run
        let runs = properties["Job Description"]["rich_text"].as_array().unwrap();
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0]["text"]["content"], json!("Build things"));
    }

    #[test]
    fn test_build_properties_skips_unknown_fields() {
        let form = NormalizedForm {
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            ..Default::default()
        };

        // index has no "location" property
        let properties = build_properties(&sample_index(), &desired_fields(&form));
        assert!(properties.contains_key("Company"));
        assert!(!properties.contains_key("Location"));
    }

    #[test]
    fn test_build_properties_chunks_long_description() {
        let form = NormalizedForm {
            company: "Acme".to_string(),
            job_description: "d".repeat(4000),
            ..Default::default()
        };

        let properties = build_properties(&sample_index(), &desired_fields(&form));
        let runs = properties["Job Description"]["rich_text"].as_array().unwrap();
        assert_eq!(runs.len(), 3);
    }
}
