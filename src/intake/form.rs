// src/intake/form.rs
//! Issue-form parsing and field normalization.
//!
//! GitHub issue forms render as markdown with one `### Heading` per field:
//! ```text
//! ### Company
//! Acme
//! ### Role
//! Engineer
//! ```

use regex::Regex;
use std::collections::HashMap;

use crate::error::PipelineError;

/// Canonical fields resolved from a submitted issue form. All values are
/// trimmed and may be empty; validation of required fields happens in
/// [`NormalizedForm::require_complete`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedForm {
    pub company: String,
    pub role: String,
    pub job_url: String,
    pub job_description: String,
    pub location: String,
    pub notes: String,
}

/// Split the issue body into a map from lowercased heading to trimmed body.
///
/// A heading is a line starting with three or more hash marks followed by
/// text; the section body runs until the next heading line or the end of the
/// input. Duplicate headings keep the last occurrence.
pub fn parse_issue_form(body: &str) -> HashMap<String, String> {
    let heading = Regex::new(r"(?m)^#{3,}[ \t]+(\S.*)$").expect("heading pattern is valid");

    let mut sections = HashMap::new();
    let matches: Vec<_> = heading.captures_iter(body).collect();
    for (i, caps) in matches.iter().enumerate() {
        let whole = caps.get(0).expect("capture 0 always present");
        let key = caps[1].trim().to_lowercase();
        let start = whole.end();
        let end = matches
            .get(i + 1)
            .map_or(body.len(), |next| next.get(0).expect("capture 0 always present").start());
        let value = body[start..end].trim().to_string();
        sections.insert(key, value);
    }
    sections
}

/// Resolve the canonical fields against the section map, trying each accepted
/// heading alias in order and keeping the first non-empty value. Absent
/// fields resolve to the empty string; this never fails.
pub fn normalize_fields(sections: &HashMap<String, String>) -> NormalizedForm {
    let pick = |names: &[&str]| -> String {
        for name in names {
            if let Some(value) = sections.get(*name) {
                if !value.is_empty() {
                    return value.clone();
                }
            }
        }
        String::new()
    };

    NormalizedForm {
        company: pick(&["company"]),
        role: pick(&["role"]),
        job_url: pick(&["job url", "job_url", "job link", "job_link", "url"]),
        job_description: pick(&["job description", "job_description", "jd", "description"]),
        location: pick(&["location (optional)", "location"]),
        notes: pick(&["notes (optional)", "notes"]),
    }
}

impl NormalizedForm {
    /// Names of required fields that are still empty, in checked order.
    pub fn missing_required(&self) -> Vec<String> {
        [
            ("company", &self.company),
            ("role", &self.role),
            ("job_url", &self.job_url),
            ("job_description", &self.job_description),
        ]
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name.to_string())
        .collect()
    }

    /// Hard stop before anything is written to the tracker.
    pub fn require_complete(&self) -> Result<(), PipelineError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PipelineError::MissingFields(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_and_normalize(body: &str) -> NormalizedForm {
        normalize_fields(&parse_issue_form(body))
    }

    #[test]
    fn test_parse_issue_form() {
        let body = "### Company\nAcme\n### Role\nEngineer\n";
        let sections = parse_issue_form(body);
        assert_eq!(sections.get("company"), Some(&"Acme".to_string()));
        assert_eq!(sections.get("role"), Some(&"Engineer".to_string()));
        assert_eq!(sections.len(), 2);
    }

    #[test]
    fn test_parse_last_section_runs_to_end() {
        let body = "### Company\nAcme\n### Notes\nline one\nline two";
        let sections = parse_issue_form(body);
        assert_eq!(sections.get("notes"), Some(&"line one\nline two".to_string()));
    }

    #[test]
    fn test_parse_duplicate_heading_last_wins() {
        let body = "### Role\nFirst\n### Role\nSecond\n";
        let form = parse_and_normalize(body);
        assert_eq!(form.role, "Second");
    }

    #[test]
    fn test_parse_deeper_heading_levels() {
        let body = "#### Company\nAcme\n";
        let sections = parse_issue_form(body);
        assert_eq!(sections.get("company"), Some(&"Acme".to_string()));
    }

    #[test]
    fn test_parse_empty_body() {
        assert!(parse_issue_form("").is_empty());
    }

    #[test]
    fn test_parse_crlf_body() {
        let body = "### Company\r\nAcme\r\n### Role\r\nEngineer\r\n";
        let sections = parse_issue_form(body);
        assert_eq!(sections.get("company"), Some(&"Acme".to_string()));
        assert_eq!(sections.get("role"), Some(&"Engineer".to_string()));
    }

    #[test]
    fn test_normalize_aliases() {
        let body = "### JD\nBuild things\n### Job Link\nhttp://x\n### Location (optional)\nRemote\n";
        let form = parse_and_normalize(body);
        assert_eq!(form.job_description, "Build things");
        assert_eq!(form.job_url, "http://x");
        assert_eq!(form.location, "Remote");
    }

    #[test]
    fn test_normalize_skips_empty_alias_value() {
        // "jd" is present but empty, so the later "description" alias wins
        let body = "### JD\n\n### Description\nActual text\n";
        let form = parse_and_normalize(body);
        assert_eq!(form.job_description, "Actual text");
    }

    #[test]
    fn test_normalize_unknown_sections_dropped() {
        let body = "### Company\nAcme\n### Salary Range\n100k\n";
        let form = parse_and_normalize(body);
        assert_eq!(form.company, "Acme");
        assert_eq!(form.notes, "");
    }

    #[test]
    fn test_missing_required_reports_names_in_order() {
        let form = parse_and_normalize("");
        assert_eq!(
            form.missing_required(),
            vec!["company", "role", "job_url", "job_description"]
        );

        let form = parse_and_normalize("### Company\nAcme\n### Job URL\nhttp://x\n");
        assert_eq!(form.missing_required(), vec!["role", "job_description"]);
    }

    #[test]
    fn test_require_complete_error_lists_fields() {
        let form = parse_and_normalize("### Company\nAcme\n");
        let err = form.require_complete().unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing required fields in issue form: role, job_url, job_description"
        );
    }

    #[test]
    fn test_full_intake_form() {
        let body = "### Company\nAcme\n### Role\nEngineer\n### Job URL\nhttp://x\n### Job Description\nBuild things";
        let form = parse_and_normalize(body);
        assert_eq!(form.company, "Acme");
        assert_eq!(form.role, "Engineer");
        assert_eq!(form.job_url, "http://x");
        assert_eq!(form.job_description, "Build things");
        assert!(form.require_complete().is_ok());
    }
}
