// src/applypack/types.rs
//! Apply-pack response contract and its validation.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::PipelineError;

/// Ceiling for the LinkedIn connect note, matching LinkedIn's own limit.
pub const CONNECT_NOTE_MAX_CHARS: usize = 250;

const SCORE_MIN: f64 = 0.0;
const SCORE_MAX: f64 = 100.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outreach {
    pub linkedin_connect_note: String,
    pub linkedin_message: String,
    pub recruiter_email: String,
    pub followup_7d: String,
    pub followup_14d: String,
}

impl Outreach {
    /// Render the outreach messages as one markdown document for the
    /// artifact directory.
    pub fn to_markdown(&self) -> String {
        format!(
            "# Outreach\n\n\
             ## LinkedIn connect note\n\n{}\n\n\
             ## LinkedIn message\n\n{}\n\n\
             ## Recruiter email\n\n{}\n\n\
             ## Follow-up (7 days)\n\n{}\n\n\
             ## Follow-up (14 days)\n\n{}\n",
            self.linkedin_connect_note,
            self.linkedin_message,
            self.recruiter_email,
            self.followup_7d,
            self.followup_14d
        )
    }
}

/// The validated output record for one application: a tailored resume plus
/// outreach content. Constructed once per invocation from the model response
/// and handed to the caller; never persisted here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyPack {
    pub tailored_latex: String,
    pub fit_score: f64,
    pub keyword_coverage: f64,
    #[serde(default)]
    pub top_keywords: Vec<String>,
    #[serde(default)]
    pub missing_keywords: Vec<String>,
    pub outreach: Outreach,
}

impl ApplyPack {
    /// Validate a pre-parsed response object. Rejects the whole response on
    /// any missing field, out-of-bound score, or oversized connect note -
    /// the caller never sees a partially valid pack.
    pub fn from_value(value: Value) -> Result<Self, PipelineError> {
        let pack: ApplyPack = serde_json::from_value(value).map_err(|e| {
            PipelineError::SchemaViolation(format!(
                "response does not match apply-pack contract: {}",
                e
            ))
        })?;
        pack.validate()?;
        Ok(pack)
    }

    /// Fallback path for raw response text expected to parse as JSON.
    pub fn from_raw(raw: &str) -> Result<Self, PipelineError> {
        let value: Value = serde_json::from_str(raw).map_err(|e| {
            PipelineError::SchemaViolation(format!("response is not valid JSON: {}", e))
        })?;
        Self::from_value(value)
    }

    fn validate(&self) -> Result<(), PipelineError> {
        check_score("fit_score", self.fit_score)?;
        check_score("keyword_coverage", self.keyword_coverage)?;

        let note_chars = self.outreach.linkedin_connect_note.chars().count();
        if note_chars > CONNECT_NOTE_MAX_CHARS {
            return Err(PipelineError::SchemaViolation(format!(
                "outreach.linkedin_connect_note is {} chars, limit is {}",
                note_chars, CONNECT_NOTE_MAX_CHARS
            )));
        }

        Ok(())
    }
}

fn check_score(name: &str, value: f64) -> Result<(), PipelineError> {
    if !value.is_finite() || !(SCORE_MIN..=SCORE_MAX).contains(&value) {
        return Err(PipelineError::SchemaViolation(format!(
            "{} must be within [{}, {}], got {}",
            name, SCORE_MIN, SCORE_MAX, value
        )));
    }
    Ok(())
}

/// Response-schema hint forwarded with the generation call, mirroring the
/// [`ApplyPack`] contract in the generateContent schema dialect.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "tailored_latex": { "type": "STRING" },
            "fit_score": { "type": "NUMBER" },
            "keyword_coverage": { "type": "NUMBER" },
            "top_keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "missing_keywords": { "type": "ARRAY", "items": { "type": "STRING" } },
            "outreach": {
                "type": "OBJECT",
                "properties": {
                    "linkedin_connect_note": { "type": "STRING" },
                    "linkedin_message": { "type": "STRING" },
                    "recruiter_email": { "type": "STRING" },
                    "followup_7d": { "type": "STRING" },
                    "followup_14d": { "type": "STRING" }
                },
                "required": [
                    "linkedin_connect_note",
                    "linkedin_message",
                    "recruiter_email",
                    "followup_7d",
                    "followup_14d"
                ]
            }
        },
        "required": [
            "tailored_latex",
            "fit_score",
            "keyword_coverage",
            "top_keywords",
            "missing_keywords",
            "outreach"
        ]
    })
}
