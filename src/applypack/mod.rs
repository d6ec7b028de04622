// src/applypack/mod.rs
//! Apply-pack pipeline: a tailored resume plus outreach messages generated
//! from a master LaTeX template and one job description.

pub mod prompt;
pub mod types;

use regex::Regex;
use tracing::{info, warn};

use crate::core::gemini_client::GeminiClient;
use crate::error::PipelineError;

pub use prompt::{compose_prompt, PromptInputs};
pub use types::{ApplyPack, Outreach};

/// Run the full apply-pack generation for one job. Fails before any network
/// call when the job description is empty; fails after the call when the
/// response does not satisfy the [`ApplyPack`] contract.
pub async fn generate_apply_pack(
    client: &GeminiClient,
    master_latex: &str,
    job_description: &str,
    company: &str,
    role: &str,
    url: &str,
) -> Result<ApplyPack, PipelineError> {
    let prompt = compose_prompt(&PromptInputs {
        company,
        role,
        url,
        job_description,
        master_latex,
    })?;

    let schema = types::response_schema();
    let raw = client.generate(&prompt, &schema).await?;
    let pack = ApplyPack::from_raw(&raw)?;

    info!(
        "Apply pack generated: fit_score={}, keyword_coverage={}",
        pack.fit_score, pack.keyword_coverage
    );

    for finding in structure_drift(master_latex, &pack.tailored_latex) {
        warn!("Tailored resume drifted from master structure: {}", finding);
    }

    Ok(pack)
}

/// Advisory check that the model preserved the master document's skeleton.
/// The prompt forbids structural edits but nothing can enforce that on a
/// remote model, so drift is reported to the operator instead of rejected.
pub fn structure_drift(master: &str, tailored: &str) -> Vec<String> {
    let mut findings = Vec::new();

    let master_sections = section_headers(master);
    let tailored_sections = section_headers(tailored);
    if master_sections != tailored_sections {
        findings.push(format!(
            "section headers changed: master {:?}, tailored {:?}",
            master_sections, tailored_sections
        ));
    }

    let master_bullets = master.matches("\\item").count();
    let tailored_bullets = tailored.matches("\\item").count();
    if master_bullets != tailored_bullets {
        findings.push(format!(
            "bullet count changed: master {}, tailored {}",
            master_bullets, tailored_bullets
        ));
    }

    findings
}

fn section_headers(latex: &str) -> Vec<String> {
    let pattern = Regex::new(r"\\section\*?\{([^}]*)\}").expect("section pattern is valid");
    pattern
        .captures_iter(latex)
        .map(|caps| caps[1].trim().to_string())
        .collect()
}
