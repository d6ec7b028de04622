// src/applypack/prompt.rs
//! Prompt assembly for the apply-pack generation call.
//!
//! The instruction block and wrapper template are fixed; the five runtime
//! values are substituted with the `{placeholder}` idiom. The non-negotiable
//! rules below are passed through to the model as literal instructions -
//! nothing here enforces them programmatically, the structural drift check
//! in the pipeline module reports violations after the fact.

use crate::error::PipelineError;

pub const PROMPT_INSTRUCTIONS: &str = r"
Context:
I am providing two documents:
- My current resume (in .latex format).
- A target job description (JD) for the role I am applying to.

Your task is to revise my resume so it is optimized for ATS and tailored to the target job.
Integrate relevant keywords and skills from the JD without making it look artificial or stuffed.

Instructions

Keyword Optimization:
- Carefully analyze the job description and extract the most important hard skills, technical terms, tools, certifications, and role-specific keywords.
- Naturally integrate these keywords throughout my resume, especially in experience bullet points, summary, and skills section, while maintaining readability and authenticity.

Role Alignment:
- Identify responsibilities and achievements from my current resume that most closely match the target role.
- Rewrite bullet points to highlight quantifiable achievements, results, and leadership impact relevant to the new job.
- Reorder or reframe content so the most role-aligned experiences are emphasized.

ATS-Friendly Formatting:
- Avoid parsing pitfalls (no tables, text boxes, graphics, headers/footers with critical info).
- Use consistent bullet formatting and standard section headers.
- Place keywords in a way ATS will parse correctly (Skills + Experience).

Professional Voice & Impact:
- Use strong action verbs.
- Focus on measurable outcomes where possible.
- Avoid vague phrases.

Balance:
- Do not keyword-stuff. Must read smoothly.
- Keep concise (1 page if under 8 yrs).

Final Output:
- Deliver a complete revised resume.
- Include a summary tailored to the JD.
- End with a skills section listing core competencies aligned with the JD.

Deliverable:
Output the final revised resume ready to be copied back into LaTeX code.

NON-NEGOTIABLE RULES (MUST FOLLOW):
1) Output MUST be valid LaTeX that compiles with tectonic.
2) DO NOT change the LaTeX preamble (everything before \begin{document}).
3) DO NOT remove or rename any section headers (SUMMARY, EDUCATION, TECHNICAL SKILLS, PROFESSIONAL EXPERIENCE, PROJECTS).
4) DO NOT delete any job/role/project entry. Keep all entries.
5) DO NOT change dates, company names, titles, locations, degrees, GPAs, or contact info.
6) DO NOT add new companies, roles, degrees, or projects that are not in the master resume.
7) You MAY rewrite bullet text for relevance, but preserve the number of bullets per entry (same count as master).
8) You MAY reorder bullets within the same entry. Do not move bullets across entries.
9) Keep the overall structure identical: only modify bullet text content and (optionally) summary lines.
10) Avoid special characters unless escaped for LaTeX: &, %, $, #, _ must be escaped.

EDITING SCOPE:
- Allowed edits:
  - Rewrite bullet text to better match the job description.
  - Adjust wording in SUMMARY to align with the job.
- Forbidden edits:
  - Any structural changes, removing environments, changing \section* names, adding custom commands/macros.

OUTPUT REQUIREMENT:
Return ONLY the full LaTeX document as a single string (no markdown fences).
";

pub const PROMPT_TEMPLATE: &str = r"
You must output ONLY valid JSON that matches the given schema.
Do not output markdown. Do not output commentary.

Hard rules:
- Do not invent new claims (no new employers, awards, metrics, tools, degrees).
- Keep LaTeX ATS-friendly (no tables/graphics/columns).
- Preserve the LaTeX structure and packages.
- Ensure LaTeX compiles.

{instructions}

INPUTS
Company: {company}
Role: {role}
Job URL: {url}

JOB DESCRIPTION:
{jd}

MASTER RESUME LATEX (edit content but preserve structure):
{master}

REQUIRED JSON FIELDS:
- tailored_latex (string)
- fit_score (0-100)
- keyword_coverage (0-100)
- top_keywords (array)
- missing_keywords (array)
- outreach:
  - linkedin_connect_note (<=250 chars, no em dashes)
  - linkedin_message
  - recruiter_email
  - followup_7d
  - followup_14d
";

pub struct PromptInputs<'a> {
    pub company: &'a str,
    pub role: &'a str,
    pub url: &'a str,
    pub job_description: &'a str,
    pub master_latex: &'a str,
}

/// Assemble the full model input. Deterministic: same inputs, same prompt.
/// An empty job description aborts here, before anything is composed or
/// sent. The static instruction block is substituted first so runtime values
/// can never be mistaken for placeholders.
pub fn compose_prompt(inputs: &PromptInputs<'_>) -> Result<String, PipelineError> {
    if inputs.job_description.trim().is_empty() {
        return Err(PipelineError::Validation(
            "job description is empty".to_string(),
        ));
    }

    Ok(PROMPT_TEMPLATE
        .trim()
        .replace("{instructions}", PROMPT_INSTRUCTIONS.trim())
        .replace("{company}", inputs.company)
        .replace("{role}", inputs.role)
        .replace("{url}", inputs.url)
        .replace("{jd}", inputs.job_description.trim())
        .replace("{master}", inputs.master_latex.trim()))
}
