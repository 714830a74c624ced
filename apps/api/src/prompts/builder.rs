//! Prompt Builder: fills the templates in `prompts::templates` with user text.
//!
//! Untrusted text is fenced inside the prompts by `---` lines, so any input carrying that
//! sequence is rejected before a prompt is produced. Substitution is a single left-to-right
//! pass: text that has been substituted is never rescanned for tokens.

use thiserror::Error;

use crate::prompts::templates::{
    ADDITIONAL_CONTEXT_TOKEN, CV_REVIEW_PROMPT, CV_REWRITE_PROMPT, CV_TEXT_TOKEN,
    JOB_DESCRIPTION_TOKEN, JOB_MATCH_PROMPT, LANGUAGE_TOKEN,
};

/// Marker that fences untrusted text blocks inside every prompt.
pub const DELIMITER: &str = "---";
pub const DEFAULT_LANGUAGE: &str = "en";
/// Job descriptions longer than this (in characters) are cut before entering the rewrite prompt.
pub const JOB_DESCRIPTION_SNIPPET_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("{field} text cannot contain the delimiter sequence '---'")]
    DelimiterInInput { field: &'static str },
}

/// Inputs for the rewrite prompt. Blank optional values count as absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct RewriteInput<'a> {
    pub cv_text: &'a str,
    pub target_role: Option<&'a str>,
    pub job_description: Option<&'a str>,
    pub language: Option<&'a str>,
}

pub fn build_review_prompt(cv_text: &str, language: Option<&str>) -> Result<String, PromptError> {
    ensure_no_delimiter("CV", cv_text)?;
    let language = resolve_language(language)?;

    Ok(fill_template(
        CV_REVIEW_PROMPT,
        &[(CV_TEXT_TOKEN, cv_text), (LANGUAGE_TOKEN, language)],
    ))
}

pub fn build_rewrite_prompt(input: &RewriteInput<'_>) -> Result<String, PromptError> {
    ensure_no_delimiter("CV", input.cv_text)?;
    let language = resolve_language(input.language)?;
    let target_role = present(input.target_role);
    let job_description = present(input.job_description);
    if let Some(role) = target_role {
        ensure_no_delimiter("Target role", role)?;
    }
    if let Some(jd) = job_description {
        ensure_no_delimiter("Job description", jd)?;
    }

    let additional_context = build_additional_context(target_role, job_description);

    Ok(fill_template(
        CV_REWRITE_PROMPT,
        &[
            (ADDITIONAL_CONTEXT_TOKEN, additional_context.as_str()),
            (CV_TEXT_TOKEN, input.cv_text),
            (LANGUAGE_TOKEN, language),
        ],
    ))
}

pub fn build_job_match_prompt(cv_text: &str, job_description: &str) -> Result<String, PromptError> {
    ensure_no_delimiter("CV", cv_text)?;
    ensure_no_delimiter("Job description", job_description)?;

    Ok(fill_template(
        JOB_MATCH_PROMPT,
        &[
            (CV_TEXT_TOKEN, cv_text),
            (JOB_DESCRIPTION_TOKEN, job_description),
        ],
    ))
}

/// Assembles the tailoring block for the rewrite prompt.
/// Returns an empty string when neither a role nor a job description is supplied.
pub fn build_additional_context(target_role: Option<&str>, job_description: Option<&str>) -> String {
    if target_role.is_none() && job_description.is_none() {
        return String::new();
    }

    let mut parts = vec!["\n**Additional Context for Tailoring:**".to_string()];
    if let Some(role) = target_role {
        parts.push(format!("- Target Role: {role}"));
    }
    if let Some(jd) = job_description {
        parts.push(format!(
            "- Job Description Snippet: {}",
            truncate_job_description(jd)
        ));
    }
    parts.join("\n")
}

/// Cuts a job description to its first `JOB_DESCRIPTION_SNIPPET_CHARS` characters plus a marker.
pub fn truncate_job_description(jd: &str) -> String {
    match jd.char_indices().nth(JOB_DESCRIPTION_SNIPPET_CHARS) {
        Some((cut, _)) => format!("{}{TRUNCATION_MARKER}", &jd[..cut]),
        None => jd.to_string(),
    }
}

fn ensure_no_delimiter(field: &'static str, text: &str) -> Result<(), PromptError> {
    if text.contains(DELIMITER) {
        return Err(PromptError::DelimiterInInput { field });
    }
    Ok(())
}

fn resolve_language(language: Option<&str>) -> Result<&str, PromptError> {
    let language = present(language).unwrap_or(DEFAULT_LANGUAGE);
    ensure_no_delimiter("Language", language)?;
    Ok(language)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Single-pass `{{TOKEN}}` substitution. Unknown `{{` sequences are copied through untouched.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    let extra: usize = values.iter().map(|(_, v)| v.len()).sum();
    let mut out = String::with_capacity(template.len() + extra);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(token, _)| tail.starts_with(token)) {
            Some((token, value)) => {
                out.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                out.push_str("{{");
                rest = &tail[2..];
            }
        }
    }
    out.push_str(rest);
    out
}
