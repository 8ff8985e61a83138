//! Generative job source — asks Claude for plausible postings when no
//! job-board credentials are available.
//!
//! This is the only module that talks to the Anthropic API, and it exposes
//! exactly one operation: fetch a batch of suggested postings.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::errors::MatchError;
use crate::models::JobPosting;
use crate::sources::{JobQuery, JobSource};

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// Hardcoded on purpose to prevent accidental model drift.
const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const MAX_ATTEMPTS: u32 = 3;

const SYSTEM_PROMPT: &str =
    "You are a job-market assistant that suggests realistic job postings. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON array. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Generative job source. Transient API failures (429, 5xx, transport
/// errors) are retried with exponential backoff; anything else fails the
/// fetch immediately.
pub struct LlmJobSource {
    client: Client,
    api_key: String,
}

/// How a single request attempt failed: transient failures are worth a
/// retry, fatal ones are not.
enum RequestFailure {
    Transient(MatchError),
    Fatal(MatchError),
}

#[derive(Debug, Deserialize)]
struct Completion {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: String,
}

impl LlmJobSource {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    /// Builds a source from `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .context("Required environment variable 'ANTHROPIC_API_KEY' is not set")?;
        Ok(Self::new(api_key))
    }

    /// Sends the prompt and returns the model's text output, retrying
    /// transient failures with 1s, 2s, 4s backoff.
    async fn complete(&self, prompt: &str) -> Result<String, MatchError> {
        let body = serde_json::json!({
            "model": MODEL,
            "max_tokens": MAX_TOKENS,
            "system": SYSTEM_PROMPT,
            "messages": [{ "role": "user", "content": prompt }],
        });

        let mut attempt = 1;
        let mut delay = std::time::Duration::from_secs(1);
        loop {
            match self.post(&body).await {
                Ok(text) => return Ok(text),
                Err(RequestFailure::Transient(err)) if attempt < MAX_ATTEMPTS => {
                    warn!(
                        "suggestion request attempt {attempt} failed ({err}); retrying in {}s",
                        delay.as_secs()
                    );
                    tokio::time::sleep(delay).await;
                    delay *= 2;
                    attempt += 1;
                }
                Err(RequestFailure::Transient(err)) | Err(RequestFailure::Fatal(err)) => {
                    return Err(err)
                }
            }
        }
    }

    async fn post(&self, body: &serde_json::Value) -> Result<String, RequestFailure> {
        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| RequestFailure::Transient(MatchError::Http(e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let err = MatchError::Llm(format!("API returned {status}: {detail}"));
            return if status.as_u16() == 429 || status.is_server_error() {
                Err(RequestFailure::Transient(err))
            } else {
                Err(RequestFailure::Fatal(err))
            };
        }

        let completion: Completion = response
            .json()
            .await
            .map_err(|e| RequestFailure::Fatal(MatchError::Http(e)))?;
        completion
            .content
            .into_iter()
            .find(|block| block.kind == "text" && !block.text.is_empty())
            .map(|block| block.text)
            .ok_or_else(|| {
                RequestFailure::Fatal(MatchError::Llm("completion had no text content".to_string()))
            })
    }
}

#[async_trait]
impl JobSource for LlmJobSource {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, MatchError> {
        let raw = self.complete(&suggestion_prompt(query)).await?;
        let jobs: Vec<JobPosting> = serde_json::from_str(json_payload(&raw))?;
        debug!(count = jobs.len(), "generated postings");
        Ok(jobs)
    }
}

fn suggestion_prompt(query: &JobQuery) -> String {
    format!(
        r#"Suggest {count} realistic, currently plausible job postings for the role "{role}" in or near "{location}".

Return a JSON array with this EXACT schema per element (no extra fields):
[
  {{
    "title": "Backend Engineer",
    "company": "Acme Corp",
    "location": "Bengaluru, Karnataka",
    "description": "Two to four sentences covering responsibilities and the concrete skills required.",
    "url": ""
  }}
]

Rules:
- Vary seniority and company size across the postings.
- Name specific technologies in each description.
- Leave "url" as an empty string; do not invent links."#,
        count = query.results_per_page,
        role = query.query,
        location = query.location,
    )
}

/// Trims the markdown code fences the model was told not to emit but
/// sometimes does anyway.
fn json_payload(raw: &str) -> &str {
    let inner = raw.trim();
    let inner = inner
        .strip_prefix("```json")
        .or_else(|| inner.strip_prefix("```"))
        .unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_payload_trims_tagged_fence() {
        let raw = "```json\n[{\"title\": \"Dev\"}]\n```";
        assert_eq!(json_payload(raw), "[{\"title\": \"Dev\"}]");
    }

    #[test]
    fn test_json_payload_trims_bare_fence() {
        assert_eq!(json_payload("```\n[]\n```"), "[]");
    }

    #[test]
    fn test_json_payload_passes_unfenced_text_through() {
        assert_eq!(json_payload("[]"), "[]");
    }

    #[test]
    fn test_suggestion_prompt_carries_query_fields() {
        let prompt = suggestion_prompt(&JobQuery {
            query: "Data Analyst".to_string(),
            location: "Mumbai".to_string(),
            results_per_page: 5,
            page: 1,
        });
        assert!(prompt.contains("Suggest 5 realistic"));
        assert!(prompt.contains("\"Data Analyst\""));
        assert!(prompt.contains("\"Mumbai\""));
        // The schema example must survive the formatting.
        assert!(prompt.contains("\"title\": \"Backend Engineer\""));
    }

    #[test]
    fn test_llm_suggestions_deserialize_into_postings() {
        let payload = r#"[
            {"title": "Backend Engineer", "company": "Acme", "location": "Pune",
             "description": "Python services.", "url": ""}
        ]"#;
        let jobs: Vec<JobPosting> = serde_json::from_str(payload).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].title, "Backend Engineer");
    }
}
