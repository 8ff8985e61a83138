//! Adzuna job-board adapter.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::MatchError;
use crate::models::JobPosting;
use crate::sources::{JobQuery, JobSource};

const ADZUNA_BASE_URL: &str = "https://api.adzuna.com/v1/api/jobs";
const DEFAULT_COUNTRY: &str = "in";
const REQUEST_TIMEOUT_SECS: u64 = 20;

/// Live job-board source backed by the Adzuna search API.
#[derive(Clone)]
pub struct AdzunaSource {
    client: Client,
    app_id: String,
    app_key: String,
    country: String,
}

impl AdzunaSource {
    pub fn new(app_id: String, app_key: String, country: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            app_id,
            app_key,
            country,
        }
    }

    /// Builds a source from `ADZUNA_APP_ID` / `ADZUNA_APP_KEY`, with
    /// `ADZUNA_COUNTRY` defaulting to "in". Errors when credentials are
    /// missing so the caller can fall back to another source.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        let app_id = require_env("ADZUNA_APP_ID")?;
        let app_key = require_env("ADZUNA_APP_KEY")?;
        let country =
            std::env::var("ADZUNA_COUNTRY").unwrap_or_else(|_| DEFAULT_COUNTRY.to_string());
        Ok(Self::new(app_id, app_key, country))
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<WireJob>,
}

/// One posting as Adzuna returns it. Fields are all optional on the wire;
/// anything missing maps to an empty string.
#[derive(Debug, Deserialize)]
struct WireJob {
    title: Option<String>,
    company: Option<WireCompany>,
    location: Option<WireLocation>,
    description: Option<String>,
    redirect_url: Option<String>,
    created: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct WireCompany {
    display_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireLocation {
    display_name: Option<String>,
}

impl From<WireJob> for JobPosting {
    fn from(wire: WireJob) -> Self {
        JobPosting {
            title: wire.title.unwrap_or_default(),
            company: wire
                .company
                .and_then(|c| c.display_name)
                .unwrap_or_default(),
            location: wire
                .location
                .and_then(|l| l.display_name)
                .unwrap_or_default(),
            description: wire.description.unwrap_or_default(),
            url: wire.redirect_url.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl JobSource for AdzunaSource {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, MatchError> {
        let url = format!("{}/{}/search/{}", ADZUNA_BASE_URL, self.country, query.page);
        let results_per_page = query.results_per_page.to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("app_id", self.app_id.as_str()),
                ("app_key", self.app_key.as_str()),
                ("what", query.query.as_str()),
                ("where", query.location.as_str()),
                ("results_per_page", results_per_page.as_str()),
                ("content-type", "application/json"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(MatchError::Source {
                status: status.as_u16(),
                message,
            });
        }

        let body: SearchResponse = response.json().await?;
        let newest = body.results.iter().filter_map(|j| j.created).max();
        debug!(count = body.results.len(), newest = ?newest, "Adzuna returned postings");

        Ok(body.results.into_iter().map(JobPosting::from).collect())
    }
}
