//! Job-source adapters — wrappers around external services or static data.
//! The job-board adapter is a single request/response with no retries or
//! caching; only the generative source retries transient API failures.
//! Resilience policy beyond that belongs to the caller.

pub mod adzuna;
pub mod llm;
pub mod sample;

use async_trait::async_trait;

use crate::errors::MatchError;
use crate::models::JobPosting;

pub use adzuna::AdzunaSource;
pub use llm::LlmJobSource;
pub use sample::SampleSource;

/// Parameters for one job search.
#[derive(Debug, Clone)]
pub struct JobQuery {
    pub query: String,
    pub location: String,
    pub results_per_page: usize,
    /// 1-based page number.
    pub page: u32,
}

impl Default for JobQuery {
    fn default() -> Self {
        Self {
            query: "Software Engineer".to_string(),
            location: "India".to_string(),
            results_per_page: 10,
            page: 1,
        }
    }
}

/// A provider of job postings. Implementations are swapped at the call site
/// without touching the scoring pipeline.
#[async_trait]
pub trait JobSource: Send + Sync {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, MatchError>;
}
