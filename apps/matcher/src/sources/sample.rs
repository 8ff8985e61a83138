//! Static sample job set — an offline source with the same shape as the
//! live adapters, useful for demos and environments without credentials.

use std::path::Path;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::MatchError;
use crate::models::JobPosting;
use crate::sources::{JobQuery, JobSource};

static BUILTIN_JOBS: &str = include_str!("../../data/jobs_sample.json");

/// In-memory job source loaded from a JSON array of postings.
#[derive(Debug, Clone)]
pub struct SampleSource {
    jobs: Vec<JobPosting>,
}

impl SampleSource {
    pub fn from_jobs(jobs: Vec<JobPosting>) -> Self {
        Self { jobs }
    }

    /// The sample set embedded in the binary. A test pins the asset as valid
    /// JSON, so the parse cannot fail at runtime.
    pub fn builtin() -> Self {
        let jobs = serde_json::from_str(BUILTIN_JOBS).expect("embedded sample data is valid JSON");
        Self::from_jobs(jobs)
    }

    /// Loads postings from a JSON file. A missing or unreadable file yields
    /// an empty source rather than an error.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let jobs = match std::fs::read_to_string(path.as_ref()) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!(path = %path.as_ref().display(), "invalid sample jobs file: {e}");
                Vec::new()
            }),
            Err(_) => Vec::new(),
        };
        Self::from_jobs(jobs)
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

#[async_trait]
impl JobSource for SampleSource {
    async fn fetch(&self, query: &JobQuery) -> Result<Vec<JobPosting>, MatchError> {
        let start = (query.page.saturating_sub(1) as usize) * query.results_per_page;
        Ok(self
            .jobs
            .iter()
            .skip(start)
            .take(query.results_per_page)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_sample_set_parses_and_is_nonempty() {
        let source = SampleSource::builtin();
        assert!(!source.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_respects_results_per_page_and_page() {
        let source = SampleSource::builtin();
        let total = source.len();
        assert!(total >= 3);

        let query = JobQuery {
            results_per_page: 2,
            page: 1,
            ..JobQuery::default()
        };
        let first = source.fetch(&query).await.unwrap();
        assert_eq!(first.len(), 2);

        let second = source
            .fetch(&JobQuery {
                page: 2,
                ..query.clone()
            })
            .await
            .unwrap();
        assert_ne!(first[0], second[0]);
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty_not_error() {
        let source = SampleSource::builtin();
        let jobs = source
            .fetch(&JobQuery {
                results_per_page: 50,
                page: 99,
                ..JobQuery::default()
            })
            .await
            .unwrap();
        assert!(jobs.is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_source() {
        let source = SampleSource::from_path("/nonexistent/jobs.json");
        assert!(source.is_empty());
    }

    #[test]
    fn test_invalid_file_yields_empty_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = SampleSource::from_path(file.path());
        assert!(source.is_empty());
    }

    #[test]
    fn test_file_with_postings_loads() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"title": "QA Engineer", "company": "Acme", "description": "Testing."}}]"#
        )
        .unwrap();
        let source = SampleSource::from_path(file.path());
        assert_eq!(source.len(), 1);
    }
}
