use serde::{Deserialize, Serialize};

/// A job posting as seen by the scoring core. Sourced from a job-board
/// adapter, a generative source, or the static sample set; immutable input
/// to scoring. Any field may be empty, `title` included — source mappings
/// fill absent wire values with empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: String,
}

/// Contact details pulled from the top of a resume.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ContactInfo {
    /// First non-empty line of the resume, truncated to 120 chars.
    pub name_guess: String,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_posting_deserializes_with_missing_fields() {
        let json = r#"{"title": "Rust Engineer"}"#;
        let job: JobPosting = serde_json::from_str(json).unwrap();
        assert_eq!(job.title, "Rust Engineer");
        assert!(job.company.is_empty());
        assert!(job.description.is_empty());
        assert!(job.url.is_empty());
    }
}
