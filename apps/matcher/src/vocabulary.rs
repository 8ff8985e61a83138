use std::collections::HashSet;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::MatchError;

/// The fixed universe of recognized skill names.
///
/// Entries keep their display form ("Node.js") but matching and dedup are
/// case-insensitive. Loaded once at startup and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillVocabulary {
    skills: Vec<String>,
}

impl SkillVocabulary {
    /// Builds a vocabulary from raw entries: trims whitespace, drops empty
    /// strings, and keeps the first occurrence of each lowercase form.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut skills = Vec::new();
        for entry in entries {
            let entry = entry.into();
            let trimmed = entry.trim();
            if trimmed.is_empty() {
                continue;
            }
            if seen.insert(trimmed.to_lowercase()) {
                skills.push(trimmed.to_string());
            }
        }
        Self { skills }
    }

    /// Loads a vocabulary from a JSON file. Accepts a bare list of strings,
    /// an object `{"skills": [...]}`, or a single comma-separated string.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, MatchError> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let value: Value = serde_json::from_str(&raw)?;
        let vocabulary = Self::from_value(value);
        debug!(
            entries = vocabulary.len(),
            path = %path.as_ref().display(),
            "loaded skill vocabulary"
        );
        Ok(vocabulary)
    }

    fn from_value(value: Value) -> Self {
        let value = match value {
            Value::Object(mut map) => map.remove("skills").unwrap_or(Value::Null),
            other => other,
        };
        match value {
            Value::Array(items) => Self::from_entries(items.into_iter().filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })),
            Value::String(s) => Self::from_entries(s.split(',').map(str::to_string)),
            _ => Self::from_entries(Vec::<String>::new()),
        }
    }

    /// The built-in default vocabulary, used when no skills file is configured.
    pub fn builtin() -> Self {
        Self::from_entries(DEFAULT_SKILLS.iter().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.skills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.skills.iter().any(|s| s.to_lowercase() == lower)
    }
}

/// Curated default skill list covering common languages, frameworks, data
/// tooling, and infrastructure.
const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "Python",
    "Java",
    "C++",
    "C#",
    "JavaScript",
    "TypeScript",
    "Rust",
    "Go",
    "Kotlin",
    "Swift",
    "Ruby",
    "PHP",
    "Scala",
    "SQL",
    // Web
    "HTML",
    "CSS",
    "React",
    "Angular",
    "Vue",
    "Node.js",
    "Express",
    "Flask",
    "Django",
    "FastAPI",
    "Spring Boot",
    "GraphQL",
    "REST APIs",
    // Data / ML
    "Machine Learning",
    "Deep Learning",
    "Data Analysis",
    "NLP",
    "Pandas",
    "NumPy",
    "TensorFlow",
    "PyTorch",
    "Scikit-learn",
    "Spark",
    "Hadoop",
    "Tableau",
    "Power BI",
    // Databases
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "Redis",
    "Elasticsearch",
    // DevOps / Cloud
    "Docker",
    "Kubernetes",
    "Linux",
    "AWS",
    "Azure",
    "GCP",
    "Terraform",
    "Jenkins",
    "Git",
    "CI/CD",
    "Kafka",
    // Soft skills
    "Communication",
    "Leadership",
    "Problem Solving",
    "Teamwork",
];
