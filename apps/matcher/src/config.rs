use anyhow::{Context, Result};

/// Runtime configuration loaded from environment variables.
/// Every knob has a default matching the reference behavior, so a bare
/// environment is valid.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Weight of the skill-overlap percentage in the final score.
    pub w_skill: f64,
    /// Weight of the semantic-similarity percentage in the final score.
    pub w_sem: f64,
    /// Minimum partial-ratio score (0-100) for a fuzzy skill match.
    pub fuzzy_threshold: f64,
    /// Fuzzy fallback only runs when the exact pass found fewer matches than this.
    pub min_exact_matches: usize,
    /// How many ranked recommendations to keep.
    pub top_n: usize,
    pub rust_log: String,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            w_skill: 0.6,
            w_sem: 0.4,
            fuzzy_threshold: 85.0,
            min_exact_matches: 5,
            top_n: 10,
            rust_log: "info".to_string(),
        }
    }
}

impl MatcherConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Self::default();
        Ok(Self {
            w_skill: env_or("MATCH_W_SKILL", defaults.w_skill)?,
            w_sem: env_or("MATCH_W_SEM", defaults.w_sem)?,
            fuzzy_threshold: env_or("MATCH_FUZZY_THRESHOLD", defaults.fuzzy_threshold)?,
            min_exact_matches: env_or("MATCH_MIN_EXACT", defaults.min_exact_matches)?,
            top_n: env_or("MATCH_TOP_N", defaults.top_n)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_behavior() {
        let config = MatcherConfig::default();
        assert_eq!(config.w_skill, 0.6);
        assert_eq!(config.w_sem, 0.4);
        assert_eq!(config.fuzzy_threshold, 85.0);
        assert_eq!(config.min_exact_matches, 5);
        assert_eq!(config.top_n, 10);
    }

    #[test]
    fn test_env_or_falls_back_to_default() {
        let value: f64 = env_or("JOBMATCH_TEST_UNSET_VAR", 0.25).unwrap();
        assert_eq!(value, 0.25);
    }
}
