//! Skill extraction — exact whole-word matching against the vocabulary,
//! with a fuzzy fallback when exact matching comes up sparse.

use std::collections::HashSet;

use regex::Regex;
use tracing::debug;

use crate::vocabulary::SkillVocabulary;

/// Knobs for skill extraction. Defaults reproduce the reference behavior.
#[derive(Debug, Clone)]
pub struct ExtractOptions {
    /// Minimum partial-ratio score (0-100) for a fuzzy match to count.
    pub fuzzy_threshold: f64,
    /// Fuzzy fallback only runs when the exact pass found fewer matches.
    pub min_exact_matches: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            fuzzy_threshold: 85.0,
            min_exact_matches: 5,
        }
    }
}

/// Extracts vocabulary skills found in `text`, returned in canonical display
/// form, sorted lexicographically. Never fails: empty or garbage input yields
/// an empty list.
///
/// Two passes:
/// 1. Exact — case-insensitive whole-word search per vocabulary entry.
///    Word boundaries keep "java" from matching inside "javascript".
/// 2. Fuzzy — only when the exact pass found fewer than
///    `min_exact_matches` entries; a partial-ratio score against the full
///    text recovers near-miss spellings without re-checking exact hits.
pub fn extract_skills(
    text: &str,
    vocabulary: &SkillVocabulary,
    options: &ExtractOptions,
) -> Vec<String> {
    let text_lower = text.to_lowercase();
    let mut found: HashSet<String> = HashSet::new();

    for skill in vocabulary.iter() {
        let pattern = format!(r"\b{}\b", regex::escape(&skill.to_lowercase()));
        // An escaped literal is always a valid pattern.
        let Ok(re) = Regex::new(&pattern) else {
            continue;
        };
        if re.is_match(&text_lower) {
            found.insert(skill.to_string());
        }
    }

    if found.len() < options.min_exact_matches {
        let exact_count = found.len();
        for skill in vocabulary.iter() {
            if found.contains(skill) {
                continue;
            }
            let score = partial_ratio(&skill.to_lowercase(), &text_lower);
            if score >= options.fuzzy_threshold {
                found.insert(skill.to_string());
            }
        }
        debug!(
            exact = exact_count,
            fuzzy = found.len() - exact_count,
            "fuzzy fallback ran"
        );
    }

    let mut result: Vec<String> = found.into_iter().collect();
    result.sort();
    result
}

/// Partial-ratio fuzzy similarity on a 0-100 scale: the best
/// normalized-Levenshtein score between the shorter string and any
/// equal-length window of the longer one. "pythom" against a text containing
/// "python" scores ~83.3.
pub fn partial_ratio(needle: &str, haystack: &str) -> f64 {
    if needle.is_empty() || haystack.is_empty() {
        return 0.0;
    }
    let needle_chars: Vec<char> = needle.chars().collect();
    let haystack_chars: Vec<char> = haystack.chars().collect();
    let (short, long) = if needle_chars.len() <= haystack_chars.len() {
        (needle_chars, haystack_chars)
    } else {
        (haystack_chars, needle_chars)
    };

    let short_str: String = short.iter().collect();
    let window = short.len();
    let mut best = 0.0_f64;
    for start in 0..=(long.len() - window) {
        let candidate: String = long[start..start + window].iter().collect();
        let score = strsim::normalized_levenshtein(&short_str, &candidate) * 100.0;
        if score > best {
            best = score;
        }
        if best >= 100.0 {
            break;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(entries: &[&str]) -> SkillVocabulary {
        SkillVocabulary::from_entries(entries.iter().copied())
    }

    /// Disables the fuzzy fallback so a test can observe the exact pass alone.
    fn exact_only() -> ExtractOptions {
        ExtractOptions {
            min_exact_matches: 0,
            ..ExtractOptions::default()
        }
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let skills = extract_skills("", &vocab(&["Python", "SQL"]), &ExtractOptions::default());
        assert!(skills.is_empty());
    }

    #[test]
    fn test_exact_match_is_case_insensitive_and_returns_display_form() {
        let skills = extract_skills(
            "experienced PYTHON and sql developer",
            &vocab(&["Python", "SQL", "Docker"]),
            &exact_only(),
        );
        assert_eq!(skills, vec!["Python", "SQL"]);
    }

    #[test]
    fn test_word_boundary_prevents_java_matching_javascript() {
        let skills = extract_skills(
            "senior javascript developer",
            &vocab(&["Java", "JavaScript"]),
            &exact_only(),
        );
        assert_eq!(skills, vec!["JavaScript"]);
    }

    #[test]
    fn test_multiword_skills_match_exactly() {
        let skills = extract_skills(
            "background in machine learning and data analysis",
            &vocab(&["Machine Learning", "Data Analysis", "Deep Learning"]),
            &exact_only(),
        );
        assert_eq!(skills, vec!["Data Analysis", "Machine Learning"]);
    }

    #[test]
    fn test_fuzzy_fallback_recovers_near_miss_spelling() {
        // "pythom" vs "python" scores ~83.3, below the default 85 cutoff
        // but above a relaxed one.
        let options = ExtractOptions {
            fuzzy_threshold: 80.0,
            min_exact_matches: 5,
        };
        let skills = extract_skills("expert pythom developer", &vocab(&["Python"]), &options);
        assert_eq!(skills, vec!["Python"]);
    }

    #[test]
    fn test_fuzzy_fallback_respects_threshold() {
        let options = ExtractOptions {
            fuzzy_threshold: 85.0,
            min_exact_matches: 5,
        };
        let skills = extract_skills("expert pythom developer", &vocab(&["Python"]), &options);
        assert!(skills.is_empty());
    }

    #[test]
    fn test_fuzzy_fallback_skipped_when_exact_pass_is_rich() {
        // Five exact hits suppress the fallback, so the near-miss "pythom"
        // never gets a chance even at a permissive threshold.
        let options = ExtractOptions {
            fuzzy_threshold: 80.0,
            min_exact_matches: 5,
        };
        let skills = extract_skills(
            "pythom plus sql docker linux git aws",
            &vocab(&["Python", "SQL", "Docker", "Linux", "Git", "AWS"]),
            &options,
        );
        assert_eq!(skills, vec!["AWS", "Docker", "Git", "Linux", "SQL"]);
    }

    #[test]
    fn test_extraction_is_deterministic() {
        let text = "Python developer with SQL, Docker and some pandas work";
        let vocabulary = vocab(&["Python", "SQL", "Docker", "Pandas", "Java"]);
        let options = ExtractOptions::default();
        let first = extract_skills(text, &vocabulary, &options);
        let second = extract_skills(text, &vocabulary, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_result_is_sorted() {
        let skills = extract_skills(
            "sql python docker",
            &vocab(&["SQL", "Python", "Docker"]),
            &exact_only(),
        );
        assert_eq!(skills, vec!["Docker", "Python", "SQL"]);
    }

    #[test]
    fn test_partial_ratio_exact_substring_scores_100() {
        assert_eq!(partial_ratio("java", "we use javascript here"), 100.0);
    }

    #[test]
    fn test_partial_ratio_near_miss_scores_below_exact() {
        let score = partial_ratio("python", "senior pythom developer");
        assert!(score > 80.0 && score < 85.0, "got {score}");
    }

    #[test]
    fn test_partial_ratio_empty_inputs_score_zero() {
        assert_eq!(partial_ratio("", "text"), 0.0);
        assert_eq!(partial_ratio("skill", ""), 0.0);
    }
}
