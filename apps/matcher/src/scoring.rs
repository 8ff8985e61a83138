//! Score combination — fuses lexical skill overlap with semantic similarity
//! into one ranked recommendation score per (resume, job) pair.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::MatchError;
use crate::models::JobPosting;
use crate::semantic::{semantic_similarity_pct, Embedder};

/// Combination weights. Intended to sum to 1, not enforced.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Weights {
    pub w_skill: f64,
    pub w_sem: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            w_skill: 0.6,
            w_sem: 0.4,
        }
    }
}

/// Per-(resume, job) scoring record. Ephemeral — computed on demand; callers
/// may persist a serialized copy downstream.
///
/// `missing_skills` is resume-centric: skills the resume has that the job
/// posting doesn't appear to mention. Preserved as observed behavior — NOT
/// "skills the job wants that the resume lacks".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub skill_overlap_pct: f64,
    pub semantic_similarity_pct: f64,
    pub final_score: f64,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

/// A job annotated with its score, produced by [`Matcher::rank`].
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub job: JobPosting,
    pub score: MatchScore,
}

/// Scores and ranks jobs against one resume.
///
/// The embedding backend is an explicit, injected dependency — no ambient
/// global — so one expensive model instance can serve every scoring call.
pub struct Matcher {
    embedder: Arc<dyn Embedder>,
    weights: Weights,
}

impl Matcher {
    pub fn new(embedder: Arc<dyn Embedder>) -> Self {
        Self::with_weights(embedder, Weights::default())
    }

    pub fn with_weights(embedder: Arc<dyn Embedder>, weights: Weights) -> Self {
        Self { embedder, weights }
    }

    /// Computes the full [`MatchScore`] for one (resume, job) pair.
    ///
    /// Missing job fields are treated as empty strings; the only error path
    /// is the embedding backend, which propagates uncaught (a caller wanting
    /// skill-only fallback scoring must catch it and degrade itself).
    pub fn score(
        &self,
        resume_text: &str,
        resume_skills: &[String],
        job: &JobPosting,
    ) -> Result<MatchScore, MatchError> {
        let job_text = format!("{}\n{}\n{}", job.title, job.company, job.description);
        let job_skills = apparent_job_skills(resume_skills, job);

        let skill_pct = skill_overlap_pct(resume_skills, &job_skills);
        let semantic_pct = semantic_similarity_pct(self.embedder.as_ref(), resume_text, &job_text)?;
        let final_score = final_combine(skill_pct, semantic_pct, &self.weights);

        let mut matched: Vec<String> = resume_skills
            .iter()
            .filter(|s| job_skills.contains(s.as_str()))
            .cloned()
            .collect();
        matched.sort();
        matched.dedup();

        let mut missing: Vec<String> = resume_skills
            .iter()
            .filter(|s| !matched.contains(s))
            .cloned()
            .collect();
        missing.sort();

        debug!(
            title = %job.title,
            skill_pct,
            semantic_pct,
            final_score,
            "scored job"
        );

        Ok(MatchScore {
            skill_overlap_pct: skill_pct,
            semantic_similarity_pct: semantic_pct,
            final_score,
            matched_skills: matched,
            missing_skills: missing,
        })
    }

    /// Scores every job and returns the top `top_n` by descending
    /// `final_score`. The sort is stable, so tied scores keep their original
    /// fetch order. Duplicate postings pass through unchanged.
    pub fn rank(
        &self,
        resume_text: &str,
        resume_skills: &[String],
        jobs: &[JobPosting],
        top_n: usize,
    ) -> Result<Vec<RankedJob>, MatchError> {
        let mut ranked = Vec::with_capacity(jobs.len());
        for job in jobs {
            let score = self.score(resume_text, resume_skills, job)?;
            ranked.push(RankedJob {
                job: job.clone(),
                score,
            });
        }
        ranked.sort_by(|a, b| {
            b.score
                .final_score
                .partial_cmp(&a.score.final_score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_n);
        Ok(ranked)
    }
}

/// Weighted linear combination of the two percentages.
pub fn final_combine(skill_pct: f64, semantic_pct: f64, weights: &Weights) -> f64 {
    weights.w_skill * skill_pct + weights.w_sem * semantic_pct
}

/// Cheap job-side skill detection: a resume skill counts as present in the
/// job when its space-stripped lowercase form appears as a substring of the
/// job's concatenated token stream (unique lowercased whitespace tokens of
/// title + description, concatenated in sorted order for determinism).
///
/// A fuller setup would re-run extraction against the whole vocabulary; this
/// heuristic is intentionally restricted to the resume's own skills, which
/// keeps `matched_skills` a subset of the resume by construction. Isolated
/// here so a real extractor can replace it without touching the weighting.
fn apparent_job_skills(resume_skills: &[String], job: &JobPosting) -> BTreeSet<String> {
    let tokens: BTreeSet<String> = format!("{} {}", job.title, job.description)
        .split_whitespace()
        .map(str::to_lowercase)
        .collect();
    let stream: String = tokens.iter().map(String::as_str).collect();

    resume_skills
        .iter()
        .filter(|skill| {
            let needle = skill.to_lowercase().replace(' ', "");
            !needle.is_empty() && stream.contains(&needle)
        })
        .cloned()
        .collect()
}

/// Jaccard similarity between the lowercased skill sets, as a percentage
/// rounded to 4 decimal places. Defined as 0.0 when both sets are empty.
fn skill_overlap_pct(resume_skills: &[String], job_skills: &BTreeSet<String>) -> f64 {
    let s1: BTreeSet<String> = resume_skills.iter().map(|s| s.to_lowercase()).collect();
    let s2: BTreeSet<String> = job_skills.iter().map(|s| s.to_lowercase()).collect();
    if s1.is_empty() && s2.is_empty() {
        return 0.0;
    }
    let intersection = s1.intersection(&s2).count();
    let union = s1.union(&s2).count();
    if union == 0 {
        return 0.0;
    }
    let jaccard = intersection as f64 / union as f64;
    (jaccard * 100.0 * 10_000.0).round() / 10_000.0
}
