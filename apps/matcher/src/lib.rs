//! jobmatch — resume-to-job matching core.
//!
//! Pipeline: resume text → skill extraction (exact + fuzzy against a
//! vocabulary) → per-job scoring (Jaccard skill overlap fused with
//! embedding-based semantic similarity) → ranked top-N recommendations.
//!
//! The scoring core is a pure library: it performs no retries and no
//! fallback scoring. Job-source adapters and resume intake live at the
//! boundary in [`sources`] and [`resume`].

pub mod config;
pub mod errors;
pub mod extract;
pub mod models;
pub mod resume;
pub mod scoring;
pub mod semantic;
pub mod sources;
pub mod vocabulary;

pub use config::MatcherConfig;
pub use errors::MatchError;
pub use extract::{extract_skills, partial_ratio, ExtractOptions};
pub use models::{ContactInfo, JobPosting};
pub use resume::{extract_contact_info, extract_resume_text};
pub use scoring::{final_combine, MatchScore, Matcher, RankedJob, Weights};
pub use semantic::{
    cosine_similarity, semantic_similarity_pct, Embedder, Embedding, MiniLmEmbedder,
};
pub use sources::{AdzunaSource, JobQuery, JobSource, LlmJobSource, SampleSource};
pub use vocabulary::SkillVocabulary;
