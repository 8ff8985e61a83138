//! Semantic text similarity via sentence embeddings.
//!
//! The embedding model is the only stateful resource in the core: loaded
//! once on first use, then shared read-only for the process lifetime.

use std::sync::Mutex;

use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use crate::errors::MatchError;

/// A fixed-length dense vector for one text blob.
pub type Embedding = Vec<f32>;

/// Seam over the sentence-embedding backend. Scoring depends on this trait,
/// not on a concrete model, so tests run without downloading weights and a
/// different backend can be swapped in without touching the combiner.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Result<Embedding, MatchError>;
}

/// MiniLM sentence embedder (the `all-MiniLM-L6-v2` family).
///
/// First `embed` call triggers the model load — potentially slow, as weights
/// may be fetched from the network — and the loaded model is reused by every
/// subsequent call. Initialization failure is fatal for the call that needs
/// it; there is no degraded fallback here (that policy belongs to callers).
pub struct MiniLmEmbedder {
    model: OnceCell<Mutex<TextEmbedding>>,
}

impl MiniLmEmbedder {
    pub fn new() -> Self {
        Self {
            model: OnceCell::new(),
        }
    }

    fn model(&self) -> Result<&Mutex<TextEmbedding>, MatchError> {
        self.model.get_or_try_init(|| {
            info!("Loading MiniLM sentence-embedding model (first use)");
            let model = TextEmbedding::try_new(
                InitOptions::new(EmbeddingModel::AllMiniLML6V2).with_show_download_progress(false),
            )
            .map_err(|e| MatchError::Embedding(format!("model load failed: {e}")))?;
            Ok(Mutex::new(model))
        })
    }
}

impl Default for MiniLmEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl Embedder for MiniLmEmbedder {
    fn embed(&self, text: &str) -> Result<Embedding, MatchError> {
        let model = self.model()?;
        let mut guard = model
            .lock()
            .map_err(|_| MatchError::Embedding("embedding model lock poisoned".to_string()))?;
        let mut batch = guard
            .embed(vec![text], None)
            .map_err(|e| MatchError::Embedding(format!("encoding failed: {e}")))?;
        batch
            .pop()
            .ok_or_else(|| MatchError::Embedding("model returned an empty batch".to_string()))
    }
}

/// Cosine similarity in [-1, 1]. Zero-norm vectors and dimension mismatches
/// yield 0.0 rather than an error.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}

/// Semantic similarity between two text blobs as a display-friendly
/// percentage: `(cosine + 1) * 50`, clamped to [0, 100].
///
/// Empty text embeds like any other string. Two zero-norm embeddings give
/// cosine 0.0 and therefore the defined midpoint, 50.0 — never a crash.
pub fn semantic_similarity_pct(
    embedder: &dyn Embedder,
    text_a: &str,
    text_b: &str,
) -> Result<f64, MatchError> {
    let emb_a = embedder.embed(text_a)?;
    let emb_b = embedder.embed(text_b)?;
    let cosine = f64::from(cosine_similarity(&emb_a, &emb_b));
    Ok(((cosine + 1.0) * 50.0).clamp(0.0, 100.0))
}
