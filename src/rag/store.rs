//! VectorStore trait — abstract interface for similarity-search backends.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::errors::PipelineError;

/// A stored document with its source and optional metadata.
///
/// Immutable once stored; created by the corpus loader at startup and
/// destroyed only by store teardown.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    /// Unique record identifier.
    pub id: String,
    /// The text content.
    pub content: String,
    /// Source identifier (document name, sentence-list name, etc.).
    pub source: String,
    /// Optional metadata (JSON).
    pub metadata: Option<serde_json::Value>,
}

impl DocumentRecord {
    pub fn new(content: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            source: source.into(),
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: serde_json::Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Result of a similarity search.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub record: DocumentRecord,
    /// Similarity score (higher = better).
    pub score: f32,
}

/// Abstract trait for vector store backends.
///
/// Searches return at most `limit` hits ranked by descending similarity;
/// tie order among equal scores is backend-defined and unspecified. Stores
/// do not deduplicate: inserting the same content twice keeps both records.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a record with its embedding vector.
    async fn insert(
        &self,
        record: DocumentRecord,
        embedding: Vec<f32>,
    ) -> Result<(), PipelineError>;

    /// Insert multiple records in batch.
    async fn insert_batch(
        &self,
        items: Vec<(DocumentRecord, Vec<f32>)>,
    ) -> Result<(), PipelineError>;

    /// Search for records similar to the query embedding.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PipelineError>;

    /// Total record count.
    async fn count(&self) -> Result<usize, PipelineError>;

    /// Delete all records, returning how many were removed.
    async fn clear(&self) -> Result<usize, PipelineError>;
}

/// Cosine similarity over raw f32 slices. Mismatched or empty vectors score
/// 0.0 rather than erroring; keeping embeddings from a single model in one
/// store is configuration discipline, not a store guarantee.
pub(crate) fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    let denom = norm_a * norm_b;

    if denom <= f32::EPSILON {
        0.0
    } else {
        dot / denom
    }
}
