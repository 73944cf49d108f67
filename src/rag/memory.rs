//! In-memory vector store with brute-force cosine ranking.
//!
//! The default backend: records live in process memory and are lost on
//! shutdown. Searches scan every entry, which is fine at demo-corpus scale.

use std::cmp::Ordering;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::store::{cosine_similarity, DocumentRecord, SearchHit, VectorStore};
use crate::core::errors::PipelineError;

#[derive(Default)]
pub struct MemoryVectorStore {
    entries: RwLock<Vec<(DocumentRecord, Vec<f32>)>>,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for MemoryVectorStore {
    async fn insert(
        &self,
        record: DocumentRecord,
        embedding: Vec<f32>,
    ) -> Result<(), PipelineError> {
        self.entries.write().await.push((record, embedding));
        Ok(())
    }

    async fn insert_batch(
        &self,
        items: Vec<(DocumentRecord, Vec<f32>)>,
    ) -> Result<(), PipelineError> {
        self.entries.write().await.extend(items);
        Ok(())
    }

    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<SearchHit>, PipelineError> {
        let entries = self.entries.read().await;

        let mut scored: Vec<SearchHit> = entries
            .iter()
            .map(|(record, embedding)| SearchHit {
                record: record.clone(),
                score: cosine_similarity(query_embedding, embedding),
            })
            .collect();

        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(limit);

        Ok(scored)
    }

    async fn count(&self) -> Result<usize, PipelineError> {
        Ok(self.entries.read().await.len())
    }

    async fn clear(&self) -> Result<usize, PipelineError> {
        let mut entries = self.entries.write().await;
        let removed = entries.len();
        entries.clear();
        Ok(removed)
    }
}
