//! Startup-time corpus ingestion.
//!
//! Walks the configured sources in order, embeds each text unit and inserts
//! the resulting records into the vector store. Ingestion is best-effort:
//! a failing source or unit is logged and skipped, never fatal to startup.
//! Re-running the loader duplicates records — the store does not dedup.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;

use super::extract::{extract_pdf_text, split_paragraphs};
use super::store::{DocumentRecord, VectorStore};
use crate::core::errors::PipelineError;
use crate::llm::LlmProvider;

/// One ingestion source: a fixed sentence list or a PDF document on disk.
#[derive(Debug, Clone)]
pub enum CorpusSource {
    Sentences { name: String, items: Vec<String> },
    PdfDocument { name: String, path: PathBuf },
}

impl CorpusSource {
    pub fn name(&self) -> &str {
        match self {
            CorpusSource::Sentences { name, .. } => name,
            CorpusSource::PdfDocument { name, .. } => name,
        }
    }
}

pub struct CorpusLoader {
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
    embedding_model: String,
}

impl CorpusLoader {
    pub fn new(
        store: Arc<dyn VectorStore>,
        llm: Arc<dyn LlmProvider>,
        embedding_model: String,
    ) -> Self {
        Self {
            store,
            llm,
            embedding_model,
        }
    }

    /// Ingest all sources in order, returning how many records were inserted.
    pub async fn load(&self, sources: &[CorpusSource]) -> usize {
        let mut inserted = 0;

        for source in sources {
            match self.load_source(source).await {
                Ok(count) => {
                    inserted += count;
                    tracing::info!("Indexed {} units from source '{}'", count, source.name());
                }
                Err(err) => {
                    tracing::warn!("Skipping source '{}': {}", source.name(), err);
                }
            }
        }

        inserted
    }

    async fn load_source(&self, source: &CorpusSource) -> Result<usize, PipelineError> {
        let units = match source {
            CorpusSource::Sentences { items, .. } => items.clone(),
            CorpusSource::PdfDocument { path, .. } => {
                let data = tokio::fs::read(path).await.map_err(|e| {
                    PipelineError::Extraction(format!("failed to read {}: {}", path.display(), e))
                })?;
                split_paragraphs(&extract_pdf_text(&data)?)
            }
        };

        let mut inserted = 0;
        for (index, text) in units.iter().enumerate() {
            match self.index_unit(source.name(), index, text).await {
                Ok(()) => inserted += 1,
                Err(err) => {
                    tracing::warn!(
                        "Failed to index unit {} of source '{}': {}",
                        index,
                        source.name(),
                        err
                    );
                }
            }
        }

        Ok(inserted)
    }

    async fn index_unit(
        &self,
        source_name: &str,
        index: usize,
        text: &str,
    ) -> Result<(), PipelineError> {
        let embedding = self
            .llm
            .embed(&[text.to_string()], &self.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PipelineError::Embedding("embedding backend returned no vector".to_string())
            })?;

        let record = DocumentRecord::new(text, source_name)
            .with_metadata(json!({ "unit_index": index }));

        self.store.insert(record, embedding).await
    }
}

/// Built-in sentence corpus indexed alongside the PDF document.
pub fn builtin_profiles() -> Vec<String> {
    vec![
        "Ruben Hernandez is a man who lives in a big city. He travels a lot to other cities for work.".to_string(),
        "Alberto Fuentes is a middle-aged man with a lot of money. He enjoys luxury and everything related to being in fashion.".to_string(),
        "Lucia Martinez is a woman who loves adventure. Whenever she can, she escapes to the most remote and unexplored places.".to_string(),
        "Celia Gonzalez is a woman deeply concerned about the environment. Whenever she can, she tries to do something for the planet.".to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::types::ChatRequest;
    use crate::rag::memory::MemoryVectorStore;
    use async_trait::async_trait;

    const EMBED_DIM: usize = 4;

    /// Embeds every input to a fixed-dimension vector; fails on texts
    /// containing "poison".
    struct StubEmbedder;

    #[async_trait]
    impl LlmProvider for StubEmbedder {
        fn name(&self) -> &str {
            "stub"
        }

        async fn health_check(&self) -> Result<bool, PipelineError> {
            Ok(true)
        }

        async fn chat(
            &self,
            _request: ChatRequest,
            _model_id: &str,
        ) -> Result<String, PipelineError> {
            Ok(String::new())
        }

        async fn embed(
            &self,
            inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, PipelineError> {
            if inputs.iter().any(|text| text.contains("poison")) {
                return Err(PipelineError::Embedding("backend unavailable".to_string()));
            }
            Ok(inputs.iter().map(|_| vec![0.5; EMBED_DIM]).collect())
        }
    }

    fn loader(store: Arc<dyn VectorStore>) -> CorpusLoader {
        CorpusLoader::new(store, Arc::new(StubEmbedder), "stub-embed".to_string())
    }

    fn sentences(items: &[&str]) -> CorpusSource {
        CorpusSource::Sentences {
            name: "test".to_string(),
            items: items.iter().map(ToString::to_string).collect(),
        }
    }

    #[tokio::test]
    async fn ingests_one_record_per_sentence_with_fixed_dimension() {
        let store = Arc::new(MemoryVectorStore::new());
        let inserted = loader(store.clone()).load(&[sentences(&["a", "b"])]).await;

        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);

        let hits = store.search(&vec![0.5; EMBED_DIM], 10).await.unwrap();
        assert_eq!(hits.len(), 2);
        for hit in &hits {
            assert!(hit.score > 0.99);
        }
    }

    #[tokio::test]
    async fn reingestion_duplicates_records() {
        let store = Arc::new(MemoryVectorStore::new());
        let loader = loader(store.clone());
        let sources = [sentences(&["a", "b"])];

        loader.load(&sources).await;
        assert_eq!(store.count().await.unwrap(), 2);

        loader.load(&sources).await;
        assert_eq!(store.count().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn failed_unit_is_skipped_and_the_rest_still_land() {
        let store = Arc::new(MemoryVectorStore::new());
        let inserted = loader(store.clone())
            .load(&[sentences(&["good", "poisoned text", "also good"])])
            .await;

        assert_eq!(inserted, 2);
        assert_eq!(store.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn missing_pdf_source_is_not_fatal() {
        let store = Arc::new(MemoryVectorStore::new());
        let sources = [
            CorpusSource::PdfDocument {
                name: "ghost".to_string(),
                path: PathBuf::from("/nonexistent/ghost.pdf"),
            },
            sentences(&["still indexed"]),
        ];

        let inserted = loader(store.clone()).load(&sources).await;
        assert_eq!(inserted, 1);
    }

    #[test]
    fn builtin_profiles_are_non_empty_sentences() {
        let profiles = builtin_profiles();
        assert_eq!(profiles.len(), 4);
        assert!(profiles.iter().all(|p| !p.trim().is_empty()));
    }
}
