use std::sync::Arc;

use crate::core::config::{ServiceConfig, StoreBackend};
use crate::core::errors::PipelineError;
use crate::llm::{LlmProvider, OllamaProvider};
use crate::rag::loader::builtin_profiles;
use crate::rag::{
    CorpusLoader, CorpusSource, MemoryVectorStore, QueryEngine, SqliteVectorStore, VectorStore,
};

/// Global application state shared across all routes.
///
/// Clients are constructor-injected once at startup; request handlers only
/// read from here.
pub struct AppState {
    pub config: ServiceConfig,
    pub store: Arc<dyn VectorStore>,
    pub llm: Arc<dyn LlmProvider>,
    pub engine: QueryEngine,
}

impl AppState {
    /// Builds the provider, opens the configured store backend and wires
    /// the query engine. Does not ingest anything; the entry point calls
    /// [`AppState::ingest_corpus`] explicitly before serving traffic.
    pub async fn initialize(config: ServiceConfig) -> Result<Arc<Self>, PipelineError> {
        let llm: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::new(config.ollama_url.clone()));

        let store: Arc<dyn VectorStore> = match config.store_backend {
            StoreBackend::Memory => Arc::new(MemoryVectorStore::new()),
            StoreBackend::Sqlite => {
                Arc::new(SqliteVectorStore::with_path(config.sqlite_db_path()).await?)
            }
        };

        let engine = QueryEngine::new(
            store.clone(),
            llm.clone(),
            config.embedding_model.clone(),
        );

        Ok(Arc::new(AppState {
            config,
            store,
            llm,
            engine,
        }))
    }

    /// One-time, sequential, best-effort corpus ingestion: the built-in
    /// profile sentences plus the configured PDF document. All sources land
    /// in the one shared store. Returns how many records were inserted.
    pub async fn ingest_corpus(&self) -> usize {
        let sources = [
            CorpusSource::Sentences {
                name: "profiles".to_string(),
                items: builtin_profiles(),
            },
            CorpusSource::PdfDocument {
                name: "vehicle_specs".to_string(),
                path: self.config.corpus_pdf.clone(),
            },
        ];

        let loader = CorpusLoader::new(
            self.store.clone(),
            self.llm.clone(),
            self.config.embedding_model.clone(),
        );
        loader.load(&sources).await
    }
}
