use std::env;
use std::fs;
use std::path::PathBuf;

/// Which vector store backend to open at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    Sqlite,
}

/// Service configuration, read once at startup from process environment
/// variables. There is no persisted configuration file; invalid values fall
/// back to defaults rather than aborting startup.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub ollama_url: String,
    pub chat_model: String,
    pub rag_model: String,
    pub embedding_model: String,
    pub corpus_pdf: PathBuf,
    pub store_backend: StoreBackend,
    pub data_dir: PathBuf,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            ollama_url: "http://localhost:11434".to_string(),
            chat_model: "gemma3".to_string(),
            rag_model: "gemma3:4B".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            corpus_pdf: PathBuf::from("assets/vehicle_specs.pdf"),
            store_backend: StoreBackend::Memory,
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl ServiceConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let config = Self {
            port: env::var("RAGSERVE_PORT")
                .ok()
                .and_then(|val| val.parse::<u16>().ok())
                .unwrap_or(defaults.port),
            ollama_url: env_or("RAGSERVE_OLLAMA_URL", &defaults.ollama_url),
            chat_model: env_or("RAGSERVE_CHAT_MODEL", &defaults.chat_model),
            rag_model: env_or("RAGSERVE_RAG_MODEL", &defaults.rag_model),
            embedding_model: env_or("RAGSERVE_EMBEDDING_MODEL", &defaults.embedding_model),
            corpus_pdf: env::var("RAGSERVE_CORPUS_PDF")
                .map(PathBuf::from)
                .unwrap_or(defaults.corpus_pdf),
            store_backend: env::var("RAGSERVE_STORE")
                .ok()
                .map(|val| parse_store_backend(&val))
                .unwrap_or(defaults.store_backend),
            data_dir: env::var("RAGSERVE_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        };

        let _ = fs::create_dir_all(&config.data_dir);
        config
    }

    pub fn log_dir(&self) -> PathBuf {
        self.data_dir.join("logs")
    }

    pub fn sqlite_db_path(&self) -> PathBuf {
        self.data_dir.join("ragserve.db")
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_store_backend(value: &str) -> StoreBackend {
    match value.trim().to_ascii_lowercase().as_str() {
        "sqlite" => StoreBackend::Sqlite,
        "memory" => StoreBackend::Memory,
        other => {
            tracing::warn!("Unknown store backend '{}'; using in-memory store", other);
            StoreBackend::Memory
        }
    }
}
