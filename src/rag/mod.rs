//! Retrieval-augmented generation pipeline.
//!
//! This module provides:
//! - `VectorStore`: pluggable similarity store over embedded documents
//! - `CorpusLoader`: startup-time ingestion of sentence lists and PDF text
//! - `QueryEngine`: request-time direct and context-augmented asks

pub mod engine;
pub mod extract;
pub mod loader;
pub mod memory;
pub mod prompt;
pub mod sqlite;
pub mod store;

pub use engine::QueryEngine;
pub use loader::{CorpusLoader, CorpusSource};
pub use memory::MemoryVectorStore;
pub use sqlite::SqliteVectorStore;
pub use store::{DocumentRecord, SearchHit, VectorStore};
