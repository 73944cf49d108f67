//! Request-time query orchestration.
//!
//! Two flows: a direct ask that templates a prompt and calls the chat
//! model, and a context-augmented ask that first retrieves the most
//! similar stored texts and grounds the prompt in them.

use std::sync::Arc;

use super::prompt;
use super::store::VectorStore;
use crate::core::errors::PipelineError;
use crate::llm::types::ChatRequest;
use crate::llm::LlmProvider;

/// Separator between retrieved texts in the context block.
const CONTEXT_SEPARATOR: &str = "\n\n";

pub struct QueryEngine {
    store: Arc<dyn VectorStore>,
    llm: Arc<dyn LlmProvider>,
    embedding_model: String,
}

impl QueryEngine {
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

    /// Send the prompt to the chat model as-is. Never touches the store.
    pub async fn ask_direct(
        &self,
        prompt: &str,
        model: &str,
        temperature: Option<f64>,
    ) -> Result<String, PipelineError> {
        let request = ChatRequest::user(prompt).with_temperature(temperature);
        self.llm.chat(request, model).await
    }

    /// Retrieve the `top_k` most similar records, ground the prompt in
    /// them and call the chat model.
    ///
    /// Zero retrieval results are not special-cased: the context block is
    /// empty and the template instructs the model to say the context is
    /// insufficient.
    pub async fn ask_with_context(
        &self,
        question: &str,
        top_k: usize,
        model: &str,
        temperature: Option<f64>,
    ) -> Result<String, PipelineError> {
        let query_embedding = self
            .llm
            .embed(&[question.to_string()], &self.embedding_model)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                PipelineError::Embedding("embedding backend returned no vector".to_string())
            })?;

        let hits = self.store.search(&query_embedding, top_k).await?;

        let context = hits
            .iter()
            .map(|hit| hit.record.content.as_str())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR);

        let rendered = prompt::grounded_answer(&context, question);
        let request = ChatRequest::user(rendered).with_temperature(temperature);
        self.llm.chat(request, model).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::store::{DocumentRecord, SearchHit};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Chat stub: replies with a fixed string, or echoes the rendered
    /// prompt when none is given. Embeds everything to a unit vector.
    struct StubLlm {
        reply: Option<&'static str>,
    }

    #[async_trait]
    impl LlmProvider for StubLlm {
        fn name(&self) -> &str {
            "stub"
        }

        async fn health_check(&self) -> Result<bool, PipelineError> {
            Ok(true)
        }

        async fn chat(
            &self,
            request: ChatRequest,
            _model_id: &str,
        ) -> Result<String, PipelineError> {
            match self.reply {
                Some(reply) => Ok(reply.to_string()),
                None => Ok(request.messages[0].content.clone()),
            }
        }

        async fn embed(
            &self,
            inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, PipelineError> {
            Ok(inputs.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    /// Store stub returning fixed hits, counting how often it is searched.
    struct FixedStore {
        hits: Vec<SearchHit>,
        searches: AtomicUsize,
    }

    impl FixedStore {
        fn with_hits(hits: Vec<SearchHit>) -> Self {
            Self {
                hits,
                searches: AtomicUsize::new(0),
            }
        }

        fn empty() -> Self {
            Self::with_hits(Vec::new())
        }
    }

    #[async_trait]
    impl VectorStore for FixedStore {
        async fn insert(
            &self,
            _record: DocumentRecord,
            _embedding: Vec<f32>,
        ) -> Result<(), PipelineError> {
            Ok(())
        }

        async fn insert_batch(
            &self,
            _items: Vec<(DocumentRecord, Vec<f32>)>,
        ) -> Result<(), PipelineError> {
            Ok(())
        }

        async fn search(
            &self,
            _query_embedding: &[f32],
            limit: usize,
        ) -> Result<Vec<SearchHit>, PipelineError> {
            self.searches.fetch_add(1, Ordering::SeqCst);
            let mut hits = self.hits.clone();
            hits.truncate(limit);
            Ok(hits)
        }

        async fn count(&self) -> Result<usize, PipelineError> {
            Ok(self.hits.len())
        }

        async fn clear(&self) -> Result<usize, PipelineError> {
            Ok(0)
        }
    }

    fn hit(content: &str, score: f32) -> SearchHit {
        SearchHit {
            record: DocumentRecord::new(content, "test"),
            score,
        }
    }

    #[tokio::test]
    async fn ask_direct_returns_the_chat_reply_verbatim() {
        let store = Arc::new(FixedStore::empty());
        let engine = QueryEngine::new(
            store.clone(),
            Arc::new(StubLlm { reply: Some("OK") }),
            "embed".to_string(),
        );

        let answer = engine.ask_direct("Foo", "m", Some(0.4)).await.unwrap();
        assert_eq!(answer, "OK");
    }

    #[tokio::test]
    async fn ask_direct_never_touches_the_store() {
        let store = Arc::new(FixedStore::empty());
        let engine = QueryEngine::new(
            store.clone(),
            Arc::new(StubLlm { reply: Some("OK") }),
            "embed".to_string(),
        );

        engine.ask_direct("Foo", "m", None).await.unwrap();
        assert_eq!(store.searches.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn ask_with_context_grounds_the_prompt_in_ranked_hits() {
        let store = Arc::new(FixedStore::with_hits(vec![
            hit("most relevant fact", 0.9),
            hit("second fact", 0.5),
        ]));
        let engine = QueryEngine::new(
            store.clone(),
            Arc::new(StubLlm { reply: None }),
            "embed".to_string(),
        );

        let prompt = engine
            .ask_with_context("what gives?", 3, "m", Some(0.7))
            .await
            .unwrap();

        let first = prompt.find("most relevant fact").unwrap();
        let second = prompt.find("second fact").unwrap();
        assert!(first < second);
        assert!(prompt.contains("what gives?"));
        assert_eq!(store.searches.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn ask_with_context_respects_top_k() {
        let store = Arc::new(FixedStore::with_hits(vec![
            hit("one", 0.9),
            hit("two", 0.8),
            hit("three", 0.7),
        ]));
        let engine = QueryEngine::new(
            store,
            Arc::new(StubLlm { reply: None }),
            "embed".to_string(),
        );

        let prompt = engine
            .ask_with_context("q", 2, "m", None)
            .await
            .unwrap();
        assert!(prompt.contains("one"));
        assert!(prompt.contains("two"));
        assert!(!prompt.contains("three"));
    }

    #[tokio::test]
    async fn ask_with_context_completes_on_an_empty_store() {
        let store = Arc::new(FixedStore::empty());
        let engine = QueryEngine::new(
            store,
            Arc::new(StubLlm { reply: None }),
            "embed".to_string(),
        );

        let prompt = engine
            .ask_with_context("anything out there?", 10, "m", None)
            .await
            .unwrap();
        assert!(prompt.contains("Context:\n\n"));
        assert!(prompt.contains("anything out there?"));
    }
}
