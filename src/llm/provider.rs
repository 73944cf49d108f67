use async_trait::async_trait;

use super::types::ChatRequest;
use crate::core::errors::PipelineError;

/// Narrow interface over a chat/embedding backend.
///
/// Implementations must be safe for concurrent use; the orchestrator holds
/// one shared instance across all requests.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// return the provider name (e.g. "ollama")
    fn name(&self) -> &str;

    /// check if the provider is healthy/reachable
    async fn health_check(&self) -> Result<bool, PipelineError>;

    /// chat completion (non-streaming)
    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, PipelineError>;

    /// generate embeddings, one vector per input, in input order
    async fn embed(
        &self,
        inputs: &[String],
        model_id: &str,
    ) -> Result<Vec<Vec<f32>>, PipelineError>;
}
