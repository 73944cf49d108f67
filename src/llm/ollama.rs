use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use super::provider::LlmProvider;
use super::types::ChatRequest;
use crate::core::errors::PipelineError;

const TEMPERATURE_MIN: f64 = 0.0;
const TEMPERATURE_MAX: f64 = 2.0;

/// Client for a local Ollama server (`/api/chat`, `/api/embed`).
#[derive(Clone)]
pub struct OllamaProvider {
    base_url: String,
    client: Client,
}

impl OllamaProvider {
    pub fn new(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[derive(Deserialize)]
struct OllamaChatResponse {
    message: OllamaChatMessage,
}

#[derive(Deserialize)]
struct OllamaChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct OllamaEmbedResponse {
    embeddings: Vec<Vec<f32>>,
}

fn validate_temperature(temperature: Option<f64>) -> Result<(), PipelineError> {
    if let Some(t) = temperature {
        if !(TEMPERATURE_MIN..=TEMPERATURE_MAX).contains(&t) {
            return Err(PipelineError::Generation(format!(
                "temperature {} outside valid range [{}, {}]",
                t, TEMPERATURE_MIN, TEMPERATURE_MAX
            )));
        }
    }
    Ok(())
}

#[async_trait]
impl LlmProvider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn health_check(&self) -> Result<bool, PipelineError> {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn chat(&self, request: ChatRequest, model_id: &str) -> Result<String, PipelineError> {
        validate_temperature(request.temperature)?;

        let url = format!("{}/api/chat", self.base_url);

        let mut body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": false,
        });

        if let Some(obj) = body.as_object_mut() {
            if let Some(t) = request.temperature {
                obj.insert("options".to_string(), json!({ "temperature": t }));
            }
        }

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Generation(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Generation(format!(
                "chat backend returned {}: {}",
                status, text
            )));
        }

        let payload: OllamaChatResponse = res
            .json()
            .await
            .map_err(|e| PipelineError::Generation(e.to_string()))?;

        Ok(payload.message.content)
    }

    async fn embed(
        &self,
        inputs: &[String],
        model_id: &str,
    ) -> Result<Vec<Vec<f32>>, PipelineError> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);

        let body = json!({
            "model": model_id,
            "input": inputs,
        });

        let res = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| PipelineError::Embedding(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(PipelineError::Embedding(format!(
                "embedding backend returned {}: {}",
                status, text
            )));
        }

        let parsed: OllamaEmbedResponse = res
            .json()
            .await
            .map_err(|e| PipelineError::Embedding(format!("invalid embed response: {}", e)))?;

        if parsed.embeddings.len() != inputs.len() {
            return Err(PipelineError::Embedding(format!(
                "embedding backend returned {} vectors for {} inputs",
                parsed.embeddings.len(),
                inputs.len()
            )));
        }

        Ok(parsed.embeddings)
    }
}
