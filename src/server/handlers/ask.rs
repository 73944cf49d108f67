use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use crate::core::errors::ApiError;
use crate::rag::prompt;
use crate::state::AppState;

/// Retrieval breadth is fixed per endpoint, not caller-supplied.
const RAG_ASK_TOP_K: usize = 10;
const CARS_RAG_TOP_K: usize = 3;

const RAG_TEMPERATURE: f64 = 0.7;

#[derive(Debug, Deserialize)]
pub struct AskQuery {
    #[serde(default = "default_question")]
    pub question: String,
}

fn default_question() -> String {
    "Tell me a joke".to_string()
}

/// `GET /ai/ask` — direct passthrough; the reply is the raw body.
pub async fn ask(
    State(state): State<Arc<AppState>>,
    Query(query): Query<AskQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let answer = state
        .engine
        .ask_direct(&query.question, &state.config.chat_model, None)
        .await?;
    Ok(answer)
}

#[derive(Debug, Deserialize)]
pub struct VideogameQuery {
    #[serde(default = "default_videogame")]
    pub videogame: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_brief_temperature")]
    pub temperature: f64,
}

fn default_videogame() -> String {
    "The Witcher".to_string()
}

fn default_brief_temperature() -> f64 {
    0.4
}

/// `GET /ai/videogames/info` — templated direct ask, no retrieval.
pub async fn videogame_info(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VideogameQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let model = query
        .model
        .unwrap_or_else(|| state.config.chat_model.clone());
    let rendered = prompt::videogame_brief(&query.videogame);

    let answer = state
        .engine
        .ask_direct(&rendered, &model, Some(query.temperature))
        .await?;

    Ok(Json(json!({ "response": answer })))
}

#[derive(Debug, Deserialize)]
pub struct RagAskQuery {
    pub question: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default = "default_rag_temperature")]
    pub temperature: f64,
}

fn default_rag_temperature() -> f64 {
    RAG_TEMPERATURE
}

/// `GET /ai/rag/ask` — wide retrieval over the whole corpus.
pub async fn rag_ask(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RagAskQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let model = query
        .model
        .unwrap_or_else(|| state.config.rag_model.clone());

    let answer = state
        .engine
        .ask_with_context(
            &query.question,
            RAG_ASK_TOP_K,
            &model,
            Some(query.temperature),
        )
        .await?;

    Ok(Json(json!({ "response": answer })))
}

#[derive(Debug, Deserialize)]
pub struct CarsRagQuery {
    pub question: String,
}

/// `GET /ai/cars/rag` — narrow retrieval aimed at the vehicle document.
pub async fn cars_rag(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CarsRagQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let answer = state
        .engine
        .ask_with_context(
            &query.question,
            CARS_RAG_TOP_K,
            &state.config.chat_model,
            Some(RAG_TEMPERATURE),
        )
        .await?;

    Ok(Json(json!({ "response": answer })))
}
