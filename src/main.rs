use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;

use ragserve::core::config::ServiceConfig;
use ragserve::core::logging;
use ragserve::llm::LlmProvider;
use ragserve::server::router;
use ragserve::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env();
    logging::init(&config.log_dir());

    let state = AppState::initialize(config)
        .await
        .context("Failed to initialize application state")?;

    match state.llm.health_check().await {
        Ok(true) => tracing::info!("Chat backend reachable at {}", state.config.ollama_url),
        _ => tracing::warn!(
            "Chat backend not reachable at {}; asks will fail until it is up",
            state.config.ollama_url
        ),
    }

    let indexed = state.ingest_corpus().await;
    tracing::info!("Corpus ingestion complete: {} records indexed", indexed);

    let bind_addr = format!("127.0.0.1:{}", state.config.port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", bind_addr))?;
    tracing::info!("Listening on {}", listener.local_addr()?);

    let app: Router = router::router(state);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
