#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use qllama_server::{AppState, ServerConfig, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing logger
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,qllama_server=debug".into()),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::default();
    let state = AppState::new(&config);
    let app = router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(addr = %addr, bin = %config.bin, model = %config.model, "qllama server starting");
    tracing::info!("Ollama-compatible endpoints available, streaming supported");

    axum::serve(listener, app).await?;

    Ok(())
}
