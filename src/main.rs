use anyhow::{Context, Result};
use clap::Parser;
use meeting_relay::{create_router, AppState, AzureSpeechEngine, Config, RecognitionAdapter};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "meeting-relay", about = "Real-time meeting transcription relay")]
struct Args {
    /// Path to the config file (without extension)
    #[arg(long, default_value = "config/meeting-relay")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;

    info!("{} v0.1.0", cfg.service.name);
    info!("Speech region: {}", cfg.speech.region);
    info!("Speech languages: {}", cfg.speech.languages.join(", "));

    let engine = Arc::new(AzureSpeechEngine::new(&cfg.speech));
    let state = AppState::new(RecognitionAdapter::new(engine));
    let router = create_router(state);

    let addr = format!("{}:{}", cfg.service.http.bind, cfg.service.http.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("HTTP server listening on {}", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
