//! Label analysis HTTP server.

mod config;
mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use analysis::{AnalysisPipeline, HttpContentFetcher, OpenAi, SerperSearchProvider};
use config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,analysis=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    tracing::info!("Starting label analysis server");

    let mut ai = OpenAi::new(config.openai_api_key.as_str());
    if let Some(base_url) = &config.openai_base_url {
        ai = ai.with_base_url(base_url.as_str());
    }
    if let Some(model) = &config.openai_model {
        ai = ai.with_model(model.as_str());
    }
    if let Some(model) = &config.openai_vision_model {
        ai = ai.with_vision_model(model.as_str());
    }

    let pipeline = AnalysisPipeline::new(
        ai.clone(),
        SerperSearchProvider::new(config.serper_api_key.as_str()),
        HttpContentFetcher::new(),
        ai,
    );

    let app = routes::router(Arc::new(pipeline))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(addr = %addr, "server listening");

    axum::serve(listener, app)
        .await
        .context("server exited with error")?;

    Ok(())
}
