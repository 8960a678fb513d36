use anyhow::{Context, Result};
use clearclause::{
    analysis::AnalysisService, api, completion::OpenAiCompletionClient, config,
    extraction::PdfTextExtractor, logging,
};
use std::net::Ipv4Addr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    logging::init_tracing();

    let config = config::load_config().inspect_err(|error| {
        tracing::error!(%error, "Refusing to start without a valid configuration");
    })?;

    let completion_client =
        OpenAiCompletionClient::new(&config).context("failed to build completion client")?;
    let service = AnalysisService::new(
        Box::new(completion_client),
        Box::new(PdfTextExtractor::new()),
    );
    let app = api::create_router(Arc::new(service), &config);

    let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, config.server_port))
        .await
        .with_context(|| format!("failed to bind port {}", config.server_port))?;
    tracing::info!(
        model = %config.completion_model,
        "Listening on http://0.0.0.0:{}",
        config.server_port
    );
    axum::serve(listener, app)
        .await
        .context("HTTP server terminated unexpectedly")?;

    Ok(())
}
