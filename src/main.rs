use std::process::ExitCode;

use medirag::infrastructure::{AppContainer, IngestionConfig};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match IngestionConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let container = match AppContainer::new(&config) {
        Ok(container) => container,
        Err(e) => {
            tracing::error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match container.ingest_documents_use_case.execute().await {
        Ok(outcome) => {
            let summary = outcome.summary();
            tracing::info!(
                "Ingested {} files: {} pages, {} chunks, {} embeddings.",
                summary.files,
                summary.documents,
                summary.chunks,
                summary.embeddings
            );
            match serde_json::to_string_pretty(&summary) {
                Ok(json) => println!("{}", json),
                Err(e) => tracing::error!("Failed to serialize summary: {}", e),
            }
            ExitCode::SUCCESS
        }
        // Already logged where it was raised.
        Err(_) => ExitCode::FAILURE,
    }
}
