use std::sync::Arc;

use crate::{
    application::{
        ports::{DocumentExtractor, TextSplitter, embedding_provider::EmbeddingProviderError},
        services::{ChunkingService, DocumentLoaderService, EmbeddingModelHandle, EmbeddingService},
        use_cases::IngestDocumentsUseCase,
    },
    error::{PipelineError, PipelineResult},
    infrastructure::{
        config::{EmbeddingBackend, EmbeddingConfig, IngestionConfig},
        external_services::{
            FastEmbedProvider, PdfExtractor, RTSplitter,
            embedding::{
                EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider,
                fastembed_provider::resolve_model,
            },
        },
    },
};

pub struct AppContainer {
    // External Services
    pub document_extractor: Arc<dyn DocumentExtractor>,
    pub text_splitter: Arc<dyn TextSplitter>,

    // Application Services
    pub document_loader: Arc<DocumentLoaderService>,
    pub chunking_service: Arc<ChunkingService>,
    pub embedding_service: Arc<EmbeddingService>,

    // Use Cases
    pub ingest_documents_use_case: Arc<IngestDocumentsUseCase>,
}

impl AppContainer {
    pub fn new(config: &IngestionConfig) -> PipelineResult<Self> {
        config.validate()?;

        let document_extractor: Arc<dyn DocumentExtractor> = Arc::new(PdfExtractor::new());
        let text_splitter: Arc<dyn TextSplitter> = Arc::new(
            RTSplitter::new(config.chunk_size, config.chunk_overlap)
                .map_err(|e| PipelineError::Configuration(e.to_string()))?,
        );

        let document_loader = Arc::new(DocumentLoaderService::new(
            config.data_path.clone(),
            document_extractor.clone(),
        ));
        let chunking_service = Arc::new(ChunkingService::new(text_splitter.clone()));

        let embedding_config = config.embedding.clone();
        let embedding_service = Arc::new(EmbeddingService::new(
            config.embedding.model_name.clone(),
            move || load_embedding_model(&embedding_config),
        ));

        let ingest_documents_use_case = Arc::new(IngestDocumentsUseCase::new(
            document_loader.clone(),
            chunking_service.clone(),
            embedding_service.clone(),
        ));

        Ok(Self {
            document_extractor,
            text_splitter,
            document_loader,
            chunking_service,
            embedding_service,
            ingest_documents_use_case,
        })
    }
}

/// Builds the embedding backend selected by `config`.
pub fn load_embedding_model(
    config: &EmbeddingConfig,
) -> Result<EmbeddingModelHandle, EmbeddingProviderError> {
    match &config.backend {
        EmbeddingBackend::Local => Ok(Arc::new(FastEmbedProvider::new(
            &config.model_name,
            config.cache_dir.clone(),
        )?)),
        EmbeddingBackend::Remote {
            service_url,
            timeout_secs,
        } => {
            let (_, dimension) = resolve_model(&config.model_name).ok_or_else(|| {
                EmbeddingProviderError::InvalidInput(format!(
                    "Unknown embedding dimension for model: {}",
                    config.model_name
                ))
            })?;

            let client = InferenceClient::new(EmbeddingsClientConfig {
                service_url: service_url.clone(),
                model_name: config.model_name.clone(),
                dimension,
                timeout_secs: *timeout_secs,
            })?;

            Ok(Arc::new(InferenceEmbeddingProvider::new(client)))
        }
    }
}
