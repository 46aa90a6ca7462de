use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::ports::embedding_provider::{EmbeddingProvider, EmbeddingProviderError};

#[derive(Serialize)]
pub struct EmbeddingsRequest {
    pub text: Vec<String>,
}

#[derive(Deserialize)]
pub struct EmbeddingsResponse {
    #[serde(default = "default_success")]
    pub success: bool,
    pub embeddings: Vec<Vec<f32>>,
}

fn default_success() -> bool {
    true
}

#[derive(Debug, Clone)]
pub struct EmbeddingsClientConfig {
    pub service_url: String,
    pub model_name: String,
    pub dimension: usize,
    pub timeout_secs: u64,
}

/// Client for a remote embedding service speaking
/// `{"text": ...}` → `{"embeddings": [[...]]}`. One attempt per call.
#[derive(Debug, Clone)]
pub struct InferenceClient {
    client: Client,
    config: EmbeddingsClientConfig,
}

impl InferenceClient {
    pub fn new(config: EmbeddingsClientConfig) -> Result<Self, EmbeddingProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EmbeddingProviderError::NetworkError(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub async fn get_embeddings(
        &self,
        texts: &[String],
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let request = EmbeddingsRequest {
            text: texts.to_vec(),
        };

        self.execute_request(&request).await
    }

    async fn execute_request(
        &self,
        request: &EmbeddingsRequest,
    ) -> Result<EmbeddingsResponse, EmbeddingProviderError> {
        let response = self
            .client
            .post(&self.config.service_url)
            .json(request)
            .send()
            .await
            .map_err(|e| EmbeddingProviderError::NetworkError(e.without_url().to_string()))?;

        let status = response.status();
        if status.is_server_error() {
            return Err(EmbeddingProviderError::ServiceUnavailable);
        }
        if !status.is_success() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Embedding service returned {}",
                status
            )));
        }

        let body = response
            .json::<EmbeddingsResponse>()
            .await
            .map_err(|e| EmbeddingProviderError::ApiError(e.to_string()))?;

        if !body.success {
            return Err(EmbeddingProviderError::ApiError(
                "Embedding service reported failure".to_string(),
            ));
        }

        Ok(body)
    }
}

/// [`EmbeddingProvider`] backed by an [`InferenceClient`].
pub struct InferenceEmbeddingProvider {
    client: InferenceClient,
}

impl InferenceEmbeddingProvider {
    pub fn new(client: InferenceClient) -> Self {
        Self { client }
    }

    fn validate(&self, texts: &[String], embeddings: &[Vec<f32>]) -> Result<(), EmbeddingProviderError> {
        if embeddings.len() != texts.len() {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }

        let dimension = self.client.config.dimension;
        if let Some(bad) = embeddings.iter().find(|v| v.len() != dimension) {
            return Err(EmbeddingProviderError::ApiError(format!(
                "Expected {}-dimensional vector, got {}",
                dimension,
                bad.len()
            )));
        }

        Ok(())
    }
}

#[async_trait]
impl EmbeddingProvider for InferenceEmbeddingProvider {
    async fn embed_query(&self, text: &str) -> Result<Vec<f32>, EmbeddingProviderError> {
        let mut embeddings = self.embed_documents(&[text.to_string()]).await?;
        embeddings
            .pop()
            .ok_or_else(|| EmbeddingProviderError::ApiError("No embeddings returned".to_string()))
    }

    async fn embed_documents(
        &self,
        texts: &[String],
    ) -> Result<Vec<Vec<f32>>, EmbeddingProviderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let response = self.client.get_embeddings(texts).await?;
        self.validate(texts, &response.embeddings)?;

        Ok(response.embeddings)
    }

    fn model_info(&self) -> (String, Option<String>) {
        (self.client.config.model_name.clone(), None)
    }

    fn embedding_dimension(&self) -> usize {
        self.client.config.dimension
    }
}
