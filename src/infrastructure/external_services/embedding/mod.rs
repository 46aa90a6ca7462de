pub mod fastembed_provider;
pub mod inference_client;

pub use fastembed_provider::FastEmbedProvider;
pub use inference_client::{EmbeddingsClientConfig, InferenceClient, InferenceEmbeddingProvider};
