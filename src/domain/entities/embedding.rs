use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Embedding {
    chunk_id: Uuid,
    model_name: String,
    vector: Vec<f32>,
}

impl Embedding {
    pub fn new(chunk_id: Uuid, model_name: String, vector: Vec<f32>) -> Self {
        Self {
            chunk_id,
            model_name,
            vector,
        }
    }

    pub fn chunk_id(&self) -> Uuid {
        self.chunk_id
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    pub fn vector(&self) -> &[f32] {
        &self.vector
    }

    pub fn dimension(&self) -> usize {
        self.vector.len()
    }

    pub fn is_compatible_with(&self, other: &Embedding) -> bool {
        self.model_name == other.model_name && self.dimension() == other.dimension()
    }

    pub fn cosine_similarity(&self, other: &Embedding) -> Result<f32, String> {
        if !self.is_compatible_with(other) {
            return Err("Embeddings are not compatible for similarity calculation".to_string());
        }

        let dot_product: f32 = self
            .vector
            .iter()
            .zip(other.vector.iter())
            .map(|(x, y)| x * y)
            .sum();
        let norm_a = self.magnitude();
        let norm_b = other.magnitude();

        if norm_a == 0.0 || norm_b == 0.0 {
            return Err("Cannot calculate similarity with zero vector".to_string());
        }

        Ok(dot_product / (norm_a * norm_b))
    }

    pub fn magnitude(&self) -> f32 {
        self.vector.iter().map(|x| x * x).sum::<f32>().sqrt()
    }

    pub fn belongs_to_chunk(&self, chunk_id: Uuid) -> bool {
        self.chunk_id == chunk_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedding_creation() {
        let chunk_id = Uuid::new_v4();
        let embedding = Embedding::new(chunk_id, "test-model".to_string(), vec![0.1, 0.2, 0.3]);

        assert!(embedding.belongs_to_chunk(chunk_id));
        assert_eq!(embedding.model_name(), "test-model");
        assert_eq!(embedding.dimension(), 3);
    }

    #[test]
    fn test_compatibility() {
        let a = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![0.1, 0.2, 0.3]);
        let b = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![0.4, 0.5, 0.6]);
        let c = Embedding::new(Uuid::new_v4(), "other".to_string(), vec![0.4, 0.5, 0.6]);
        let d = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![0.4, 0.5]);

        assert!(a.is_compatible_with(&b));
        assert!(!a.is_compatible_with(&c));
        assert!(!a.is_compatible_with(&d));
    }

    #[test]
    fn test_cosine_similarity() {
        let a = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![1.0, 0.0, 0.0]);
        let b = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![1.0, 0.0, 0.0]);
        let c = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![0.0, 1.0, 0.0]);

        assert!((a.cosine_similarity(&b).unwrap() - 1.0).abs() < 1e-6);
        assert!(a.cosine_similarity(&c).unwrap().abs() < 1e-6);
    }

    #[test]
    fn test_zero_vector_similarity_fails() {
        let a = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![0.0, 0.0]);
        let b = Embedding::new(Uuid::new_v4(), "m".to_string(), vec![1.0, 0.0]);
        assert!(a.cosine_similarity(&b).is_err());
    }
}
