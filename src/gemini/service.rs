use crate::{
    error::Result,
    models::wire::{
        GenerateContentRequest, GenerateContentResponse, PredictRequest, PredictResponse,
    },
};
use async_trait::async_trait;

/// The remote generative-image service, one call per generation.
#[async_trait]
pub trait ImageService: Send + Sync {
    /// Text-to-image (`predict`).
    async fn generate_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<PredictResponse>;

    /// Multimodal generation (`generateContent`), used for edits.
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}
