use crate::{
    error::Result,
    gemini::HttpTransport,
    models::wire::{PredictRequest, PredictResponse},
};

#[derive(Clone)]
pub struct ImageClient {
    transport: HttpTransport,
}

impl ImageClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn generate(&self, model: &str, request: &PredictRequest) -> Result<PredictResponse> {
        log::info!(
            "Generating {} image(s) with model: {}",
            request.parameters.sample_count,
            model
        );

        let response: PredictResponse = self.transport.post(model, "predict", request).await?;

        for prediction in &response.predictions {
            if let Some(reason) = &prediction.rai_filtered_reason {
                log::warn!("Image filtered by the service: {}", reason);
            }
        }
        log::debug!("Received {} prediction(s)", response.predictions.len());

        Ok(response)
    }
}
