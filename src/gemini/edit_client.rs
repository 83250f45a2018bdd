use crate::{
    error::Result,
    gemini::HttpTransport,
    models::wire::{GenerateContentRequest, GenerateContentResponse},
};

#[derive(Clone)]
pub struct EditClient {
    transport: HttpTransport,
}

impl EditClient {
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    pub async fn generate(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let image_parts = request
            .contents
            .iter()
            .flat_map(|content| content.parts.iter())
            .filter(|part| part.inline_data.is_some())
            .count();
        log::info!(
            "Editing {} reference image(s) with model: {}",
            image_parts,
            model
        );

        let response: GenerateContentResponse = self
            .transport
            .post(model, "generateContent", request)
            .await?;

        if let Some(reason) = response
            .candidates
            .first()
            .and_then(|candidate| candidate.finish_reason.as_deref())
        {
            log::debug!("Finish reason: {}", reason);
        }

        Ok(response)
    }
}
