use crate::{
    error::{Result, StudioError, ValidationError},
    gemini::ImageService,
    logger,
    models::{
        wire::{
            Content, GenerateContentRequest, GenerationConfig, Modality, OutputOptions, Part,
            PredictInstance, PredictParameters, PredictRequest,
        },
        GeneratedResult, GenerationMode, GenerationOutcome, GenerationSettings, UploadedImage,
        DEFAULT_ASPECT_RATIO,
    },
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::sync::Arc;

pub const OUTPUT_MIME_TYPE: &str = "image/jpeg";
pub const GENERATE_FAILED_MESSAGE: &str = "Error: Could not generate images. Check the console.";
pub const EDIT_FAILED_MESSAGE: &str = "Error: Could not edit the image. Check the console.";

/// Everything one generation call needs, borrowed from the controller state.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub model_id: &'a str,
    pub mode: GenerationMode,
    pub prompt: &'a str,
    pub settings: &'a GenerationSettings,
    pub uploads: &'a [UploadedImage],
}

/// A validated request, ready to send. Building one never touches the network.
#[derive(Debug, Clone)]
pub enum GenerationPlan {
    Batch {
        model: String,
        request: PredictRequest,
    },
    Edit {
        model: String,
        request: GenerateContentRequest,
    },
}

impl GenerationPlan {
    pub fn build(request: &GenerationRequest<'_>) -> std::result::Result<Self, ValidationError> {
        if request.prompt.trim().is_empty() {
            return Err(ValidationError::MissingPrompt);
        }

        match request.mode {
            GenerationMode::ImageEdit => {
                if request.uploads.is_empty() {
                    return Err(ValidationError::MissingReferenceImage);
                }
                let mut parts: Vec<Part> = request
                    .uploads
                    .iter()
                    .map(|image| Part::inline(image.media_type.clone(), image.base64()))
                    .collect();
                parts.push(Part::text(request.prompt));

                Ok(GenerationPlan::Edit {
                    model: request.model_id.to_string(),
                    request: GenerateContentRequest {
                        contents: vec![Content { role: None, parts }],
                        generation_config: GenerationConfig {
                            response_modalities: vec![Modality::Image, Modality::Text],
                        },
                    },
                })
            }
            GenerationMode::TextToImage | GenerationMode::TextToImageUltra => {
                let (sample_count, aspect_ratio) = if request.mode.is_ultra() {
                    (1, DEFAULT_ASPECT_RATIO.to_string())
                } else {
                    (
                        request.settings.batch_size,
                        request.settings.aspect_ratio.clone(),
                    )
                };

                Ok(GenerationPlan::Batch {
                    model: request.model_id.to_string(),
                    request: PredictRequest {
                        instances: vec![PredictInstance {
                            prompt: request.prompt.to_string(),
                        }],
                        parameters: PredictParameters {
                            sample_count,
                            aspect_ratio,
                            output_options: OutputOptions {
                                mime_type: OUTPUT_MIME_TYPE.to_string(),
                            },
                        },
                    },
                })
            }
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, GenerationPlan::Edit { .. })
    }

    fn failure_message(&self) -> &'static str {
        if self.is_edit() {
            EDIT_FAILED_MESSAGE
        } else {
            GENERATE_FAILED_MESSAGE
        }
    }
}

#[derive(Clone)]
pub struct GenerationDispatcher {
    service: Arc<dyn ImageService>,
}

impl GenerationDispatcher {
    pub fn new(service: Arc<dyn ImageService>) -> Self {
        Self { service }
    }

    /// Validate, then run the matching strategy.
    pub async fn generate(&self, request: &GenerationRequest<'_>) -> Result<GenerationOutcome> {
        let plan = GenerationPlan::build(request)?;
        self.execute(plan).await
    }

    /// Send one request for an already validated plan.
    pub async fn execute(&self, plan: GenerationPlan) -> Result<GenerationOutcome> {
        let failure_message = plan.failure_message();
        let timer = logger::timer(if plan.is_edit() { "image edit" } else { "image generation" });

        let outcome = match plan {
            GenerationPlan::Batch { model, request } => self.run_batch(&model, &request).await,
            GenerationPlan::Edit { model, request } => self.run_edit(&model, &request).await,
        };

        outcome.map_err(|e| {
            log::error!("Generation failed [req:{}]: {}", timer.request_id(), e);
            StudioError::generation(failure_message, e)
        })
    }

    async fn run_batch(&self, model: &str, request: &PredictRequest) -> Result<GenerationOutcome> {
        let response = self.service.generate_images(model, request).await?;

        // Ordinal is the response index, counting filtered predictions.
        let payloads = response
            .predictions
            .iter()
            .enumerate()
            .filter_map(|(ordinal, prediction)| {
                prediction.bytes_base64_encoded.as_deref().map(|data| {
                    let media_type = prediction.mime_type.as_deref().unwrap_or(OUTPUT_MIME_TYPE);
                    (ordinal, data, Some(media_type))
                })
            });
        let results = project(payloads)?;

        log::info!("Received {} image(s)", results.len());
        Ok(GenerationOutcome::Images(results))
    }

    async fn run_edit(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerationOutcome> {
        let response = self.service.generate_content(model, request).await?;

        let mut payloads = Vec::new();
        for part in response.parts() {
            if let Some(inline) = &part.inline_data {
                let ordinal = payloads.len();
                payloads.push((ordinal, inline.data.as_str(), Some(inline.mime_type.as_str())));
            } else if let Some(text) = &part.text {
                log::debug!("Model text part: {}", text);
            }
        }

        if payloads.is_empty() {
            let text = response.text();
            log::info!("Model Response: {}", text);
            return Ok(GenerationOutcome::NoImage { text });
        }

        let results = project(payloads)?;
        log::info!("Received {} edited image(s)", results.len());
        Ok(GenerationOutcome::Images(results))
    }
}

/// Decode base64 payloads into results, keeping the ordinal each one arrived with.
fn project<'a, I>(payloads: I) -> Result<Vec<GeneratedResult>>
where
    I: IntoIterator<Item = (usize, &'a str, Option<&'a str>)>,
{
    payloads
        .into_iter()
        .map(|(ordinal, data, media_type)| {
            let bytes = STANDARD
                .decode(data)
                .map_err(|e| StudioError::Response(format!("image {}: {}", ordinal, e)))?;
            Ok(GeneratedResult {
                bytes,
                media_type: media_type.map(str::to_string),
                ordinal,
            })
        })
        .collect()
}
