pub mod edit_client;
pub mod image_client;
pub mod service;

use crate::{
    config::StudioConfig,
    error::{Result, StudioError},
    models::wire::{
        ApiErrorBody, GenerateContentRequest, GenerateContentResponse, PredictRequest,
        PredictResponse,
    },
};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

pub use edit_client::EditClient;
pub use image_client::ImageClient;
pub use service::ImageService;

/// Authenticated JSON-over-HTTP access to `{base}/v1beta/models/{model}:{method}`.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    pub fn endpoint(&self, model: &str, method: &str) -> String {
        format!(
            "{}/v1beta/models/{}:{}",
            self.base_url.trim_end_matches('/'),
            model,
            method
        )
    }

    pub async fn post<Req, Resp>(&self, model: &str, method: &str, body: &Req) -> Result<Resp>
    where
        Req: Serialize + Sync,
        Resp: DeserializeOwned,
    {
        let url = self.endpoint(model, method);
        log::debug!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Transport error calling {}: {:?}", url, e);
                StudioError::Request(e.to_string())
            })?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let message = service_error_message(&text);
            log::error!("Service error {} from {}: {}", status, url, message);
            return Err(StudioError::Service {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&text).map_err(|e| StudioError::Response(e.to_string()))
    }
}

/// The `error.message` of an API error body, prefixed by its status code name
/// when present. Falls back to the raw body.
fn service_error_message(body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { error }) => match error.status {
            Some(status) => format!("{}: {}", status, error.message),
            None => error.message,
        },
        Err(_) => body.to_string(),
    }
}

#[derive(Clone)]
pub struct GeminiClient {
    image_client: ImageClient,
    edit_client: EditClient,
}

impl GeminiClient {
    pub fn new(config: &StudioConfig) -> Result<Self> {
        config.validate()?;
        let api_key = config.api_key.clone().unwrap_or_default();
        let transport = HttpTransport::new(config.base_url.clone(), api_key);

        Ok(Self {
            image_client: ImageClient::new(transport.clone()),
            edit_client: EditClient::new(transport),
        })
    }

    pub fn image(&self) -> &ImageClient {
        &self.image_client
    }

    pub fn edit(&self) -> &EditClient {
        &self.edit_client
    }
}

#[async_trait]
impl ImageService for GeminiClient {
    async fn generate_images(
        &self,
        model: &str,
        request: &PredictRequest,
    ) -> Result<PredictResponse> {
        self.image().generate(model, request).await
    }

    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.edit().generate(model, request).await
    }
}
