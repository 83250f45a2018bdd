use crate::error::{Result, StudioError};
use std::env;
use std::path::PathBuf;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_EDIT_MODEL: &str = "gemini-2.5-flash-image-preview";
pub const DEFAULT_ULTRA_MODEL: &str = "imagen-4.0-ultra-generate-001";
pub const DEFAULT_TEXT_TO_IMAGE_MODEL: &str = "imagen-4.0-generate-001";
pub const DEFAULT_OUTPUT_DIR: &str = "./generated";

/// Which model ids map to the edit and ultra strategies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelConfig {
    pub default_model: String,
    pub edit_model: String,
    pub ultra_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            default_model: DEFAULT_TEXT_TO_IMAGE_MODEL.to_string(),
            edit_model: DEFAULT_EDIT_MODEL.to_string(),
            ultra_model: DEFAULT_ULTRA_MODEL.to_string(),
        }
    }
}

impl ModelConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let defaults = ModelConfig::default();
        ModelConfig {
            default_model: env::var("GENSTUDIO_DEFAULT_MODEL").unwrap_or(defaults.default_model),
            edit_model: env::var("GENSTUDIO_EDIT_MODEL").unwrap_or(defaults.edit_model),
            ultra_model: env::var("GENSTUDIO_ULTRA_MODEL").unwrap_or(defaults.ultra_model),
        }
    }

    pub fn with_edit_model(mut self, model: impl Into<String>) -> Self {
        self.edit_model = model.into();
        self
    }

    pub fn with_ultra_model(mut self, model: impl Into<String>) -> Self {
        self.ultra_model = model.into();
        self
    }

    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

#[derive(Debug, Clone)]
pub struct StudioConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub models: ModelConfig,
    pub output_dir: PathBuf,
}

impl Default for StudioConfig {
    fn default() -> Self {
        StudioConfig {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            models: ModelConfig::default(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl StudioConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());
        let base_url =
            env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let output_dir = env::var("GENSTUDIO_OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_OUTPUT_DIR));

        StudioConfig {
            api_key,
            base_url,
            models: ModelConfig::from_env(),
            output_dir,
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_models(mut self, models: ModelConfig) -> Self {
        self.models = models;
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn validate(&self) -> Result<()> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => {}
            _ => {
                return Err(StudioError::Config(
                    "GEMINI_API_KEY (or API_KEY) is not set".into(),
                ))
            }
        }
        if self.base_url.trim().is_empty() {
            return Err(StudioError::Config("base url must not be empty".into()));
        }
        Ok(())
    }
}
