use crate::config::ModelConfig;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

pub const ASPECT_RATIOS: [&str; 5] = ["1:1", "3:4", "4:3", "9:16", "16:9"];
pub const DEFAULT_ASPECT_RATIO: &str = "1:1";
pub const MIN_BATCH_SIZE: u8 = 1;
pub const MAX_BATCH_SIZE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Batch text-to-image with a configurable aspect ratio.
    TextToImage,
    /// One high-fidelity image per request.
    TextToImageUltra,
    /// Multimodal edit of uploaded reference images.
    ImageEdit,
}

impl GenerationMode {
    /// Unknown ids fall back to plain text-to-image.
    pub fn from_model_id(model_id: &str, models: &ModelConfig) -> Self {
        if model_id == models.edit_model {
            GenerationMode::ImageEdit
        } else if model_id == models.ultra_model {
            GenerationMode::TextToImageUltra
        } else {
            GenerationMode::TextToImage
        }
    }

    pub fn is_edit(&self) -> bool {
        matches!(self, GenerationMode::ImageEdit)
    }

    pub fn is_ultra(&self) -> bool {
        matches!(self, GenerationMode::TextToImageUltra)
    }
}

/// Values of the batch size and aspect ratio controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationSettings {
    pub batch_size: u8,
    pub aspect_ratio: String,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            batch_size: MIN_BATCH_SIZE,
            aspect_ratio: DEFAULT_ASPECT_RATIO.to_string(),
        }
    }
}

impl GenerationSettings {
    pub fn new(batch_size: u8, aspect_ratio: impl Into<String>) -> Result<Self, ValidationError> {
        let aspect_ratio = aspect_ratio.into();
        validate_batch_size(batch_size)?;
        validate_aspect_ratio(&aspect_ratio)?;
        Ok(Self {
            batch_size,
            aspect_ratio,
        })
    }
}

pub fn validate_batch_size(batch_size: u8) -> Result<(), ValidationError> {
    if (MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&batch_size) {
        Ok(())
    } else {
        Err(ValidationError::BatchSizeOutOfRange(batch_size))
    }
}

pub fn validate_aspect_ratio(aspect_ratio: &str) -> Result<(), ValidationError> {
    if ASPECT_RATIOS.contains(&aspect_ratio) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedAspectRatio(
            aspect_ratio.to_string(),
        ))
    }
}
