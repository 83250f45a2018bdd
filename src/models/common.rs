use crate::config::ModelConfig;
use crate::models::GenerationMode;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: String,
    pub name: String,
    pub provider: String,
    pub mode: GenerationMode,
    pub description: String,
}

impl ModelInfo {
    fn new(id: &str, name: &str, mode: GenerationMode, description: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            provider: "Google".to_string(),
            mode,
            description: description.to_string(),
        }
    }
}

/// The models offered by the model selector, in display order.
pub fn supported_models(models: &ModelConfig) -> Vec<ModelInfo> {
    let mut catalog = vec![ModelInfo::new(
        &models.default_model,
        "Imagen 4",
        GenerationMode::TextToImage,
        "Batch text-to-image generation with selectable aspect ratio",
    )];
    for (id, name) in [
        ("imagen-4.0-fast-generate-001", "Imagen 4 Fast"),
        ("imagen-3.0-generate-002", "Imagen 3"),
    ] {
        if id != models.default_model {
            catalog.push(ModelInfo::new(
                id,
                name,
                GenerationMode::TextToImage,
                "Batch text-to-image generation with selectable aspect ratio",
            ));
        }
    }
    catalog.push(ModelInfo::new(
        &models.ultra_model,
        "Imagen 4 Ultra",
        GenerationMode::TextToImageUltra,
        "Single high-fidelity image per request",
    ));
    catalog.push(ModelInfo::new(
        &models.edit_model,
        "Gemini 2.5 Flash Image",
        GenerationMode::ImageEdit,
        "Edit or combine up to five reference images with a text instruction",
    ));
    catalog
}
