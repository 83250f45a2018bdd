use crate::config::ModelConfig;
use crate::error::ValidationError;
use crate::models::{
    supported_models, validate_aspect_ratio, validate_batch_size, GenerationMode,
    GenerationSettings, ModelInfo,
};

/// Which groups of input controls are currently shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlVisibility {
    pub edit_controls: bool,
    pub aspect_ratio: bool,
    pub batch_size: bool,
}

/// Tracks the selected model and the state of the controls that depend on it.
#[derive(Debug, Clone)]
pub struct ModeSelector {
    models: ModelConfig,
    model_id: String,
    mode: GenerationMode,
    settings: GenerationSettings,
    batch_size_enabled: bool,
}

impl ModeSelector {
    pub fn new(models: ModelConfig) -> Self {
        let model_id = models.default_model.clone();
        let mut selector = Self {
            mode: GenerationMode::TextToImage,
            models,
            model_id: String::new(),
            settings: GenerationSettings::default(),
            batch_size_enabled: true,
        };
        selector.set_mode(&model_id);
        selector
    }

    /// Apply a model selection. Returns true when uploads must be dropped,
    /// which is every time the new model is not the edit model.
    pub fn set_mode(&mut self, model_id: &str) -> bool {
        self.model_id = model_id.to_string();
        self.mode = GenerationMode::from_model_id(model_id, &self.models);

        if self.mode.is_ultra() {
            self.settings.batch_size = 1;
            self.batch_size_enabled = false;
        } else {
            self.batch_size_enabled = true;
        }

        log::debug!("Model set to {} ({:?})", model_id, self.mode);
        !self.mode.is_edit()
    }

    pub fn set_batch_size(&mut self, batch_size: u8) -> Result<(), ValidationError> {
        if !self.batch_size_enabled {
            return Err(ValidationError::BatchSizeLocked);
        }
        validate_batch_size(batch_size)?;
        self.settings.batch_size = batch_size;
        Ok(())
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: &str) -> Result<(), ValidationError> {
        validate_aspect_ratio(aspect_ratio)?;
        self.settings.aspect_ratio = aspect_ratio.to_string();
        Ok(())
    }

    pub fn model_id(&self) -> &str {
        &self.model_id
    }

    pub fn mode(&self) -> GenerationMode {
        self.mode
    }

    pub fn settings(&self) -> &GenerationSettings {
        &self.settings
    }

    pub fn is_batch_size_enabled(&self) -> bool {
        self.batch_size_enabled
    }

    pub fn visibility(&self) -> ControlVisibility {
        let is_edit = self.mode.is_edit();
        ControlVisibility {
            edit_controls: is_edit,
            aspect_ratio: !is_edit,
            batch_size: !is_edit,
        }
    }

    pub fn models(&self) -> &ModelConfig {
        &self.models
    }

    pub fn available_models(&self) -> Vec<ModelInfo> {
        supported_models(&self.models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn selector() -> ModeSelector {
        ModeSelector::new(ModelConfig::default())
    }

    #[test]
    fn test_initial_state() {
        let selector = selector();
        assert_eq!(selector.mode(), GenerationMode::TextToImage);
        assert!(selector.is_batch_size_enabled());
        assert_eq!(
            selector.visibility(),
            ControlVisibility {
                edit_controls: false,
                aspect_ratio: true,
                batch_size: true,
            }
        );
    }

    #[test]
    fn test_ultra_forces_single_image() {
        let mut selector = selector();
        selector.set_batch_size(4).unwrap();
        selector.set_mode("imagen-4.0-ultra-generate-001");
        assert_eq!(selector.settings().batch_size, 1);
        assert!(!selector.is_batch_size_enabled());
        assert_eq!(
            selector.set_batch_size(3),
            Err(ValidationError::BatchSizeLocked)
        );

        selector.set_mode("imagen-4.0-generate-001");
        assert!(selector.is_batch_size_enabled());
        assert_eq!(selector.settings().batch_size, 1);
    }

    #[test]
    fn test_edit_mode_visibility_and_clear_signal() {
        let mut selector = selector();
        assert!(!selector.set_mode("gemini-2.5-flash-image-preview"));
        let visibility = selector.visibility();
        assert!(visibility.edit_controls);
        assert!(!visibility.aspect_ratio);
        assert!(!visibility.batch_size);

        assert!(selector.set_mode("imagen-3.0-generate-002"));
    }

    #[test]
    fn test_unknown_model_is_plain_text_to_image() {
        let mut selector = selector();
        selector.set_mode("not-a-model");
        assert_eq!(selector.mode(), GenerationMode::TextToImage);
        assert!(selector.is_batch_size_enabled());
        assert_eq!(selector.model_id(), "not-a-model");
    }
}
