use crate::{
    config::ModelConfig,
    error::{Result, StudioError, ValidationError},
    gemini::ImageService,
    models::{GenerationMode, GenerationOutcome},
    studio::{
        dispatcher::{GenerationDispatcher, GenerationPlan, GenerationRequest},
        gallery::{Gallery, NO_IMAGE_MESSAGE},
        lightbox::{Lightbox, LightboxEvent, LightboxImage},
        mode_selector::ModeSelector,
        upload_store::{IngestReport, UploadStore},
    },
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared "generation in progress" flag. The generate control is enabled
/// whenever the flag is clear.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Set the flag for the lifetime of the returned guard.
    pub fn acquire(&self) -> Result<BusyGuard> {
        if self.0.swap(true, Ordering::SeqCst) {
            return Err(StudioError::Busy);
        }
        Ok(BusyGuard(self.0.clone()))
    }
}

pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Owns every piece of studio state; the input layer only calls these methods.
pub struct StudioController {
    selector: ModeSelector,
    uploads: UploadStore,
    gallery: Gallery,
    lightbox: Lightbox,
    prompt: String,
    dispatcher: GenerationDispatcher,
    busy: BusyFlag,
}

impl StudioController {
    pub fn new(service: Arc<dyn ImageService>, models: ModelConfig) -> Self {
        Self {
            selector: ModeSelector::new(models),
            uploads: UploadStore::new(),
            gallery: Gallery::new(),
            lightbox: Lightbox::new(),
            prompt: String::new(),
            dispatcher: GenerationDispatcher::new(service),
            busy: BusyFlag::default(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn select_model(&mut self, model_id: &str) {
        if self.selector.set_mode(model_id) && !self.uploads.is_empty() {
            log::debug!("Dropping {} reference image(s)", self.uploads.len());
            self.uploads.clear();
        }
    }

    pub fn set_prompt(&mut self, prompt: impl Into<String>) {
        self.prompt = prompt.into();
    }

    pub fn set_batch_size(&mut self, batch_size: u8) -> Result<()> {
        Ok(self.selector.set_batch_size(batch_size)?)
    }

    pub fn set_aspect_ratio(&mut self, aspect_ratio: &str) -> Result<()> {
        Ok(self.selector.set_aspect_ratio(aspect_ratio)?)
    }

    /// Replace the reference images. Only the edit model takes uploads.
    pub async fn select_files<P>(&mut self, files: &[P]) -> Result<IngestReport>
    where
        P: AsRef<Path>,
    {
        if !self.selector.mode().is_edit() && !files.is_empty() {
            let edit_model = self.selector.models().edit_model.clone();
            return Err(ValidationError::UploadsNotAccepted(edit_model).into());
        }
        match self.uploads.ingest(files).await {
            Ok(report) => Ok(report),
            Err(e) => {
                self.gallery.show_error(e.user_message());
                Err(e)
            }
        }
    }

    /// Run one generation and render its outcome into the gallery.
    pub async fn generate(&mut self) -> Result<GenerationOutcome> {
        let _guard = self.busy.acquire()?;

        let mode = self.selector.mode();
        let request = GenerationRequest {
            model_id: self.selector.model_id(),
            mode,
            prompt: &self.prompt,
            settings: self.selector.settings(),
            uploads: self.uploads.images(),
        };
        let plan = match GenerationPlan::build(&request) {
            Ok(plan) => plan,
            Err(e) => {
                let err = StudioError::from(e);
                self.gallery.show_error(err.user_message());
                return Err(err);
            }
        };

        self.gallery.show_loading();
        let outcome = self.dispatcher.execute(plan).await;

        match &outcome {
            Ok(GenerationOutcome::Images(results)) => {
                let tile_prompt = match mode {
                    GenerationMode::ImageEdit => format!("edited-{}", self.prompt),
                    _ => self.prompt.clone(),
                };
                self.gallery.render(results, &tile_prompt);
            }
            Ok(GenerationOutcome::NoImage { .. }) => self.gallery.show_info(NO_IMAGE_MESSAGE),
            Err(e) => self.gallery.show_error(e.user_message()),
        }
        outcome
    }

    /// Open the lightbox on a gallery tile. Returns false for an unknown index.
    pub fn open_tile(&mut self, index: usize) -> bool {
        match self.gallery.tile(index) {
            Some(tile) => {
                self.lightbox.open(LightboxImage {
                    source: tile.source.clone(),
                    alt_text: tile.alt_text.clone(),
                });
                true
            }
            None => false,
        }
    }

    pub fn lightbox_event(&mut self, event: &LightboxEvent) -> bool {
        self.lightbox.handle(event)
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub fn selector(&self) -> &ModeSelector {
        &self.selector
    }

    pub fn uploads(&self) -> &UploadStore {
        &self.uploads
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    pub fn is_generate_enabled(&self) -> bool {
        !self.busy.is_busy()
    }

    /// Handle on the busy flag for observers outside the controller.
    pub fn generate_control(&self) -> BusyFlag {
        self.busy.clone()
    }
}
