//! Headless image-generation studio for the Gemini API.
//!
//! [`StudioController`] owns the whole studio state: the selected model and its
//! controls, the reference-image uploads, the gallery of the latest results and the
//! lightbox. Requests go through an [`ImageService`]; [`GeminiClient`] is the HTTP
//! implementation.

pub mod config;
pub mod error;
pub mod gemini;
pub mod logger;
pub mod models;
pub mod studio;

pub use config::{ModelConfig, StudioConfig};
pub use error::{Result, StudioError, ValidationError};
pub use gemini::{EditClient, GeminiClient, ImageClient, ImageService};
pub use models::{
    GeneratedResult, GenerationMode, GenerationOutcome, GenerationSettings, ModelInfo,
    UploadedImage,
};
pub use studio::{
    Gallery, GenerationDispatcher, Lightbox, LightboxEvent, ModeSelector, StudioController,
    UploadStore,
};
