pub mod controller;
pub mod dispatcher;
pub mod gallery;
pub mod lightbox;
pub mod mode_selector;
pub mod upload_store;

pub use controller::{BusyFlag, BusyGuard, StudioController};
pub use dispatcher::{GenerationDispatcher, GenerationPlan, GenerationRequest};
pub use gallery::{download_filename, Gallery, StatusMessage, Tile};
pub use lightbox::{Lightbox, LightboxEvent, LightboxImage, LightboxState};
pub use mode_selector::{ControlVisibility, ModeSelector};
pub use upload_store::{IngestReport, UploadStore, MAX_UPLOADS};
