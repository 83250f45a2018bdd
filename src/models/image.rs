use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;

pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// A reference image picked by the user for edit mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub bytes: Vec<u8>,
    pub media_type: String,
}

impl UploadedImage {
    pub fn new(bytes: Vec<u8>, media_type: impl Into<String>) -> Self {
        Self {
            bytes,
            media_type: media_type.into(),
        }
    }

    pub fn base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn data_url(&self) -> String {
        data_url(&self.media_type, &self.bytes)
    }
}

/// One image from the latest generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratedResult {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub media_type: Option<String>,
    /// Position within the response, counting image payloads only.
    pub ordinal: usize,
}

impl GeneratedResult {
    pub fn data_url(&self) -> String {
        data_url(self.media_type.as_deref().unwrap_or("image/jpeg"), &self.bytes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    Images(Vec<GeneratedResult>),
    /// The service answered but produced no image; `text` is whatever it said instead.
    NoImage { text: String },
}

impl GenerationOutcome {
    pub fn images(&self) -> &[GeneratedResult] {
        match self {
            GenerationOutcome::Images(images) => images,
            GenerationOutcome::NoImage { .. } => &[],
        }
    }
}

pub fn data_url(media_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", media_type, STANDARD.encode(bytes))
}

/// Declared media type for a file, judged by its extension.
pub fn media_type_for_path(path: &std::path::Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        Some("bmp") => "image/bmp",
        _ => FALLBACK_MEDIA_TYPE,
    }
}
