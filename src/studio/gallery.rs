use crate::error::{Result, StudioError};
use crate::models::GeneratedResult;
use std::path::{Path, PathBuf};

pub const LOADING_MESSAGE: &str = "Generating...";
pub const NO_IMAGE_MESSAGE: &str =
    "The model did not return an image. It might have responded with text only.";
const FILENAME_PROMPT_CHARS: usize = 20;
const DEFAULT_EXTENSION: &str = "jpeg";
const RESERVED_FILENAME_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Loading,
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Loading => LOADING_MESSAGE,
            StatusMessage::Info(message) | StatusMessage::Error(message) => message,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

/// One rendered gallery entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub ordinal: usize,
    pub bytes: Vec<u8>,
    pub media_type: Option<String>,
    pub alt_text: String,
    pub filename: String,
    /// `data:` URL used for the preview and the lightbox.
    pub source: String,
}

impl Tile {
    fn from_result(result: &GeneratedResult, prompt: &str) -> Self {
        Self {
            ordinal: result.ordinal,
            bytes: result.bytes.clone(),
            media_type: result.media_type.clone(),
            alt_text: format!("{} - Image {}", prompt, result.ordinal + 1),
            filename: download_filename(prompt, result.ordinal, result.media_type.as_deref()),
            source: result.data_url(),
        }
    }
}

/// Holds either the tiles of the latest batch or a single status message.
#[derive(Debug, Clone, Default)]
pub struct Gallery {
    tiles: Vec<Tile>,
    status: Option<StatusMessage>,
}

impl Gallery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace everything with one tile per result, in result order.
    pub fn render(&mut self, results: &[GeneratedResult], prompt: &str) {
        self.status = None;
        self.tiles = results
            .iter()
            .map(|result| Tile::from_result(result, prompt))
            .collect();
    }

    pub fn show_loading(&mut self) {
        self.show_status(StatusMessage::Loading);
    }

    pub fn show_info(&mut self, message: impl Into<String>) {
        self.show_status(StatusMessage::Info(message.into()));
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.show_status(StatusMessage::Error(message.into()));
    }

    fn show_status(&mut self, status: StatusMessage) {
        self.tiles.clear();
        self.status = Some(status);
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn tile(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn filenames(&self) -> Vec<&str> {
        self.tiles.iter().map(|tile| tile.filename.as_str()).collect()
    }

    /// Write one tile under its download filename inside `dir`.
    pub async fn save_tile(&self, index: usize, dir: &Path) -> Result<PathBuf> {
        let tile = self.tiles.get(index).ok_or_else(|| {
            StudioError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no tile at index {}", index),
            ))
        })?;
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(&tile.filename);
        tokio::fs::write(&path, &tile.bytes).await?;
        log::info!("💾 Image saved to: {}", path.display());
        Ok(path)
    }

    pub async fn save_all(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut saved = Vec::with_capacity(self.tiles.len());
        for index in 0..self.tiles.len() {
            saved.push(self.save_tile(index, dir).await?);
        }
        Ok(saved)
    }
}

/// `generated-<first 20 prompt chars, sanitised>-<ordinal + 1>.<ext>`
///
/// Whitespace, control characters and reserved path characters become `_`.
pub fn download_filename(prompt: &str, ordinal: usize, media_type: Option<&str>) -> String {
    let prefix: String = prompt
        .chars()
        .take(FILENAME_PROMPT_CHARS)
        .map(sanitize_filename_char)
        .collect();
    format!(
        "generated-{}-{}.{}",
        prefix,
        ordinal + 1,
        extension_for(media_type)
    )
}

fn sanitize_filename_char(c: char) -> char {
    if c.is_whitespace() || c.is_control() || RESERVED_FILENAME_CHARS.contains(&c) {
        '_'
    } else {
        c
    }
}

/// Subtype of the media type, or `jpeg` when it is absent or unusable.
pub fn extension_for(media_type: Option<&str>) -> &str {
    media_type
        .and_then(|media_type| media_type.split_once('/'))
        .map(|(_, subtype)| subtype)
        .filter(|subtype| {
            !subtype.is_empty() && subtype.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .unwrap_or(DEFAULT_EXTENSION)
}
