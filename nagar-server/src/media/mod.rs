//! Complaint media: validation, object keys and storage backends
//!
//! Objects are stored at `complaints/{millis}-{sha256 prefix}.{ext}`; the
//! store returns the public URL that goes into `media_url` /
//! `voice_note_url` of the complaint.

mod local;
mod s3;

pub use local::LocalMediaStore;
pub use s3::S3MediaStore;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use shared::error::{AppError, ErrorCode};

use crate::error::BoxError;

/// Maximum upload size (10MB)
pub const MAX_FILE_SIZE: usize = 10 * 1024 * 1024;

const PHOTO_FORMATS: &[&str] = &["png", "jpg", "jpeg", "webp"];
const VOICE_FORMATS: &[&str] = &["webm", "ogg", "mp3", "m4a", "wav"];

/// Hex characters of the content hash kept in the key
const HASH_PREFIX_LEN: usize = 16;

#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Store `data` under `key` and return its public URL
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<String, BoxError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Voice,
}

impl MediaKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "photo" | "image" => Some(MediaKind::Photo),
            "voice" | "audio" => Some(MediaKind::Voice),
            _ => None,
        }
    }

    fn formats(self) -> &'static [&'static str] {
        match self {
            MediaKind::Photo => PHOTO_FORMATS,
            MediaKind::Voice => VOICE_FORMATS,
        }
    }
}

/// An upload that passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedMedia {
    pub ext: String,
    pub content_type: &'static str,
}

fn content_type(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "webm" => "audio/webm",
        "ogg" => "audio/ogg",
        "mp3" => "audio/mpeg",
        "m4a" => "audio/mp4",
        "wav" => "audio/wav",
        _ => "application/octet-stream",
    }
}

/// Check size, extension and (for photos) that the bytes decode as an image
pub fn validate(kind: MediaKind, filename: &str, data: &[u8]) -> Result<ValidatedMedia, AppError> {
    if data.is_empty() {
        return Err(AppError::new(ErrorCode::EmptyFile));
    }
    if data.len() > MAX_FILE_SIZE {
        return Err(AppError::with_message(
            ErrorCode::FileTooLarge,
            format!("File too large: {} bytes (max {MAX_FILE_SIZE})", data.len()),
        ));
    }

    let ext = std::path::Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !kind.formats().contains(&ext.as_str()) {
        return Err(AppError::with_message(
            ErrorCode::UnsupportedFileFormat,
            format!(
                "Unsupported format: {ext}. Supported: {}",
                kind.formats().join(", ")
            ),
        ));
    }

    if kind == MediaKind::Photo {
        image::load_from_memory(data).map_err(|e| {
            AppError::with_message(ErrorCode::InvalidImageFile, format!("Invalid image: {e}"))
        })?;
    }

    Ok(ValidatedMedia {
        content_type: content_type(&ext),
        ext,
    })
}

/// Object key for an upload received at `now_millis`
pub fn media_key(data: &[u8], ext: &str, now_millis: i64) -> String {
    let hash = hex::encode(Sha256::digest(data));
    format!("complaints/{now_millis}-{}.{ext}", &hash[..HASH_PREFIX_LEN])
}
