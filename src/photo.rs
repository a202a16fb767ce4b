//! A single photo as held by the collage window.

use std::ffi::OsStr;
use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// One encoded photo in the rolling window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoItem {
    /// Display key, assigned at insertion. Never reused.
    pub sequence: u64,
    /// Base64 encoded file contents.
    pub data: String,
    /// File extension including the leading dot, e.g. `.jpg`. Empty if none.
    pub extension: String,
    /// Set one tick before the item is evicted so the renderer can fade it.
    pub removed: bool,
}

impl PhotoItem {
    /// Encode raw file bytes into a fresh, visible item.
    pub fn encode(sequence: u64, path: &Path, bytes: &[u8]) -> Self {
        Self {
            sequence,
            data: STANDARD.encode(bytes),
            extension: extension_of(path),
            removed: false,
        }
    }

    /// Best-effort MIME type from the extension hint.
    #[must_use]
    pub fn mime_type(&self) -> &'static str {
        match self
            .extension
            .trim_start_matches('.')
            .to_ascii_lowercase()
            .as_str()
        {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "gif" => "image/gif",
            "webp" => "image/webp",
            "bmp" => "image/bmp",
            "tif" | "tiff" => "image/tiff",
            _ => "application/octet-stream",
        }
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| format!(".{ext}"))
        .unwrap_or_default()
}
