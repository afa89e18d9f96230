//! Image files picked by the user for upload.

use std::{io, path::Path};

const IMAGE_MEDIA_PREFIX: &str = "image/";

/// A file handle selected for upload: name, media type and contents.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageFile")
            .field("name", &self.name)
            .field("mime_type", &self.mime_type)
            .field("size_bytes", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type,
            bytes,
        }
    }

    /// Reads a file from disk, guessing its media type from the extension.
    pub async fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first()
            .map(|mime| mime.essence_str().to_string());
        Ok(Self::new(name, mime_type, bytes))
    }

    /// Media type sent with the upload. Falls back to a guess from the file name.
    pub fn effective_mime_type(&self) -> String {
        self.mime_type
            .clone()
            .or_else(|| {
                mime_guess::from_path(&self.name)
                    .first()
                    .map(|mime| mime.essence_str().to_string())
            })
            .unwrap_or_else(|| "application/octet-stream".to_string())
    }

    pub fn is_image(&self) -> bool {
        self.effective_mime_type()
            .to_ascii_lowercase()
            .starts_with(IMAGE_MEDIA_PREFIX)
    }

    pub fn default_title(&self) -> String {
        title_from_file_name(&self.name)
    }
}

/// Drops the final extension segment: `aurora.photo.png` becomes `aurora.photo`.
///
/// A name without any dot has no stem and yields an empty title.
pub fn title_from_file_name(name: &str) -> String {
    match name.rsplit_once('.') {
        Some((stem, _extension)) => stem.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
#[path = "tests/media_tests.rs"]
mod tests;
