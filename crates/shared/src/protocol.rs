use serde::{Deserialize, Serialize};

use crate::domain::ImageId;

/// Path segments of the image collection resource, relative to the store base address.
pub const IMAGES_PATH_SEGMENTS: [&str; 2] = ["api", "images"];

pub const UPLOAD_FILE_FIELD: &str = "file";
pub const UPLOAD_TITLE_FIELD: &str = "title";
pub const UPLOAD_DESCRIPTION_FIELD: &str = "description";

/// An image as reported by the store. Values are snapshots: edits produce a new value
/// carrying the same `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    pub id: ImageId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateImageRequest {
    pub title: String,
    pub description: String,
}
