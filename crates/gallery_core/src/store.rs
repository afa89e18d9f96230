//! Request/response client for the remote image store.
//!
//! Each operation maps onto exactly one HTTP call. There are no retries and no timeouts
//! beyond what the transport applies; a failure is reported once and the calling workflow
//! decides how to present it.

use async_trait::async_trait;
use reqwest::{multipart, Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::ImageId,
    error::ApiError,
    protocol::{
        Image, UpdateImageRequest, IMAGES_PATH_SEGMENTS, UPLOAD_DESCRIPTION_FIELD,
        UPLOAD_FILE_FIELD, UPLOAD_TITLE_FIELD,
    },
};
use tracing::debug;
use url::Url;

use crate::{
    error::{GalleryError, GalleryResult, ValidationError},
    media::ImageFile,
};

/// Everything the store needs to persist a new image.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub file: ImageFile,
    pub title: String,
    pub description: String,
}

#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn list(&self) -> GalleryResult<Vec<Image>>;
    async fn create(&self, image: NewImage) -> GalleryResult<Image>;
    async fn update(&self, id: &ImageId, changes: UpdateImageRequest) -> GalleryResult<Image>;
    async fn remove(&self, id: &ImageId) -> GalleryResult<()>;
    /// Absolute address the image bytes are served from.
    fn resolve_url(&self, image: &Image) -> GalleryResult<Url>;
}

pub struct HttpImageStore {
    http: Client,
    base_url: Url,
}

impl HttpImageStore {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    fn collection_url(&self) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(IMAGES_PATH_SEGMENTS);
        }
        url
    }

    fn item_url(&self, id: &ImageId) -> Url {
        let mut url = self.collection_url();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.push(&id.to_string());
        }
        url
    }
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn list(&self) -> GalleryResult<Vec<Image>> {
        let response = self.http.get(self.collection_url()).send().await?;
        let images: Vec<Image> = decode_json(check_status(response).await?).await?;
        debug!(count = images.len(), "store: listed images");
        Ok(images)
    }

    async fn create(&self, image: NewImage) -> GalleryResult<Image> {
        let NewImage {
            file,
            title,
            description,
        } = image;
        let mime_type = file.effective_mime_type();
        let file_part = multipart::Part::bytes(file.bytes)
            .file_name(file.name.clone())
            .mime_str(&mime_type)
            .map_err(|_| ValidationError::UnsupportedMediaType { name: file.name })?;
        let form = multipart::Form::new()
            .part(UPLOAD_FILE_FIELD, file_part)
            .text(UPLOAD_TITLE_FIELD, title)
            .text(UPLOAD_DESCRIPTION_FIELD, description);

        let response = self
            .http
            .post(self.collection_url())
            .multipart(form)
            .send()
            .await?;
        let created: Image = decode_json(check_status(response).await?).await?;
        debug!(image_id = %created.id, "store: created image");
        Ok(created)
    }

    async fn update(&self, id: &ImageId, changes: UpdateImageRequest) -> GalleryResult<Image> {
        let response = self
            .http
            .put(self.item_url(id))
            .json(&changes)
            .send()
            .await?;
        let updated: Image = decode_json(check_status(response).await?).await?;
        debug!(image_id = %updated.id, "store: updated image");
        Ok(updated)
    }

    async fn remove(&self, id: &ImageId) -> GalleryResult<()> {
        let response = self.http.delete(self.item_url(id)).send().await?;
        check_status(response).await?;
        debug!(image_id = %id, "store: removed image");
        Ok(())
    }

    fn resolve_url(&self, image: &Image) -> GalleryResult<Url> {
        if let Ok(absolute) = Url::parse(&image.url) {
            return Ok(absolute);
        }
        // Store locators are rooted at the base address, including any path prefix it has.
        let base = self.base_url.as_str().trim_end_matches('/');
        let locator = image.url.trim_start_matches('/');
        Ok(Url::parse(&format!("{base}/{locator}"))?)
    }
}

/// Turns a non-2xx response into `GalleryError::Server`, keeping any reason the store sent.
async fn check_status(response: Response) -> GalleryResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GalleryError::Server {
        status: status.as_u16(),
        message: ApiError::reason_from_body(&body),
    })
}

async fn decode_json<T: DeserializeOwned>(response: Response) -> GalleryResult<T> {
    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|e| GalleryError::MalformedResponse(e.to_string()))
}

#[cfg(test)]
#[path = "tests/store_tests.rs"]
mod tests;
