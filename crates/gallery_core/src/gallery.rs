//! The client's authoritative in-memory view of the remote collection.

use std::collections::HashSet;

use shared::{domain::ImageId, protocol::Image};
use tracing::debug;

use crate::error::GalleryError;

/// Ordered images (server order) plus the status of the initial fetch.
///
/// Holds at most one image per id. Every mutation runs to completion before control
/// returns, so readers never see a half-applied change.
#[derive(Debug, Clone, Default)]
pub struct GalleryState {
    images: Vec<Image>,
    loaded: bool,
    error: Option<GalleryError>,
}

impl GalleryState {
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub fn error(&self) -> Option<&GalleryError> {
        self.error.as_ref()
    }

    pub fn get(&self, id: &ImageId) -> Option<&Image> {
        self.images.iter().find(|image| &image.id == id)
    }

    pub fn contains(&self, id: &ImageId) -> bool {
        self.get(id).is_some()
    }

    /// Adopts a fresh listing wholesale. Duplicate ids keep their first occurrence.
    pub fn replace_all(&mut self, images: Vec<Image>) {
        let mut seen = HashSet::with_capacity(images.len());
        let before = images.len();
        let images: Vec<Image> = images
            .into_iter()
            .filter(|image| seen.insert(image.id.clone()))
            .collect();
        if images.len() != before {
            debug!(
                dropped = before - images.len(),
                "gallery: listing contained duplicate ids"
            );
        }
        self.images = images;
        self.loaded = true;
        self.error = None;
    }

    /// Records a failed fetch; images from earlier successful fetches stay in place.
    pub fn mark_load_failed(&mut self, error: GalleryError) {
        self.error = Some(error);
    }

    pub fn apply_created(&mut self, image: Image) {
        match self.images.iter_mut().find(|existing| existing.id == image.id) {
            Some(existing) => *existing = image,
            None => self.images.push(image),
        }
    }

    pub fn apply_updated(&mut self, image: Image) {
        match self.images.iter_mut().find(|existing| existing.id == image.id) {
            Some(existing) => *existing = image,
            None => debug!(image_id = %image.id, "gallery: update for unknown image ignored"),
        }
    }

    pub fn apply_removed(&mut self, id: &ImageId) {
        let before = self.images.len();
        self.images.retain(|image| &image.id != id);
        if self.images.len() == before {
            debug!(image_id = %id, "gallery: removal of unknown image ignored");
        }
    }
}

#[cfg(test)]
#[path = "tests/gallery_tests.rs"]
mod tests;
