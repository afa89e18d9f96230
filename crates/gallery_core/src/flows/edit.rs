use shared::{
    domain::ImageId,
    protocol::{Image, UpdateImageRequest},
};
use tracing::debug;

use crate::error::{GalleryError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Prefilled,
    Submitting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    pub image_id: ImageId,
    pub title: String,
    pub description: String,
}

/// Drives the edit modal for one image. A new flow is seeded every time the modal opens,
/// so drafts never carry over between images.
#[derive(Debug)]
pub struct EditFlow {
    draft: EditDraft,
    submitting: bool,
    error: Option<GalleryError>,
}

impl EditFlow {
    pub fn seed(image: &Image) -> Self {
        Self {
            draft: EditDraft {
                image_id: image.id.clone(),
                title: image.title.clone(),
                description: image.description.clone(),
            },
            submitting: false,
            error: None,
        }
    }

    pub fn phase(&self) -> EditPhase {
        if self.submitting {
            EditPhase::Submitting
        } else {
            EditPhase::Prefilled
        }
    }

    pub fn draft(&self) -> &EditDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&GalleryError> {
        self.error.as_ref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.submitting {
            debug!("edit: title change ignored while submitting");
            return;
        }
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if self.submitting {
            debug!("edit: description change ignored while submitting");
            return;
        }
        self.draft.description = description.into();
    }

    /// Both fields are required; nothing is sent unless they are non-blank.
    pub fn begin_submit(&mut self) -> Result<(ImageId, UpdateImageRequest), ValidationError> {
        if self.submitting {
            return Err(ValidationError::SubmissionInProgress);
        }
        let missing = if self.draft.title.trim().is_empty() {
            Some(ValidationError::EmptyTitle)
        } else if self.draft.description.trim().is_empty() {
            Some(ValidationError::EmptyDescription)
        } else {
            None
        };
        if let Some(err) = missing {
            self.error = Some(err.clone().into());
            return Err(err);
        }

        self.submitting = true;
        self.error = None;
        Ok((
            self.draft.image_id.clone(),
            UpdateImageRequest {
                title: self.draft.title.clone(),
                description: self.draft.description.clone(),
            },
        ))
    }

    pub fn fail(&mut self, error: GalleryError) {
        self.submitting = false;
        self.error = Some(error);
    }
}

#[cfg(test)]
#[path = "tests/edit_tests.rs"]
mod tests;
