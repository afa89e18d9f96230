use shared::{domain::ImageId, protocol::Image};

use crate::error::{GalleryError, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeletePhase {
    Confirming,
    Deleting,
}

/// Confirmation dialog for removing one image. Cancelling is just dropping the flow.
#[derive(Debug)]
pub struct DeleteFlow {
    target: Image,
    deleting: bool,
    error: Option<GalleryError>,
}

impl DeleteFlow {
    pub fn confirm(target: &Image) -> Self {
        Self {
            target: target.clone(),
            deleting: false,
            error: None,
        }
    }

    pub fn phase(&self) -> DeletePhase {
        if self.deleting {
            DeletePhase::Deleting
        } else {
            DeletePhase::Confirming
        }
    }

    pub fn target(&self) -> &Image {
        &self.target
    }

    pub fn error(&self) -> Option<&GalleryError> {
        self.error.as_ref()
    }

    pub fn begin_delete(&mut self) -> Result<ImageId, ValidationError> {
        if self.deleting {
            return Err(ValidationError::SubmissionInProgress);
        }
        self.deleting = true;
        self.error = None;
        Ok(self.target.id.clone())
    }

    pub fn fail(&mut self, error: GalleryError) {
        self.deleting = false;
        self.error = Some(error);
    }
}

#[cfg(test)]
#[path = "tests/delete_tests.rs"]
mod tests;
