use tracing::debug;

use crate::{
    error::{GalleryError, ValidationError},
    media::ImageFile,
    store::NewImage,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    /// No file chosen yet.
    Empty,
    Selected,
    Submitting,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub file: Option<ImageFile>,
    pub title: String,
    pub description: String,
}

/// Drives the upload modal from file selection to submission.
///
/// Failures return the flow to `Selected` with the error recorded, so the user can retry
/// or cancel. Success is handled by the controller, which drops the flow.
#[derive(Debug, Default)]
pub struct UploadFlow {
    draft: UploadDraft,
    submitting: bool,
    error: Option<GalleryError>,
}

impl UploadFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> UploadPhase {
        if self.submitting {
            UploadPhase::Submitting
        } else if self.draft.file.is_some() {
            UploadPhase::Selected
        } else {
            UploadPhase::Empty
        }
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn error(&self) -> Option<&GalleryError> {
        self.error.as_ref()
    }

    /// True exactly when `begin_submit` would send a request.
    pub fn can_submit(&self) -> bool {
        self.phase() == UploadPhase::Selected && !self.draft.title.trim().is_empty()
    }

    /// Takes the first image out of a (possibly multi-file) selection and seeds the title
    /// from its name. The rest of the selection is discarded.
    pub fn select_files(
        &mut self,
        files: impl IntoIterator<Item = ImageFile>,
    ) -> Result<(), ValidationError> {
        if self.submitting {
            return Err(ValidationError::SubmissionInProgress);
        }

        let mut rejected = None;
        let mut accepted = None;
        for file in files {
            if file.is_image() {
                accepted = Some(file);
                break;
            }
            rejected.get_or_insert(file.name);
        }

        let Some(file) = accepted else {
            let err = match rejected {
                Some(name) => ValidationError::UnsupportedMediaType { name },
                None => ValidationError::NoFileSelected,
            };
            self.error = Some(err.clone().into());
            return Err(err);
        };

        debug!(file = %file.name, "upload: file selected");
        self.draft.title = file.default_title();
        self.draft.file = Some(file);
        self.error = None;
        Ok(())
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        if self.submitting {
            debug!("upload: title edit ignored while submitting");
            return;
        }
        self.draft.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        if self.submitting {
            debug!("upload: description edit ignored while submitting");
            return;
        }
        self.draft.description = description.into();
    }

    /// Validates the draft and enters `Submitting`, handing back the request to send.
    pub fn begin_submit(&mut self) -> Result<NewImage, ValidationError> {
        let result = self.validate();
        match &result {
            Ok(_) => {
                self.submitting = true;
                self.error = None;
            }
            Err(ValidationError::SubmissionInProgress) => {}
            Err(err) => self.error = Some(err.clone().into()),
        }
        result
    }

    pub fn fail(&mut self, error: GalleryError) {
        self.submitting = false;
        self.error = Some(error);
    }

    fn validate(&self) -> Result<NewImage, ValidationError> {
        if self.submitting {
            return Err(ValidationError::SubmissionInProgress);
        }
        let Some(file) = self.draft.file.clone() else {
            return Err(ValidationError::NoFileSelected);
        };
        if self.draft.title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(NewImage {
            file,
            title: self.draft.title.clone(),
            description: self.draft.description.clone(),
        })
    }
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
