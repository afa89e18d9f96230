//! Error taxonomy shared by the store client, the workflows and the controller.

use thiserror::Error;

/// Client-side rejection raised before any request is issued.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no image file selected")]
    NoFileSelected,
    #[error("'{name}' is not an image")]
    UnsupportedMediaType { name: String },
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("a request for this dialog is already in flight")]
    SubmissionInProgress,
    #[error("the dialog for this action is not open")]
    DialogNotOpen,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GalleryError {
    #[error("network error: {0}")]
    Network(String),
    #[error("image store returned {status}{}", format_reason(.message))]
    Server { status: u16, message: Option<String> },
    #[error("malformed response from image store: {0}")]
    MalformedResponse(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

fn format_reason(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|reason| format!(": {reason}"))
        .unwrap_or_default()
}

impl GalleryError {
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<reqwest::Error> for GalleryError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            Self::Server {
                status: status.as_u16(),
                message: None,
            }
        } else if err.is_decode() {
            Self::MalformedResponse(err.to_string())
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<url::ParseError> for GalleryError {
    fn from(err: url::ParseError) -> Self {
        Self::MalformedResponse(format!("unresolvable image url: {err}"))
    }
}

pub type GalleryResult<T> = std::result::Result<T, GalleryError>;
