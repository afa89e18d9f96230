//! Render snapshots handed to whatever draws the gallery.

use shared::{domain::ImageId, protocol::Image};
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryView {
    pub cards: Vec<CardView>,
    pub loaded: bool,
    /// Gallery-level failure of the last fetch. Workflow failures live on their modal.
    pub error: Option<String>,
    pub modal: ModalView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: ImageId,
    pub title: String,
    pub description: String,
    /// `None` when the image locator cannot be resolved against the store address.
    pub src: Option<Url>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalView {
    None,
    Viewer {
        image: Image,
        src: Option<Url>,
    },
    Upload {
        file_name: Option<String>,
        title: String,
        description: String,
        can_submit: bool,
        busy: bool,
        error: Option<String>,
    },
    Edit {
        image_id: ImageId,
        title: String,
        description: String,
        busy: bool,
        error: Option<String>,
    },
    ConfirmDelete {
        image: Image,
        busy: bool,
        error: Option<String>,
    },
}

impl ModalView {
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::None)
    }
}
