//! Completions delivered back to the controller when a store request resolves.

use shared::{domain::ImageId, protocol::Image};

use crate::{error::GalleryResult, modal::ModalTicket};

#[derive(Debug)]
pub enum GalleryEvent {
    Listed {
        generation: u64,
        /// Committed mutation count when the listing was requested.
        mutations: u64,
        result: GalleryResult<Vec<Image>>,
    },
    Uploaded {
        ticket: ModalTicket,
        result: GalleryResult<Image>,
    },
    Updated {
        ticket: ModalTicket,
        result: GalleryResult<Image>,
    },
    Removed {
        ticket: ModalTicket,
        id: ImageId,
        result: GalleryResult<()>,
    },
}

impl GalleryEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Listed { .. } => "listed",
            Self::Uploaded { .. } => "uploaded",
            Self::Updated { .. } => "updated",
            Self::Removed { .. } => "removed",
        }
    }
}
