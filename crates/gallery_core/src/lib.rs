//! Gallery state and modal orchestration for the Sky Sightings image store client.

pub mod controller;
pub mod error;
pub mod flows;
pub mod gallery;
pub mod media;
pub mod modal;
pub mod store;

pub use controller::{CardView, GalleryController, GalleryEvent, GalleryView, ModalView};
pub use error::{GalleryError, GalleryResult, ValidationError};
pub use gallery::GalleryState;
pub use media::ImageFile;
pub use modal::{ModalCoordinator, ModalKind, ModalState, ModalTicket};
pub use store::{HttpImageStore, ImageStore, NewImage};
