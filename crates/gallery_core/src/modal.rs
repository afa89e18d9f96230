//! Which single modal is on screen and what it is bound to.

use shared::{domain::ImageId, protocol::Image};

/// The active modal. Being one value, two modals can never be open together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    None,
    Viewing(Image),
    Uploading,
    Editing(Image),
    ConfirmingDelete(Image),
}

impl ModalState {
    pub fn kind(&self) -> ModalKind {
        match self {
            Self::None => ModalKind::None,
            Self::Viewing(_) => ModalKind::Viewer,
            Self::Uploading => ModalKind::Upload,
            Self::Editing(_) => ModalKind::Edit,
            Self::ConfirmingDelete(_) => ModalKind::DeleteConfirm,
        }
    }

    pub fn bound_image(&self) -> Option<&Image> {
        match self {
            Self::Viewing(image) | Self::Editing(image) | Self::ConfirmingDelete(image) => {
                Some(image)
            }
            Self::None | Self::Uploading => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalKind {
    None,
    Viewer,
    Upload,
    Edit,
    DeleteConfirm,
}

/// Snapshot of a modal binding, taken when a request is dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalTicket {
    generation: u64,
    kind: ModalKind,
    image_id: Option<ImageId>,
}

impl ModalTicket {
    pub fn kind(&self) -> ModalKind {
        self.kind
    }

    pub fn image_id(&self) -> Option<&ImageId> {
        self.image_id.as_ref()
    }
}

#[derive(Debug, Default)]
pub struct ModalCoordinator {
    state: ModalState,
    generation: u64,
}

impl ModalCoordinator {
    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn active(&self) -> ModalKind {
        self.state.kind()
    }

    /// Replaces whatever modal was open. Nothing stacks.
    pub fn open(&mut self, state: ModalState) {
        self.generation += 1;
        self.state = state;
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.state = ModalState::None;
    }

    /// Swaps in a newer snapshot of the bound image. The binding itself is unchanged, so
    /// outstanding tickets stay current. Returns whether a modal was bound to that id.
    pub fn rebind(&mut self, image: Image) -> bool {
        match &mut self.state {
            ModalState::Viewing(bound)
            | ModalState::Editing(bound)
            | ModalState::ConfirmingDelete(bound)
                if bound.id == image.id =>
            {
                *bound = image;
                true
            }
            _ => false,
        }
    }

    pub fn ticket(&self) -> ModalTicket {
        ModalTicket {
            generation: self.generation,
            kind: self.state.kind(),
            image_id: self.state.bound_image().map(|image| image.id.clone()),
        }
    }

    /// Whether the modal a ticket was taken from is still the one on screen.
    pub fn is_current(&self, ticket: &ModalTicket) -> bool {
        ticket.generation == self.generation
            && ticket.kind == self.state.kind()
            && ticket.image_id.as_ref() == self.state.bound_image().map(|image| &image.id)
    }
}

#[cfg(test)]
#[path = "tests/modal_tests.rs"]
mod tests;
