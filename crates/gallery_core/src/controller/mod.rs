//! Top-level gallery controller.
//!
//! DESIGN
//! ======
//! The controller is the only writer of `GalleryState` and `ModalCoordinator`. User actions
//! run synchronously; store calls are spawned onto the runtime and report back as
//! `GalleryEvent`s over a channel. Each event is applied in one step, so two mutations
//! never interleave and the rendering layer never sees a half-applied change.
//!
//! Requests are not cancellable. Every mutating request carries the `ModalTicket` taken when
//! it was dispatched; if the user has moved on by the time it resolves, the completion has
//! no effect on the workflow that sent it. A stale success still commits its server-echoed
//! result to the gallery, because the store has already applied it; a modal showing that
//! image is rebound to the new snapshot, or closed if the image was deleted.
//!
//! Listings are guarded the same way: each carries the number of mutations committed when
//! it was requested, and one that predates a later commit is fetched again rather than
//! allowed to overwrite it.

pub mod events;
pub mod view;

use std::sync::Arc;

use shared::{domain::ImageId, protocol::Image};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::{
    error::ValidationError,
    flows::{DeleteFlow, DeletePhase, EditFlow, EditPhase, UploadFlow, UploadPhase},
    gallery::GalleryState,
    media::ImageFile,
    modal::{ModalCoordinator, ModalKind, ModalState, ModalTicket},
    store::ImageStore,
};

pub use events::GalleryEvent;
pub use view::{CardView, GalleryView, ModalView};

/// The workflow attached to the open modal. Dropping it discards its draft.
#[derive(Debug, Default)]
enum Workflow {
    #[default]
    Idle,
    Upload(UploadFlow),
    Edit(EditFlow),
    Delete(DeleteFlow),
}

pub struct GalleryController {
    store: Arc<dyn ImageStore>,
    gallery: GalleryState,
    modal: ModalCoordinator,
    workflow: Workflow,
    list_generation: u64,
    mutations: u64,
    in_flight: usize,
    events_tx: mpsc::UnboundedSender<GalleryEvent>,
    events_rx: mpsc::UnboundedReceiver<GalleryEvent>,
}

impl GalleryController {
    pub fn new(store: Arc<dyn ImageStore>) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            store,
            gallery: GalleryState::default(),
            modal: ModalCoordinator::default(),
            workflow: Workflow::Idle,
            list_generation: 0,
            mutations: 0,
            in_flight: 0,
            events_tx,
            events_rx,
        }
    }

    pub fn gallery(&self) -> &GalleryState {
        &self.gallery
    }

    pub fn modal(&self) -> &ModalState {
        self.modal.state()
    }

    pub fn upload_flow(&self) -> Option<&UploadFlow> {
        match &self.workflow {
            Workflow::Upload(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn edit_flow(&self) -> Option<&EditFlow> {
        match &self.workflow {
            Workflow::Edit(flow) => Some(flow),
            _ => None,
        }
    }

    pub fn delete_flow(&self) -> Option<&DeleteFlow> {
        match &self.workflow {
            Workflow::Delete(flow) => Some(flow),
            _ => None,
        }
    }

    /// Number of store requests whose completion has not been applied yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    // ---- gallery loading ----------------------------------------------------------------

    /// Fetches the full listing. Only the most recent refresh is allowed to commit, and a
    /// listing requested before a mutation was committed is fetched again instead.
    pub fn refresh(&mut self) {
        self.list_generation += 1;
        let generation = self.list_generation;
        let mutations = self.mutations;
        let store = Arc::clone(&self.store);
        self.dispatch("list", async move {
            GalleryEvent::Listed {
                generation,
                mutations,
                result: store.list().await,
            }
        });
    }

    // ---- card actions -------------------------------------------------------------------

    pub fn open_viewer(&mut self, id: &ImageId) -> bool {
        let Some(image) = self.known_image(id, "view") else {
            return false;
        };
        self.modal.open(ModalState::Viewing(image));
        self.workflow = Workflow::Idle;
        true
    }

    pub fn open_upload(&mut self) {
        self.modal.open(ModalState::Uploading);
        self.workflow = Workflow::Upload(UploadFlow::new());
    }

    pub fn open_editor(&mut self, id: &ImageId) -> bool {
        let Some(image) = self.known_image(id, "edit") else {
            return false;
        };
        self.workflow = Workflow::Edit(EditFlow::seed(&image));
        self.modal.open(ModalState::Editing(image));
        true
    }

    pub fn confirm_delete(&mut self, id: &ImageId) -> bool {
        let Some(image) = self.known_image(id, "delete") else {
            return false;
        };
        self.workflow = Workflow::Delete(DeleteFlow::confirm(&image));
        self.modal.open(ModalState::ConfirmingDelete(image));
        true
    }

    /// Closes whatever modal is open and discards its draft. Requests already sent keep
    /// running; their completions will find the ticket stale.
    pub fn close(&mut self) {
        if self.modal.active() != ModalKind::None {
            debug!(modal = ?self.modal.active(), "gallery: closing modal");
        }
        self.modal.close();
        self.workflow = Workflow::Idle;
    }

    // ---- upload -------------------------------------------------------------------------

    pub fn select_upload_files(
        &mut self,
        files: impl IntoIterator<Item = ImageFile>,
    ) -> Result<(), ValidationError> {
        self.upload_mut()?.select_files(files)
    }

    pub fn set_upload_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.upload_mut()?.set_title(title);
        Ok(())
    }

    pub fn set_upload_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.upload_mut()?.set_description(description);
        Ok(())
    }

    pub fn submit_upload(&mut self) -> Result<(), ValidationError> {
        let request = self.upload_mut()?.begin_submit()?;
        let ticket = self.modal.ticket();
        let store = Arc::clone(&self.store);
        self.dispatch("create", async move {
            GalleryEvent::Uploaded {
                ticket,
                result: store.create(request).await,
            }
        });
        Ok(())
    }

    // ---- edit ---------------------------------------------------------------------------

    pub fn set_edit_title(&mut self, title: impl Into<String>) -> Result<(), ValidationError> {
        self.edit_mut()?.set_title(title);
        Ok(())
    }

    pub fn set_edit_description(
        &mut self,
        description: impl Into<String>,
    ) -> Result<(), ValidationError> {
        self.edit_mut()?.set_description(description);
        Ok(())
    }

    pub fn submit_edit(&mut self) -> Result<(), ValidationError> {
        let (id, changes) = self.edit_mut()?.begin_submit()?;
        let ticket = self.modal.ticket();
        let store = Arc::clone(&self.store);
        self.dispatch("update", async move {
            GalleryEvent::Updated {
                ticket,
                result: store.update(&id, changes).await,
            }
        });
        Ok(())
    }

    // ---- delete -------------------------------------------------------------------------

    pub fn submit_delete(&mut self) -> Result<(), ValidationError> {
        let id = match &mut self.workflow {
            Workflow::Delete(flow) => flow.begin_delete()?,
            _ => return Err(ValidationError::DialogNotOpen),
        };
        let ticket = self.modal.ticket();
        let store = Arc::clone(&self.store);
        self.dispatch("remove", async move {
            let result = store.remove(&id).await;
            GalleryEvent::Removed { ticket, id, result }
        });
        Ok(())
    }

    // ---- event loop ---------------------------------------------------------------------

    /// Waits for the next completion and applies it. Returns `false` when nothing is in
    /// flight.
    pub async fn process_next(&mut self) -> bool {
        if self.in_flight == 0 {
            return false;
        }
        match self.events_rx.recv().await {
            Some(event) => {
                self.handle_event(event);
                true
            }
            None => false,
        }
    }

    /// Applies every completion that is already available without waiting.
    pub fn poll_events(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_event(event);
            applied += 1;
        }
        applied
    }

    /// Drives the loop until every dispatched request has been applied.
    pub async fn settle(&mut self) {
        while self.process_next().await {}
    }

    fn dispatch<F>(&mut self, operation: &'static str, request: F)
    where
        F: std::future::Future<Output = GalleryEvent> + Send + 'static,
    {
        self.in_flight += 1;
        let events_tx = self.events_tx.clone();
        debug!(operation, in_flight = self.in_flight, "gallery: request dispatched");
        tokio::spawn(async move {
            let event = request.await;
            if events_tx.send(event).is_err() {
                debug!(operation, "gallery: controller gone before completion");
            }
        });
    }

    fn handle_event(&mut self, event: GalleryEvent) {
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(event = event.name(), "gallery: applying completion");
        match event {
            GalleryEvent::Listed {
                generation,
                mutations,
                result,
            } => {
                if generation != self.list_generation {
                    debug!(
                        generation,
                        latest = self.list_generation,
                        "gallery: superseded listing dropped"
                    );
                    return;
                }
                match result {
                    Ok(_) if mutations != self.mutations => {
                        debug!(
                            requested_at = mutations,
                            committed = self.mutations,
                            "gallery: listing predates a committed change, fetching again"
                        );
                        self.refresh();
                    }
                    Ok(images) => {
                        info!(count = images.len(), "gallery: listing loaded");
                        self.gallery.replace_all(images);
                    }
                    Err(err) => {
                        warn!(error = %err, "gallery: listing failed");
                        self.gallery.mark_load_failed(err);
                    }
                }
            }
            GalleryEvent::Uploaded { ticket, result } => {
                let current = self.is_current(&ticket);
                match result {
                    Ok(image) => {
                        info!(image_id = %image.id, "gallery: image uploaded");
                        self.mutations += 1;
                        self.gallery.apply_created(image);
                        if current {
                            self.close();
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, stale = !current, "gallery: upload failed");
                        if let (true, Workflow::Upload(flow)) = (current, &mut self.workflow) {
                            flow.fail(err);
                        }
                    }
                }
            }
            GalleryEvent::Updated { ticket, result } => {
                let current = self.is_current(&ticket);
                match result {
                    Ok(image) => {
                        info!(image_id = %image.id, "gallery: image updated");
                        self.mutations += 1;
                        self.gallery.apply_updated(image.clone());
                        if current {
                            self.close();
                        } else if self.modal.rebind(image) {
                            debug!(modal = ?self.modal.active(), "gallery: open modal rebound");
                        }
                    }
                    Err(err) => {
                        warn!(error = %err, stale = !current, "gallery: update failed");
                        if let (true, Workflow::Edit(flow)) = (current, &mut self.workflow) {
                            flow.fail(err);
                        }
                    }
                }
            }
            GalleryEvent::Removed { ticket, id, result } => {
                let current = self.is_current(&ticket);
                match result {
                    Ok(()) => {
                        info!(image_id = %id, "gallery: image deleted");
                        self.mutations += 1;
                        self.gallery.apply_removed(&id);
                        let bound_to_removed = self
                            .modal
                            .state()
                            .bound_image()
                            .is_some_and(|image| image.id == id);
                        if current || bound_to_removed {
                            self.close();
                        }
                    }
                    Err(err) => {
                        warn!(
                            image_id = %id,
                            error = %err,
                            stale = !current,
                            "gallery: delete failed"
                        );
                        if let (true, Workflow::Delete(flow)) = (current, &mut self.workflow) {
                            flow.fail(err);
                        }
                    }
                }
            }
        }
    }

    fn is_current(&self, ticket: &ModalTicket) -> bool {
        let current = self.modal.is_current(ticket);
        if !current {
            debug!(
                modal = ?ticket.kind(),
                image_id = ?ticket.image_id(),
                "gallery: completion for a modal that is no longer open"
            );
        }
        current
    }

    fn known_image(&self, id: &ImageId, action: &'static str) -> Option<Image> {
        let image = self.gallery.get(id).cloned();
        if image.is_none() {
            debug!(image_id = %id, action, "gallery: action for unknown image ignored");
        }
        image
    }

    fn upload_mut(&mut self) -> Result<&mut UploadFlow, ValidationError> {
        match &mut self.workflow {
            Workflow::Upload(flow) => Ok(flow),
            _ => Err(ValidationError::DialogNotOpen),
        }
    }

    fn edit_mut(&mut self) -> Result<&mut EditFlow, ValidationError> {
        match &mut self.workflow {
            Workflow::Edit(flow) => Ok(flow),
            _ => Err(ValidationError::DialogNotOpen),
        }
    }

    // ---- rendering ----------------------------------------------------------------------

    pub fn view(&self) -> GalleryView {
        let cards = self
            .gallery
            .images()
            .iter()
            .map(|image| CardView {
                id: image.id.clone(),
                title: image.title.clone(),
                description: image.description.clone(),
                src: self.image_src(image),
            })
            .collect();

        GalleryView {
            cards,
            loaded: self.gallery.is_loaded(),
            error: self.gallery.error().map(ToString::to_string),
            modal: self.modal_view(),
        }
    }

    fn modal_view(&self) -> ModalView {
        match (self.modal.state(), &self.workflow) {
            (ModalState::Viewing(image), _) => ModalView::Viewer {
                image: image.clone(),
                src: self.image_src(image),
            },
            (ModalState::Uploading, Workflow::Upload(flow)) => ModalView::Upload {
                file_name: flow.draft().file.as_ref().map(|file| file.name.clone()),
                title: flow.draft().title.clone(),
                description: flow.draft().description.clone(),
                can_submit: flow.can_submit(),
                busy: flow.phase() == UploadPhase::Submitting,
                error: flow.error().map(ToString::to_string),
            },
            (ModalState::Editing(_), Workflow::Edit(flow)) => ModalView::Edit {
                image_id: flow.draft().image_id.clone(),
                title: flow.draft().title.clone(),
                description: flow.draft().description.clone(),
                busy: flow.phase() == EditPhase::Submitting,
                error: flow.error().map(ToString::to_string),
            },
            (ModalState::ConfirmingDelete(image), Workflow::Delete(flow)) => {
                ModalView::ConfirmDelete {
                    image: image.clone(),
                    busy: flow.phase() == DeletePhase::Deleting,
                    error: flow.error().map(ToString::to_string),
                }
            }
            _ => ModalView::None,
        }
    }

    fn image_src(&self, image: &Image) -> Option<url::Url> {
        match self.store.resolve_url(image) {
            Ok(url) => Some(url),
            Err(err) => {
                debug!(image_id = %image.id, error = %err, "gallery: image url not resolvable");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
