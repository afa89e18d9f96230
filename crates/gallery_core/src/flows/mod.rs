//! Workflow controllers, one per mutating modal.
//!
//! A flow owns its draft and its busy/error indicators. It never touches gallery or modal
//! state: it hands a request to the controller and is told how that request ended.

pub mod delete;
pub mod edit;
pub mod upload;

pub use delete::{DeleteFlow, DeletePhase};
pub use edit::{EditDraft, EditFlow, EditPhase};
pub use upload::{UploadDraft, UploadFlow, UploadPhase};
