//! Service layer: business logic orchestration.
//!
//! [`OverlayService`] is the central coordinator between HTTP handlers,
//! the image storage and the configuration store.

pub mod overlay_service;

pub use overlay_service::{OverlayService, SubmissionReceipt};
