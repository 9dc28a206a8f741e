//! # overlay-gateway
//!
//! REST gateway for configuring an interactive overlay on an uploaded
//! image: a positioned trigger (button or transparent hotzone) bound to an
//! action (external link or modal dialog), one configuration per store.
//!
//! ## Architecture
//!
//! ```text
//! Editor client (EditorState reducer)
//!     │  multipart: file + metadata JSON
//!     ├── REST Handlers (api/)
//!     │
//!     ├── OverlayService (service/)
//!     │     ├── validator (domain/)
//!     │     ├── ImageStorage (storage/)
//!     │     └── ConfigurationStore (persistence/)
//!     │
//!     └── PostgreSQL or in-memory store
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
pub mod storage;
