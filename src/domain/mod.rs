//! Domain layer: overlay model, coordinate transform, validation and the
//! editor state machine.
//!
//! The model is split along two independent axes, trigger kind and action
//! kind, each a closed enum. Consumers match on both exhaustively, so a new
//! variant fails to compile until every site handles it.

pub mod action;
pub mod configuration;
pub mod editor;
pub mod position;
pub mod trigger;
pub mod validator;

pub use action::{ActionDescriptor, ActionKind, ModalContent};
pub use configuration::{
    ConfigurationMetadata, OverlayConfiguration, PersistedConfiguration, StoreId,
};
pub use editor::{EditorEvent, EditorState, SubmissionStatus};
pub use position::{DragOffset, Position, Rect, normalize};
pub use trigger::{TriggerDescriptor, TriggerKind};
pub use validator::{parse_submission, validate};
