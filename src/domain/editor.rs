//! Editor-side draft state and submission state machine.
//!
//! [`EditorState::apply`] is the single transition function: every drag,
//! form edit and network outcome is an [`EditorEvent`]. Submission itself is
//! performed by the caller; when a submit request passes the local
//! pre-submit check the reducer hands back an [`Effect::Submit`] carrying
//! the [`Submission`] to send.
//!
//! ```text
//! Draft ──submit ok──▶ Submitting ──success──▶ Submitted
//!   ▲  │                   │
//!   │  └─rejected─▶ Failed ◀─failure─┘
//!   └─────edit───────┘
//! ```

use serde::Serialize;
use utoipa::ToSchema;

use super::position::{DragOffset, Rect, normalize};
use super::{ActionKind, ModalContent, Position, TriggerDescriptor, TriggerKind};

/// Label given to a fresh button trigger.
pub const DEFAULT_BUTTON_LABEL: &str = "Click me!";

/// Image picked by the operator, not yet uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// Original file name, including extension.
    pub name: String,
    /// Declared media type, e.g. `image/png`.
    pub media_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

/// Action being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftAction {
    /// Link action with its URL as typed so far.
    Link {
        /// URL text.
        url: String,
    },
    /// Modal action with its text as typed so far.
    Modal {
        /// Title text.
        title: String,
        /// Body text.
        body: String,
    },
}

/// In-progress overlay configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Selected trigger kind.
    pub trigger_kind: TriggerKind,
    /// Button label; unused for zones but kept across kind switches.
    pub label: String,
    /// Normalized position from the last drag.
    pub position: Option<Position>,
    /// Render scale.
    pub scale: f64,
    /// Chosen action, if any.
    pub action: Option<DraftAction>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            trigger_kind: TriggerKind::Button,
            label: DEFAULT_BUTTON_LABEL.to_string(),
            position: Some(Position::origin()),
            scale: 1.0,
            action: None,
        }
    }
}

/// Submission lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionStatus {
    /// Editing; nothing sent yet.
    #[default]
    Draft,
    /// Request in flight. Edits are ignored.
    Submitting,
    /// Server accepted the configuration.
    Submitted {
        /// Confirmation returned by the server.
        message: String,
    },
    /// Last attempt was rejected locally or by the server. Any edit moves
    /// back to [`SubmissionStatus::Draft`] and drops the error.
    Failed {
        /// Reason shown to the operator.
        error: String,
    },
}

/// Metadata document sent alongside the image.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct SubmissionMetadata {
    /// Action kind.
    #[serde(rename = "type")]
    pub action_type: ActionKind,
    /// Positioned trigger.
    pub trigger: TriggerDescriptor,
    /// Link target, for `link` actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Dialog text, for `modal` actions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<ModalContent>,
}

/// Everything needed to issue the upload request.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    /// Image to upload.
    pub file: SelectedFile,
    /// Metadata to serialize into the `metadata` form field.
    pub metadata: SubmissionMetadata,
}

/// Input to the reducer.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// Operator picked an image. Starts a new upload after a submission.
    FileSelected(SelectedFile),
    /// Operator removed the picked image.
    FileCleared,
    /// Trigger kind dropdown changed.
    TriggerKindSelected(TriggerKind),
    /// Button label edited.
    LabelChanged(String),
    /// Action kind dropdown changed.
    ActionKindSelected(ActionKind),
    /// URL field edited.
    UrlChanged(String),
    /// Modal title edited.
    ModalTitleChanged(String),
    /// Modal body edited.
    ModalBodyChanged(String),
    /// Trigger dropped after a drag.
    Dragged {
        /// Displacement from the container centre.
        offset: DragOffset,
        /// Container size.
        container: Rect,
        /// Dragged element size.
        element: Rect,
    },
    /// Submit button pressed.
    SubmitRequested,
    /// Server confirmed the upload.
    SubmitSucceeded {
        /// Confirmation message.
        message: String,
    },
    /// Upload failed.
    SubmitFailed {
        /// Reason.
        error: String,
    },
    /// Discard everything and start over.
    NewUpload,
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State updated; nothing to do.
    None,
    /// Event does not apply in the current status.
    Ignored,
    /// Send this submission and report the outcome back.
    Submit(Submission),
}

/// Editor state: draft, picked file and submission status.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditorState {
    /// Configuration being edited.
    pub draft: Draft,
    /// Image waiting to be uploaded.
    pub file: Option<SelectedFile>,
    /// Where the submission stands.
    pub status: SubmissionStatus,
}

impl EditorState {
    /// Creates an empty editor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one event and returns the requested side effect.
    pub fn apply(&mut self, event: EditorEvent) -> Effect {
        let submitting = matches!(self.status, SubmissionStatus::Submitting);
        let submitted = matches!(self.status, SubmissionStatus::Submitted { .. });

        match event {
            EditorEvent::SubmitSucceeded { message } if submitting => {
                self.status = SubmissionStatus::Submitted { message };
                Effect::None
            }
            EditorEvent::SubmitFailed { error } if submitting => {
                self.status = SubmissionStatus::Failed { error };
                Effect::None
            }
            _ if submitting => Effect::Ignored,

            EditorEvent::NewUpload => {
                *self = Self::default();
                Effect::None
            }
            EditorEvent::FileSelected(file) if submitted => {
                *self = Self {
                    file: Some(file),
                    ..Self::default()
                };
                Effect::None
            }
            _ if submitted => Effect::Ignored,

            EditorEvent::SubmitSucceeded { .. } | EditorEvent::SubmitFailed { .. } => {
                Effect::Ignored
            }
            EditorEvent::SubmitRequested => match self.prepare_submission() {
                Ok(submission) => {
                    self.status = SubmissionStatus::Submitting;
                    Effect::Submit(submission)
                }
                Err(error) => {
                    self.status = SubmissionStatus::Failed {
                        error: error.to_string(),
                    };
                    Effect::None
                }
            },
            edit => {
                if matches!(self.status, SubmissionStatus::Failed { .. }) {
                    self.status = SubmissionStatus::Draft;
                }
                self.edit(edit);
                Effect::None
            }
        }
    }

    fn edit(&mut self, event: EditorEvent) {
        let draft = &mut self.draft;
        match event {
            EditorEvent::FileSelected(file) => self.file = Some(file),
            EditorEvent::FileCleared => self.file = None,
            EditorEvent::TriggerKindSelected(kind) => draft.trigger_kind = kind,
            EditorEvent::LabelChanged(label) => draft.label = label,
            EditorEvent::ActionKindSelected(kind) => {
                let current = draft.action.as_ref().map(|a| match a {
                    DraftAction::Link { .. } => ActionKind::Link,
                    DraftAction::Modal { .. } => ActionKind::Modal,
                });
                if current != Some(kind) {
                    draft.action = Some(match kind {
                        ActionKind::Link => DraftAction::Link { url: String::new() },
                        ActionKind::Modal => DraftAction::Modal {
                            title: String::new(),
                            body: String::new(),
                        },
                    });
                }
            }
            EditorEvent::UrlChanged(text) => {
                if let Some(DraftAction::Link { url }) = draft.action.as_mut() {
                    *url = text;
                }
            }
            EditorEvent::ModalTitleChanged(text) => {
                if let Some(DraftAction::Modal { title, .. }) = draft.action.as_mut() {
                    *title = text;
                }
            }
            EditorEvent::ModalBodyChanged(text) => {
                if let Some(DraftAction::Modal { body, .. }) = draft.action.as_mut() {
                    *body = text;
                }
            }
            EditorEvent::Dragged {
                offset,
                container,
                element,
            } => draft.position = Some(normalize(offset, container, element)),
            EditorEvent::SubmitRequested
            | EditorEvent::SubmitSucceeded { .. }
            | EditorEvent::SubmitFailed { .. }
            | EditorEvent::NewUpload => {}
        }
    }

    /// Runs the local pre-submit check and builds the request payload.
    fn prepare_submission(&self) -> Result<Submission, &'static str> {
        let file = self.file.as_ref().ok_or("File is required")?;
        let action = self.draft.action.as_ref().ok_or("Action data is required")?;

        let (action_type, url, content) = match action {
            DraftAction::Link { url } => {
                if url.is_empty() {
                    return Err("URL is required for link action");
                }
                (ActionKind::Link, Some(url.clone()), None)
            }
            DraftAction::Modal { title, body } => {
                if title.is_empty() || body.is_empty() {
                    return Err("Title and body are required for modal action");
                }
                let content = ModalContent {
                    title: title.clone(),
                    body: body.clone(),
                };
                (ActionKind::Modal, None, Some(content))
            }
        };

        if self.draft.trigger_kind == TriggerKind::Button && self.draft.label.is_empty() {
            return Err("Button label is required for button trigger");
        }
        let position = self.draft.position.ok_or("Trigger position is required")?;

        let trigger = match self.draft.trigger_kind {
            TriggerKind::Button => TriggerDescriptor::Button {
                label: self.draft.label.clone(),
                position,
                scale: self.draft.scale,
            },
            TriggerKind::Zone => TriggerDescriptor::Zone {
                position,
                scale: self.draft.scale,
            },
        };

        Ok(Submission {
            file: file.clone(),
            metadata: SubmissionMetadata {
                action_type,
                trigger,
                url,
                content,
            },
        })
    }
}
