//! Action variants: what happens when a trigger is activated.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Discriminant of [`ActionDescriptor`], as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Navigate to an external URL.
    Link,
    /// Show a modal dialog.
    Modal,
}

impl ActionKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Link => "link",
            Self::Modal => "modal",
        }
    }
}

/// Title and body text shown by a modal action.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub struct ModalContent {
    /// Dialog title.
    pub title: String,
    /// Dialog body text.
    pub body: String,
}

/// Behaviour bound to a trigger.
///
/// Stored as `{"type":"link","url":..}` or
/// `{"type":"modal","content":{"title":..,"body":..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionDescriptor {
    /// Open an external link.
    Link {
        /// Target URL. Not checked for well-formedness.
        url: String,
    },
    /// Open a modal dialog.
    Modal {
        /// Dialog text.
        content: ModalContent,
    },
}

impl ActionDescriptor {
    /// Returns the variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> ActionKind {
        match self {
            Self::Link { .. } => ActionKind::Link,
            Self::Modal { .. } => ActionKind::Modal,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn modal_nests_content() {
        let action = ActionDescriptor::Modal {
            content: ModalContent {
                title: "Offer".to_string(),
                body: "50% off".to_string(),
            },
        };
        let Ok(json) = serde_json::to_value(&action) else {
            panic!("serialization failed");
        };
        assert_eq!(
            json,
            serde_json::json!({"type": "modal", "content": {"title": "Offer", "body": "50% off"}})
        );
        assert_eq!(action.kind(), ActionKind::Modal);
    }

    #[test]
    fn link_round_trips_through_json() {
        let raw = serde_json::json!({"type": "link", "url": "https://example.com"});
        let Ok(action) = serde_json::from_value::<ActionDescriptor>(raw) else {
            panic!("deserialization failed");
        };
        assert_eq!(
            action,
            ActionDescriptor::Link {
                url: "https://example.com".to_string()
            }
        );
    }
}
