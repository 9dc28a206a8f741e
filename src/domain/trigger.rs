//! Trigger variants: the interactive element overlaid on the image.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Position;

fn default_scale() -> f64 {
    1.0
}

/// Discriminant of [`TriggerDescriptor`], as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// A labelled clickable button.
    Button,
    /// A transparent hotzone.
    Zone,
}

impl TriggerKind {
    /// Wire name of the kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Button => "button",
            Self::Zone => "zone",
        }
    }
}

/// Positioned trigger bound to an action.
///
/// Serialized with a `type` discriminant:
/// `{"type":"button","label":"Buy","position":{"x":10,"y":20},"scale":1}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum TriggerDescriptor {
    /// Visible button carrying a text label.
    Button {
        /// Button caption.
        label: String,
        /// Normalized position of the button.
        position: Position,
        /// Render scale factor.
        #[serde(default = "default_scale")]
        scale: f64,
    },
    /// Invisible clickable area.
    Zone {
        /// Normalized position of the hotzone.
        position: Position,
        /// Render scale factor.
        #[serde(default = "default_scale")]
        scale: f64,
    },
}

impl TriggerDescriptor {
    /// Returns the variant discriminant.
    #[must_use]
    pub const fn kind(&self) -> TriggerKind {
        match self {
            Self::Button { .. } => TriggerKind::Button,
            Self::Zone { .. } => TriggerKind::Zone,
        }
    }

    /// Returns the trigger position.
    #[must_use]
    pub const fn position(&self) -> Position {
        match self {
            Self::Button { position, .. } | Self::Zone { position, .. } => *position,
        }
    }

    /// Returns the render scale.
    #[must_use]
    pub const fn scale(&self) -> f64 {
        match self {
            Self::Button { scale, .. } | Self::Zone { scale, .. } => *scale,
        }
    }
}
