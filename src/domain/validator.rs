//! Structural validation of submitted overlay metadata.
//!
//! Submissions arrive as untrusted JSON. [`validate`] inspects the raw
//! [`serde_json::Value`] and reports every structural problem in one pass;
//! [`parse_submission`] turns an accepted candidate into the typed
//! [`ConfigurationMetadata`].
//!
//! Only presence and JSON types are checked. URL well-formedness and
//! position ranges are left to the caller.

use serde_json::Value;

use super::{
    ActionDescriptor, ActionKind, ConfigurationMetadata, ModalContent, Position,
    TriggerDescriptor, TriggerKind,
};
use crate::error::OverlayError;

/// Action `type` is absent or not `link`/`modal`.
pub const INVALID_ACTION_TYPE: &str = "Invalid or missing type.";
/// `trigger` is absent or its `type` is not `button`/`zone`.
pub const INVALID_TRIGGER_TYPE: &str = "Invalid or missing trigger type.";
/// Button trigger without a non-empty string label.
pub const INVALID_BUTTON_LABEL: &str = "Missing or invalid button label.";
/// Zone trigger without numeric `position.x` / `position.y`.
pub const INVALID_ZONE_POSITION: &str = "Missing or invalid zone position.";
/// Button trigger without numeric `position.x` / `position.y`.
pub const INVALID_BUTTON_POSITION: &str = "Missing or invalid button position.";
/// Link action without a non-empty string URL.
pub const INVALID_LINK_URL: &str = "Missing or invalid URL for link type.";
/// Modal action without string `content.title` and `content.body`.
pub const INVALID_MODAL_CONTENT: &str = "Missing or invalid content for modal type.";

/// Validates a loosely-typed submission.
///
/// Returns the list of problems in rule order; an empty list means the
/// candidate is structurally valid. All rules run, none short-circuit.
#[must_use]
pub fn validate(candidate: &Value) -> Vec<String> {
    let mut errors = Vec::new();

    let action_kind = action_kind(candidate);
    let trigger = candidate.get("trigger");
    let trigger_kind = trigger.and_then(trigger_kind);

    if action_kind.is_none() {
        errors.push(INVALID_ACTION_TYPE.to_string());
    }
    if trigger_kind.is_none() {
        errors.push(INVALID_TRIGGER_TYPE.to_string());
    }

    if let (Some(kind), Some(trigger)) = (trigger_kind, trigger) {
        match kind {
            TriggerKind::Button => {
                if non_empty_str(trigger.get("label")).is_none() {
                    errors.push(INVALID_BUTTON_LABEL.to_string());
                }
                if position(trigger).is_none() {
                    errors.push(INVALID_BUTTON_POSITION.to_string());
                }
            }
            TriggerKind::Zone => {
                if position(trigger).is_none() {
                    errors.push(INVALID_ZONE_POSITION.to_string());
                }
            }
        }
    }

    match action_kind {
        Some(ActionKind::Link) => {
            if non_empty_str(candidate.get("url")).is_none() {
                errors.push(INVALID_LINK_URL.to_string());
            }
        }
        Some(ActionKind::Modal) => {
            if modal_content(candidate).is_none() {
                errors.push(INVALID_MODAL_CONTENT.to_string());
            }
        }
        None => {}
    }

    errors
}

/// Validates a submission and converts it into typed metadata.
///
/// # Errors
///
/// Returns [`OverlayError::Validation`] carrying every message from
/// [`validate`] when the candidate is not structurally valid.
pub fn parse_submission(candidate: &Value) -> Result<ConfigurationMetadata, OverlayError> {
    let errors = validate(candidate);
    if !errors.is_empty() {
        return Err(OverlayError::Validation(errors));
    }
    build(candidate)
        .ok_or_else(|| OverlayError::Internal("validated candidate did not convert".to_string()))
}

fn build(candidate: &Value) -> Option<ConfigurationMetadata> {
    let trigger_value = candidate.get("trigger")?;
    let position = position(trigger_value)?;
    let scale = trigger_value
        .get("scale")
        .and_then(Value::as_f64)
        .unwrap_or(1.0);

    let trigger = match trigger_kind(trigger_value)? {
        TriggerKind::Button => TriggerDescriptor::Button {
            label: non_empty_str(trigger_value.get("label"))?.to_string(),
            position,
            scale,
        },
        TriggerKind::Zone => TriggerDescriptor::Zone { position, scale },
    };

    let action = match action_kind(candidate)? {
        ActionKind::Link => ActionDescriptor::Link {
            url: non_empty_str(candidate.get("url"))?.to_string(),
        },
        ActionKind::Modal => ActionDescriptor::Modal {
            content: modal_content(candidate)?,
        },
    };

    Some(ConfigurationMetadata { trigger, action })
}

fn action_kind(candidate: &Value) -> Option<ActionKind> {
    match candidate.get("type")?.as_str()? {
        "link" => Some(ActionKind::Link),
        "modal" => Some(ActionKind::Modal),
        _ => None,
    }
}

fn trigger_kind(trigger: &Value) -> Option<TriggerKind> {
    match trigger.get("type")?.as_str()? {
        "button" => Some(TriggerKind::Button),
        "zone" => Some(TriggerKind::Zone),
        _ => None,
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value?.as_str().filter(|s| !s.is_empty())
}

fn position(trigger: &Value) -> Option<Position> {
    let position = trigger.get("position")?;
    let x = position.get("x")?.as_f64()?;
    let y = position.get("y")?.as_f64()?;
    Some(Position::new(x, y))
}

fn modal_content(candidate: &Value) -> Option<ModalContent> {
    let content = candidate.get("content")?;
    Some(ModalContent {
        title: content.get("title")?.as_str()?.to_string(),
        body: content.get("body")?.as_str()?.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use serde_json::json;

    use super::*;

    fn valid_link() -> Value {
        json!({
            "type": "link",
            "url": "https://example.com",
            "trigger": {"type": "zone", "position": {"x": 10, "y": 10}, "scale": 1}
        })
    }

    fn valid_modal() -> Value {
        json!({
            "type": "modal",
            "trigger": {"type": "button", "label": "Buy now", "position": {"x": 50, "y": 80}},
            "content": {"title": "Offer", "body": "50% off"}
        })
    }

    #[test]
    fn valid_candidates_produce_no_errors() {
        assert!(validate(&valid_link()).is_empty());
        assert!(validate(&valid_modal()).is_empty());
    }

    #[test]
    fn bad_action_type_is_reported_alone() {
        let mut candidate = valid_link();
        candidate["type"] = json!("redirect");
        assert_eq!(validate(&candidate), vec![INVALID_ACTION_TYPE]);
    }

    #[test]
    fn missing_trigger_is_reported_alone() {
        let mut candidate = valid_link();
        if let Some(obj) = candidate.as_object_mut() {
            obj.remove("trigger");
        }
        assert_eq!(validate(&candidate), vec![INVALID_TRIGGER_TYPE]);
    }

    #[test]
    fn empty_button_label_is_reported_alone() {
        let mut candidate = valid_modal();
        candidate["trigger"]["label"] = json!("");
        assert_eq!(validate(&candidate), vec![INVALID_BUTTON_LABEL]);
    }

    #[test]
    fn non_string_label_is_rejected() {
        let mut candidate = valid_modal();
        candidate["trigger"]["label"] = json!(42);
        assert_eq!(validate(&candidate), vec![INVALID_BUTTON_LABEL]);
    }

    #[test]
    fn zone_position_must_be_numeric() {
        let mut candidate = valid_link();
        candidate["trigger"]["position"]["y"] = json!("10");
        assert_eq!(validate(&candidate), vec![INVALID_ZONE_POSITION]);
    }

    #[test]
    fn button_position_is_checked_too() {
        let mut candidate = valid_modal();
        if let Some(trigger) = candidate["trigger"].as_object_mut() {
            trigger.remove("position");
        }
        assert_eq!(validate(&candidate), vec![INVALID_BUTTON_POSITION]);
    }

    #[test]
    fn link_without_url_mentions_url() {
        let candidate = json!({
            "type": "link",
            "trigger": {"type": "zone", "position": {"x": 10, "y": 10}}
        });
        let errors = validate(&candidate);
        assert_eq!(errors, vec![INVALID_LINK_URL]);
        assert!(errors.iter().any(|e| e.contains("URL")));
    }

    #[test]
    fn modal_with_numeric_body_is_rejected() {
        let mut candidate = valid_modal();
        candidate["content"]["body"] = json!(5);
        assert_eq!(validate(&candidate), vec![INVALID_MODAL_CONTENT]);
    }

    #[test]
    fn modal_accepts_empty_strings() {
        let mut candidate = valid_modal();
        candidate["content"] = json!({"title": "", "body": ""});
        assert!(validate(&candidate).is_empty());
    }

    #[test]
    fn every_problem_is_reported_in_one_pass() {
        let candidate = json!({"type": "link", "trigger": {"type": "button"}});
        assert_eq!(
            validate(&candidate),
            vec![INVALID_BUTTON_LABEL, INVALID_BUTTON_POSITION, INVALID_LINK_URL]
        );
    }

    #[test]
    fn non_object_candidate_fails_type_checks() {
        assert_eq!(
            validate(&json!([1, 2, 3])),
            vec![INVALID_ACTION_TYPE, INVALID_TRIGGER_TYPE]
        );
        assert_eq!(
            validate(&Value::Null),
            vec![INVALID_ACTION_TYPE, INVALID_TRIGGER_TYPE]
        );
    }

    #[test]
    fn parse_submission_builds_typed_metadata() {
        let Ok(metadata) = parse_submission(&valid_modal()) else {
            panic!("valid candidate rejected");
        };
        assert_eq!(
            metadata.trigger,
            TriggerDescriptor::Button {
                label: "Buy now".to_string(),
                position: Position::new(50.0, 80.0),
                scale: 1.0,
            }
        );
        assert_eq!(
            metadata.action,
            ActionDescriptor::Modal {
                content: ModalContent {
                    title: "Offer".to_string(),
                    body: "50% off".to_string(),
                }
            }
        );
    }

    #[test]
    fn parse_submission_ignores_stray_fields_of_other_action() {
        let mut candidate = valid_link();
        candidate["content"] = json!({"title": "ignored", "body": "ignored"});
        let Ok(metadata) = parse_submission(&candidate) else {
            panic!("valid candidate rejected");
        };
        assert_eq!(metadata.action.kind(), ActionKind::Link);
    }

    #[test]
    fn parse_submission_carries_all_errors() {
        let Err(OverlayError::Validation(errors)) = parse_submission(&json!({})) else {
            panic!("expected validation error");
        };
        assert_eq!(errors.len(), 2);
    }
}
