//! Inbound dialog event model.
//!
//! Events arrive as JSON from the dialog engine's fulfillment hook. Only the
//! fields the handlers consume are modeled; everything else passes through
//! untouched.

use std::collections::BTreeMap;

use hrmate_core::{SessionAttributes, SlotValues};
use serde::Deserialize;

/// Request attribute carrying the channel the user is talking over.
const CHANNEL_TYPE_ATTRIBUTE: &str = "x-amz-lex:channel-type";

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogEvent {
    pub current_intent: CurrentIntent,
    /// Null on the first turn of a conversation.
    #[serde(default)]
    pub session_attributes: Option<SessionAttributes>,
    /// Absent for console tests, present for real channel traffic.
    #[serde(default)]
    pub request_attributes: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub input_transcript: String,
    #[serde(default)]
    pub recent_intent_summary_view: Option<Vec<IntentSummary>>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentIntent {
    pub name: String,
    #[serde(default)]
    pub slots: SlotValues,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentSummary {
    #[serde(default)]
    pub slot_to_elicit: Option<String>,
}

impl DialogEvent {
    pub fn intent_name(&self) -> &str {
        &self.current_intent.name
    }

    pub fn slots(&self) -> SlotValues {
        self.current_intent.slots.clone()
    }

    pub fn session_attributes(&self) -> SessionAttributes {
        self.session_attributes.clone().unwrap_or_default()
    }

    pub fn channel_type(&self) -> Option<&str> {
        self.request_attributes
            .as_ref()
            .and_then(|attributes| attributes.get(CHANNEL_TYPE_ATTRIBUTE))
            .map(String::as_str)
    }

    pub fn transcript(&self) -> &str {
        &self.input_transcript
    }

    /// Slot the engine most recently asked for, from the head of the intent
    /// summary view.
    pub fn last_elicited_slot(&self) -> Option<&str> {
        self.recent_intent_summary_view
            .as_deref()
            .and_then(|summaries| summaries.first())
            .and_then(|summary| summary.slot_to_elicit.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::DialogEvent;

    #[test]
    fn full_events_deserialize() {
        let event: DialogEvent = serde_json::from_str(
            r#"{
                "currentIntent": {
                    "name": "PreferredName",
                    "slots": {"PrefFirstName": "Priya", "PrefLastName": null}
                },
                "sessionAttributes": {"emp_id": "10021"},
                "requestAttributes": {"x-amz-lex:channel-type": "Slack"},
                "userId": "T024BE7LD:U2147483697",
                "inputTranscript": "change my preferred name",
                "recentIntentSummaryView": [{"slotToElicit": "PrefLastName"}]
            }"#,
        )
        .expect("event");

        assert_eq!(event.intent_name(), "PreferredName");
        assert_eq!(event.slots().get("PrefFirstName"), Some("Priya"));
        assert!(!event.slots().is_filled("PrefLastName"));
        assert_eq!(
            event.session_attributes().get(hrmate_core::SessionKey::EmpId),
            Some("10021")
        );
        assert_eq!(event.channel_type(), Some("Slack"));
        assert_eq!(event.last_elicited_slot(), Some("PrefLastName"));
    }

    #[test]
    fn sparse_events_fall_back_to_defaults() {
        let event: DialogEvent =
            serde_json::from_str(r#"{"currentIntent": {"name": "Greeting"}, "sessionAttributes": null}"#)
                .expect("event");

        assert_eq!(event.intent_name(), "Greeting");
        assert!(event.session_attributes().is_empty());
        assert_eq!(event.channel_type(), None);
        assert_eq!(event.transcript(), "");
        assert_eq!(event.last_elicited_slot(), None);
    }
}
