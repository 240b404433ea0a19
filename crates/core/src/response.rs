use serde::{Deserialize, Serialize};

use crate::session::{SessionAttributes, SlotValues};

/// Wire-level response returned to the dialog platform. Field names follow the
/// platform's camelCase contract exactly.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogResponse {
    #[serde(rename = "sessionAttributes")]
    pub session_attributes: SessionAttributes,
    #[serde(rename = "dialogAction")]
    pub dialog_action: DialogAction,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DialogAction {
    Close {
        #[serde(rename = "fulfillmentState")]
        fulfillment_state: FulfillmentState,
        message: Message,
    },
    Delegate {
        slots: SlotValues,
    },
    ElicitSlot {
        #[serde(rename = "intentName")]
        intent_name: String,
        slots: SlotValues,
        #[serde(rename = "slotToElicit")]
        slot_to_elicit: String,
        message: Message,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FulfillmentState {
    Fulfilled,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    #[serde(rename = "contentType")]
    pub content_type: ContentType,
    pub content: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentType {
    PlainText,
}

impl Message {
    pub fn plain(content: impl Into<String>) -> Self {
        Self { content_type: ContentType::PlainText, content: content.into() }
    }
}

impl DialogResponse {
    /// Ends the conversation turn with a final message.
    pub fn close(
        session_attributes: SessionAttributes,
        fulfillment_state: FulfillmentState,
        content: impl Into<String>,
    ) -> Self {
        let message = Message::plain(content);
        tracing::debug!(
            event_name = "dialog.response_built",
            dialog_action = "Close",
            fulfillment_state = ?fulfillment_state,
        );
        Self {
            session_attributes,
            dialog_action: DialogAction::Close { fulfillment_state, message },
        }
    }

    /// Hands slot collection back to the platform's own prompting.
    pub fn delegate(session_attributes: SessionAttributes, slots: SlotValues) -> Self {
        tracing::debug!(event_name = "dialog.response_built", dialog_action = "Delegate");
        Self { session_attributes, dialog_action: DialogAction::Delegate { slots } }
    }

    /// Asks the user for one specific slot of the named intent.
    pub fn elicit_slot(
        session_attributes: SessionAttributes,
        intent_name: impl Into<String>,
        slots: SlotValues,
        slot_to_elicit: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let intent_name = intent_name.into();
        let slot_to_elicit = slot_to_elicit.into();
        tracing::debug!(
            event_name = "dialog.response_built",
            dialog_action = "ElicitSlot",
            intent = %intent_name,
            slot = %slot_to_elicit,
        );
        Self {
            session_attributes,
            dialog_action: DialogAction::ElicitSlot {
                intent_name,
                slots,
                slot_to_elicit,
                message: Message::plain(content),
            },
        }
    }
}
