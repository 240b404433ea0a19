//! Home-email change.

use hrmate_core::DialogResponse;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, fault_message, Deps, CONTACT_HR_SUFFIX};
use crate::identity;
use crate::resolved::resolve;

const EMAIL_SLOT: &str = "EmailID";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);

    let slots = event.slots();
    let Some(email) = slots.get(EMAIL_SLOT) else {
        return Ok(DialogResponse::elicit_slot(
            event.session_attributes(),
            event.intent_name(),
            slots.clone(),
            EMAIL_SLOT,
            "Please provide your new home email address",
        ));
    };

    let message = match deps.workday.change_home_email(&employee_id, email).await {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.home_email_changed",
                employee_id = %employee_id,
            );
            format!("Your email address has been changed to {email}")
        }
        Err(error) => fault_message(error, CONTACT_HR_SUFFIX)?,
    };
    Ok(close(event.session_attributes(), message))
}
