//! Business-title change against the worker's primary position.

use hrmate_core::DialogResponse;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, fault_message, Deps, CONTACT_HR_SUFFIX};
use crate::identity;
use crate::resolved::resolve;

const TITLE_SLOT: &str = "NewBusinessTitle";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);

    let slots = event.slots();
    let Some(title) = slots.get(TITLE_SLOT) else {
        return Ok(DialogResponse::elicit_slot(
            event.session_attributes(),
            event.intent_name(),
            slots.clone(),
            TITLE_SLOT,
            "Please provide your new business title",
        ));
    };

    let position_wid = deps.workday.primary_position_id(&employee_id).await?;
    let message = match deps
        .workday
        .change_business_title(&employee_id, &position_wid, title)
        .await
    {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.business_title_changed",
                employee_id = %employee_id,
            );
            format!("Your business title has been changed to {title}")
        }
        Err(error) => fault_message(error, CONTACT_HR_SUFFIX)?,
    };
    Ok(close(event.session_attributes(), message))
}
