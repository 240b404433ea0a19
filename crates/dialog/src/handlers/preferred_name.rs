//! Preferred-name change: collect first and last name, then write both
//! through the preferred-name operation.

use hrmate_core::{DialogResponse, SessionKey};

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, fault_message, Deps, CONTACT_HR_SUFFIX};
use crate::identity;
use crate::resolved::resolve;

const FIRST_NAME_SLOT: &str = "PrefFirstName";
const LAST_NAME_SLOT: &str = "PrefLastName";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let country = resolve!(identity::country(deps, event, &employee_id).await?);

    let slots = event.slots();
    let attributes = event.session_attributes();
    let Some(first_name) = slots.get(FIRST_NAME_SLOT) else {
        return Ok(DialogResponse::elicit_slot(
            attributes,
            event.intent_name(),
            slots.clone(),
            FIRST_NAME_SLOT,
            "Please provide your preferred first name",
        ));
    };
    let Some(last_name) = slots.get(LAST_NAME_SLOT) else {
        return Ok(DialogResponse::elicit_slot(
            attributes,
            event.intent_name(),
            slots.clone(),
            LAST_NAME_SLOT,
            "Please provide your preferred last name",
        ));
    };

    let message = match deps
        .workday
        .change_preferred_name(&employee_id, &country, first_name, last_name)
        .await
    {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.preferred_name_changed",
                employee_id = %employee_id,
            );
            format!("Your preferred name has been changed to {first_name} {last_name}")
        }
        Err(error) => fault_message(error, CONTACT_HR_SUFFIX)?,
    };

    let mut attributes = event.session_attributes();
    attributes.set(SessionKey::EmpCountry, country);
    attributes.set(SessionKey::FirstName, first_name);
    Ok(close(attributes, message))
}
