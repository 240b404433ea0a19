//! Greeting and the small informational intents that only seed session
//! state before the platform's own prompts take over.

use hrmate_core::{DialogResponse, SessionKey, SlotValues};

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, Deps};
use crate::identity;
use crate::resolved::resolve;

/// Resolves the employee and delegates, leaving id, name, and company
/// details in the session for every later intent.
pub async fn greet(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let first_name = resolve!(identity::first_name(deps, event, &employee_id).await?);

    let mut attributes = event.session_attributes();
    attributes.set(SessionKey::EmpId, employee_id);
    attributes.set(SessionKey::FirstName, first_name);
    attributes.set(SessionKey::CompanyName, deps.company.name.clone());
    attributes.set(SessionKey::ChatbotName, deps.company.chatbot_name.clone());
    Ok(DialogResponse::delegate(attributes, event.slots()))
}

/// Seeds the bot's own name and company so the introduction prompt can
/// interpolate them.
pub async fn introduce_bot(
    deps: &Deps,
    event: &DialogEvent,
) -> Result<DialogResponse, HandlerError> {
    let mut attributes = event.session_attributes();
    attributes.set(SessionKey::CompanyName, deps.company.name.clone());
    attributes.set(SessionKey::ChatbotName, deps.company.chatbot_name.clone());
    Ok(DialogResponse::delegate(attributes, event.slots()))
}

/// Drops the in-flight transaction keys so the next intent starts clean.
/// The resolved identity survives the reset.
pub async fn reset_session(event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let mut attributes = event.session_attributes();
    attributes.clear_transaction_state();
    Ok(DialogResponse::delegate(attributes, event.slots()))
}

pub async fn first_day_setup(event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    Ok(close(event.session_attributes(), "Yet to be Implemented"))
}

/// Points the user at the country-specific personal-info page of the people
/// portal.
pub async fn disability_portal(
    deps: &Deps,
    event: &DialogEvent,
) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let country = resolve!(identity::country(deps, event, &employee_id).await?);

    let url = format!("{}{}/personalinfo/", deps.company.portal_url, country.to_lowercase());
    let mut attributes = event.session_attributes();
    attributes.set(SessionKey::EmpCountry, country);
    attributes.set(SessionKey::CompanyName, deps.company.name.clone());
    attributes.set(SessionKey::Url, url);
    Ok(DialogResponse::delegate(attributes, SlotValues::new()))
}
