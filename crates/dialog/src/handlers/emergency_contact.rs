//! Emergency-contact review and update.
//!
//! Two phases behind one intent. First the current contact on file is shown
//! and the user is asked whether to replace it; a yes answer flips the
//! `update_details` marker and the second phase collects the replacement
//! field by field before writing it in one request.
//!
//! The dialog engine sometimes swallows a bare yes/no into the transcript
//! without filling the elicited slot, so every collected field also accepts
//! the raw transcript when that field was the one just asked for.

use hrmate_core::{tables, DialogResponse, SessionAttributes, SessionKey, SlotValues};
use hrmate_workday::EmergencyContactUpdate;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{capitalize, close, fault_message, Deps, CONTACT_HR_SUFFIX};
use crate::identity;
use crate::resolved::resolve;

const UPDATE_SLOT: &str = "Update";
const RELATION_SLOT: &str = "Relation";
const FIRST_NAME_SLOT: &str = "RelativeFirstName";
const LAST_NAME_SLOT: &str = "RelativeLastName";
const POSTAL_CODE_SLOT: &str = "PostalCode";
const ADDRESS_SLOT: &str = "AddressLine";
const PHONE_SLOT: &str = "PhoneNumber";
const EMAIL_SLOT: &str = "EmailID";

const CONFIRMED_MESSAGE: &str = "Thanks for confirming the details.";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let mut attributes = event.session_attributes();
    let mut slots = event.slots();
    let mut update_details = false;

    match slots.get(UPDATE_SLOT).map(str::to_lowercase).as_deref() {
        Some("yes") => {
            update_details = true;
            attributes.mark(SessionKey::UpdateDetails);
        }
        Some("no") => return Ok(close(attributes, CONFIRMED_MESSAGE)),
        _ => {
            if attributes.is_marked(SessionKey::UpdateDetails) {
                update_details = true;
            }
        }
    }

    // Yes/no answers that landed in the transcript instead of the slot.
    if event.last_elicited_slot() == Some(UPDATE_SLOT) {
        match event.transcript().to_lowercase().as_str() {
            "yes" => {
                update_details = true;
                slots.set(UPDATE_SLOT, "yes");
                attributes.mark(SessionKey::UpdateDetails);
            }
            "no" => return Ok(close(attributes, CONFIRMED_MESSAGE)),
            _ => {}
        }
    }

    let employee_id = resolve!(identity::employee_id(deps, event).await?);

    if update_details {
        collect_and_write(deps, event, attributes, slots, &employee_id).await
    } else {
        show_current(deps, event, attributes, slots, &employee_id).await
    }
}

/// Shows the contact on file and asks whether to update it.
async fn show_current(
    deps: &Deps,
    event: &DialogEvent,
    mut attributes: SessionAttributes,
    slots: SlotValues,
    employee_id: &str,
) -> Result<DialogResponse, HandlerError> {
    let profile = match deps.workday.worker_profile(employee_id).await {
        Ok(profile) => profile,
        Err(error) => {
            let message = fault_message(error, "")?;
            attributes.set(SessionKey::EmpId, employee_id);
            attributes.remove(SessionKey::UpdateDetails);
            return Ok(close(attributes, message));
        }
    };

    let message = match profile.emergency_contact {
        Some(contact) if !contact.is_empty() => format!(
            "Your current emergency details are as follows:\n\nContact Name: {}\n\nAddress: \
             {}\n\nPhone number: {}\n\n Email ID: {}\n\nWould you like to update this \
             information? [YES/NO]",
            contact.name(),
            contact.address(),
            contact.phone(),
            contact.email(),
        ),
        _ => "Your emergency contact details are not available on Workday.\nWould you like to \
              update this information? [YES/NO]"
            .to_owned(),
    };

    attributes.set(SessionKey::EmpId, employee_id);
    attributes.remove(SessionKey::UpdateDetails);
    Ok(DialogResponse::elicit_slot(attributes, event.intent_name(), slots, UPDATE_SLOT, message))
}

/// Collects the replacement contact one slot at a time, then writes it.
async fn collect_and_write(
    deps: &Deps,
    event: &DialogEvent,
    mut attributes: SessionAttributes,
    mut slots: SlotValues,
    employee_id: &str,
) -> Result<DialogResponse, HandlerError> {
    let country = resolve!(identity::country(deps, event, employee_id).await?);

    let Some(relation) = field_value(event, &mut slots, RELATION_SLOT, str::to_lowercase) else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            RELATION_SLOT,
            "Please specify the relationship (Father, Mother, Spouse, Child, etc)",
        ));
    };
    let Some(relation_type_id) = tables::relation_type_id(&relation.to_lowercase()) else {
        slots.clear(RELATION_SLOT);
        return Ok(elicit(
            attributes,
            event,
            slots,
            RELATION_SLOT,
            "Please specify the relationship (Father, Mother, Spouse, Child, etc)",
        ));
    };

    let Some(first_name) = field_value(event, &mut slots, FIRST_NAME_SLOT, capitalize) else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            FIRST_NAME_SLOT,
            "Please provide the first name of the contact:",
        ));
    };
    let Some(last_name) = field_value(event, &mut slots, LAST_NAME_SLOT, capitalize) else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            LAST_NAME_SLOT,
            "Please provide the last name of the contact:",
        ));
    };
    let Some(postal_code) = field_value(event, &mut slots, POSTAL_CODE_SLOT, str::to_lowercase)
    else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            POSTAL_CODE_SLOT,
            "Please provide their postal code/zip code",
        ));
    };

    let Some(address) = field_value(event, &mut slots, ADDRESS_SLOT, str::to_lowercase) else {
        return Ok(elicit(attributes, event, slots, ADDRESS_SLOT, "Please provide their address"));
    };
    let Some((address_line, city, region_id)) = parse_address(&address) else {
        slots.clear(ADDRESS_SLOT);
        return Ok(elicit(
            attributes,
            event,
            slots,
            ADDRESS_SLOT,
            "Please provide their address as: street, city, state",
        ));
    };

    let Some(phone_number) = field_value(event, &mut slots, PHONE_SLOT, str::to_lowercase) else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            PHONE_SLOT,
            "Please provide their phone number",
        ));
    };
    let Some(email) = field_value(event, &mut slots, EMAIL_SLOT, str::to_lowercase) else {
        return Ok(elicit(
            attributes,
            event,
            slots,
            EMAIL_SLOT,
            "Please provide your new home email address",
        ));
    };

    let update = EmergencyContactUpdate {
        country,
        relation_type_id: relation_type_id.to_owned(),
        first_name,
        last_name,
        address_line,
        city: capitalize(&city),
        region_id,
        postal_code,
        phone_number,
        email,
    };
    let message = match deps.workday.change_emergency_contact(employee_id, &update).await {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.emergency_contact_changed",
                employee_id = %employee_id,
            );
            "Thanks for providing the information. Your emergency contact details have been \
             updated on Workday."
                .to_owned()
        }
        Err(error) => fault_message(error, CONTACT_HR_SUFFIX)?,
    };

    attributes.set(SessionKey::EmpId, employee_id);
    attributes.remove(SessionKey::UpdateDetails);
    Ok(close(attributes, message))
}

fn elicit(
    attributes: SessionAttributes,
    event: &DialogEvent,
    slots: SlotValues,
    slot: &str,
    message: impl Into<String>,
) -> DialogResponse {
    DialogResponse::elicit_slot(attributes, event.intent_name(), slots, slot, message)
}

/// Slot value, or the transcript when this slot was the one just asked for.
/// The transcript path also backfills the slot so the next turn sees it.
fn field_value(
    event: &DialogEvent,
    slots: &mut SlotValues,
    name: &str,
    transform: impl Fn(&str) -> String,
) -> Option<String> {
    if event.last_elicited_slot() == Some(name) && !event.transcript().is_empty() {
        let value = transform(event.transcript());
        slots.set(name, value.clone());
        return Some(value);
    }
    slots.get(name).map(str::to_owned)
}

/// Splits a `street, city, state` answer and maps the state to its region
/// reference. `None` asks for the address again.
fn parse_address(address: &str) -> Option<(String, String, String)> {
    let mut parts = address.splitn(3, ',');
    let line = parts.next()?.trim();
    let city = parts.next()?.trim();
    let state = parts.next()?.trim();
    let region_id = tables::state_reference(&state.to_lowercase())?;
    Some((line.to_owned(), city.to_owned(), region_id.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::parse_address;

    #[test]
    fn three_part_addresses_resolve_their_region() {
        let (line, city, region) =
            parse_address("221 Baker Street, Los Angeles, California").expect("address");
        assert_eq!(line, "221 Baker Street");
        assert_eq!(city, "Los Angeles");
        assert_eq!(region, "USA-CA");
    }

    #[test]
    fn short_or_unknown_addresses_are_rejected() {
        assert!(parse_address("just a street").is_none());
        assert!(parse_address("street, city").is_none());
        assert!(parse_address("street, city, atlantis").is_none());
    }
}
