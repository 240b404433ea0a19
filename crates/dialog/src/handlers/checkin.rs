//! Daily work-location check-in.
//!
//! Three slots collected in order: a work-style letter, a location letter
//! (with a free-text escape hatch), and a DONE/NEXT confirmation. The
//! answer is written to the HR system as one `{work_style}:{location}`
//! payload.

use hrmate_core::{tables, DialogResponse, SessionKey};

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, fault_message, Deps, CONTACT_HR_SUFFIX};
use crate::identity;
use crate::resolved::resolve;

const WORK_STYLE_SLOT: &str = "WorkStyle";
const LOCATION_SLOT: &str = "Location";
const CONFIRM_SLOT: &str = "Confirm";

const WORK_STYLE_OPTIONS: &str = "A) Working from home\nB) Working from office\nC) Working from \
     client location\nD) On Personal Time Off";
const LOCATION_OPTIONS: &str = "A) Bengaluru\nB) Hyderabad\nC) Pune\nD) Chennai\nE) Gurugram\nF) \
     Mumbai\nG) Kolkata\nH) Noida\nI) New Delhi\nJ) Others";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    // Read before identity resolution so the free-text turn still knows the
    // previous turn picked "Others".
    let has_custom_location =
        event.session_attributes().contains(SessionKey::CustomLocation);

    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let first_name = resolve!(identity::first_name(deps, event, &employee_id).await?);

    let slots = event.slots();
    let mut attributes = event.session_attributes();

    let work_style = match slots.get(WORK_STYLE_SLOT) {
        None => {
            attributes.set(SessionKey::EmpId, employee_id);
            attributes.set(SessionKey::FirstName, first_name);
            return Ok(DialogResponse::elicit_slot(
                attributes,
                event.intent_name(),
                slots.clone(),
                WORK_STYLE_SLOT,
                format!(
                    "Where are you working from today?\nPlease enter the LETTER beside the \
                     option that best describes your work location today:\n\n{WORK_STYLE_OPTIONS}"
                ),
            ));
        }
        Some(choice) => match tables::work_style(&choice.to_lowercase()) {
            Some(style) => style.to_owned(),
            None => {
                attributes.set(SessionKey::EmpId, employee_id);
                attributes.set(SessionKey::FirstName, first_name);
                let mut slots = slots.clone();
                slots.clear(WORK_STYLE_SLOT);
                return Ok(DialogResponse::elicit_slot(
                    attributes,
                    event.intent_name(),
                    slots,
                    WORK_STYLE_SLOT,
                    format!(
                        "'{choice}' is not a valid choice. Please select by entering the \
                         letter corresponding to the relevant option\n\n{WORK_STYLE_OPTIONS}"
                    ),
                ));
            }
        },
    };

    let location = match slots.get(LOCATION_SLOT) {
        None => {
            return Ok(DialogResponse::elicit_slot(
                attributes,
                event.intent_name(),
                slots.clone(),
                LOCATION_SLOT,
                format!(
                    "What location are you working in today? Please enter the LETTER next to \
                     the option that best describes your location:\n\n{LOCATION_OPTIONS}"
                ),
            ));
        }
        Some(choice) => {
            let lowered = choice.to_lowercase();
            if lowered == "j" {
                attributes.mark(SessionKey::CustomLocation);
                let mut slots = slots.clone();
                slots.clear(LOCATION_SLOT);
                return Ok(DialogResponse::elicit_slot(
                    attributes,
                    event.intent_name(),
                    slots,
                    LOCATION_SLOT,
                    "Looks like the place you are looking for is not my provided list. \
                     Please enter the name of the city/town you are currently in:",
                ));
            }
            match tables::location(&lowered) {
                Some(city) => city.to_owned(),
                None if has_custom_location => choice.to_owned(),
                None => {
                    attributes.set(SessionKey::EmpId, employee_id);
                    attributes.set(SessionKey::FirstName, first_name);
                    attributes.remove(SessionKey::CustomLocation);
                    let mut slots = slots.clone();
                    slots.clear(LOCATION_SLOT);
                    return Ok(DialogResponse::elicit_slot(
                        attributes,
                        event.intent_name(),
                        slots,
                        LOCATION_SLOT,
                        format!(
                            "'{choice}' is not a valid choice. Please enter the LETTER next \
                             to the option that best describes your location:\n\n{LOCATION_OPTIONS}"
                        ),
                    ));
                }
            }
        }
    };

    let confirm = match slots.get(CONFIRM_SLOT) {
        None => {
            return Ok(DialogResponse::elicit_slot(
                attributes,
                event.intent_name(),
                slots.clone(),
                CONFIRM_SLOT,
                format!(
                    "I've noted that your current work location is: {work_style}, in \
                     {location}.\nIf you have the computer, internet, and work instructions \
                     to continue your work, please end the chat by typing: DONE\nIf you need \
                     to let me know you help with computer, internet, or work instructions, \
                     type: NEXT"
                ),
            ));
        }
        Some(confirm) => confirm.to_lowercase(),
    };
    if confirm != "done" && confirm != "next" {
        let mut slots = slots.clone();
        slots.clear(CONFIRM_SLOT);
        return Ok(DialogResponse::elicit_slot(
            attributes,
            event.intent_name(),
            slots,
            CONFIRM_SLOT,
            "That's not a valid choice. Please enter either DONE or NEXT to proceed further.",
        ));
    }

    let payload = format!("{work_style}:{location}");
    let message = match deps.workday.record_daily_location(&employee_id, &payload).await {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.check_in_recorded",
                employee_id = %employee_id,
            );
            let company = &deps.company.name;
            if confirm == "done" {
                format!(
                    "Thanks for checking in.\n\nFinally, here is the HR Message of the day:\n\
                     All {company} employees who have travelled internationally for either \
                     business or personal reasons are to remain at home for the first 14 days \
                     after returning. During that time, please do not report to {company} or \
                     client offices. If unable to work from home during that time, please \
                     consult with your supervisor or HR lead. \n Please check-in again tomorrow"
                )
            } else {
                format!(
                    "Thanks for checking in. \n\nPlease contact {company} IT Support for any \
                     help required with computer, internet or work setup. You can reach to \
                     them over Slack or call 1800 123 123456. \n Please check-in again tomorrow"
                )
            }
        }
        Err(error) => fault_message(error, CONTACT_HR_SUFFIX)?,
    };

    attributes.set(SessionKey::EmpId, employee_id);
    attributes.set(SessionKey::FirstName, first_name);
    attributes.remove(SessionKey::CustomLocation);
    Ok(close(attributes, message))
}
