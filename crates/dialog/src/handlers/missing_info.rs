//! Missing personal-information checklist.
//!
//! A multi-turn flow: fetch the missing-data report, offer the checklist,
//! then walk it item by item, writing each value to the HR system as it is
//! collected. The checklist itself rides along in the session attributes
//! between turns.

use hrmate_core::{tables, DialogResponse, FulfillmentState, MissingChecklist, SessionKey};
use hrmate_workday::WorkdayError;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{close, fault_message, Deps};
use crate::identity;
use crate::resolved::resolve;

const USER_CHOICE_SLOT: &str = "UserChoice";
const EMAIL_FLAG: &str = "Check_Home_Email";
const PHONE_FLAG: &str = "Check_Home_Phone";

const WORKDAY_LOGIN_SUFFIX: &str =
    "\nPlease login into Workday or contact HR to complete this action";

pub async fn handle(deps: &Deps, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
    let attributes = event.session_attributes();
    let checklist_value = attributes.get(SessionKey::MissingPersonalInfo).map(str::to_owned);
    let has_choice = event.slots().is_filled(USER_CHOICE_SLOT);
    let in_progress = attributes.is_marked(SessionKey::UpdateInProgress);

    match checklist_value {
        None if !has_choice && !in_progress => start(deps, event, attributes).await,
        Some(raw) if has_choice || in_progress => {
            let checklist = MissingChecklist::from_session_value(&raw)?;
            advance(deps, event, checklist).await
        }
        _ => {
            // Slot or marker left over from an abandoned run. Drop the stale
            // state and fetch the report again.
            tracing::warn!(event_name = "dialog.missing_info_state_reset");
            let mut attributes = attributes;
            attributes.remove(SessionKey::MissingPersonalInfo);
            attributes.remove(SessionKey::UpdateInProgress);
            attributes.remove(SessionKey::UpdateMissingDataChoice);
            start(deps, event, attributes).await
        }
    }
}

/// First turn: run the report and offer the checklist.
async fn start(
    deps: &Deps,
    event: &DialogEvent,
    mut attributes: hrmate_core::SessionAttributes,
) -> Result<DialogResponse, HandlerError> {
    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let first_name = resolve!(identity::first_name(deps, event, &employee_id).await?);

    let flags = match deps.workday.missing_data_flags(&employee_id).await {
        Ok(flags) => flags,
        Err(
            WorkdayError::MissingField { .. }
            | WorkdayError::Fault { .. }
            | WorkdayError::UnexpectedStatus { .. },
        ) => {
            attributes.set(SessionKey::EmpId, employee_id);
            return Ok(DialogResponse::close(
                attributes,
                FulfillmentState::Failed,
                "Unable to validate your information on Workday. Please reach out to HR for \
                 verify your personal information",
            ));
        }
        Err(error) => return Err(error.into()),
    };

    let checklist = MissingChecklist::from_report_flags(
        flags.iter().map(|(name, value)| (name.as_str(), value.as_str())),
    );
    attributes.set(SessionKey::EmpId, employee_id);
    if checklist.is_empty() {
        attributes.remove(SessionKey::MissingPersonalInfo);
        return Ok(close(attributes, "All of your required information is up to date."));
    }

    let mut message = format!(
        "Hi {first_name},\nYou would now be aware that we are enabling work-from-home \
         arrangements in response to the COVID-19 pandemic.\n\n"
    );
    if checklist.len() == 1 {
        let label = checklist
            .head()
            .and_then(tables::missing_item_label)
            .map(str::to_lowercase)
            .unwrap_or_default();
        message.push_str(&format!(
            "I see your {label} is not updated in your Workday profile.\nWould you like to \
             update it now? [Yes/No]"
        ));
    } else {
        message.push_str("I see that the below items are missing:\n");
        message.push_str(&checklist.numbered_lines());
        message.push_str("\nWould you like to update it now? [Yes/No]");
    }

    attributes.set(SessionKey::MissingPersonalInfo, checklist.to_session_value()?);
    attributes.remove(SessionKey::UpdateMissingDataChoice);
    Ok(DialogResponse::elicit_slot(
        attributes,
        event.intent_name(),
        event.slots(),
        USER_CHOICE_SLOT,
        message,
    ))
}

/// Later turns: act on the yes/no answer, then collect and write checklist
/// items one at a time.
async fn advance(
    deps: &Deps,
    event: &DialogEvent,
    mut checklist: MissingChecklist,
) -> Result<DialogResponse, HandlerError> {
    let mut attributes = event.session_attributes();
    let employee_id = resolve!(identity::employee_id(deps, event).await?);
    let slots = event.slots();
    let choice = slots.get(USER_CHOICE_SLOT).map(str::to_owned);

    let mut message = String::new();
    match choice.as_deref() {
        Some("No") | Some("no") => {
            attributes.set(SessionKey::EmpId, employee_id);
            attributes.remove(SessionKey::MissingPersonalInfo);
            attributes.remove(SessionKey::UpdateInProgress);
            attributes.remove(SessionKey::UpdateMissingDataChoice);
            return Ok(close(attributes, "No worries. We can update it later"));
        }
        Some("Yes") => message.push_str("Ok! Let's do it.\n"),
        Some("yes") => {}
        _ if attributes.is_marked(SessionKey::UpdateInProgress) => {}
        _ => {
            return Ok(DialogResponse::elicit_slot(
                attributes,
                event.intent_name(),
                slots,
                USER_CHOICE_SLOT,
                "Please respond no either 'Yes' or 'No'",
            ));
        }
    }

    let Some(flag) = checklist.head().map(str::to_owned) else {
        attributes.set(SessionKey::EmpId, employee_id);
        attributes.remove(SessionKey::MissingPersonalInfo);
        attributes.remove(SessionKey::UpdateInProgress);
        attributes.remove(SessionKey::UpdateMissingDataChoice);
        return Ok(close(attributes, "All of your required information is up to date."));
    };
    let (Some(label), Some(slot_name)) =
        (tables::missing_item_label(&flag), tables::missing_item_slot(&flag))
    else {
        return Ok(close(
            attributes,
            "Development for missing data needing multiple slots to update is in progress",
        ));
    };

    let Some(value) = slots.get(slot_name).map(str::to_owned) else {
        message.push_str(&format!("\nPlease provide your {}", label.to_lowercase()));
        attributes.mark(SessionKey::UpdateMissingDataChoice);
        attributes.mark(SessionKey::UpdateInProgress);
        return Ok(DialogResponse::elicit_slot(
            attributes,
            event.intent_name(),
            slots,
            slot_name,
            message,
        ));
    };

    let write = match flag.as_str() {
        EMAIL_FLAG => {
            let email = strip_mailto(&value);
            deps.workday.change_home_email(&employee_id, email).await
        }
        PHONE_FLAG => {
            let country = resolve!(identity::country(deps, event, &employee_id).await?);
            let code = tables::phone_country_code(&country)
                .ok_or_else(|| HandlerError::MissingPhoneCode { country: country.clone() })?;
            deps.workday.change_home_phone(&employee_id, code, &value).await
        }
        _ => {
            return Ok(close(
                attributes,
                "Development for missing data needing multiple slots to update is in progress",
            ));
        }
    };

    match write {
        Ok(()) => {
            tracing::info!(
                event_name = "dialog.missing_item_updated",
                employee_id = %employee_id,
                item = %flag,
            );
            message = format!("Your {} has been updated successfully.", label.to_lowercase());
        }
        Err(error) => message = fault_message(error, WORKDAY_LOGIN_SUFFIX)?,
    }

    checklist.pop_head();
    if checklist.is_empty() {
        message.push_str("\n\nThanks for sharing the requested information.");
        attributes.set(SessionKey::EmpId, employee_id);
        attributes.remove(SessionKey::MissingPersonalInfo);
        attributes.remove(SessionKey::UpdateInProgress);
        attributes.remove(SessionKey::UpdateMissingDataChoice);
        return Ok(close(attributes, message));
    }

    let next_flag = checklist.head().map(str::to_owned).unwrap_or_default();
    let next_label = tables::missing_item_label(&next_flag).unwrap_or(&next_flag);
    let next_slot = tables::missing_item_slot(&next_flag).unwrap_or(USER_CHOICE_SLOT);
    message.push_str(&format!("\n\nPlease provide your {}", next_label.to_lowercase()));

    attributes.set(SessionKey::MissingPersonalInfo, checklist.to_session_value()?);
    attributes.mark(SessionKey::UpdateMissingDataChoice);
    attributes.mark(SessionKey::UpdateInProgress);
    let mut slots = slots;
    slots.clear(USER_CHOICE_SLOT);
    Ok(DialogResponse::elicit_slot(
        attributes,
        event.intent_name(),
        slots,
        next_slot,
        message,
    ))
}

/// Chat clients often linkify emails as `mailto:user@host|user@host`; keep
/// only the address.
fn strip_mailto(value: &str) -> &str {
    if let Some(rest) = value.strip_prefix("mailto:") {
        match rest.split_once('|') {
            Some((address, _)) => address,
            None => rest,
        }
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::strip_mailto;

    #[test]
    fn mailto_wrappers_are_removed() {
        assert_eq!(strip_mailto("mailto:a@b.org|a@b.org"), "a@b.org");
        assert_eq!(strip_mailto("mailto:a@b.org"), "a@b.org");
        assert_eq!(strip_mailto("a@b.org"), "a@b.org");
    }
}
