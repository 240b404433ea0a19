//! Employee identity resolution.
//!
//! Every handler starts by finding out who it is talking to. The answer is
//! cached in session attributes after the first turn; before that it comes
//! from the `EmployeeID` slot, or on Slack from the profile email matched
//! against the HR system's work-email report.

use hrmate_core::{DialogResponse, FulfillmentState, SessionKey, SlotValues};
use hrmate_slack::{platform_user_id, LookupError};
use hrmate_workday::WorkdayError;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::Deps;
use crate::resolved::Resolved;

/// Intent whose `EmployeeID` slot collects the id when nothing else works.
pub const GREETING_INTENT: &str = "Greeting";
pub const EMPLOYEE_ID_SLOT: &str = "EmployeeID";

const EMAIL_MISMATCH_MESSAGE: &str = "Unable to find you in Workday. Please check if your Slack \
     email address is same as your work email address in Workday";

/// Finds the employee id for the current event, or the reply that asks for
/// it. Resolution order: session attribute, `EmployeeID` slot, Slack email
/// lookup, then an elicit on the greeting intent.
pub async fn employee_id(
    deps: &Deps,
    event: &DialogEvent,
) -> Result<Resolved<String>, HandlerError> {
    let attributes = event.session_attributes();
    if let Some(employee_id) = attributes.get(SessionKey::EmpId) {
        return Ok(Resolved::Value(employee_id.to_owned()));
    }
    if let Some(employee_id) = event.slots().get(EMPLOYEE_ID_SLOT) {
        return Ok(Resolved::Value(employee_id.to_owned()));
    }

    match event.channel_type() {
        Some(channel) if channel.contains("Slack") => {
            match employee_id_from_slack(deps, event).await? {
                Some(employee_id) => Ok(Resolved::Value(employee_id)),
                None => Ok(Resolved::Reply(DialogResponse::close(
                    attributes,
                    FulfillmentState::Failed,
                    EMAIL_MISMATCH_MESSAGE,
                ))),
            }
        }
        Some(channel) => Ok(Resolved::Reply(DialogResponse::close(
            attributes,
            FulfillmentState::Failed,
            format!("{channel} is not supported at the moment."),
        ))),
        None => {
            let mut slots = SlotValues::new();
            slots.clear(EMPLOYEE_ID_SLOT);
            Ok(Resolved::Reply(DialogResponse::elicit_slot(
                attributes,
                GREETING_INTENT,
                slots,
                EMPLOYEE_ID_SLOT,
                "Please provide your Employee ID",
            )))
        }
    }
}

/// Resolves the Slack profile email to an employee id. `None` covers both a
/// missing profile email and an email the work-email report does not know.
async fn employee_id_from_slack(
    deps: &Deps,
    event: &DialogEvent,
) -> Result<Option<String>, HandlerError> {
    let user = platform_user_id(&event.user_id);
    let email = match deps.profiles.email_for_user(user).await {
        Ok(email) => email,
        Err(LookupError::Rejected { code }) => {
            tracing::warn!(event_name = "identity.profile_rejected", code = %code);
            return Ok(None);
        }
        Err(LookupError::MissingEmail) => return Ok(None),
        Err(error) => return Err(error.into()),
    };
    let employee_id = deps.workday.employee_id_for_work_email(&email).await?;
    Ok(employee_id)
}

/// First name from the session, or from the worker profile. An id the HR
/// system rejects re-elicits `EmployeeID` instead of failing the turn.
pub async fn first_name(
    deps: &Deps,
    event: &DialogEvent,
    employee_id: &str,
) -> Result<Resolved<String>, HandlerError> {
    let attributes = event.session_attributes();
    if let Some(first_name) = attributes.get(SessionKey::FirstName) {
        return Ok(Resolved::Value(first_name.to_owned()));
    }
    match deps.workday.worker_profile(employee_id).await {
        Ok(profile) => Ok(Resolved::Value(profile.employee.first_name)),
        Err(error) => invalid_id_reply(event, employee_id, error),
    }
}

/// Worker country from the session, or from the worker profile.
pub async fn country(
    deps: &Deps,
    event: &DialogEvent,
    employee_id: &str,
) -> Result<Resolved<String>, HandlerError> {
    let attributes = event.session_attributes();
    if let Some(country) = attributes.get(SessionKey::EmpCountry) {
        return Ok(Resolved::Value(country.to_owned()));
    }
    match deps.workday.worker_profile(employee_id).await {
        Ok(profile) => Ok(Resolved::Value(profile.employee.country)),
        Err(error) => invalid_id_reply(event, employee_id, error),
    }
}

fn invalid_id_reply<T>(
    event: &DialogEvent,
    employee_id: &str,
    error: WorkdayError,
) -> Result<Resolved<T>, HandlerError> {
    match error {
        WorkdayError::Fault { .. } | WorkdayError::UnexpectedStatus { .. } => {
            tracing::warn!(
                event_name = "identity.unknown_employee_id",
                employee_id = %employee_id,
            );
            let mut slots = SlotValues::new();
            slots.clear(EMPLOYEE_ID_SLOT);
            Ok(Resolved::Reply(DialogResponse::elicit_slot(
                event.session_attributes(),
                GREETING_INTENT,
                slots,
                EMPLOYEE_ID_SLOT,
                format!(
                    "Employee ID {employee_id} was not found in Workday. \
                     Please provide a valid Employee ID"
                ),
            )))
        }
        other => Err(other.into()),
    }
}
