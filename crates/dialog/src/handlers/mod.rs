//! Intent handlers and the plumbing they share.

use std::sync::Arc;

use hrmate_core::config::CompanyConfig;
use hrmate_core::{DialogResponse, FulfillmentState, SessionAttributes};
use hrmate_slack::ProfileLookup;
use hrmate_workday::{WorkdayClient, WorkdayError};

use crate::error::HandlerError;

pub mod business_title;
pub mod checkin;
pub mod emergency_contact;
pub mod greeting;
pub mod home_email;
pub mod missing_info;
pub mod preferred_name;
pub mod suggestions;

/// Everything a handler needs beyond the event itself.
pub struct Deps {
    pub workday: Arc<dyn WorkdayClient>,
    pub profiles: Arc<dyn ProfileLookup>,
    pub company: CompanyConfig,
}

pub(crate) const CONTACT_HR_SUFFIX: &str = "\nPlease contact HR to complete this action";

/// Fulfilled close; failures worth a `Failed` state build their response
/// inline instead.
pub(crate) fn close(
    attributes: SessionAttributes,
    message: impl Into<String>,
) -> DialogResponse {
    DialogResponse::close(attributes, FulfillmentState::Fulfilled, message)
}

/// User-facing text for a write that the HR service refused. Faults carry a
/// readable faultstring; anything else bubbles up as a handler error.
pub(crate) fn fault_message(
    error: WorkdayError,
    suffix: &str,
) -> Result<String, HandlerError> {
    match error.faultstring() {
        Some(faultstring) => Ok(format!("{faultstring}{suffix}")),
        None => Err(error.into()),
    }
}

/// First letter uppercased, the rest lowercased.
pub(crate) fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::capitalize;

    #[test]
    fn capitalize_normalizes_case() {
        assert_eq!(capitalize("spouse"), "Spouse");
        assert_eq!(capitalize("BENGALURU"), "Bengaluru");
        assert_eq!(capitalize(""), "");
    }
}
