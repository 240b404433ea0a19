use thiserror::Error;

/// Failures a handler cannot turn into a dialog reply on its own. The server
/// maps these to a generic close message; faults with a human-readable
/// faultstring are handled inside the handlers instead.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Workday(#[from] hrmate_workday::WorkdayError),
    #[error(transparent)]
    Lookup(#[from] hrmate_slack::LookupError),
    #[error(transparent)]
    Checklist(#[from] hrmate_core::checklist::ChecklistError),
    /// No phone country code is configured for the worker's country.
    #[error("no phone country code configured for {country}")]
    MissingPhoneCode { country: String },
}
