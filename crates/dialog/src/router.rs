//! Intent dispatch.

use hrmate_core::DialogResponse;

use crate::error::HandlerError;
use crate::event::DialogEvent;
use crate::handlers::{
    business_title, checkin, close, emergency_contact, greeting, home_email, missing_info,
    preferred_name, suggestions, Deps,
};

pub struct Router {
    deps: Deps,
}

impl Router {
    pub fn new(deps: Deps) -> Self {
        Self { deps }
    }

    pub async fn handle(&self, event: &DialogEvent) -> Result<DialogResponse, HandlerError> {
        let intent = event.intent_name();
        tracing::info!(event_name = "dialog.intent_received", intent = %intent);

        match intent {
            // Informational intents answer through the platform's own
            // prompts; the handler only resolves identity first.
            "Greeting" | "AlternateGreeting" | "OfficeAccess" | "TravelAdvisory"
            | "CovidExposure" | "QuarantineGuidelines" | "WorkFromHomeGuidlelines" => {
                greeting::greet(&self.deps, event).await
            }
            "BotIntroduction" => greeting::introduce_bot(&self.deps, event).await,
            "CancelCurrentIntent" => greeting::reset_session(event).await,
            "FirstDaySetup" => greeting::first_day_setup(event).await,
            "DisabilityDetailsUpdate" => greeting::disability_portal(&self.deps, event).await,
            "MissingPersonalInfo" => missing_info::handle(&self.deps, event).await,
            "PreferredName" => preferred_name::handle(&self.deps, event).await,
            "BusinessTitle" => business_title::handle(&self.deps, event).await,
            "EmailUpdate" => home_email::handle(&self.deps, event).await,
            "CovidCheckIn" => checkin::handle(&self.deps, event).await,
            "EmergencyContactDetails" => emergency_contact::handle(&self.deps, event).await,
            "AlternateIntent" => suggestions::handle(event).await,
            other => {
                tracing::warn!(event_name = "dialog.unknown_intent", intent = %other);
                Ok(close(
                    event.session_attributes(),
                    format!("Intent with name {other} not supported yet"),
                ))
            }
        }
    }
}
