//! The fulfillment webhook the dialog platform calls on every turn.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use hrmate_core::{DialogResponse, FulfillmentState};
use hrmate_dialog::{DialogEvent, Router as DialogRouter};
use uuid::Uuid;

const GENERIC_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while processing your request. Please try again later.";

#[derive(Clone)]
pub struct FulfillmentContext {
    dialog: Arc<DialogRouter>,
}

pub fn router(dialog: Arc<DialogRouter>) -> Router {
    Router::new()
        .route("/fulfillment", post(fulfill))
        .with_state(FulfillmentContext { dialog })
}

/// The platform treats any non-envelope reply as an outage, so handler
/// errors are folded into a generic Close instead of an HTTP error.
pub async fn fulfill(
    State(context): State<FulfillmentContext>,
    Json(event): Json<DialogEvent>,
) -> Json<DialogResponse> {
    let correlation_id = Uuid::new_v4();

    match context.dialog.handle(&event).await {
        Ok(response) => Json(response),
        Err(error) => {
            tracing::error!(
                event_name = "server.fulfillment_failed",
                correlation_id = %correlation_id,
                intent = %event.intent_name(),
                error = %error,
                "handler failed; returning generic close"
            );
            Json(DialogResponse::close(
                event.session_attributes(),
                FulfillmentState::Failed,
                GENERIC_FAILURE_MESSAGE,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::extract::State;
    use axum::Json;
    use hrmate_core::config::CompanyConfig;
    use hrmate_core::DialogAction;
    use hrmate_dialog::{Deps, DialogEvent, Router as DialogRouter};
    use hrmate_slack::{LookupError, ProfileLookup};
    use hrmate_workday::{
        EmergencyContactUpdate, WorkdayClient, WorkdayError, WorkerProfile,
    };

    use super::{fulfill, FulfillmentContext, GENERIC_FAILURE_MESSAGE};

    /// Every HR call fails with a transport-shaped error that no handler
    /// can turn into a message of its own.
    struct BrokenWorkday;

    #[async_trait]
    impl WorkdayClient for BrokenWorkday {
        async fn worker_profile(
            &self,
            _employee_id: &str,
        ) -> Result<WorkerProfile, WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn change_preferred_name(
            &self,
            _employee_id: &str,
            _country: &str,
            _first_name: &str,
            _last_name: &str,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn primary_position_id(
            &self,
            _employee_id: &str,
        ) -> Result<String, WorkdayError> {
            Err(WorkdayError::missing("Position_Reference"))
        }

        async fn change_business_title(
            &self,
            _employee_id: &str,
            _position_wid: &str,
            _business_title: &str,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn change_home_email(
            &self,
            _employee_id: &str,
            _email: &str,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn change_home_phone(
            &self,
            _employee_id: &str,
            _country_code_id: &str,
            _phone_number: &str,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn change_emergency_contact(
            &self,
            _employee_id: &str,
            _update: &EmergencyContactUpdate,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn record_daily_location(
            &self,
            _employee_id: &str,
            _location_data: &str,
        ) -> Result<(), WorkdayError> {
            Err(WorkdayError::missing("Worker_Data"))
        }

        async fn employee_id_for_work_email(
            &self,
            _email: &str,
        ) -> Result<Option<String>, WorkdayError> {
            Err(WorkdayError::missing("Report_Entry"))
        }

        async fn missing_data_flags(
            &self,
            _employee_id: &str,
        ) -> Result<Vec<(String, String)>, WorkdayError> {
            Err(WorkdayError::missing("Report_Entry"))
        }
    }

    struct NoProfiles;

    #[async_trait]
    impl ProfileLookup for NoProfiles {
        async fn email_for_user(&self, _user_id: &str) -> Result<String, LookupError> {
            Err(LookupError::MissingEmail)
        }
    }

    fn context() -> FulfillmentContext {
        FulfillmentContext {
            dialog: Arc::new(DialogRouter::new(Deps {
                workday: Arc::new(BrokenWorkday),
                profiles: Arc::new(NoProfiles),
                company: CompanyConfig {
                    name: "GMS".to_owned(),
                    chatbot_name: "HRMate".to_owned(),
                    portal_url: "https://people.gms-portal.com/".to_owned(),
                },
            })),
        }
    }

    fn event(intent: &str, attributes: &[(&str, &str)]) -> DialogEvent {
        let attributes: BTreeMap<_, _> = attributes
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        serde_json::from_value(serde_json::json!({
            "currentIntent": {"name": intent, "slots": {}},
            "sessionAttributes": attributes,
            "inputTranscript": "hello"
        }))
        .expect("event")
    }

    #[tokio::test]
    async fn handler_errors_fold_into_a_generic_close() {
        let Json(response) =
            fulfill(State(context()), Json(event("Greeting", &[("emp_id", "10021")]))).await;

        match response.dialog_action {
            DialogAction::Close { message, .. } => {
                assert_eq!(message.content, GENERIC_FAILURE_MESSAGE);
            }
            other => panic!("expected Close, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn successful_turns_pass_the_router_response_through() {
        let Json(response) =
            fulfill(State(context()), Json(event("CancelCurrentIntent", &[("emp_id", "10021")])))
                .await;

        assert!(matches!(response.dialog_action, DialogAction::Delegate { .. }));
        assert_eq!(
            response.session_attributes.get(hrmate_core::SessionKey::EmpId),
            Some("10021")
        );
    }
}
