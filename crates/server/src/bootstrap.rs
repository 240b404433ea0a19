use std::sync::Arc;

use hrmate_core::config::{AppConfig, ConfigError};
use hrmate_dialog::{Deps, Router};
use hrmate_slack::SlackProfileClient;
use hrmate_workday::HttpWorkdayClient;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: AppConfig,
    pub dialog: Arc<Router>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Wires the HTTP clients to the dialog router from an already-loaded
/// config.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");

    // One HTTP client shared by every outbound integration.
    let http = reqwest::Client::new();
    let workday = Arc::new(HttpWorkdayClient::from_config(http.clone(), &config.workday));
    let profiles = Arc::new(SlackProfileClient::from_config(http, &config.slack));
    let dialog = Arc::new(Router::new(Deps {
        workday,
        profiles,
        company: config.company.clone(),
    }));

    info!(
        event_name = "system.bootstrap.ready",
        tenant = %config.workday.tenant,
        api_version = %config.workday.api_version,
        "dialog router wired to HR and chat backends"
    );
    Ok(Application { config, dialog })
}
