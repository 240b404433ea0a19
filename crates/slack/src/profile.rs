//! Email lookup through the chat platform's `users.profile.get` call.

use async_trait::async_trait;
use hrmate_core::config::SlackConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::LookupError;

/// Resolves a chat-platform user id to the email address on their profile.
/// Dialog code depends on this seam; tests swap in a canned lookup.
#[async_trait]
pub trait ProfileLookup: Send + Sync {
    async fn email_for_user(&self, user_id: &str) -> Result<String, LookupError>;
}

/// The platform user id embedded in a dialog event's user id. Dialog user
/// ids arrive as colon-separated segments with the platform id last.
pub fn platform_user_id(dialog_user_id: &str) -> &str {
    match dialog_user_id.rsplit_once(':') {
        Some((_, user)) => user,
        None => dialog_user_id,
    }
}

pub struct SlackProfileClient {
    client: reqwest::Client,
    api_url: String,
    token: SecretString,
}

impl SlackProfileClient {
    pub fn from_config(http: reqwest::Client, config: &SlackConfig) -> Self {
        Self {
            client: http,
            api_url: config.profile_api_url.clone(),
            token: config.bot_token.clone(),
        }
    }
}

#[async_trait]
impl ProfileLookup for SlackProfileClient {
    async fn email_for_user(&self, user_id: &str) -> Result<String, LookupError> {
        let response = self
            .client
            .post(&self.api_url)
            .form(&[("token", self.token.expose_secret()), ("user", user_id)])
            .send()
            .await
            .map_err(|source| LookupError::Transport { source })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(LookupError::UnexpectedStatus { status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| LookupError::Transport { source })?;
        let email = email_from_reply(&body)?;

        tracing::debug!(
            event_name = "slack.profile_resolved",
            user_id = %user_id,
        );
        Ok(email)
    }
}

#[derive(Debug, Deserialize)]
struct ProfileReply {
    ok: bool,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    profile: Option<Profile>,
}

#[derive(Debug, Deserialize)]
struct Profile {
    #[serde(default)]
    email: Option<String>,
}

fn email_from_reply(body: &str) -> Result<String, LookupError> {
    let reply: ProfileReply = serde_json::from_str(body)?;
    if !reply.ok {
        return Err(LookupError::Rejected {
            code: reply.error.unwrap_or_else(|| "unknown_error".to_owned()),
        });
    }
    reply
        .profile
        .and_then(|profile| profile.email)
        .filter(|email| !email.is_empty())
        .ok_or(LookupError::MissingEmail)
}

#[cfg(test)]
mod tests {
    use super::{email_from_reply, platform_user_id};
    use crate::error::LookupError;

    #[test]
    fn dialog_user_ids_keep_their_last_segment() {
        assert_eq!(platform_user_id("T024BE7LD:U2147483697"), "U2147483697");
        assert_eq!(platform_user_id("local-test-user"), "local-test-user");
    }

    #[test]
    fn ok_replies_yield_the_profile_email() {
        let email = email_from_reply(
            r#"{"ok":true,"profile":{"real_name":"Priya Raman","email":"priya@example.org"}}"#,
        )
        .expect("email");
        assert_eq!(email, "priya@example.org");
    }

    #[test]
    fn rejected_replies_carry_the_platform_error_code() {
        let error = email_from_reply(r#"{"ok":false,"error":"user_not_found"}"#)
            .expect_err("rejection");
        assert!(matches!(error, LookupError::Rejected { code } if code == "user_not_found"));
    }

    #[test]
    fn profiles_without_email_are_an_error() {
        let error = email_from_reply(r#"{"ok":true,"profile":{"real_name":"Priya Raman"}}"#)
            .expect_err("missing email");
        assert!(matches!(error, LookupError::MissingEmail));

        let error = email_from_reply(r#"{"ok":true,"profile":{"email":""}}"#)
            .expect_err("blank email");
        assert!(matches!(error, LookupError::MissingEmail));
    }

    #[test]
    fn garbage_replies_are_malformed() {
        let error = email_from_reply("<html>502 Bad Gateway</html>").expect_err("malformed");
        assert!(matches!(error, LookupError::Malformed(_)));
    }
}
