use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use crate::error::WorkdayError;

/// Raw reply from a SOAP endpoint before any XML handling.
#[derive(Clone, Debug)]
pub struct SoapReply {
    pub status: u16,
    pub body: String,
}

/// Seam between the operation-level client and the network. Tests swap in a
/// canned transport; production uses [`HttpTransport`].
#[async_trait]
pub trait SoapTransport: Send + Sync {
    async fn post_xml(&self, url: &str, body: String) -> Result<SoapReply, WorkdayError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SoapTransport for HttpTransport {
    async fn post_xml(&self, url: &str, body: String) -> Result<SoapReply, WorkdayError> {
        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .body(body)
            .send()
            .await
            .map_err(|source| WorkdayError::Transport { url: url.to_owned(), source })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| WorkdayError::Transport { url: url.to_owned(), source })?;

        tracing::debug!(
            event_name = "workday.reply_received",
            url = %url,
            status = status,
            body_bytes = body.len(),
        );

        Ok(SoapReply { status, body })
    }
}
