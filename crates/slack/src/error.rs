use thiserror::Error;

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("profile lookup request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("unexpected HTTP status {status} from the chat platform")]
    UnexpectedStatus { status: u16 },
    #[error("malformed profile lookup response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The platform answered `ok: false`; the error code is its own.
    #[error("profile lookup rejected: {code}")]
    Rejected { code: String },
    #[error("profile has no email address on file")]
    MissingEmail,
}
