use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkdayError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The service answered with a SOAP fault. The faultstring is shown to
    /// the user, so it is carried verbatim.
    #[error("{faultstring}")]
    Fault { faultstring: String },
    #[error("unexpected HTTP status {status} from the HR service")]
    UnexpectedStatus { status: u16 },
    #[error("malformed XML in HR service response: {0}")]
    MalformedXml(#[from] quick_xml::Error),
    #[error("HR service response is missing {path}")]
    MissingField { path: String },
}

impl WorkdayError {
    pub fn missing(path: impl Into<String>) -> Self {
        Self::MissingField { path: path.into() }
    }

    /// The faultstring when this error is a SOAP fault.
    pub fn faultstring(&self) -> Option<&str> {
        match self {
            Self::Fault { faultstring } => Some(faultstring),
            _ => None,
        }
    }
}
