//! SOAP client for the Workday HR service.
//!
//! The crate is layered so the dialog logic never touches XML: [`envelope`]
//! builds request bodies, [`transport`] moves them over HTTP, [`xml`] reads
//! replies, and [`client`] ties the three together behind the
//! [`WorkdayClient`] trait.

pub mod client;
pub mod envelope;
pub mod error;
pub mod transport;
pub mod xml;

pub use client::{HttpWorkdayClient, WorkdayClient, WorkerProfile};
pub use envelope::{Credentials, EmergencyContactUpdate};
pub use error::WorkdayError;
pub use transport::{HttpTransport, SoapReply, SoapTransport};
