//! Dialog fulfillment: event model, identity resolution, and the intent
//! handlers that turn HR requests into Workday writes.
//!
//! The flow for every turn is the same. The server deserializes a
//! [`DialogEvent`], hands it to the [`Router`], and serializes whatever
//! [`hrmate_core::DialogResponse`] comes back. Handlers never talk HTTP
//! themselves; they go through the [`handlers::Deps`] seams.

pub mod error;
pub mod event;
pub mod handlers;
pub mod identity;
pub mod resolved;
pub mod router;

pub use error::HandlerError;
pub use event::DialogEvent;
pub use handlers::Deps;
pub use resolved::Resolved;
pub use router::Router;
