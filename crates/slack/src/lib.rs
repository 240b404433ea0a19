//! Chat-platform profile lookup.
//!
//! The fulfillment flow only needs one thing from the chat platform: the
//! email address behind a user id, used to resolve the employee on first
//! contact. [`ProfileLookup`] is that seam; [`SlackProfileClient`] is the
//! HTTP implementation.

pub mod error;
pub mod profile;

pub use error::LookupError;
pub use profile::{platform_user_id, ProfileLookup, SlackProfileClient};
