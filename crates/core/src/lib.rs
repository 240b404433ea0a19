pub mod checklist;
pub mod config;
pub mod employee;
pub mod response;
pub mod session;
pub mod tables;

pub use checklist::{ChecklistError, MissingChecklist};
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use employee::{EmergencyContactSnapshot, EmployeeRecord, NOT_AVAILABLE};
pub use response::{ContentType, DialogAction, DialogResponse, FulfillmentState, Message};
pub use session::{SessionAttributes, SessionKey, SlotValues, MARKER_SET};
