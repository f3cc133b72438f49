//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, errors and the state machine trait
//! that form the vocabulary of the case engine.

mod command;
mod errors;
mod ids;
mod percentage;
mod state_machine;
mod timestamp;

pub use command::CommandMetadata;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AuditEntryId, CaseId, ObservationId, UserId};
pub use percentage::Percentage;
pub use state_machine::{InvalidTransition, StateMachine};
pub use timestamp::Timestamp;
