//! Case-specific error types.

use thiserror::Error;

use super::{CaseStatus, ConfigurationError};
use crate::domain::foundation::{
    CaseId, DomainError, ErrorCode, InvalidTransition, ValidationError,
};

/// Why an extension request was refused. Nothing is mutated in any case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtensionError {
    #[error("An extension has already been granted for this case")]
    AlreadyRequested,

    #[error("Extensions are only allowed while the case is in progress (currently {0})")]
    InvalidState(CaseStatus),

    #[error("Invalid justification: {0}")]
    InvalidJustification(ValidationError),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),
}

/// Why a lifecycle transition was refused. Nothing is mutated in any case.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    InvalidTransition(#[from] InvalidTransition),

    #[error("Closing a case as {0} requires a resolution method and notes")]
    MissingResolution(CaseStatus),
}

/// Errors surfaced by case handlers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CaseError {
    #[error("Case not found: {0}")]
    NotFound(CaseId),

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Extension(#[from] ExtensionError),

    #[error(transparent)]
    Transition(#[from] TransitionError),

    #[error("Could not mint a unique case number for {bucket} after {attempts} attempt(s)")]
    IdentifierExhausted { bucket: String, attempts: u32 },

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Case was modified concurrently: {0}")]
    ConcurrencyConflict(String),

    #[error("Error: {0}")]
    Infrastructure(String),
}

impl CaseError {
    pub fn not_found(id: CaseId) -> Self {
        CaseError::NotFound(id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        CaseError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            CaseError::NotFound(_) => ErrorCode::CaseNotFound,
            CaseError::Validation(_) => ErrorCode::ValidationFailed,
            CaseError::Extension(ExtensionError::AlreadyRequested) => {
                ErrorCode::ExtensionAlreadyRequested
            }
            CaseError::Extension(ExtensionError::InvalidState(_)) => ErrorCode::InvalidCaseState,
            CaseError::Extension(ExtensionError::InvalidJustification(_)) => {
                ErrorCode::ValidationFailed
            }
            CaseError::Extension(ExtensionError::Configuration(_)) => {
                ErrorCode::ConfigurationInvalid
            }
            CaseError::Transition(TransitionError::InvalidTransition(_)) => {
                ErrorCode::InvalidStateTransition
            }
            CaseError::Transition(TransitionError::MissingResolution(_)) => {
                ErrorCode::ValidationFailed
            }
            CaseError::IdentifierExhausted { .. } => ErrorCode::IdentifierExhausted,
            CaseError::Configuration(_) => ErrorCode::ConfigurationInvalid,
            CaseError::ConcurrencyConflict(_) => ErrorCode::ConcurrencyConflict,
            CaseError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// True when the caller can fix the input and try again.
    pub fn is_user_correctable(&self) -> bool {
        !matches!(
            self,
            CaseError::IdentifierExhausted { .. }
                | CaseError::Configuration(_)
                | CaseError::Extension(ExtensionError::Configuration(_))
                | CaseError::Infrastructure(_)
        )
    }
}

impl From<DomainError> for CaseError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::ConcurrencyConflict => CaseError::ConcurrencyConflict(err.message),
            _ => CaseError::Infrastructure(err.to_string()),
        }
    }
}
