//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers write through `CaseRepository`; query handlers read
//! through `CaseReader`.

pub mod handlers;

pub use handlers::{
    // Case commands
    AddObservationCommand, AddObservationHandler,
    CreateCaseHandler, RegisterCaseCommand,
    RequestExtensionCommand, RequestExtensionHandler,
    TransitionCaseCommand, TransitionCaseHandler,
    UpdateSettingsHandler,
    // Case queries
    CaseView, CaseloadSummaryHandler, CaseloadSummaryQuery,
    CheckAttachmentHandler, GetCaseHandler, GetCaseQuery,
    CaseListPage, ListCasesHandler, ListCasesQuery,
    // Numbering
    CaseNumberGenerator, CaseNumberPolicy,
};
