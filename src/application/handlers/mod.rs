//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod case;

pub use case::{
    AddObservationCommand, AddObservationHandler, CaseNumberGenerator, CaseNumberPolicy,
    CaseView, CaseloadSummaryHandler, CaseloadSummaryQuery, CheckAttachmentHandler,
    CaseListPage, CreateCaseHandler, GetCaseHandler, GetCaseQuery, ListCasesHandler,
    ListCasesQuery, RegisterCaseCommand,
    RequestExtensionCommand, RequestExtensionHandler, TransitionCaseCommand,
    TransitionCaseHandler, UpdateSettingsHandler,
};
