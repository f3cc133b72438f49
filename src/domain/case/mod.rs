//! Case module - the deadline and lifecycle engine.
//!
//! Pure calculators (`deadline`, `urgency`, `progress`) plus the `Case`
//! aggregate whose mutations return the next version of the case.

mod aggregate;
mod case_number;
mod caseload;
mod deadline;
mod details;
mod errors;
mod observation;
mod progress;
mod resolution;
mod settings;
mod status;
mod urgency;
mod validation;

pub use aggregate::{Case, CaseSnapshot, ExtensionGrant};
pub use case_number::{
    CaseNumber, CaseNumberBucket, SequenceScan, DEFAULT_CASE_PREFIX, MAX_SEQUENCE,
};
pub use caseload::{
    BlockCount, CaseDigest, CaseloadSummary, KindCount, MonthlyCount, StatusCounts,
    ACTIVITY_MONTHS, DEFAULT_RECENT_LIMIT,
};
pub use deadline::{compute_extended_deadline, compute_standard_deadline};
pub use details::{
    Applicant, CaseDetails, ConflictKind, InvolvedParty, MAX_NAME_LENGTH, MAX_PHONE_LENGTH,
};
pub use errors::{CaseError, ExtensionError, TransitionError};
pub use observation::Observation;
pub use progress::estimate_progress;
pub use resolution::{Resolution, ResolutionMethod};
pub use settings::{
    CaseSettings, ConfigurationError, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_EXTENSION_DAYS,
    DEFAULT_MAX_ATTACHMENT_BYTES, DEFAULT_STANDARD_DAYS, DEFAULT_URGENT_THRESHOLD_DAYS, MAX_DAYS,
};
pub use status::CaseStatus;
pub use urgency::{classify, UrgencyLevel};
pub use validation::{
    check_attachment, Justification, NationalId, ObservationText, MIN_JUSTIFICATION_LENGTH,
    MIN_OBSERVATION_LENGTH, NATIONAL_ID_LENGTH,
};
