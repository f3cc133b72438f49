//! Case command and query handlers.

mod add_observation;
mod case_number_generator;
mod caseload_summary;
mod check_attachment;
mod create_case;
mod get_case;
mod list_cases;
mod request_extension;
mod transition_case;
mod update_settings;

pub use add_observation::{AddObservationCommand, AddObservationHandler};
pub use case_number_generator::{CaseNumberGenerator, CaseNumberPolicy, DEFAULT_MAX_ATTEMPTS};
pub use caseload_summary::{CaseloadSummaryHandler, CaseloadSummaryQuery};
pub use check_attachment::CheckAttachmentHandler;
pub use create_case::{CreateCaseHandler, RegisterCaseCommand};
pub use get_case::{CaseView, GetCaseHandler, GetCaseQuery};
pub use list_cases::{CaseListPage, ListCasesHandler, ListCasesQuery, DEFAULT_PAGE_SIZE};
pub use request_extension::{RequestExtensionCommand, RequestExtensionHandler};
pub use transition_case::{TransitionCaseCommand, TransitionCaseHandler};
pub use update_settings::UpdateSettingsHandler;

use crate::domain::case::{Case, CaseError};
use crate::domain::foundation::{CaseId, DomainError, ErrorCode};
use crate::ports::CaseRepository;

async fn load_case(repository: &dyn CaseRepository, id: &CaseId) -> Result<Case, CaseError> {
    repository
        .find_by_id(id)
        .await?
        .ok_or(CaseError::NotFound(*id))
}

fn persistence_error(case_id: CaseId, err: DomainError) -> CaseError {
    match err.code {
        ErrorCode::CaseNotFound => CaseError::NotFound(case_id),
        _ => err.into(),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::adapters::InMemoryCaseStore;
    use crate::domain::audit::{AuditAction, AuditEntry};
    use crate::domain::case::{
        Applicant, Case, CaseDetails, CaseNumber, CaseSettings, ConflictKind, InvolvedParty,
        NationalId,
    };
    use crate::domain::foundation::{CaseId, CommandMetadata, Timestamp, UserId};
    use crate::ports::CaseRepository;
    use chrono::{TimeZone, Utc};

    pub fn jan_15() -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 1, 15, 9, 0, 0).unwrap())
    }

    pub fn judge() -> CommandMetadata {
        CommandMetadata::new(UserId::new("judge-1").unwrap())
    }

    pub fn audit(case: &Case) -> AuditEntry {
        AuditEntry::new(&judge(), AuditAction::Edit, "Case", case.id(), "test", jan_15())
    }

    pub async fn registered_case_for(store: &InMemoryCaseStore, official: &str, number: &str) -> Case {
        let applicant = Applicant::new(
            NationalId::new("1712345678").unwrap(),
            "Maria Quishpe",
            None,
            "Barrio La Floresta",
        )
        .unwrap();
        let details = CaseDetails::new(
            applicant,
            InvolvedParty::default(),
            ConflictKind::Neighborhood,
            "Water leak damaging the neighbouring wall",
            None,
        )
        .unwrap();
        let case = Case::register(
            CaseId::new(),
            CaseNumber::parse(number).unwrap(),
            details,
            UserId::new(official).unwrap(),
            UserId::new("clerk-1").unwrap(),
            &CaseSettings::default(),
            jan_15(),
        )
        .unwrap();
        let entry = AuditEntry::new(&judge(), AuditAction::Create, "Case", case.id(), "Case registered", jan_15());
        store.insert(&case, &entry).await.unwrap();
        case
    }

    pub async fn registered_case(store: &InMemoryCaseStore) -> Case {
        registered_case_for(store, "judge-1", "JC-2024-01-0001").await
    }
}
