//! Row mapping shared by the PostgreSQL adapters.

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::postgres::PgRow;
use sqlx::{Postgres, Row, Transaction};
use uuid::Uuid;

use crate::domain::audit::AuditEntry;
use crate::domain::case::{
    Applicant, Case, CaseDetails, CaseNumber, CaseSnapshot, ExtensionGrant, InvolvedParty,
    Justification, NationalId, Observation, ObservationText, Resolution,
};
use crate::domain::foundation::{
    AuditEntryId, CaseId, DomainError, ErrorCode, ObservationId, Timestamp, UserId,
    ValidationError,
};

pub(super) const CASE_COLUMNS: &str = r#"
    id, case_number,
    applicant_national_id, applicant_name, applicant_phone, applicant_address,
    involved_national_id, involved_name, involved_phone, involved_address,
    conflict_kind, description, residential_block,
    assigned_official, registered_by,
    status, registered_at, standard_deadline,
    extension_requested, extension_justification, extension_requested_at, extended_deadline,
    resolution_method, resolution_notes, resolved_at, closed_at,
    version, updated_at
"#;

pub(super) const AUDIT_COLUMNS: &str = r#"
    id, actor, action, entity, entity_id, description,
    before_data, after_data, ip_address, user_agent, recorded_at
"#;

pub(super) const OBSERVATION_COLUMNS: &str =
    "id, case_id, author, content, internal, created_at";

/// Reads one column, mapping decode failures to `DatabaseError`.
pub(super) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, Postgres> + sqlx::Type<Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::database(&format!("Failed to read column {}", name), e))
}

fn timestamp(row: &PgRow, name: &str) -> Result<Timestamp, DomainError> {
    column::<DateTime<Utc>>(row, name).map(Timestamp::from_datetime)
}

fn optional_timestamp(row: &PgRow, name: &str) -> Result<Option<Timestamp>, DomainError> {
    column::<Option<DateTime<Utc>>>(row, name).map(|dt| dt.map(Timestamp::from_datetime))
}

fn stored<T>(value: Result<T, ValidationError>) -> Result<T, DomainError> {
    value.map_err(|e| DomainError::new(ErrorCode::DatabaseError, format!("Corrupt row: {}", e)))
}

fn corrupt(message: impl Into<String>) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("Corrupt row: {}", message.into()))
}

pub(super) fn row_to_case(row: &PgRow) -> Result<Case, DomainError> {
    let id: Uuid = column(row, "id")?;

    let applicant = Applicant {
        national_id: stored(NationalId::new(column::<String>(row, "applicant_national_id")?))?,
        full_name: column(row, "applicant_name")?,
        phone: column(row, "applicant_phone")?,
        address: column(row, "applicant_address")?,
    };
    let involved_id: Option<String> = column(row, "involved_national_id")?;
    let involved = InvolvedParty {
        national_id: stored(involved_id.map(NationalId::new).transpose())?,
        full_name: column(row, "involved_name")?,
        phone: column(row, "involved_phone")?,
        address: column(row, "involved_address")?,
    };
    let details = CaseDetails {
        applicant,
        involved,
        conflict_kind: stored(column::<String>(row, "conflict_kind")?.parse())?,
        description: column(row, "description")?,
        residential_block: column(row, "residential_block")?,
    };

    let extension = if column::<bool>(row, "extension_requested")? {
        let justification: Option<String> = column(row, "extension_justification")?;
        let requested_at = optional_timestamp(row, "extension_requested_at")?;
        let extended_deadline = optional_timestamp(row, "extended_deadline")?;
        match (justification, requested_at, extended_deadline) {
            (Some(text), Some(requested_at), Some(extended_deadline)) => Some(ExtensionGrant {
                justification: stored(Justification::new(&text))?,
                requested_at,
                extended_deadline,
            }),
            _ => return Err(corrupt(format!("case {} has partial extension fields", id))),
        }
    } else {
        None
    };

    let method: Option<String> = column(row, "resolution_method")?;
    let notes: Option<String> = column(row, "resolution_notes")?;
    let resolution = match (method, notes) {
        (Some(method), Some(notes)) => Some(stored(Resolution::new(stored(method.parse())?, &notes))?),
        _ => None,
    };

    let version: i64 = column(row, "version")?;

    Ok(Case::reconstitute(CaseSnapshot {
        id: CaseId::from_uuid(id),
        case_number: stored(CaseNumber::parse(column::<String>(row, "case_number")?))?,
        details,
        assigned_official: stored(UserId::new(column::<String>(row, "assigned_official")?))?,
        registered_by: stored(UserId::new(column::<String>(row, "registered_by")?))?,
        status: stored(column::<String>(row, "status")?.parse())?,
        registered_at: timestamp(row, "registered_at")?,
        standard_deadline: timestamp(row, "standard_deadline")?,
        extension,
        resolution,
        resolved_at: optional_timestamp(row, "resolved_at")?,
        closed_at: optional_timestamp(row, "closed_at")?,
        version: u32::try_from(version).map_err(|_| corrupt(format!("version {} out of range", version)))?,
        updated_at: timestamp(row, "updated_at")?,
    }))
}

pub(super) fn row_to_audit_entry(row: &PgRow) -> Result<AuditEntry, DomainError> {
    Ok(AuditEntry {
        id: AuditEntryId::from_uuid(column(row, "id")?),
        actor: stored(UserId::new(column::<String>(row, "actor")?))?,
        action: stored(column::<String>(row, "action")?.parse())?,
        entity: column(row, "entity")?,
        entity_id: column(row, "entity_id")?,
        description: column(row, "description")?,
        before: column::<Option<JsonValue>>(row, "before_data")?,
        after: column::<Option<JsonValue>>(row, "after_data")?,
        ip_address: column(row, "ip_address")?,
        user_agent: column(row, "user_agent")?,
        recorded_at: timestamp(row, "recorded_at")?,
    })
}

pub(super) fn row_to_observation(row: &PgRow) -> Result<Observation, DomainError> {
    Ok(Observation::reconstitute(
        ObservationId::from_uuid(column(row, "id")?),
        CaseId::from_uuid(column(row, "case_id")?),
        stored(UserId::new(column::<String>(row, "author")?))?,
        stored(ObservationText::new(&column::<String>(row, "content")?))?,
        column(row, "internal")?,
        timestamp(row, "created_at")?,
    ))
}

/// Writes an audit entry inside the caller's transaction.
pub(super) async fn insert_audit_entry(
    tx: &mut Transaction<'_, Postgres>,
    entry: &AuditEntry,
) -> Result<(), DomainError> {
    sqlx::query(
        r#"
        INSERT INTO audit_log (
            id, actor, action, entity, entity_id, description,
            before_data, after_data, ip_address, user_agent, recorded_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(entry.id.as_uuid())
    .bind(entry.actor.as_str())
    .bind(entry.action.as_str())
    .bind(&entry.entity)
    .bind(&entry.entity_id)
    .bind(&entry.description)
    .bind(&entry.before)
    .bind(&entry.after)
    .bind(entry.ip_address.as_deref())
    .bind(entry.user_agent.as_deref())
    .bind(entry.recorded_at.as_datetime())
    .execute(&mut **tx)
    .await
    .map_err(|e| DomainError::database("Failed to write audit entry", e))?;

    Ok(())
}
