//! Case aggregate.
//!
//! Mutations never touch `self`; they return the next version of the case so
//! the caller can persist it (with its audit entry) or drop it.
//!
//! # Invariants
//!
//! - `case_number`, `registered_at` and `standard_deadline` never change
//! - an extension is granted at most once, and only while in progress
//! - status only moves forward; no case re-enters `InProgress`
//! - `version` grows by one with every mutation

use serde::{Deserialize, Serialize};

use super::{
    classify, compute_extended_deadline, compute_standard_deadline, estimate_progress,
    CaseDetails, CaseNumber, CaseSettings, CaseStatus, ConfigurationError, ExtensionError,
    Justification, Resolution, TransitionError, UrgencyLevel,
};
use crate::domain::foundation::{CaseId, Percentage, StateMachine, Timestamp, UserId};

/// The one-time deadline extension. All fields are set together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionGrant {
    pub justification: Justification,
    pub requested_at: Timestamp,
    pub extended_deadline: Timestamp,
}

/// Every persisted field of a case, used to rebuild it from storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseSnapshot {
    pub id: CaseId,
    pub case_number: CaseNumber,
    pub details: CaseDetails,
    pub assigned_official: UserId,
    pub registered_by: UserId,
    pub status: CaseStatus,
    pub registered_at: Timestamp,
    pub standard_deadline: Timestamp,
    pub extension: Option<ExtensionGrant>,
    pub resolution: Option<Resolution>,
    pub resolved_at: Option<Timestamp>,
    pub closed_at: Option<Timestamp>,
    pub version: u32,
    pub updated_at: Timestamp,
}

/// A registered dispute tracked against its statutory deadline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    id: CaseId,
    case_number: CaseNumber,
    details: CaseDetails,
    assigned_official: UserId,
    registered_by: UserId,
    status: CaseStatus,
    registered_at: Timestamp,
    standard_deadline: Timestamp,
    extension: Option<ExtensionGrant>,
    resolution: Option<Resolution>,
    resolved_at: Option<Timestamp>,
    closed_at: Option<Timestamp>,
    version: u32,
    updated_at: Timestamp,
}

impl Case {
    /// Registers a new in-progress case, freezing its standard deadline from
    /// the settings in effect now.
    ///
    /// # Errors
    ///
    /// - any `ConfigurationError` reported by `settings.validate()`
    pub fn register(
        id: CaseId,
        case_number: CaseNumber,
        details: CaseDetails,
        assigned_official: UserId,
        registered_by: UserId,
        settings: &CaseSettings,
        now: Timestamp,
    ) -> Result<Self, ConfigurationError> {
        settings.validate()?;
        let standard_deadline = compute_standard_deadline(&now, settings.standard_days)?;

        Ok(Self {
            id,
            case_number,
            details,
            assigned_official,
            registered_by,
            status: CaseStatus::InProgress,
            registered_at: now,
            standard_deadline,
            extension: None,
            resolution: None,
            resolved_at: None,
            closed_at: None,
            version: 1,
            updated_at: now,
        })
    }

    /// Rebuilds a case from storage without validation.
    pub fn reconstitute(snapshot: CaseSnapshot) -> Self {
        Self {
            id: snapshot.id,
            case_number: snapshot.case_number,
            details: snapshot.details,
            assigned_official: snapshot.assigned_official,
            registered_by: snapshot.registered_by,
            status: snapshot.status,
            registered_at: snapshot.registered_at,
            standard_deadline: snapshot.standard_deadline,
            extension: snapshot.extension,
            resolution: snapshot.resolution,
            resolved_at: snapshot.resolved_at,
            closed_at: snapshot.closed_at,
            version: snapshot.version,
            updated_at: snapshot.updated_at,
        }
    }

    /// Every persisted field, for adapters.
    pub fn snapshot(&self) -> CaseSnapshot {
        CaseSnapshot {
            id: self.id,
            case_number: self.case_number.clone(),
            details: self.details.clone(),
            assigned_official: self.assigned_official.clone(),
            registered_by: self.registered_by.clone(),
            status: self.status,
            registered_at: self.registered_at,
            standard_deadline: self.standard_deadline,
            extension: self.extension.clone(),
            resolution: self.resolution.clone(),
            resolved_at: self.resolved_at,
            closed_at: self.closed_at,
            version: self.version,
            updated_at: self.updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &CaseId {
        &self.id
    }

    pub fn case_number(&self) -> &CaseNumber {
        &self.case_number
    }

    pub fn details(&self) -> &CaseDetails {
        &self.details
    }

    pub fn assigned_official(&self) -> &UserId {
        &self.assigned_official
    }

    pub fn registered_by(&self) -> &UserId {
        &self.registered_by
    }

    pub fn status(&self) -> CaseStatus {
        self.status
    }

    pub fn registered_at(&self) -> &Timestamp {
        &self.registered_at
    }

    pub fn standard_deadline(&self) -> &Timestamp {
        &self.standard_deadline
    }

    pub fn extended_deadline(&self) -> Option<&Timestamp> {
        self.extension.as_ref().map(|grant| &grant.extended_deadline)
    }

    pub fn extension_requested(&self) -> bool {
        self.extension.is_some()
    }

    pub fn extension_justification(&self) -> Option<&str> {
        self.extension.as_ref().map(|grant| grant.justification.as_str())
    }

    pub fn extension_requested_at(&self) -> Option<&Timestamp> {
        self.extension.as_ref().map(|grant| &grant.requested_at)
    }

    pub fn resolution(&self) -> Option<&Resolution> {
        self.resolution.as_ref()
    }

    pub fn resolved_at(&self) -> Option<&Timestamp> {
        self.resolved_at.as_ref()
    }

    pub fn closed_at(&self) -> Option<&Timestamp> {
        self.closed_at.as_ref()
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Extended deadline when granted, otherwise the standard deadline.
    pub fn effective_deadline(&self) -> &Timestamp {
        self.extended_deadline().unwrap_or(&self.standard_deadline)
    }

    pub fn is_assigned_to(&self, official: &UserId) -> bool {
        &self.assigned_official == official
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Derived values
    // ─────────────────────────────────────────────────────────────────────────

    /// Floored whole days left until the effective deadline; negative once
    /// it has passed.
    pub fn days_remaining(&self, now: &Timestamp) -> i64 {
        self.effective_deadline().whole_days_since(now)
    }

    pub fn urgency(&self, now: &Timestamp, settings: &CaseSettings) -> UrgencyLevel {
        classify(
            now,
            self.effective_deadline(),
            self.status,
            settings.urgent_threshold_days,
        )
    }

    /// # Errors
    ///
    /// - `NonPositiveTotalDays` if the current settings allot no time
    pub fn progress(
        &self,
        now: &Timestamp,
        settings: &CaseSettings,
    ) -> Result<Percentage, ConfigurationError> {
        estimate_progress(
            now,
            &self.registered_at,
            self.extension_requested(),
            settings.standard_days,
            settings.extension_days,
            self.status,
        )
    }

    pub fn can_request_extension(&self) -> bool {
        !self.extension_requested() && self.status.is_open()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Grants the one-time extension.
    ///
    /// # Errors
    ///
    /// - `AlreadyRequested` if an extension was granted before
    /// - `InvalidState` if the case is no longer in progress
    /// - `InvalidJustification` if the trimmed text is under 20 characters
    /// - `Configuration` if the extended deadline cannot be represented
    pub fn request_extension(
        &self,
        justification: &str,
        settings: &CaseSettings,
        now: Timestamp,
    ) -> Result<Case, ExtensionError> {
        if self.extension_requested() {
            return Err(ExtensionError::AlreadyRequested);
        }
        if !self.status.is_open() {
            return Err(ExtensionError::InvalidState(self.status));
        }
        let justification =
            Justification::new(justification).map_err(ExtensionError::InvalidJustification)?;
        let extended_deadline =
            compute_extended_deadline(&self.standard_deadline, settings.extension_days)?;

        let mut next = self.next_version(now);
        next.extension = Some(ExtensionGrant {
            justification,
            requested_at: now,
            extended_deadline,
        });
        Ok(next)
    }

    /// Moves the case to a terminal status.
    ///
    /// `Resolved` stamps `resolved_at`; `Unresolved` stamps both
    /// `resolved_at` and `closed_at`. A resolution passed with `Archived` is
    /// recorded but not required.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` from a terminal status or back to `InProgress`
    /// - `MissingResolution` for `Resolved`/`Unresolved` without a resolution
    pub fn transition(
        &self,
        target: CaseStatus,
        resolution: Option<Resolution>,
        now: Timestamp,
    ) -> Result<Case, TransitionError> {
        let status = self.status.transition_to(target)?;
        if status.requires_resolution() && resolution.is_none() {
            return Err(TransitionError::MissingResolution(status));
        }

        let mut next = self.next_version(now);
        next.status = status;
        next.resolution = resolution;
        match status {
            CaseStatus::Resolved => next.resolved_at = Some(now),
            CaseStatus::Unresolved => {
                next.resolved_at = Some(now);
                next.closed_at = Some(now);
            }
            CaseStatus::Archived | CaseStatus::InProgress => {}
        }
        Ok(next)
    }

    fn next_version(&self, now: Timestamp) -> Case {
        let mut next = self.clone();
        next.version = self.version + 1;
        next.updated_at = now;
        next
    }
}
