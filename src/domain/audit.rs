//! Audit trail entries.
//!
//! Every case mutation produces one entry, persisted in the same transaction
//! as the mutation itself.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    AuditEntryId, CommandMetadata, Timestamp, UserId, ValidationError,
};

/// Kind of action being audited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    Edit,
    Delete,
    Approve,
    Reject,
    Login,
    Logout,
    ChangePassword,
    UploadFile,
    DownloadFile,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::Edit => "edit",
            AuditAction::Delete => "delete",
            AuditAction::Approve => "approve",
            AuditAction::Reject => "reject",
            AuditAction::Login => "login",
            AuditAction::Logout => "logout",
            AuditAction::ChangePassword => "change_password",
            AuditAction::UploadFile => "upload_file",
            AuditAction::DownloadFile => "download_file",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(AuditAction::Create),
            "edit" => Ok(AuditAction::Edit),
            "delete" => Ok(AuditAction::Delete),
            "approve" => Ok(AuditAction::Approve),
            "reject" => Ok(AuditAction::Reject),
            "login" => Ok(AuditAction::Login),
            "logout" => Ok(AuditAction::Logout),
            "change_password" => Ok(AuditAction::ChangePassword),
            "upload_file" => Ok(AuditAction::UploadFile),
            "download_file" => Ok(AuditAction::DownloadFile),
            other => Err(ValidationError::invalid_format(
                "action",
                format!("unknown audit action '{}'", other),
            )),
        }
    }
}

/// Who did what to which entity, with optional before/after snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditEntry {
    pub id: AuditEntryId,
    pub actor: UserId,
    pub action: AuditAction,
    pub entity: String,
    pub entity_id: String,
    pub description: String,
    pub before: Option<JsonValue>,
    pub after: Option<JsonValue>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub recorded_at: Timestamp,
}

impl AuditEntry {
    /// Starts an entry from the acting user's request context.
    pub fn new(
        metadata: &CommandMetadata,
        action: AuditAction,
        entity: impl Into<String>,
        entity_id: impl fmt::Display,
        description: impl Into<String>,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id: AuditEntryId::new(),
            actor: metadata.actor.clone(),
            action,
            entity: entity.into(),
            entity_id: entity_id.to_string(),
            description: description.into(),
            before: None,
            after: None,
            ip_address: metadata.ip_address().map(str::to_string),
            user_agent: metadata.user_agent().map(str::to_string),
            recorded_at,
        }
    }

    pub fn with_before(mut self, before: JsonValue) -> Self {
        self.before = Some(before);
        self
    }

    pub fn with_after(mut self, after: JsonValue) -> Self {
        self.after = Some(after);
        self
    }
}
