//! Command infrastructure for case handlers.
//!
//! Every mutating handler receives a `CommandMetadata` describing who is
//! acting and from where. The same values end up on the audit entry written
//! alongside the mutation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserId;

/// Metadata context for command handlers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandMetadata {
    /// The official executing this command.
    pub actor: UserId,

    /// Links related operations across a single request.
    #[serde(skip_serializing_if = "Option::is_none")]
    correlation_id: Option<String>,

    /// Remote address reported by the web layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    ip_address: Option<String>,

    /// Browser user agent reported by the web layer.
    #[serde(skip_serializing_if = "Option::is_none")]
    user_agent: Option<String>,
}

impl CommandMetadata {
    /// Creates new command metadata for an acting user.
    pub fn new(actor: UserId) -> Self {
        Self {
            actor,
            correlation_id: None,
            ip_address: None,
            user_agent: None,
        }
    }

    /// Builder: Add correlation ID for request tracing.
    pub fn with_correlation_id(mut self, id: impl Into<String>) -> Self {
        self.correlation_id = Some(id.into());
        self
    }

    /// Builder: Add the caller's remote address.
    pub fn with_ip_address(mut self, ip: impl Into<String>) -> Self {
        self.ip_address = Some(ip.into());
        self
    }

    /// Builder: Add the caller's user agent.
    pub fn with_user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Returns the correlation ID, generating one if not set.
    pub fn correlation_id(&self) -> String {
        self.correlation_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string())
    }

    /// Returns the remote address if set.
    pub fn ip_address(&self) -> Option<&str> {
        self.ip_address.as_deref()
    }

    /// Returns the user agent if set.
    pub fn user_agent(&self) -> Option<&str> {
        self.user_agent.as_deref()
    }
}
