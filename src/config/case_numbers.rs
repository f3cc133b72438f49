//! Case number generation configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::case::{CaseNumberPolicy, DEFAULT_MAX_ATTEMPTS};
use crate::domain::case::DEFAULT_CASE_PREFIX;

#[derive(Debug, Clone, Deserialize)]
pub struct CaseNumberConfig {
    /// Leading letters of every case number
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Insert attempts before giving up with `IdentifierExhausted`
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl CaseNumberConfig {
    pub fn policy(&self) -> CaseNumberPolicy {
        CaseNumberPolicy {
            prefix: self.prefix.clone(),
            max_attempts: self.max_attempts,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.prefix.is_empty() || !self.prefix.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ValidationError::InvalidCaseNumberPrefix(self.prefix.clone()));
        }
        if self.max_attempts == 0 {
            return Err(ValidationError::InvalidMaxAttempts);
        }
        Ok(())
    }
}

impl Default for CaseNumberConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_CASE_PREFIX.to_string()
}

fn default_max_attempts() -> u32 {
    DEFAULT_MAX_ATTEMPTS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = CaseNumberConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.policy().prefix, "JC");
        assert_eq!(config.policy().max_attempts, 5);
    }

    #[test]
    fn prefix_with_separator_is_rejected() {
        let config = CaseNumberConfig {
            prefix: "JC-1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_attempts_is_rejected() {
        let config = CaseNumberConfig {
            max_attempts: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidMaxAttempts));
    }
}
