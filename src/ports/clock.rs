//! Clock port.

use crate::domain::foundation::Timestamp;

/// Source of the current instant (UTC).
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}
