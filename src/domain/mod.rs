//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `case` - Case aggregate, deadline/urgency/progress calculators, numbering
//! - `audit` - Audit trail entries written alongside case mutations

pub mod audit;
pub mod case;
pub mod foundation;
