//! Adapters - Implementations of port interfaces.
//!
//! - `postgres` - PostgreSQL persistence (sqlx)
//! - `memory` - in-memory persistence for tests and database-free runs
//! - `clock` - system and fixed clocks

mod clock;
pub mod memory;
pub mod postgres;

pub use clock::{FixedClock, SystemClock};
pub use memory::{InMemoryCaseStore, InMemorySettingsStore};
pub use postgres::{
    PostgresCaseReader, PostgresCaseRepository, PostgresObservationRepository,
    PostgresSettingsStore,
};
