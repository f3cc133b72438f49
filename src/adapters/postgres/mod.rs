//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresCaseRepository` - case writes with atomic audit entries
//! - `PostgresCaseReader` - listings, audit trail, observations
//! - `PostgresObservationRepository` - observation writes
//! - `PostgresSettingsStore` - singleton settings row

mod case_reader;
mod case_repository;
mod observation_repository;
mod rows;
mod settings_store;

pub use case_reader::PostgresCaseReader;
pub use case_repository::PostgresCaseRepository;
pub use observation_repository::PostgresObservationRepository;
pub use settings_store::PostgresSettingsStore;
