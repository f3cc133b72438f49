//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Persistence
//!
//! - `CaseRepository` - atomic case + audit writes, number lookups
//! - `CaseReader` - listings, audit trail, observations
//! - `ObservationRepository` - append observations
//!
//! ## Environment
//!
//! - `Clock` - current instant
//! - `SettingsProvider` - runtime-tunable deadline settings

mod case_reader;
mod case_repository;
mod clock;
mod observation_repository;
mod settings_provider;

pub use case_reader::{CaseListFilter, CaseReader};
pub use case_repository::CaseRepository;
pub use clock::Clock;
pub use observation_repository::ObservationRepository;
pub use settings_provider::SettingsProvider;
