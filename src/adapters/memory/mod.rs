//! In-memory adapters for tests and database-free runs.

mod case_store;
mod settings_store;

pub use case_store::InMemoryCaseStore;
pub use settings_store::InMemorySettingsStore;
