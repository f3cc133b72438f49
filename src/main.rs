//! Community Cases daily deadline report.
//!
//! Loads configuration, connects to PostgreSQL when `database.url` is set
//! (otherwise runs against the in-memory adapters), and logs the caseload
//! summary: counts per status plus every urgent and overdue case.

use std::error::Error;
use std::sync::Arc;

use community_cases::adapters::{
    InMemoryCaseStore, InMemorySettingsStore, PostgresCaseReader, PostgresSettingsStore,
    SystemClock,
};
use community_cases::application::{CaseloadSummaryHandler, CaseloadSummaryQuery};
use community_cases::config::{AppConfig, LoggingConfig};
use community_cases::ports::{CaseReader, SettingsProvider};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config.logging);
    config.validate()?;

    let seed = config.initial_settings()?;
    let (reader, settings): (Arc<dyn CaseReader>, Arc<dyn SettingsProvider>) =
        match &config.database {
            Some(database) => {
                let pool = database.connect().await?;
                tracing::info!(
                    database = %database.redacted_url(),
                    pool_size = database.pool_size,
                    "Connected to PostgreSQL"
                );

                if database.run_migrations {
                    sqlx::migrate!("./migrations").run(&pool).await?;
                    tracing::info!("Database migrations applied");
                }
                (
                    Arc::new(PostgresCaseReader::new(pool.clone())),
                    Arc::new(PostgresSettingsStore::new(pool, seed)),
                )
            }
            None => {
                tracing::warn!("database.url not set, running against an empty in-memory store");
                (
                    Arc::new(InMemoryCaseStore::new()),
                    Arc::new(InMemorySettingsStore::new(seed)),
                )
            }
        };

    let handler = CaseloadSummaryHandler::new(reader, settings, Arc::new(SystemClock));
    let summary = handler.handle(CaseloadSummaryQuery::system_wide()).await?;

    tracing::info!(
        total = summary.counts.total(),
        in_progress = summary.counts.in_progress,
        resolved = summary.counts.resolved,
        unresolved = summary.counts.unresolved,
        archived = summary.counts.archived,
        needs_attention = summary.needs_attention(),
        "Caseload summary"
    );
    for digest in &summary.overdue {
        tracing::warn!(
            case_number = %digest.case_number,
            days_remaining = digest.days_remaining,
            "Case overdue"
        );
    }
    for digest in &summary.urgent {
        tracing::info!(
            case_number = %digest.case_number,
            days_remaining = digest.days_remaining,
            "Case urgent"
        );
    }
    Ok(())
}

fn init_tracing(logging: &LoggingConfig) {
    let subscriber = tracing_subscriber::fmt().with_env_filter(logging.env_filter());
    if logging.json_output() {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
