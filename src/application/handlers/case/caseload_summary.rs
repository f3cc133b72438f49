//! CaseloadSummaryHandler - Query handler for an official's overview.

use std::sync::Arc;

use crate::domain::case::{CaseError, CaseloadSummary, DEFAULT_RECENT_LIMIT};
use crate::domain::foundation::UserId;
use crate::ports::{CaseListFilter, CaseReader, Clock, SettingsProvider};

/// Query for a caseload summary. `official: None` covers every case.
#[derive(Debug, Clone)]
pub struct CaseloadSummaryQuery {
    pub official: Option<UserId>,
    pub recent_limit: usize,
}

impl CaseloadSummaryQuery {
    pub fn for_official(official: UserId) -> Self {
        Self {
            official: Some(official),
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    pub fn system_wide() -> Self {
        Self {
            official: None,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

pub struct CaseloadSummaryHandler {
    reader: Arc<dyn CaseReader>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl CaseloadSummaryHandler {
    pub fn new(
        reader: Arc<dyn CaseReader>,
        settings: Arc<dyn SettingsProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            reader,
            settings,
            clock,
        }
    }

    pub async fn handle(&self, query: CaseloadSummaryQuery) -> Result<CaseloadSummary, CaseError> {
        let filter = query
            .official
            .map(CaseListFilter::for_official)
            .unwrap_or_default();
        let cases = self.reader.list_cases(&filter).await?;
        let settings = self.settings.current().await?;
        let now = self.clock.now();

        let summary = CaseloadSummary::build(&cases, &now, &settings, query.recent_limit);
        tracing::debug!(
            total = summary.counts.total(),
            urgent = summary.urgent.len(),
            overdue = summary.overdue.len(),
            "Caseload summary built"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{FixedClock, InMemoryCaseStore, InMemorySettingsStore};
    use crate::application::handlers::case::test_support::{jan_15, registered_case_for};

    #[tokio::test]
    async fn summary_is_scoped_to_the_official() {
        let store = Arc::new(InMemoryCaseStore::new());
        registered_case_for(&store, "judge-1", "JC-2024-01-0001").await;
        registered_case_for(&store, "judge-1", "JC-2024-01-0002").await;
        registered_case_for(&store, "judge-2", "JC-2024-01-0003").await;

        let handler = CaseloadSummaryHandler::new(
            store,
            Arc::new(InMemorySettingsStore::default()),
            Arc::new(FixedClock::new(jan_15().add_days(8))),
        );

        let mine = handler
            .handle(CaseloadSummaryQuery::for_official(UserId::new("judge-1").unwrap()))
            .await
            .unwrap();
        assert_eq!(mine.counts.in_progress, 2);
        assert_eq!(mine.urgent.len(), 2);

        let all = handler.handle(CaseloadSummaryQuery::system_wide()).await.unwrap();
        assert_eq!(all.counts.total(), 3);
    }

    #[tokio::test]
    async fn overdue_cases_are_listed() {
        let store = Arc::new(InMemoryCaseStore::new());
        registered_case_for(&store, "judge-1", "JC-2024-01-0001").await;

        let handler = CaseloadSummaryHandler::new(
            store,
            Arc::new(InMemorySettingsStore::default()),
            Arc::new(FixedClock::new(jan_15().add_days(20))),
        );
        let summary = handler.handle(CaseloadSummaryQuery::system_wide()).await.unwrap();
        assert_eq!(summary.overdue.len(), 1);
        assert_eq!(summary.overdue[0].days_remaining, -5);
    }

    #[tokio::test]
    async fn summary_carries_breakdowns_and_activity() {
        let store = Arc::new(InMemoryCaseStore::new());
        registered_case_for(&store, "judge-1", "JC-2024-01-0001").await;
        registered_case_for(&store, "judge-1", "JC-2024-01-0002").await;

        let handler = CaseloadSummaryHandler::new(
            store,
            Arc::new(InMemorySettingsStore::default()),
            Arc::new(FixedClock::new(jan_15().add_days(3))),
        );
        let summary = handler.handle(CaseloadSummaryQuery::system_wide()).await.unwrap();

        assert_eq!(summary.by_conflict_kind.len(), 1);
        assert_eq!(summary.by_conflict_kind[0].count, 2);
        assert_eq!(summary.by_residential_block.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(summary.monthly_registrations.len(), 6);
        let current = summary.monthly_registrations.last().unwrap();
        assert_eq!((current.year, current.month, current.count), (2024, 1, 2));
    }
}
