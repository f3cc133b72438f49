//! ListCasesHandler - Query handler for the filtered case listing.

use std::sync::Arc;

use crate::domain::case::{CaseDigest, CaseError};
use crate::ports::{CaseListFilter, CaseReader, Clock, SettingsProvider};

/// Default page size for case listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;

/// Query for one page of a filtered case listing.
#[derive(Debug, Clone)]
pub struct ListCasesQuery {
    pub filter: CaseListFilter,
    /// 1-based. Pages past the end are empty.
    pub page: u32,
    pub per_page: u32,
}

impl ListCasesQuery {
    /// First page of cases matching `filter`.
    pub fn first_page(filter: CaseListFilter) -> Self {
        Self {
            filter,
            page: 1,
            per_page: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }
}

/// One page of digests, newest registration first.
#[derive(Debug, Clone)]
pub struct CaseListPage {
    pub items: Vec<CaseDigest>,
    /// Matching cases across all pages.
    pub total: usize,
    pub page: u32,
    pub has_more: bool,
}

pub struct ListCasesHandler {
    reader: Arc<dyn CaseReader>,
    settings: Arc<dyn SettingsProvider>,
    clock: Arc<dyn Clock>,
}

impl ListCasesHandler {
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

    pub async fn handle(&self, query: ListCasesQuery) -> Result<CaseListPage, CaseError> {
        let cases = self.reader.list_cases(&query.filter).await?;
        let settings = self.settings.current().await?;
        let now = self.clock.now();

        let per_page = query.per_page.max(1) as usize;
        let page = query.page.max(1);
        let skip = (page as usize - 1).saturating_mul(per_page);
        let items: Vec<CaseDigest> = cases
            .iter()
            .skip(skip)
            .take(per_page)
            .map(|case| CaseDigest::of(case, &now, &settings))
            .collect();

        tracing::debug!(total = cases.len(), page, returned = items.len(), "Cases listed");
        Ok(CaseListPage {
            has_more: skip + items.len() < cases.len(),
            items,
            total: cases.len(),
            page,
        })
    }
}
