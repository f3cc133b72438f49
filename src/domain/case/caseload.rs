//! Caseload summary: the overview an official sees on login.
//!
//! Built from a list of cases at a single instant. Urgency and remaining
//! days are derived here and never stored.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{Case, CaseNumber, CaseSettings, CaseStatus, ConflictKind, UrgencyLevel};
use crate::domain::foundation::{CaseId, Timestamp};

/// Default number of entries in the "recent cases" list.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Calendar months covered by the registration activity series.
pub const ACTIVITY_MONTHS: u32 = 6;

/// Number of cases in each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub in_progress: usize,
    pub resolved: usize,
    pub unresolved: usize,
    pub archived: usize,
}

impl StatusCounts {
    pub fn total(&self) -> usize {
        self.in_progress + self.resolved + self.unresolved + self.archived
    }

    fn record(&mut self, status: CaseStatus) {
        match status {
            CaseStatus::InProgress => self.in_progress += 1,
            CaseStatus::Resolved => self.resolved += 1,
            CaseStatus::Unresolved => self.unresolved += 1,
            CaseStatus::Archived => self.archived += 1,
        }
    }
}

/// One line of a caseload list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseDigest {
    pub id: CaseId,
    pub case_number: CaseNumber,
    pub applicant_name: String,
    pub status: CaseStatus,
    pub registered_at: Timestamp,
    pub effective_deadline: Timestamp,
    pub days_remaining: i64,
    pub urgency: UrgencyLevel,
}

impl CaseDigest {
    pub fn of(case: &Case, now: &Timestamp, settings: &CaseSettings) -> Self {
        Self {
            id: *case.id(),
            case_number: case.case_number().clone(),
            applicant_name: case.details().applicant.full_name.clone(),
            status: case.status(),
            registered_at: *case.registered_at(),
            effective_deadline: *case.effective_deadline(),
            days_remaining: case.days_remaining(now),
            urgency: case.urgency(now, settings),
        }
    }
}

/// Cases of one conflict kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindCount {
    pub kind: ConflictKind,
    pub count: usize,
}

/// Cases from one residential block. `None` groups cases without a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockCount {
    pub block: Option<String>,
    pub count: usize,
}

/// Registrations in one UTC calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    pub year: i32,
    pub month: u32,
    pub count: usize,
}

/// Counts per status plus the cases that need attention.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseloadSummary {
    pub generated_at: Timestamp,
    pub counts: StatusCounts,
    /// In-progress cases within the alert threshold, soonest deadline first.
    pub urgent: Vec<CaseDigest>,
    /// In-progress cases past their deadline, most overdue first.
    pub overdue: Vec<CaseDigest>,
    /// Most recently registered cases, newest first.
    pub recent: Vec<CaseDigest>,
    /// Largest group first; ties by kind name.
    pub by_conflict_kind: Vec<KindCount>,
    /// Largest group first; ties by block name, unassigned last.
    pub by_residential_block: Vec<BlockCount>,
    /// The last [`ACTIVITY_MONTHS`] calendar months, oldest first, ending
    /// with the month of `generated_at`.
    pub monthly_registrations: Vec<MonthlyCount>,
}

impl CaseloadSummary {
    pub fn build(
        cases: &[Case],
        now: &Timestamp,
        settings: &CaseSettings,
        recent_limit: usize,
    ) -> Self {
        let mut counts = StatusCounts::default();
        let mut urgent = Vec::new();
        let mut overdue = Vec::new();

        for case in cases {
            counts.record(case.status());
            let digest = CaseDigest::of(case, now, settings);
            match digest.urgency {
                UrgencyLevel::Urgent => urgent.push(digest),
                UrgencyLevel::Overdue => overdue.push(digest),
                UrgencyLevel::Normal => {}
            }
        }
        urgent.sort_by_key(|d| d.effective_deadline);
        overdue.sort_by_key(|d| d.effective_deadline);

        let mut by_registration: Vec<&Case> = cases.iter().collect();
        by_registration.sort_by(|a, b| b.registered_at().cmp(a.registered_at()));
        let recent = by_registration
            .into_iter()
            .take(recent_limit)
            .map(|case| CaseDigest::of(case, now, settings))
            .collect();

        Self {
            generated_at: *now,
            counts,
            urgent,
            overdue,
            recent,
            by_conflict_kind: count_kinds(cases),
            by_residential_block: count_blocks(cases),
            monthly_registrations: count_months(cases, now, ACTIVITY_MONTHS),
        }
    }

    pub fn needs_attention(&self) -> usize {
        self.urgent.len() + self.overdue.len()
    }
}

fn count_kinds(cases: &[Case]) -> Vec<KindCount> {
    let mut counts: Vec<KindCount> = Vec::new();
    for case in cases {
        let kind = case.details().conflict_kind;
        match counts.iter_mut().find(|c| c.kind == kind) {
            Some(entry) => entry.count += 1,
            None => counts.push(KindCount { kind, count: 1 }),
        }
    }
    counts.sort_by(|a, b| b.count.cmp(&a.count).then(a.kind.as_str().cmp(b.kind.as_str())));
    counts
}

fn count_blocks(cases: &[Case]) -> Vec<BlockCount> {
    let mut counts: BTreeMap<Option<&str>, usize> = BTreeMap::new();
    for case in cases {
        *counts
            .entry(case.details().residential_block.as_deref())
            .or_default() += 1;
    }
    let mut counts: Vec<BlockCount> = counts
        .into_iter()
        .map(|(block, count)| BlockCount {
            block: block.map(str::to_string),
            count,
        })
        .collect();
    // Unassigned trails its equals.
    counts.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then(a.block.is_none().cmp(&b.block.is_none()))
    });
    counts
}

fn count_months(cases: &[Case], now: &Timestamp, months: u32) -> Vec<MonthlyCount> {
    let (mut year, mut month) = (now.year(), now.month());
    let mut series = Vec::with_capacity(months as usize);
    for _ in 0..months {
        let count = cases
            .iter()
            .filter(|case| {
                let registered = case.registered_at();
                registered.year() == year && registered.month() == month
            })
            .count();
        series.push(MonthlyCount { year, month, count });
        if month == 1 {
            year -= 1;
            month = 12;
        } else {
            month -= 1;
        }
    }
    series.reverse();
    series
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::case::{
        Applicant, CaseDetails, ConflictKind, InvolvedParty, NationalId, Resolution,
        ResolutionMethod,
    };
    use crate::domain::foundation::UserId;
    use chrono::{TimeZone, Utc};

    fn at(y: i32, m: u32, d: u32) -> Timestamp {
        Timestamp::from_datetime(Utc.with_ymd_and_hms(y, m, d, 9, 0, 0).unwrap())
    }

    fn case_registered(seq: u32, registered: Timestamp) -> Case {
        case_of_kind(seq, registered, ConflictKind::Community, None)
    }

    fn case_of_kind(
        seq: u32,
        registered: Timestamp,
        kind: ConflictKind,
        block: Option<&str>,
    ) -> Case {
        let applicant = Applicant::new(
            NationalId::new("0102030405").unwrap(),
            &format!("Applicant {}", seq),
            None,
            "Sector Norte",
        )
        .unwrap();
        let details = CaseDetails::new(
            applicant,
            InvolvedParty::default(),
            kind,
            "Shared access road blocked",
            block,
        )
        .unwrap();
        Case::register(
            CaseId::new(),
            CaseNumber::parse(format!("JC-2024-01-{:04}", seq)).unwrap(),
            details,
            UserId::new("judge-1").unwrap(),
            UserId::new("clerk-1").unwrap(),
            &CaseSettings::default(),
            registered,
        )
        .unwrap()
    }

    #[test]
    fn summary_counts_and_classifies_cases() {
        let settings = CaseSettings::default();
        let now = at(2024, 2, 5);

        let overdue = case_registered(1, at(2024, 1, 2)); // deadline 01-17
        let urgent = case_registered(2, at(2024, 1, 25)); // deadline 02-09
        let fresh = case_registered(3, at(2024, 2, 4)); // deadline 02-19
        let resolved = case_registered(4, at(2024, 1, 3))
            .transition(
                CaseStatus::Resolved,
                Some(Resolution::new(ResolutionMethod::Mediation, "Agreement reached").unwrap()),
                at(2024, 1, 10),
            )
            .unwrap();

        let summary = CaseloadSummary::build(
            &[overdue.clone(), urgent.clone(), fresh.clone(), resolved],
            &now,
            &settings,
            DEFAULT_RECENT_LIMIT,
        );

        assert_eq!(summary.counts.in_progress, 3);
        assert_eq!(summary.counts.resolved, 1);
        assert_eq!(summary.counts.total(), 4);
        assert_eq!(summary.overdue.len(), 1);
        assert_eq!(summary.overdue[0].id, *overdue.id());
        assert_eq!(summary.urgent.len(), 1);
        assert_eq!(summary.urgent[0].id, *urgent.id());
        assert_eq!(summary.urgent[0].days_remaining, 4);
        assert_eq!(summary.needs_attention(), 2);
        assert_eq!(summary.recent[0].id, *fresh.id());
    }

    #[test]
    fn recent_list_respects_limit() {
        let cases: Vec<Case> = (1..=5)
            .map(|seq| case_registered(seq, at(2024, 1, seq)))
            .collect();
        let summary = CaseloadSummary::build(&cases, &at(2024, 1, 6), &CaseSettings::default(), 3);
        let numbers: Vec<&str> = summary.recent.iter().map(|d| d.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["JC-2024-01-0005", "JC-2024-01-0004", "JC-2024-01-0003"]);
    }

    #[test]
    fn empty_caseload_is_all_zero() {
        let summary = CaseloadSummary::build(&[], &at(2024, 1, 6), &CaseSettings::default(), 10);
        assert_eq!(summary.counts.total(), 0);
        assert!(summary.recent.is_empty());
        assert_eq!(summary.needs_attention(), 0);
    }

    #[test]
    fn breakdowns_group_by_kind_and_block() {
        let cases = vec![
            case_of_kind(1, at(2024, 1, 2), ConflictKind::Neighborhood, Some("BLOQUE_16")),
            case_of_kind(2, at(2024, 1, 3), ConflictKind::Neighborhood, Some("BLOQUE_15")),
            case_of_kind(3, at(2024, 1, 4), ConflictKind::Neighborhood, Some("BLOQUE_16")),
            case_of_kind(4, at(2024, 1, 5), ConflictKind::MinorOffense, None),
            case_of_kind(5, at(2024, 1, 6), ConflictKind::Community, None),
        ];
        let summary = CaseloadSummary::build(&cases, &at(2024, 1, 8), &CaseSettings::default(), 10);

        assert_eq!(
            summary.by_conflict_kind,
            vec![
                KindCount { kind: ConflictKind::Neighborhood, count: 3 },
                KindCount { kind: ConflictKind::Community, count: 1 },
                KindCount { kind: ConflictKind::MinorOffense, count: 1 },
            ]
        );
        assert_eq!(
            summary.by_residential_block,
            vec![
                BlockCount { block: Some("BLOQUE_16".to_string()), count: 2 },
                BlockCount { block: None, count: 2 },
                BlockCount { block: Some("BLOQUE_15".to_string()), count: 1 },
            ]
        );
    }

    #[test]
    fn monthly_series_covers_six_calendar_months() {
        let cases = vec![
            case_registered(1, at(2023, 8, 20)),
            case_registered(2, at(2023, 9, 1)),
            case_registered(3, at(2023, 12, 31)),
            case_registered(4, at(2024, 2, 1)),
            case_registered(5, at(2024, 2, 10)),
        ];
        let summary = CaseloadSummary::build(&cases, &at(2024, 2, 15), &CaseSettings::default(), 10);

        let series: Vec<(i32, u32, usize)> = summary
            .monthly_registrations
            .iter()
            .map(|m| (m.year, m.month, m.count))
            .collect();
        assert_eq!(
            series,
            vec![
                (2023, 9, 1),
                (2023, 10, 0),
                (2023, 11, 0),
                (2023, 12, 1),
                (2024, 1, 0),
                (2024, 2, 2),
            ]
        );
    }
}
