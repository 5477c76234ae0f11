use crate::consts::{MAJOR_MILESTONES, MINOR_MILESTONES};
use crate::record::{AnniversaryRecord, StatusResult};
use crate::recurrence::RecurrenceResolver;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Milestone family of an elapsed-day count.
///
/// Both families surface identically in [`StatusResult`]; the distinction is
/// kept here for classification only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Milestone {
    /// 100, 365 or 1000 days
    Major(i64),
    /// 30, 60 or 90 days
    Minor(i64),
}

impl Milestone {
    pub fn classify(days: i64) -> Option<Self> {
        if MAJOR_MILESTONES.contains(&days) {
            Some(Self::Major(days))
        } else if MINOR_MILESTONES.contains(&days) {
            Some(Self::Minor(days))
        } else {
            None
        }
    }

    pub const fn days(self) -> i64 {
        match self {
            Self::Major(days) | Self::Minor(days) => days,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCalculator {
    resolver: RecurrenceResolver,
}

impl StatusCalculator {
    pub const fn new(resolver: RecurrenceResolver) -> Self {
        Self { resolver }
    }

    /// Status of `anniversary` as seen on `current`.
    ///
    /// Recurring anniversaries are always upcoming and never milestones.
    /// One-time anniversaries stop being upcoming once their date has passed,
    /// at which point `days_remaining` is `None`.
    pub fn calculate(&self, anniversary: &AnniversaryRecord, current: NaiveDate) -> StatusResult {
        if anniversary.is_recurring {
            let next = self.resolver.next_recurring_date(anniversary, current);
            let days = days_between(current, next);
            let is_upcoming = days >= 0;
            return StatusResult {
                is_upcoming,
                days_remaining: is_upcoming.then_some(days),
                is_milestone: false,
                milestone_days: None,
            };
        }

        let days = days_between(current, anniversary.target_date);
        let is_upcoming = days >= 0;
        let elapsed = days_between(anniversary.target_date, current).max(0);
        let milestone = Milestone::classify(elapsed);

        StatusResult {
            is_upcoming,
            days_remaining: is_upcoming.then_some(days),
            is_milestone: milestone.is_some(),
            milestone_days: milestone.map(Milestone::days),
        }
    }

    /// Adjustment note of the next lunar occurrence; `None` for solar and
    /// one-time anniversaries.
    pub fn lunar_adjustment_note(
        &self,
        anniversary: &AnniversaryRecord,
        current: NaiveDate,
    ) -> Option<String> {
        if !anniversary.is_lunar() || !anniversary.is_recurring {
            return None;
        }
        self.resolver
            .next_occurrence(anniversary, current)
            .adjustment_note
    }
}

/// Whole days from `start` to `end`, negative when `end` comes first.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> i64 {
    end.signed_duration_since(start).num_days()
}

/// List order for anniversaries: one-time anniversaries that have passed go
/// last, everything else by ascending days remaining.
pub fn display_order(
    a: (&AnniversaryRecord, &StatusResult),
    b: (&AnniversaryRecord, &StatusResult),
) -> Ordering {
    let is_past_one_time = |(record, status): (&AnniversaryRecord, &StatusResult)| {
        !record.is_recurring && !status.is_upcoming
    };

    is_past_one_time(a)
        .cmp(&is_past_one_time(b))
        .then_with(|| {
            let remaining = |status: &StatusResult| status.days_remaining.unwrap_or(i64::MAX);
            remaining(a.1).cmp(&remaining(b.1))
        })
}
