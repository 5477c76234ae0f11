use crate::consts::{DEFAULT_REMINDER_DAY, REMINDER_SEPARATOR};
use crate::record::AnniversaryRecord;
use crate::recurrence::RecurrenceResolver;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Days before an anniversary on which to remind, e.g. `0,1,3,7`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ReminderDays(BTreeSet<i64>);

impl ReminderDays {
    /// Parses a comma separated list. Each token contributes its leading
    /// integer, so "3天" reads as 3 and "1.5" as 1; tokens without one are
    /// skipped. An empty string means "one day before".
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Self::default();
        }
        let days = trimmed
            .split(REMINDER_SEPARATOR)
            .filter_map(|token| {
                let parsed = leading_integer(token);
                if parsed.is_none() {
                    log::debug!("skipping reminder day token {token:?}");
                }
                parsed
            })
            .collect();
        Self(days)
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.0.iter().copied()
    }

    pub fn contains(&self, days: i64) -> bool {
        self.0.contains(&days)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ReminderDays {
    fn default() -> Self {
        Self(BTreeSet::from([DEFAULT_REMINDER_DAY]))
    }
}

impl FromIterator<i64> for ReminderDays {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl fmt::Display for ReminderDays {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, days) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "{REMINDER_SEPARATOR}")?;
            }
            write!(f, "{days}")?;
        }
        Ok(())
    }
}

impl Serialize for ReminderDays {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ReminderDays {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Self::parse(&s))
    }
}

/// Optional sign followed by the longest run of ASCII digits.
fn leading_integer(token: &str) -> Option<i64> {
    let token = token.trim();
    let sign_len = usize::from(token.starts_with(['+', '-']));
    let end = token[sign_len..]
        .find(|ch: char| !ch.is_ascii_digit())
        .map_or(token.len(), |i| sign_len + i);
    token[..end].parse().ok()
}

/// Date the next reminder refers to: the next recurrence for recurring
/// anniversaries, the target date itself otherwise.
pub fn next_target_date(
    resolver: &RecurrenceResolver,
    anniversary: &AnniversaryRecord,
    today: NaiveDate,
) -> NaiveDate {
    if anniversary.is_recurring {
        resolver.next_recurring_date(anniversary, today)
    } else {
        anniversary.target_date
    }
}

/// Day on which to remind `days_before` days ahead of the next target date.
/// Negative offsets remind after the date.
pub fn reminder_date(
    resolver: &RecurrenceResolver,
    anniversary: &AnniversaryRecord,
    days_before: i64,
    today: NaiveDate,
) -> Option<NaiveDate> {
    let target = next_target_date(resolver, anniversary, today);
    let offset = Days::new(days_before.unsigned_abs());
    if days_before >= 0 {
        target.checked_sub_days(offset)
    } else {
        target.checked_add_days(offset)
    }
}
