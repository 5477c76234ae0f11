use crate::consts::BIRTHDAY_CATEGORY;
use crate::error::ParseError;
use crate::prelude::*;
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Calendar an anniversary recurs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarType {
    #[default]
    #[display(fmt = "solar")]
    Solar,
    #[display(fmt = "lunar")]
    Lunar,
}

impl FromStr for CalendarType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "solar" => Ok(Self::Solar),
            "lunar" => Ok(Self::Lunar),
            other => Err(ParseError::InvalidCalendarType(other.to_owned())),
        }
    }
}

/// An anniversary as supplied by the application layer.
///
/// `target_date` is always a solar date; for lunar anniversaries its lunar
/// month and day are derived by converting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnniversaryRecord {
    #[serde(with = "target_date")]
    pub target_date: NaiveDate,
    #[serde(default)]
    pub calendar_type: CalendarType,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub category_id: String,
}

impl AnniversaryRecord {
    pub fn new(
        target_date: NaiveDate,
        calendar_type: CalendarType,
        is_recurring: bool,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            target_date,
            calendar_type,
            is_recurring,
            category_id: category_id.into(),
        }
    }

    pub fn is_birthday(&self) -> bool {
        self.category_id == BIRTHDAY_CATEGORY
    }

    pub const fn is_lunar(&self) -> bool {
        matches!(self.calendar_type, CalendarType::Lunar)
    }
}

/// Parses a target date given either as `YYYY-MM-DD` or as an RFC 3339
/// timestamp, in which case the calendar date as written is kept.
///
/// # Errors
/// Returns `ParseError::EmptyInput` or `ParseError::InvalidDate`.
pub fn parse_target_date(s: &str) -> Result<NaiveDate, ParseError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    if let Ok(date) = NaiveDate::from_str(trimmed) {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.date_naive())
        .map_err(|_| ParseError::InvalidDate(trimmed.to_owned()))
}

mod target_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format("%Y-%m-%d").to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        super::parse_target_date(&s).map_err(serde::de::Error::custom)
    }
}

/// Next occurrence of an anniversary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccurrenceResult {
    pub solar_date: NaiveDate,
    /// Why the occurrence differs from the requested lunar date
    pub adjustment_note: Option<String>,
    /// Lunar day actually matched; `None` for solar anniversaries
    pub actual_lunar_day: Option<u8>,
}

impl OccurrenceResult {
    pub(crate) const fn solar(solar_date: NaiveDate) -> Self {
        Self {
            solar_date,
            adjustment_note: None,
            actual_lunar_day: None,
        }
    }

    pub(crate) const fn exact(solar_date: NaiveDate, lunar_day: u8) -> Self {
        Self {
            solar_date,
            adjustment_note: None,
            actual_lunar_day: Some(lunar_day),
        }
    }

    pub(crate) const fn adjusted(solar_date: NaiveDate, lunar_day: u8, note: String) -> Self {
        Self {
            solar_date,
            adjustment_note: Some(note),
            actual_lunar_day: Some(lunar_day),
        }
    }

    pub const fn is_adjusted(&self) -> bool {
        self.adjustment_note.is_some()
    }
}

/// Display-ready status of an anniversary relative to a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusResult {
    pub is_upcoming: bool,
    pub days_remaining: Option<i64>,
    pub is_milestone: bool,
    pub milestone_days: Option<i64>,
}
