use crate::prelude::*;

/// Errors raised while reading anniversary input.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid calendar type: {_0} (expected solar or lunar)")]
    InvalidCalendarType(String),
    #[display(fmt = "Invalid target date: {_0}")]
    InvalidDate(String),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Errors raised when a lunar date does not exist in the table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CalendarError {
    /// Year is not covered by the lunar table.
    #[error("Lunar year {year} is outside the table range {first}-{last}")]
    YearOutOfRange { year: i32, first: i32, last: i32 },

    /// Month number outside 1-12.
    #[error("Invalid lunar month: {0} (must be 1-12)")]
    InvalidMonth(u8),

    /// Day number outside 1-30.
    #[error("Invalid lunar day: {0} (must be 1-30)")]
    InvalidDay(u8),

    /// A leap month was requested in a year that has a different one or none.
    #[error("Lunar year {year} has no leap month {month}")]
    NoLeapMonth { year: i32, month: u8 },

    /// Day 30 requested in a 29-day month.
    #[error("Lunar month {year}-{month:02} has only {length} days, got {day}")]
    DayExceedsMonth { year: i32, month: u8, day: u8, length: u8 },
}

/// Errors raised when building a custom lunar table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("Lunar table has no entries")]
    Empty,

    #[error("Lunar table entry for {year} has leap month {leap} (must be 0-12)")]
    InvalidLeapMonth { year: i32, leap: u8 },

    #[error("Lunar table epoch {epoch} precedes its first year {first_year}")]
    EpochBeforeFirstYear {
        epoch: chrono::NaiveDate,
        first_year: i32,
    },
}
