//! Chinese lunar calendar conversion and anniversary recurrence.
//!
//! Converts between solar (Gregorian) and lunar dates for lunar years
//! 1900 through 2100, finds the next occurrence of solar or lunar
//! anniversaries, and derives the status and age text shown for them.
//!
//! # Examples
//!
//! ```
//! use chrono::NaiveDate;
//! use lunar_anniversary::{Almanac, AnniversaryRecord, CalendarType};
//!
//! let almanac = Almanac::default();
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//!
//! // Born on lunar new year 2000
//! let birthday = AnniversaryRecord::new(
//!     NaiveDate::from_ymd_opt(2000, 2, 5).unwrap(),
//!     CalendarType::Lunar,
//!     true,
//!     "birthday",
//! );
//!
//! let next = almanac.resolve_next_occurrence(&birthday, today);
//! assert_eq!(next.solar_date, NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
//!
//! let status = almanac.compute_status(&birthday, today);
//! assert_eq!(status.days_remaining, Some(40));
//!
//! assert_eq!(almanac.format_age(&birthday, today).as_deref(), Some("23岁"));
//! ```

mod age;
mod consts;
mod converter;
mod error;
pub mod fmt;
mod prelude;
mod record;
mod recurrence;
mod reminder;
mod status;
mod table;
mod types;

pub use age::{AgeFormatter, Elapsed};
pub use consts::*;
pub use converter::LunarCalendar;
pub use error::{CalendarError, ParseError, TableError};
pub use record::{AnniversaryRecord, CalendarType, OccurrenceResult, StatusResult, parse_target_date};
pub use recurrence::RecurrenceResolver;
pub use reminder::{ReminderDays, next_target_date, reminder_date};
pub use status::{Milestone, StatusCalculator, days_between, display_order};
pub use table::LunarTable;
pub use types::{LunarDate, LunarDay, LunarMonth};

use chrono::NaiveDate;

/// Entry point bundling every calculation over one lunar table.
///
/// `Almanac` is `Copy` and holds no mutable state, so one value can be
/// shared freely between threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Almanac {
    calendar: LunarCalendar,
}

impl Almanac {
    pub const fn new(table: LunarTable) -> Self {
        Self {
            calendar: LunarCalendar::new(table),
        }
    }

    pub const fn calendar(&self) -> &LunarCalendar {
        &self.calendar
    }

    pub const fn resolver(&self) -> RecurrenceResolver {
        RecurrenceResolver::new(self.calendar)
    }

    pub const fn status_calculator(&self) -> StatusCalculator {
        StatusCalculator::new(self.resolver())
    }

    pub const fn age_formatter(&self) -> AgeFormatter {
        AgeFormatter::new(self.calendar)
    }

    /// Lunar date of `date`, `None` outside the table.
    pub fn convert(&self, date: NaiveDate) -> Option<LunarDate> {
        self.calendar.solar_to_lunar(date)
    }

    /// Solar date of a lunar date, `None` when the year is outside the table.
    pub fn convert_back(&self, year: i32, month: u8, day: u8, is_leap_month: bool) -> Option<NaiveDate> {
        self.calendar.lunar_to_solar(year, month, day, is_leap_month)
    }

    pub fn resolve_next_occurrence(
        &self,
        anniversary: &AnniversaryRecord,
        reference: NaiveDate,
    ) -> OccurrenceResult {
        self.resolver().next_occurrence(anniversary, reference)
    }

    pub fn next_recurring_date(&self, anniversary: &AnniversaryRecord, reference: NaiveDate) -> NaiveDate {
        self.resolver().next_recurring_date(anniversary, reference)
    }

    pub fn compute_status(&self, anniversary: &AnniversaryRecord, reference: NaiveDate) -> StatusResult {
        self.status_calculator().calculate(anniversary, reference)
    }

    pub fn lunar_adjustment_note(
        &self,
        anniversary: &AnniversaryRecord,
        reference: NaiveDate,
    ) -> Option<String> {
        self.status_calculator()
            .lunar_adjustment_note(anniversary, reference)
    }

    pub fn format_age(&self, anniversary: &AnniversaryRecord, reference: NaiveDate) -> Option<String> {
        self.age_formatter().years_text(anniversary, reference)
    }

    pub fn festival(&self, date: NaiveDate) -> Option<&'static str> {
        fmt::festival(&self.calendar, date)
    }

    pub fn reminder_date(
        &self,
        anniversary: &AnniversaryRecord,
        days_before: i64,
        today: NaiveDate,
    ) -> Option<NaiveDate> {
        reminder::reminder_date(&self.resolver(), anniversary, days_before, today)
    }
}
