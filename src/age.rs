//! Elapsed-time text such as "2岁3个月", "5年" or "15天".
//!
//! Elapsed years and months use calendar-aware borrowing:
//!   • a negative day difference borrows one month
//!   • a negative month difference borrows one year
//!
//! Lunar anniversaries apply the same rules to lunar year/month/day, so a
//! lunar birthday ages on its lunar date rather than its solar one.

use crate::converter::LunarCalendar;
use crate::record::{AnniversaryRecord, CalendarType};
use crate::status::days_between;
use chrono::{Datelike, NaiveDate};

/// Whole years and months elapsed since a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Elapsed {
    pub years: i32,
    pub months: i32,
}

impl Elapsed {
    pub const fn total_months(self) -> i32 {
        self.years * 12 + self.months
    }

    /// Borrowing subtraction of `(year, month, day)` triples.
    fn between(start: (i32, i32, i32), end: (i32, i32, i32)) -> Self {
        let mut years = end.0 - start.0;
        let mut months = end.1 - start.1;
        let days = end.2 - start.2;

        if days < 0 {
            months -= 1;
        }
        if months < 0 {
            years -= 1;
            months += 12;
        }

        Self {
            years: years.max(0),
            months: months.max(0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AgeFormatter {
    calendar: LunarCalendar,
}

impl AgeFormatter {
    pub const fn new(calendar: LunarCalendar) -> Self {
        Self { calendar }
    }

    /// Years and months from the anniversary's target date to `current`,
    /// counted in the anniversary's own calendar. Zero when `current` comes
    /// first or a lunar date falls outside the table.
    pub fn elapsed(&self, anniversary: &AnniversaryRecord, current: NaiveDate) -> Elapsed {
        let target = anniversary.target_date;
        if current < target {
            return Elapsed::default();
        }

        match anniversary.calendar_type {
            CalendarType::Solar => Elapsed::between(solar_parts(target), solar_parts(current)),
            CalendarType::Lunar => {
                let (Some(start), Some(end)) = (
                    self.calendar.solar_to_lunar(target),
                    self.calendar.solar_to_lunar(current),
                ) else {
                    return Elapsed::default();
                };
                Elapsed::between(
                    (start.year(), i32::from(start.month()), i32::from(start.day())),
                    (end.year(), i32::from(end.month()), i32::from(end.day())),
                )
            }
        }
    }

    /// Text for the time since the anniversary, `None` before it or on the
    /// day itself.
    pub fn years_text(&self, anniversary: &AnniversaryRecord, current: NaiveDate) -> Option<String> {
        let elapsed = self.elapsed(anniversary, current);
        let total_months = elapsed.total_months();

        if total_months <= 0 {
            let days = days_between(anniversary.target_date, current);
            return (days > 0).then(|| format!("{days}天"));
        }

        if total_months < 12 {
            return Some(format!("{total_months}个月"));
        }

        let Elapsed { years, months } = elapsed;
        let is_birthday = anniversary.is_birthday();
        if years <= 3 && is_birthday {
            return Some(if months > 0 {
                format!("{years}岁{months}个月")
            } else {
                format!("{years}岁")
            });
        }

        let unit = if is_birthday { "岁" } else { "年" };
        Some(format!("{years}{unit}"))
    }
}

// month and day are at most 31
#[allow(clippy::cast_possible_wrap)]
fn solar_parts(date: NaiveDate) -> (i32, i32, i32) {
    (date.year(), date.month() as i32, date.day() as i32)
}
