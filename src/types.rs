use crate::consts::{LUNAR_DAY_NAMES, LUNAR_MONTH_NAMES, MAX_LUNAR_DAY, MONTHS_PER_YEAR};
use crate::error::CalendarError;
use crate::fmt;
use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;

/// A lunar month number guaranteed to be in the range `1..=12`.
/// Leap months share the number of the month they follow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LunarMonth(NonZeroU8);

impl LunarMonth {
    /// Creates a new month, validating that it's in `1..=12`
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` if the value is 0 or > 12.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidMonth(value))?;
        if value > MONTHS_PER_YEAR {
            return Err(CalendarError::InvalidMonth(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Name of the month, "正月" through "腊月"
    pub const fn name(self) -> &'static str {
        LUNAR_MONTH_NAMES[(self.get() - 1) as usize]
    }
}

impl TryFrom<u8> for LunarMonth {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LunarMonth> for u8 {
    fn from(month: LunarMonth) -> Self {
        month.0.get()
    }
}

impl std::fmt::Display for LunarMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lunar day number in the range `1..=30`.
///
/// Validation here is context-free; whether day 30 exists in a given month is
/// checked by [`crate::LunarCalendar::lunar_date`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct LunarDay(NonZeroU8);

impl LunarDay {
    /// # Errors
    /// Returns `CalendarError::InvalidDay` if the value is 0 or > 30.
    pub fn new(value: u8) -> Result<Self, CalendarError> {
        let non_zero = NonZeroU8::new(value).ok_or(CalendarError::InvalidDay(value))?;
        if value > MAX_LUNAR_DAY {
            return Err(CalendarError::InvalidDay(value));
        }
        Ok(Self(non_zero))
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Name of the day, "初一" through "三十"
    pub const fn name(self) -> &'static str {
        LUNAR_DAY_NAMES[(self.get() - 1) as usize]
    }
}

impl TryFrom<u8> for LunarDay {
    type Error = CalendarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LunarDay> for u8 {
    fn from(day: LunarDay) -> Self {
        day.0.get()
    }
}

impl std::fmt::Display for LunarDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A date in the Chinese lunar calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    year: i32,
    month: LunarMonth,
    day: LunarDay,
    is_leap_month: bool,
}

impl LunarDate {
    /// Creates a lunar date from already validated components.
    pub const fn from_parts(year: i32, month: LunarMonth, day: LunarDay, is_leap_month: bool) -> Self {
        Self {
            year,
            month,
            day,
            is_leap_month,
        }
    }

    /// Creates a lunar date, checking month and day ranges only.
    ///
    /// # Errors
    /// Returns `CalendarError::InvalidMonth` or `CalendarError::InvalidDay`.
    pub fn new(year: i32, month: u8, day: u8, is_leap_month: bool) -> Result<Self, CalendarError> {
        Ok(Self::from_parts(
            year,
            LunarMonth::new(month)?,
            LunarDay::new(day)?,
            is_leap_month,
        ))
    }

    pub const fn year(&self) -> i32 {
        self.year
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }

    /// Returns the LunarMonth type
    pub const fn month_typed(&self) -> LunarMonth {
        self.month
    }

    /// Returns the LunarDay type
    pub const fn day_typed(&self) -> LunarDay {
        self.day
    }

    /// True when month, day and leap flag match, regardless of year.
    pub const fn same_day_of_year(&self, month: u8, day: u8, is_leap_month: bool) -> bool {
        self.month.get() == month && self.day.get() == day && self.is_leap_month == is_leap_month
    }

    /// Month and day without the year, e.g. "闰四月初十"
    pub fn month_day_text(&self) -> String {
        format!(
            "{}{}",
            fmt::month_name(self.month, self.is_leap_month),
            fmt::day_name(self.day)
        )
    }
}

/// Full lunar text, e.g. "二〇二四年正月初一"
impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年{}",
            fmt::year_text(self.year),
            self.month_day_text()
        )
    }
}
