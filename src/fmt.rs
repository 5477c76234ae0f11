//! Chinese text for lunar and solar dates.

use crate::consts::{CHINESE_DIGITS, LEAP_PREFIX};
use crate::converter::LunarCalendar;
use crate::record::CalendarType;
use crate::types::{LunarDay, LunarMonth};
use chrono::{Datelike, NaiveDate};

/// Spells a year digit by digit.
///
/// ```
/// use lunar_anniversary::fmt;
///
/// assert_eq!("二〇二四", fmt::year_text(2024));
/// ```
pub fn year_text(year: i32) -> String {
    year.to_string()
        .chars()
        .map(|ch| {
            ch.to_digit(10)
                .and_then(|d| CHINESE_DIGITS.get(d as usize).copied())
                .map_or_else(|| ch.to_string(), str::to_owned)
        })
        .collect()
}

/// Month name with the leap prefix when `is_leap` is set.
///
/// ```
/// use lunar_anniversary::{LunarMonth, fmt};
///
/// let month = LunarMonth::new(4).unwrap();
/// assert_eq!("闰四月", fmt::month_name(month, true));
/// ```
pub fn month_name(month: LunarMonth, is_leap: bool) -> String {
    if is_leap {
        format!("{LEAP_PREFIX}{}", month.name())
    } else {
        month.name().to_owned()
    }
}

pub const fn day_name(day: LunarDay) -> &'static str {
    day.name()
}

/// Traditional festival falling on `date`, if any.
///
/// 除夕 is the last day of the twelfth month, so it is found by checking
/// that the next day opens a new year.
pub fn festival(calendar: &LunarCalendar, date: NaiveDate) -> Option<&'static str> {
    let lunar = calendar.solar_to_lunar(date)?;
    match (lunar.month(), lunar.day()) {
        (1, 1) => Some("春节"),
        (1, 15) => Some("元宵节"),
        (5, 5) => Some("端午节"),
        (7, 7) => Some("七夕节"),
        (8, 15) => Some("中秋节"),
        (9, 9) => Some("重阳节"),
        (12, day) if day >= 29 => {
            let next = calendar.solar_to_lunar(date.succ_opt()?)?;
            (next.month() == 1 && next.day() == 1).then_some("除夕")
        }
        _ => None,
    }
}

/// Solar month and day, e.g. "1月15日".
pub fn solar_display(date: NaiveDate) -> String {
    format!("{}月{}日", date.month(), date.day())
}

/// Lunar month and day of a solar date, e.g. "闰四月初十".
/// Dates outside the lunar table fall back to [`solar_display`].
pub fn lunar_display(calendar: &LunarCalendar, date: NaiveDate) -> String {
    calendar
        .solar_to_lunar(date)
        .map_or_else(|| solar_display(date), |lunar| lunar.month_day_text())
}

/// Date text for an anniversary card.
///
/// Recurring anniversaries show month and day only; one-time anniversaries
/// are prefixed with their year ("2024年1月15日", "二〇二四年正月初一").
pub fn display_by_calendar(
    calendar: &LunarCalendar,
    date: NaiveDate,
    calendar_type: CalendarType,
    is_recurring: bool,
) -> String {
    match calendar_type {
        CalendarType::Lunar => {
            let month_day = lunar_display(calendar, date);
            if is_recurring {
                return month_day;
            }
            match calendar.solar_to_lunar(date) {
                Some(lunar) => format!("{}年{month_day}", year_text(lunar.year())),
                None => format!("{}年{month_day}", date.year()),
            }
        }
        CalendarType::Solar => {
            let month_day = solar_display(date);
            if is_recurring {
                month_day
            } else {
                format!("{}年{month_day}", date.year())
            }
        }
    }
}
