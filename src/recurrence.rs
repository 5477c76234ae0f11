//! Next-occurrence resolution for recurring anniversaries.
//!
//! Solar anniversaries recur on the same month and day, clamped to the end
//! of short months. Lunar anniversaries are found by scanning forward day by
//! day and, when the exact lunar date does not come round inside the window,
//! relaxing the request in a fixed order:
//!
//! 1. exact month, day and leap flag
//! 2. the ordinary month when a leap month was requested
//! 3. day 29 when day 30 was requested
//! 4. one solar year ahead, annotated as unresolved

use crate::consts::{SEARCH_WINDOW_DAYS, UNRESOLVED_NOTE};
use crate::converter::LunarCalendar;
use crate::record::{AnniversaryRecord, CalendarType, OccurrenceResult};
use crate::types::{LunarDate, LunarDay, LunarMonth};
use chrono::{Datelike, Days, Months, NaiveDate};

const SHORT_MONTH_DAY: u8 = 29;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecurrenceResolver {
    calendar: LunarCalendar,
}

impl RecurrenceResolver {
    pub const fn new(calendar: LunarCalendar) -> Self {
        Self { calendar }
    }

    /// Next date on or after `reference` on which `anniversary` recurs.
    pub fn next_recurring_date(&self, anniversary: &AnniversaryRecord, reference: NaiveDate) -> NaiveDate {
        self.next_occurrence(anniversary, reference).solar_date
    }

    /// Next occurrence with its adjustment note.
    ///
    /// A lunar anniversary whose target date lies outside the lunar table
    /// resolves to the target date itself.
    pub fn next_occurrence(&self, anniversary: &AnniversaryRecord, reference: NaiveDate) -> OccurrenceResult {
        match anniversary.calendar_type {
            CalendarType::Solar => OccurrenceResult::solar(next_solar_date(
                anniversary.target_date,
                reference,
            )),
            CalendarType::Lunar => match self.calendar.solar_to_lunar(anniversary.target_date) {
                Some(lunar) => self.next_lunar_birthday(
                    lunar.month_typed(),
                    lunar.day_typed(),
                    lunar.is_leap_month(),
                    reference,
                ),
                None => OccurrenceResult::solar(anniversary.target_date),
            },
        }
    }

    /// Next solar date, on or after `from`, whose lunar date is the given
    /// month and day.
    pub fn next_lunar_birthday(
        &self,
        month: LunarMonth,
        day: LunarDay,
        is_leap_month: bool,
        from: NaiveDate,
    ) -> OccurrenceResult {
        let (m, d) = (month.get(), day.get());

        if self
            .calendar
            .solar_to_lunar(from)
            .is_some_and(|today| today.same_day_of_year(m, d, is_leap_month))
        {
            return OccurrenceResult::exact(from, d);
        }

        if let Some(date) = self.scan(from, |l| l.same_day_of_year(m, d, is_leap_month)) {
            return OccurrenceResult::exact(date, d);
        }

        if is_leap_month {
            if let Some(date) = self.scan(from, |l| l.same_day_of_year(m, d, false)) {
                let name = month.name();
                return OccurrenceResult::adjusted(date, d, format!("无闰{name}，已调整为{name}"));
            }
        }

        if d == 30 {
            if let Some(date) = self.scan(from, |l| l.same_day_of_year(m, SHORT_MONTH_DAY, is_leap_month)) {
                return OccurrenceResult::adjusted(
                    date,
                    SHORT_MONTH_DAY,
                    format!("{}小月，已调整为廿九", month.name()),
                );
            }
        }

        log::warn!(
            "no lunar date {m}/{d} (leap: {is_leap_month}) within {SEARCH_WINDOW_DAYS} days of {from}"
        );
        let fallback = from.checked_add_months(Months::new(12)).unwrap_or(from);
        OccurrenceResult::adjusted(fallback, d, UNRESOLVED_NOTE.to_owned())
    }

    /// First date in `from + 1 ..= from + SEARCH_WINDOW_DAYS` whose lunar date
    /// satisfies `matches`.
    fn scan<F>(&self, from: NaiveDate, matches: F) -> Option<NaiveDate>
    where
        F: Fn(&LunarDate) -> bool,
    {
        (1..=SEARCH_WINDOW_DAYS)
            .map_while(|n| from.checked_add_days(Days::new(n)))
            .find(|date| {
                self.calendar
                    .solar_to_lunar(*date)
                    .is_some_and(|lunar| matches(&lunar))
            })
    }
}

/// Same month and day as `target` in the first year, starting with
/// `reference`'s, where it does not fall before `reference`.
fn next_solar_date(target: NaiveDate, reference: NaiveDate) -> NaiveDate {
    match clamped_date(target, reference.year()) {
        Some(date) if date >= reference => date,
        _ => clamped_date(target, reference.year() + 1).unwrap_or(reference),
    }
}

/// `target` moved to `year`. Month arithmetic lowers the day to the month's
/// last day when the month is shorter.
fn clamped_date(target: NaiveDate, year: i32) -> Option<NaiveDate> {
    let months = (year - target.year()) * 12;
    match u32::try_from(months) {
        Ok(months) => target.checked_add_months(Months::new(months)),
        Err(_) => target.checked_sub_months(Months::new(months.unsigned_abs())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn resolver() -> RecurrenceResolver {
        RecurrenceResolver::default()
    }

    fn calendar() -> LunarCalendar {
        LunarCalendar::default()
    }

    fn solar(target: NaiveDate) -> AnniversaryRecord {
        AnniversaryRecord::new(target, CalendarType::Solar, true, "love")
    }

    fn lunar(target: NaiveDate) -> AnniversaryRecord {
        AnniversaryRecord::new(target, CalendarType::Lunar, true, "birthday")
    }

    fn month(m: u8) -> LunarMonth {
        LunarMonth::new(m).unwrap()
    }

    fn day(d: u8) -> LunarDay {
        LunarDay::new(d).unwrap()
    }

    #[test]
    fn test_solar_later_this_year() {
        let next = resolver().next_recurring_date(&solar(ymd(1990, 8, 15)), ymd(2024, 3, 1));
        assert_eq!(next, ymd(2024, 8, 15));
    }

    #[test]
    fn test_solar_already_passed_rolls_over() {
        let next = resolver().next_recurring_date(&solar(ymd(1990, 1, 15)), ymd(2024, 3, 1));
        assert_eq!(next, ymd(2025, 1, 15));
    }

    #[test]
    fn test_solar_today() {
        let next = resolver().next_recurring_date(&solar(ymd(1990, 3, 1)), ymd(2024, 3, 1));
        assert_eq!(next, ymd(2024, 3, 1));
    }

    #[test]
    fn test_solar_leap_day_clamps() {
        let record = solar(ymd(2000, 2, 29));
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2001, 1, 1)),
            ymd(2001, 2, 28)
        );
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2001, 2, 28)),
            ymd(2001, 2, 28)
        );
        // The clamped date has passed, so next year's clamped date is used
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2001, 3, 1)),
            ymd(2002, 2, 28)
        );
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2003, 3, 1)),
            ymd(2004, 2, 29)
        );
    }

    #[test]
    fn test_solar_month_end_clamps() {
        let record = solar(ymd(2023, 1, 31));
        let next = resolver().next_recurring_date(&record, ymd(2024, 2, 1));
        assert_eq!(next, ymd(2025, 1, 31));

        let record = solar(ymd(2023, 8, 31));
        let next = resolver().next_recurring_date(&record, ymd(2024, 1, 1));
        assert_eq!(next, ymd(2024, 8, 31));
    }

    #[test]
    fn test_solar_never_before_reference() {
        let record = solar(ymd(1996, 2, 29));
        let mut reference = ymd(2023, 1, 1);
        while reference < ymd(2026, 1, 1) {
            let next = resolver().next_recurring_date(&record, reference);
            assert!(next >= reference, "{next} precedes {reference}");
            let falls_on_reference = reference.month() == 2
                && (reference.day() == 29 || (reference.day() == 28 && !reference.leap_year()));
            assert_eq!(next == reference, falls_on_reference, "{reference}");
            reference = reference.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_lunar_new_year_birthday() {
        let result = resolver().next_occurrence(&lunar(ymd(2000, 2, 5)), ymd(2024, 1, 1));
        assert_eq!(result.solar_date, ymd(2024, 2, 10));
        assert_eq!(result.adjustment_note, None);
        assert_eq!(result.actual_lunar_day, Some(1));
    }

    #[test]
    fn test_lunar_today_is_returned() {
        // 2024-09-17 is the fifteenth day of the eighth month
        let result = resolver().next_lunar_birthday(month(8), day(15), false, ymd(2024, 9, 17));
        assert_eq!(result.solar_date, ymd(2024, 9, 17));
        assert_eq!(result.adjustment_note, None);
    }

    #[test]
    fn test_lunar_never_before_reference() {
        let record = lunar(ymd(1988, 10, 3));
        let target = calendar().solar_to_lunar(record.target_date).unwrap();
        let mut reference = ymd(2024, 1, 1);
        while reference < ymd(2025, 6, 1) {
            let result = resolver().next_occurrence(&record, reference);
            assert!(result.solar_date >= reference);
            let hit = calendar().solar_to_lunar(result.solar_date).unwrap();
            assert_eq!((hit.month(), hit.day()), (target.month(), target.day()));
            reference = reference.checked_add_days(Days::new(7)).unwrap();
        }
    }

    #[test]
    fn test_lunar_leap_month_exact_match() {
        // 2020 has a leap fourth month; searching from before it finds it
        let result = resolver().next_lunar_birthday(month(4), day(10), true, ymd(2020, 5, 1));
        assert_eq!(result.solar_date, ymd(2020, 6, 1));
        assert_eq!(result.adjustment_note, None);
    }

    #[test]
    fn test_lunar_missing_leap_month_falls_back() {
        let record = lunar(ymd(2020, 6, 1));
        let result = resolver().next_occurrence(&record, ymd(2024, 1, 1));
        assert_eq!(result.solar_date, ymd(2024, 5, 17));
        assert_eq!(
            result.adjustment_note.as_deref(),
            Some("无闰四月，已调整为四月")
        );
        assert_eq!(result.actual_lunar_day, Some(10));

        let hit = calendar().solar_to_lunar(result.solar_date).unwrap();
        assert!(hit.same_day_of_year(4, 10, false));
    }

    #[test]
    fn test_lunar_missing_leap_month_found_generically() {
        let cal = calendar();
        let (year, leap) = (1950..2090)
            .map(|y| (y, cal.leap_month(y)))
            .find(|&(y, l)| {
                l >= 3 && (1..=3).all(|k| cal.leap_month(y + k) != l)
            })
            .unwrap();
        let from = cal.lunar_to_solar(year + 1, 1, 1, false).unwrap();
        let result = resolver().next_lunar_birthday(month(leap), day(10), true, from);

        assert!(result.is_adjusted());
        let name = month(leap).name();
        assert_eq!(
            result.adjustment_note,
            Some(format!("无闰{name}，已调整为{name}"))
        );
        let hit = cal.solar_to_lunar(result.solar_date).unwrap();
        assert_eq!(hit, LunarDate::new(year + 1, leap, 10, false).unwrap());
    }

    #[test]
    fn test_lunar_day_30_in_short_month() {
        // 2015-07-15 is the thirtieth day of the fifth month; the fifth month
        // is short in both 2016 and 2017
        let record = lunar(ymd(2015, 7, 15));
        let result = resolver().next_occurrence(&record, ymd(2016, 1, 1));
        assert_eq!(result.solar_date, ymd(2016, 7, 3));
        assert_eq!(
            result.adjustment_note.as_deref(),
            Some("五月小月，已调整为廿九")
        );
        assert_eq!(result.actual_lunar_day, Some(29));
    }

    #[test]
    fn test_lunar_day_30_found_generically() {
        let cal = calendar();
        let (year, m) = (1950..2050)
            .flat_map(|y| (3..=12).map(move |m| (y, m)))
            .find(|&(y, m)| {
                cal.month_days(y, m, false) == 30
                    && cal.month_days(y + 1, m, false) == 29
                    && cal.month_days(y + 2, m, false) == 29
            })
            .unwrap();
        let from = cal.lunar_to_solar(year + 1, 1, 1, false).unwrap();
        let result = resolver().next_lunar_birthday(month(m), day(30), false, from);

        assert_eq!(
            result.adjustment_note,
            Some(format!("{}小月，已调整为廿九", month(m).name()))
        );
        assert_eq!(result.actual_lunar_day, Some(29));
        let hit = cal.solar_to_lunar(result.solar_date).unwrap();
        assert_eq!(hit, LunarDate::new(year + 1, m, 29, false).unwrap());
    }

    #[test]
    fn test_lunar_day_30_when_it_exists() {
        let cal = calendar();
        let m = (1..=12).find(|m| cal.month_days(2024, *m, false) == 30).unwrap();
        let expected = cal.lunar_to_solar(2024, m, 30, false).unwrap();
        let result = resolver().next_lunar_birthday(month(m), day(30), false, ymd(2024, 2, 10));
        assert_eq!(result.solar_date, expected);
        assert_eq!(result.adjustment_note, None);
        assert_eq!(result.actual_lunar_day, Some(30));
    }

    #[test]
    fn test_solar_clamp_from_later_target() {
        // Target dates after the reference year move backwards with the same clamp
        let record = solar(ymd(2028, 2, 29));
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2025, 1, 1)),
            ymd(2025, 2, 28)
        );
        let record = solar(ymd(2030, 12, 31));
        assert_eq!(
            resolver().next_recurring_date(&record, ymd(2025, 12, 31)),
            ymd(2025, 12, 31)
        );
    }

    #[test]
    fn test_lunar_leap_day_30_precedence() {
        let cal = calendar();

        // 2036 has a thirty-day leap sixth month that does not return before
        // 2039. The ordinary sixth month is short in 2037 and long in 2038, so
        // the leap flag is dropped and day 30 is kept.
        assert_eq!(cal.leap_month(2036), 6);
        assert_eq!(cal.month_days(2036, 6, true), 30);
        assert_eq!(cal.month_days(2037, 6, false), 29);
        assert_eq!(cal.month_days(2038, 6, false), 30);
        let result = resolver().next_lunar_birthday(month(6), day(30), true, ymd(2037, 2, 15));
        assert_eq!(result.solar_date, cal.lunar_to_solar(2038, 6, 30, false).unwrap());
        assert_eq!(
            result.adjustment_note.as_deref(),
            Some("无闰六月，已调整为六月")
        );
        assert_eq!(result.actual_lunar_day, Some(30));

        // 2017 has a thirty-day leap sixth month; the ordinary sixth month is
        // short in 2018 and 2019 and no leap sixth month follows. Day 29 is
        // only tried in the leap month, so ordinary 6/29 is never chosen and
        // the search gives up.
        assert_eq!(cal.leap_month(2017), 6);
        assert_eq!(cal.month_days(2017, 6, true), 30);
        for year in [2018, 2019] {
            assert_eq!(cal.month_days(year, 6, false), 29, "{year}");
        }
        for year in 2018..=2020 {
            assert_ne!(cal.leap_month(year), 6, "{year}");
        }
        let from = ymd(2018, 2, 16);
        let result = resolver().next_lunar_birthday(month(6), day(30), true, from);
        assert_eq!(result.solar_date, ymd(2019, 2, 16));
        assert_eq!(result.adjustment_note.as_deref(), Some(UNRESOLVED_NOTE));
        assert_eq!(result.actual_lunar_day, Some(30));
        let short_month_day = cal.lunar_to_solar(2018, 6, 29, false).unwrap();
        assert_ne!(result.solar_date, short_month_day);
    }

    #[test]
    fn test_search_exhaustion_falls_back_one_year() {
        // Nothing is convertible after the table ends
        let from = ymd(2150, 2, 28);
        let result = resolver().next_lunar_birthday(month(1), day(1), false, from);
        assert_eq!(result.solar_date, ymd(2151, 2, 28));
        assert_eq!(result.adjustment_note.as_deref(), Some(UNRESOLVED_NOTE));
        assert_eq!(result.actual_lunar_day, Some(1));
    }

    #[test]
    fn test_search_exhaustion_on_leap_day() {
        let result = resolver().next_lunar_birthday(month(1), day(1), false, ymd(2400, 2, 29));
        assert_eq!(result.solar_date, ymd(2401, 2, 28));
        assert!(result.is_adjusted());
    }

    #[test]
    fn test_lunar_target_outside_table() {
        let record = lunar(ymd(1899, 6, 1));
        let result = resolver().next_occurrence(&record, ymd(2024, 1, 1));
        assert_eq!(result.solar_date, ymd(1899, 6, 1));
        assert_eq!(result.adjustment_note, None);
    }
}
