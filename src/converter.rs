use crate::error::CalendarError;
use crate::table::{LunarTable, leap_month_days_of, leap_month_of, month_days_of, year_days_of};
use crate::types::{LunarDate, LunarDay, LunarMonth};
use chrono::{Datelike, Days, NaiveDate};

/// Solar/lunar converter over a [`LunarTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LunarCalendar {
    table: LunarTable,
}

impl LunarCalendar {
    pub const fn new(table: LunarTable) -> Self {
        Self { table }
    }

    pub const fn table(&self) -> &LunarTable {
        &self.table
    }

    /// Earliest convertible solar date
    pub const fn first_solar_date(&self) -> NaiveDate {
        self.table.epoch()
    }

    /// Converts a solar date to its lunar date.
    ///
    /// Returns `None` before the table epoch or after the last covered year.
    pub fn solar_to_lunar(&self, date: NaiveDate) -> Option<LunarDate> {
        if date < self.table.epoch() || date.year() > self.table.last_year() {
            log::debug!("solar date {date} is outside the lunar table");
            return None;
        }

        let mut offset = date.signed_duration_since(self.table.epoch()).num_days();
        let mut year = self.table.first_year();
        let mut entry = self.table.entry(year)?;
        loop {
            let length = i64::from(year_days_of(entry));
            if offset < length {
                break;
            }
            offset -= length;
            year += 1;
            entry = self.table.entry(year)?;
        }

        let leap = leap_month_of(entry);
        for month in 1..=crate::consts::MONTHS_PER_YEAR {
            let length = i64::from(month_days_of(entry, month));
            if offset < length {
                return lunar_date(year, month, offset, false);
            }
            offset -= length;

            if leap == month {
                let length = i64::from(leap_month_days_of(entry));
                if offset < length {
                    return lunar_date(year, month, offset, true);
                }
                offset -= length;
            }
        }
        None
    }

    /// Converts a lunar date back to solar.
    ///
    /// Only the year is checked; `month` and `day` are trusted, so an
    /// inconsistent combination yields a date that does not round-trip.
    pub fn lunar_to_solar(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> Option<NaiveDate> {
        if !self.table.contains_year(year) {
            log::debug!("lunar year {year} is outside the lunar table");
            return None;
        }

        let mut offset: i64 = (self.table.first_year()..year)
            .map(|y| self.table.entry(y).map_or(0, |e| i64::from(year_days_of(e))))
            .sum();

        let entry = self.table.entry(year)?;
        let leap = leap_month_of(entry);
        for m in 1..month {
            offset += i64::from(month_days_of(entry, m));
            if leap == m {
                offset += i64::from(leap_month_days_of(entry));
            }
        }
        if is_leap_month && leap == month {
            offset += i64::from(month_days_of(entry, month));
        }
        offset += i64::from(day) - 1;

        if offset >= 0 {
            self.table
                .epoch()
                .checked_add_days(Days::new(offset.unsigned_abs()))
        } else {
            self.table
                .epoch()
                .checked_sub_days(Days::new(offset.unsigned_abs()))
        }
    }

    /// Leap month of `year`, 0 when there is none or the year is not covered.
    pub fn leap_month(&self, year: i32) -> u8 {
        self.table.entry(year).map_or(0, leap_month_of)
    }

    /// Length of a month, 29 or 30. Asking for a leap month in a year without
    /// one yields 0.
    pub fn month_days(&self, year: i32, month: u8, is_leap_month: bool) -> u8 {
        self.table.entry(year).map_or(0, |entry| {
            if is_leap_month {
                leap_month_days_of(entry)
            } else {
                month_days_of(entry, month)
            }
        })
    }

    /// Total days in lunar `year`, 0 when the year is not covered.
    pub fn year_days(&self, year: i32) -> u16 {
        self.table.entry(year).map_or(0, year_days_of)
    }

    /// Builds a lunar date that is known to exist in the table.
    ///
    /// # Errors
    /// Returns `CalendarError` if the year is not covered, the month or day
    /// is out of range, the leap month does not exist, or the day exceeds the
    /// month's length.
    pub fn lunar_date(
        &self,
        year: i32,
        month: u8,
        day: u8,
        is_leap_month: bool,
    ) -> Result<LunarDate, CalendarError> {
        if !self.table.contains_year(year) {
            return Err(CalendarError::YearOutOfRange {
                year,
                first: self.table.first_year(),
                last: self.table.last_year(),
            });
        }
        let date = LunarDate::new(year, month, day, is_leap_month)?;
        if is_leap_month && self.leap_month(year) != month {
            return Err(CalendarError::NoLeapMonth { year, month });
        }
        let length = self.month_days(year, month, is_leap_month);
        if day > length {
            return Err(CalendarError::DayExceedsMonth {
                year,
                month,
                day,
                length,
            });
        }
        Ok(date)
    }
}

fn lunar_date(year: i32, month: u8, offset: i64, is_leap_month: bool) -> Option<LunarDate> {
    let day = u8::try_from(offset + 1).ok()?;
    Some(LunarDate::from_parts(
        year,
        LunarMonth::new(month).ok()?,
        LunarDay::new(day).ok()?,
        is_leap_month,
    ))
}
