//! Bit-encoded lunar year table.
//!
//! Each entry describes one lunar year:
//!
//! | bits    | meaning                                              |
//! |---------|------------------------------------------------------|
//! | 0..=3   | leap month index, 0 when the year has no leap month  |
//! | 4..=15  | ordinary month lengths, month 1 at bit 15, month 12 at bit 4; set = 30 days |
//! | 16      | leap month length; set = 30 days                     |

use crate::consts::{
    BIG_MONTH_DAYS, FIRST_LUNAR_YEAR, LAST_LUNAR_YEAR, MONTHS_PER_YEAR, SMALL_MONTH_DAYS,
};
use crate::error::TableError;
use chrono::{Datelike, NaiveDate};

const LEAP_MONTH_MASK: u32 = 0xf;
const LEAP_LENGTH_BIT: u32 = 0x1_0000;

/// First day of lunar 1900, month 1, day 1.
const STANDARD_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 31) {
    Some(date) => date,
    None => panic!("invalid lunar table epoch"),
};

#[rustfmt::skip]
const STANDARD_ENTRIES: [u32; (LAST_LUNAR_YEAR - FIRST_LUNAR_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// Immutable lunar year table.
///
/// Build it once and hand it to [`crate::LunarCalendar`]; the table is `Copy`
/// and borrows its entries for `'static`, so sharing it across threads costs
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LunarTable {
    first_year: i32,
    epoch: NaiveDate,
    entries: &'static [u32],
}

impl LunarTable {
    /// Table for lunar years 1900 through 2100, anchored at 1900-01-31.
    pub const STANDARD: Self = Self {
        first_year: FIRST_LUNAR_YEAR,
        epoch: STANDARD_EPOCH,
        entries: &STANDARD_ENTRIES,
    };

    /// Builds a custom table whose first entry starts on `epoch`.
    ///
    /// # Errors
    /// Returns `TableError` if `entries` is empty, an entry carries a leap
    /// month index above 12, or `epoch` falls before `first_year`.
    pub fn new(
        first_year: i32,
        epoch: NaiveDate,
        entries: &'static [u32],
    ) -> Result<Self, TableError> {
        if entries.is_empty() {
            return Err(TableError::Empty);
        }
        if epoch.year() < first_year {
            return Err(TableError::EpochBeforeFirstYear { epoch, first_year });
        }
        for (year, entry) in (first_year..).zip(entries) {
            let leap = leap_month_of(*entry);
            if leap > MONTHS_PER_YEAR {
                return Err(TableError::InvalidLeapMonth { year, leap });
            }
        }
        Ok(Self {
            first_year,
            epoch,
            entries,
        })
    }

    pub const fn first_year(&self) -> i32 {
        self.first_year
    }

    /// Last covered year (inclusive)
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub const fn last_year(&self) -> i32 {
        self.first_year + self.entries.len() as i32 - 1
    }

    /// Solar date of the first day of the first covered year
    pub const fn epoch(&self) -> NaiveDate {
        self.epoch
    }

    pub const fn contains_year(&self, year: i32) -> bool {
        year >= self.first_year && year <= self.last_year()
    }

    /// Raw encoding of `year`, `None` outside the table
    pub fn entry(&self, year: i32) -> Option<u32> {
        let index = usize::try_from(year.checked_sub(self.first_year)?).ok()?;
        self.entries.get(index).copied()
    }
}

impl Default for LunarTable {
    fn default() -> Self {
        Self::STANDARD
    }
}

// --- entry decoding ---

#[allow(clippy::cast_possible_truncation)]
pub(crate) const fn leap_month_of(entry: u32) -> u8 {
    (entry & LEAP_MONTH_MASK) as u8
}

pub(crate) const fn leap_month_days_of(entry: u32) -> u8 {
    if leap_month_of(entry) == 0 {
        0
    } else if entry & LEAP_LENGTH_BIT != 0 {
        BIG_MONTH_DAYS
    } else {
        SMALL_MONTH_DAYS
    }
}

/// Length of ordinary month `month`. Out-of-range months read whatever bit
/// the shift lands on, or 29 once the shift runs past the field.
pub(crate) const fn month_days_of(entry: u32, month: u8) -> u8 {
    let mask = match LEAP_LENGTH_BIT.checked_shr(month as u32) {
        Some(mask) => mask,
        None => 0,
    };
    if entry & mask != 0 {
        BIG_MONTH_DAYS
    } else {
        SMALL_MONTH_DAYS
    }
}

pub(crate) const fn year_days_of(entry: u32) -> u16 {
    let mut total = 0u16;
    let mut month = 1;
    while month <= MONTHS_PER_YEAR {
        total += month_days_of(entry, month) as u16;
        month += 1;
    }
    total + leap_month_days_of(entry) as u16
}
