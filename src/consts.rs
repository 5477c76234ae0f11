/// First lunar year covered by the standard table
pub const FIRST_LUNAR_YEAR: i32 = 1900;
/// Last lunar year covered by the standard table (inclusive)
pub const LAST_LUNAR_YEAR: i32 = 2100;

/// Number of ordinary months in a lunar year
pub const MONTHS_PER_YEAR: u8 = 12;
/// Length of a "small" lunar month
pub const SMALL_MONTH_DAYS: u8 = 29;
/// Length of a "big" lunar month
pub const BIG_MONTH_DAYS: u8 = 30;
/// Highest day number a lunar month can have
pub const MAX_LUNAR_DAY: u8 = BIG_MONTH_DAYS;

/// Number of days scanned forward when looking for the next lunar occurrence.
/// Two full lunar years plus a leap cycle fit inside this window.
pub const SEARCH_WINDOW_DAYS: u64 = 800;

/// Category identifier that switches age text to "岁"
pub const BIRTHDAY_CATEGORY: &str = "birthday";

/// Elapsed-day counts reported as headline milestones
pub const MAJOR_MILESTONES: [i64; 3] = [100, 365, 1000];
/// Elapsed-day counts reported as minor milestones
pub const MINOR_MILESTONES: [i64; 3] = [30, 60, 90];

/// Reminder offset used when no reminder days are configured
pub const DEFAULT_REMINDER_DAY: i64 = 1;
/// Separator between reminder offsets in their stored form
pub const REMINDER_SEPARATOR: char = ',';

/// Month names, index 0 is the first month
pub const LUNAR_MONTH_NAMES: [&str; 12] = [
    "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "冬月", "腊月",
];

/// Day names, index 0 is the first day
pub const LUNAR_DAY_NAMES: [&str; 30] = [
    "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十", //
    "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", //
    "廿一", "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
];

/// Digits used when spelling out a lunar year
pub const CHINESE_DIGITS: [&str; 10] = ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// Prefix marking a leap month
pub const LEAP_PREFIX: &str = "闰";

/// Note attached when the forward search gives up
pub const UNRESOLVED_NOTE: &str = "无法计算农历日期";
