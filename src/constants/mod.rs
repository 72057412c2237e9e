//! Constants module for Julian Day calculations

// Time constants
/// Seconds in a day
pub const DAY_S: i64 = 86_400;
/// Microseconds in a second
pub const SECOND_US: i64 = 1_000_000;
/// Microseconds in a day
pub const DAY_US: i64 = DAY_S * SECOND_US;
/// Minutes in a day
pub const DAY_MIN: i64 = 1_440;
/// Days in a Julian century
pub const DAYS_PER_JULIAN_CENTURY: i64 = 36_525;

// Epochs
/// J2000.0 epoch as Julian day number (2000-01-01 12:00 TT)
pub const J2000_JDN: i64 = 2_451_545;
/// Julian day number of the civil day 1970-01-01
pub const UNIX_EPOCH_JDN: i64 = 2_440_588;
/// Julian date of 1970-01-01T00:00:00Z as the fraction `numer / denom` (2440587.5)
pub const UNIX_EPOCH_JD: (i64, i64) = (4_881_175, 2);
/// Offset between Julian date and modified Julian date as `numer / denom` (2400000.5)
pub const MJD_OFFSET: (i64, i64) = (4_800_001, 2);

// Calendar algorithm offsets
/// Days from "-4800-03-00" in the proleptic Gregorian calendar to JDN 0
pub const GREGORIAN_EPOCH_OFFSET: i64 = 32_045;
/// Days from "-4800-03-00" in the proleptic Julian calendar to JDN 0
pub const JULIAN_EPOCH_OFFSET: i64 = 32_083;
/// Year of the "-4800-03-00" base date
pub const BASE_YEAR: i64 = -4_800;

/// Largest accepted timezone offset in minutes (18 hours either way)
pub const MAX_TZ_OFFSET_MIN: i32 = 1_080;
/// Largest accepted magnitude of a calendar year, keeping day numbers well inside `i64`
pub const MAX_ABS_YEAR: i64 = 1_000_000_000_000;

// Timezone offsets in minutes, east positive
/// Coordinated Universal Time
pub const UTC: i32 = 0;
/// Australian Eastern Daylight Time
pub const AEDT: i32 = 660;
/// Australian Central Daylight Time (UTC+10:30)
pub const ACDT: i32 = 630;
/// Australian Eastern Standard Time
pub const AEST: i32 = 600;
/// Australian Central Standard Time (UTC+9:30)
pub const ACST: i32 = 570;
/// Japan Standard Time
pub const JST: i32 = 540;
/// Australian Western Standard Time
pub const AWST: i32 = 480;
/// India Standard Time (UTC+5:30)
pub const IST: i32 = 330;
/// Moscow Standard Time
pub const MSK: i32 = 240;
/// Eastern European Summer Time
pub const EEST: i32 = 180;
/// Eastern European Time
pub const EET: i32 = 120;
/// Central European Summer Time
pub const CEST: i32 = 120;
/// Central European Time
pub const CET: i32 = 60;
/// Western European Summer Time
pub const WEST: i32 = 60;
/// Western European Time
pub const WET: i32 = 0;
/// Atlantic Daylight Time
pub const ADT: i32 = -180;
/// Atlantic Standard Time
pub const AST: i32 = -240;
/// Eastern Daylight Time
pub const EDT: i32 = -240;
/// Eastern Standard Time
pub const EST: i32 = -300;
/// Central Daylight Time
pub const CDT: i32 = -300;
/// Central Standard Time
pub const CST: i32 = -360;
/// Mountain Daylight Time
pub const MDT: i32 = -360;
/// Mountain Standard Time
pub const MST: i32 = -420;
/// Pacific Daylight Time
pub const PDT: i32 = -420;
/// Pacific Standard Time
pub const PST: i32 = -480;
/// Alaska Daylight Time
pub const AKDT: i32 = -480;
/// Alaska Standard Time
pub const AKST: i32 = -540;

// Day of week numbers as returned by `JulianDay::wday`
pub const SUNDAY: u32 = 0;
pub const MONDAY: u32 = 1;
pub const TUESDAY: u32 = 2;
pub const WEDNESDAY: u32 = 3;
pub const THURSDAY: u32 = 4;
pub const FRIDAY: u32 = 5;
pub const SATURDAY: u32 = 6;
