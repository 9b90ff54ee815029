//! Utility date and time equations

use crate::MS_PER_DAY;

// ==== Begin Date Equations ====

/// Days between 0000-03-01 and 1970-01-01 in the proleptic Gregorian calendar.
const EPOCH_SHIFT: i64 = 719_468;
const DAYS_IN_A_400Y_CYCLE: i64 = 146_097;

/// `MakeDay` with month carry.
///
/// `month` is 1-indexed. Months outside of 1..=12 carry into the year and
/// days outside of the month carry into the neighboring months, the same way
/// ECMAScript's `Date` constructor balances its arguments.
pub(crate) fn epoch_days_from_gregorian_date(year: i32, month: i32, day: i32) -> i64 {
    let month_index = i64::from(month) - 1;
    let year = i64::from(year) + month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) + 1;
    days_from_civil(year, month) + i64::from(day) - 1
}

/// Epoch days of the first day of a balanced `month` of `year`.
fn days_from_civil(year: i64, month: i64) -> i64 {
    // Shift to a March based year so that the leap day is the last day.
    let year = if month <= 2 { year - 1 } else { year };
    let era = year.div_euclid(400);
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_IN_A_400Y_CYCLE + day_of_era - EPOCH_SHIFT
}

/// Returns the balanced `(year, month, day)` for a count of epoch days.
pub(crate) fn ymd_from_epoch_days(epoch_days: i64) -> (i64, u8, u8) {
    let shifted = epoch_days + EPOCH_SHIFT;
    let era = shifted.div_euclid(DAYS_IN_A_400Y_CYCLE);
    let day_of_era = shifted - era * DAYS_IN_A_400Y_CYCLE;
    let year_of_era =
        (day_of_era - day_of_era / 1460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + i64::from(month <= 2);
    (year, month as u8, day as u8)
}

/// `WeekDay`: 0 is Sunday and 6 is Saturday.
pub(crate) fn native_weekday_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    (epoch_days + 4).rem_euclid(7) as u8
}

/// Rotates a native (Sunday based) weekday so that Monday is 0.
pub(crate) fn monday_based_weekday(native: u8) -> u8 {
    (native + 6) % 7
}

/// Mathematically determine whether a year is a leap year.
pub(crate) fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns the 1-based ordinal day of a balanced date within its year.
pub(crate) fn day_of_year(year: i64, month: u8, day: u8) -> u16 {
    const DAYS: [u16; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    let leap_day = u16::from(month > 2 && is_leap_year(year));
    DAYS[usize::from(month - 1)] + leap_day + u16::from(day)
}

/// `EpochTimeToDayNumber`
pub(crate) fn epoch_time_to_day_number(t: i64) -> i64 {
    t.div_euclid(MS_PER_DAY)
}

/// The time within a day for an epoch time, always in `0..MS_PER_DAY`.
pub(crate) fn epoch_time_to_time_in_day(t: i64) -> i64 {
    t.rem_euclid(MS_PER_DAY)
}
