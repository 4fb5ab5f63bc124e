// src/calendar.rs

// Solar Hijri (Jalali) → Gregorian, 33-year arithmetic cycle.

use chrono::NaiveDate;

/// Days counter shared by both directions; `- 365` turns it into days from CE.
fn jalali_days(jy: i64, jm: i64, jd: i64) -> i64 {
    let jy = jy + 1595;
    let mut days = -355_668 + 365 * jy + (jy / 33) * 8 + ((jy % 33) + 3) / 4 + jd;
    if jm < 7 {
        days += (jm - 1) * 31;
    } else {
        days += (jm - 7) * 30 + 186;
    }
    days
}

pub fn is_leap_jalali(year: i32) -> bool {
    let y = year as i64;
    jalali_days(y + 1, 1, 1) - jalali_days(y, 1, 1) == 366
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_leap_jalali(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// Gregorian date of a Jalali date.
///
/// Years below 1 clamp to 1 and day 0 (unknown day) becomes 1, so partially dated
/// records still land in the right month. Out-of-range month or day gives `None`.
pub fn jalali_to_gregorian(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    let year = year.max(1);
    let day = day.max(1);
    if day > days_in_month(year, month)? {
        return None;
    }
    let n = jalali_days(year as i64, month as i64, day as i64) - 365;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(n).ok()?)
}
