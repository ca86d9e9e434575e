use chrono::{DateTime, Datelike};
use chrono_tz::Tz;

/// The schedule and the date header both run on Kabul wall-clock time.
pub const KABUL: Tz = chrono_tz::Asia::Kabul;

/// Dari weekday names, Monday first to line up with
/// `Weekday::num_days_from_monday`.
const WEEKDAYS_DARI: [&str; 7] = [
    "دوشنبه",
    "سه\u{200c}شنبه",
    "چهارشنبه",
    "پنجشنبه",
    "جمعه",
    "شنبه",
    "یکشنبه",
];

/// Gregorian to Solar Hijri via the 33-year cycle arithmetic.
pub fn gregorian_to_jalali(gy: i32, gm: u32, gd: u32) -> (i32, u32, u32) {
    // Cumulative day count at the start of each Gregorian month.
    const G_MONTH_DAYS: [i32; 12] = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

    let gy2 = if gm > 2 { gy + 1 } else { gy };
    let mut days = 355_666
        + 365 * gy
        + (gy2 + 3) / 4
        - (gy2 + 99) / 100
        + (gy2 + 399) / 400
        + gd as i32
        + G_MONTH_DAYS[(gm - 1) as usize];

    let mut jy = -1595 + 33 * (days / 12_053);
    days %= 12_053;
    jy += 4 * (days / 1461);
    days %= 1461;
    if days > 365 {
        jy += (days - 1) / 365;
        days = (days - 1) % 365;
    }

    // First 6 Jalali months have 31 days, the rest 30.
    let (jm, jd) = if days < 186 {
        (1 + days / 31, 1 + days % 31)
    } else {
        (7 + (days - 186) / 30, 1 + (days - 186) % 30)
    };
    (jy, jm as u32, jd as u32)
}

/// Today's date line for the header, e.g. "1405/05/15 — پنجشنبه".
pub fn format_today(now: DateTime<Tz>) -> String {
    let (jy, jm, jd) = gregorian_to_jalali(now.year(), now.month(), now.day());
    let weekday = WEEKDAYS_DARI[now.weekday().num_days_from_monday() as usize];
    format!("{jy}/{jm:02}/{jd:02} \u{2014} {weekday}")
}
