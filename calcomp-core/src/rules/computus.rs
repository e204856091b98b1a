//! Calendar arithmetic for moveable dates.
//!
//! All functions return `None` rather than panicking when a date falls
//! outside what `chrono` can represent.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// Western (Gregorian) Easter Sunday, Meeus/Jones/Butcher.
pub fn western_easter(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}

/// Orthodox Easter Sunday expressed as a Gregorian date.
///
/// Meeus' Julian computus plus the fixed 13-day Julian-to-Gregorian offset,
/// which holds for 1900-2099.
pub fn orthodox_easter(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(4);
    let b = year.rem_euclid(7);
    let c = year.rem_euclid(19);
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34).rem_euclid(7);
    let month = (d + e + 114) / 31;
    let day = (d + e + 114) % 31 + 1;

    NaiveDate::from_ymd_opt(year, month as u32, day as u32)?.checked_add_days(Days::new(13))
}

/// The `n`-th `weekday` of `month`, or `None` if the month has fewer.
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    if n == 0 {
        return None;
    }

    (1..=31)
        .map_while(|day| NaiveDate::from_ymd_opt(year, month, day))
        .filter(|date| date.weekday() == weekday)
        .nth((n - 1) as usize)
}

/// The last `weekday` of `month`.
pub fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    (1..=31)
        .rev()
        .filter_map(|day| NaiveDate::from_ymd_opt(year, month, day))
        .find(|date| date.weekday() == weekday)
}

/// The Sunday the Advent weeks count back from: Christmas minus
/// `weekday(Christmas) + 22` days.
pub fn advent_anchor(year: i32) -> Option<NaiveDate> {
    let christmas = NaiveDate::from_ymd_opt(year, 12, 25)?;
    let back = u64::from(christmas.weekday().num_days_from_monday()) + 22;
    christmas.checked_sub_days(Days::new(back))
}

/// The four Advent Sundays, first to fourth. Advent 4 falls on the anchor and
/// each earlier Sunday is one more week back.
pub fn advent_sundays(year: i32) -> Option<[NaiveDate; 4]> {
    let anchor = advent_anchor(year)?;
    Some([
        anchor.checked_sub_days(Days::new(21))?,
        anchor.checked_sub_days(Days::new(14))?,
        anchor.checked_sub_days(Days::new(7))?,
        anchor,
    ])
}

/// Shift `date` by a signed number of days.
pub(crate) fn offset(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_western_easter_known_years() {
        assert_eq!(western_easter(2026), Some(ymd(2026, 4, 5)));
        assert_eq!(western_easter(2024), Some(ymd(2024, 3, 31)));
        assert_eq!(western_easter(2025), Some(ymd(2025, 4, 20)));
        assert_eq!(western_easter(2038), Some(ymd(2038, 4, 25)));
        assert_eq!(western_easter(2008), Some(ymd(2008, 3, 23)));
    }

    #[test]
    fn test_orthodox_easter_known_years() {
        assert_eq!(orthodox_easter(2026), Some(ymd(2026, 4, 12)));
        assert_eq!(orthodox_easter(2024), Some(ymd(2024, 5, 5)));
        assert_eq!(orthodox_easter(2025), Some(ymd(2025, 4, 20)));
    }

    #[test]
    fn test_nth_weekday() {
        assert_eq!(nth_weekday(2026, 3, Weekday::Sun, 4), Some(ymd(2026, 3, 22)));
        assert_eq!(nth_weekday(2026, 3, Weekday::Sun, 6), None);
        assert_eq!(nth_weekday(2026, 3, Weekday::Sun, 0), None);
        assert_eq!(nth_weekday(2026, 11, Weekday::Thu, 4), Some(ymd(2026, 11, 26)));
        // 2028 is a leap year; February has five Tuesdays
        assert_eq!(nth_weekday(2028, 2, Weekday::Tue, 5), Some(ymd(2028, 2, 29)));
    }

    #[test]
    fn test_last_weekday() {
        assert_eq!(last_weekday(2026, 5, Weekday::Mon), Some(ymd(2026, 5, 25)));
        assert_eq!(last_weekday(2026, 2, Weekday::Sat), Some(ymd(2026, 2, 28)));
        assert_eq!(last_weekday(2026, 13, Weekday::Sat), None);
    }

    #[test]
    fn test_advent_sundays() {
        // Christmas 2026 is a Friday
        assert_eq!(advent_anchor(2026), Some(ymd(2026, 11, 29)));
        assert_eq!(
            advent_sundays(2026),
            Some([ymd(2026, 11, 8), ymd(2026, 11, 15), ymd(2026, 11, 22), ymd(2026, 11, 29)])
        );
        // Christmas 2022 fell on a Sunday
        assert_eq!(advent_anchor(2022), Some(ymd(2022, 11, 27)));
        assert_eq!(advent_sundays(2022).map(|s| s[0]), Some(ymd(2022, 11, 6)));
    }
}
