//! Wednesday→Tuesday week model.
//!
//! Ranking windows run from Wednesday 00:00:00 to the following Tuesday
//! 23:59:59.999, independent of locale or render day. A week is identified
//! by its closing Tuesday (the week key), so a whole window is shareable as
//! a single date value.

use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::Result;
use crate::types::{SeasonWeek, WeekWindow};

/// Wire format for week keys and window bounds (`YYYY-MM-DD`).
pub const ISO_DATE_FMT: &str = "%Y-%m-%d";

fn day_start(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn day_end(date: NaiveDate) -> NaiveDateTime {
    // 23:59:59.999 is always a valid time of day.
    date.and_time(NaiveTime::from_hms_milli_opt(23, 59, 59, 999).expect("valid time of day"))
}

/// The Wednesday that starts the week containing `date`.
///
/// Branch table on the weekday index (0=Sunday..6=Saturday):
/// Wednesday maps to itself; Thursday–Saturday step back `weekday - 3`
/// days; Sunday steps back 4; Monday and Tuesday step back `weekday + 4`
/// days — they are the tail of the week begun the previous Wednesday.
pub fn wednesday_of_week(date: NaiveDate) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday();
    let days_back = match weekday {
        3 => 0,
        4..=6 => weekday - 3,
        0 => 4,
        _ => weekday + 4,
    };
    date - Duration::days(i64::from(days_back))
}

/// Closing boundary of the week started by `wednesday`: six days later at
/// 23:59:59.999.
pub fn tuesday_after(wednesday: NaiveDate) -> NaiveDateTime {
    day_end(wednesday + Duration::days(6))
}

/// Inverse helper: given a closing Tuesday as an ISO `YYYY-MM-DD` string,
/// the backend query bounds for its week. Unparseable input surfaces as a
/// date-parse error.
pub fn week_range_from_tuesday(tuesday_iso: &str) -> Result<WeekWindow> {
    let tuesday = NaiveDate::parse_from_str(tuesday_iso.trim(), ISO_DATE_FMT)?;
    let wednesday = tuesday - Duration::days(6);
    Ok(WeekWindow {
        from: day_start(wednesday),
        to: day_end(tuesday),
    })
}

/// Week key for "now": the Tuesday that closes the current wall-clock week.
pub fn default_tuesday() -> NaiveDate {
    wednesday_of_week(Local::now().date_naive()) + Duration::days(6)
}

/// All season weeks from `season_start` through `season_end`, walking
/// forward seven days at a time. Week numbers are sequential from 1 in
/// generation order; the returned list is most-recent-first.
pub fn enumerate_weeks(season_start: NaiveDate, season_end: NaiveDate) -> Vec<SeasonWeek> {
    let mut weeks = Vec::new();
    let mut cursor = season_start;
    let mut num = 1u32;

    while cursor <= season_end {
        let wednesday = wednesday_of_week(cursor);
        weeks.push(SeasonWeek {
            num,
            start: day_start(wednesday),
            end: tuesday_after(wednesday),
        });
        cursor += Duration::days(7);
        num += 1;
    }

    weeks.reverse();
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn always_a_wednesday_containing_the_input() {
        // 2025-09-14 is a Sunday; the seven days starting there cover
        // every weekday.
        for offset in 0..7 {
            let d = date(2025, 9, 14) + Duration::days(offset);
            let wed = wednesday_of_week(d);
            assert_eq!(wed.weekday(), Weekday::Wed, "input {d}");
            assert!(wed <= d, "input {d} precedes its week start {wed}");
            assert!(
                d <= wed + Duration::days(6),
                "input {d} past its week end {}",
                wed + Duration::days(6)
            );
        }
    }

    #[test]
    fn branch_table_per_weekday() {
        // Week anchored on Wednesday 2025-09-10.
        assert_eq!(wednesday_of_week(date(2025, 9, 10)), date(2025, 9, 10)); // Wed
        assert_eq!(wednesday_of_week(date(2025, 9, 11)), date(2025, 9, 10)); // Thu
        assert_eq!(wednesday_of_week(date(2025, 9, 12)), date(2025, 9, 10)); // Fri
        assert_eq!(wednesday_of_week(date(2025, 9, 13)), date(2025, 9, 10)); // Sat
        assert_eq!(wednesday_of_week(date(2025, 9, 14)), date(2025, 9, 10)); // Sun
        assert_eq!(wednesday_of_week(date(2025, 9, 15)), date(2025, 9, 10)); // Mon
        assert_eq!(wednesday_of_week(date(2025, 9, 16)), date(2025, 9, 10)); // Tue
    }

    #[test]
    fn tuesday_after_is_six_days_later_end_of_day() {
        let end = tuesday_after(date(2025, 9, 10));
        assert_eq!(end.date(), date(2025, 9, 16));
        assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
    }

    #[test]
    fn week_range_round_trips_through_tuesday_after() {
        let window = week_range_from_tuesday("2025-09-16").unwrap();
        assert_eq!(window.from, day_start(date(2025, 9, 10)));
        assert_eq!(window.to, day_end(date(2025, 9, 16)));
        assert_eq!(tuesday_after(window.from.date()), window.to);
    }

    #[test]
    fn week_range_rejects_garbage() {
        assert!(week_range_from_tuesday("not-a-date").is_err());
        assert!(week_range_from_tuesday("").is_err());
    }

    #[test]
    fn enumerate_weeks_numbers_ascending_returns_descending() {
        let weeks = enumerate_weeks(date(2025, 9, 1), date(2025, 9, 30));
        assert_eq!(weeks.len(), 5);

        // Most recent first after the reversal.
        assert_eq!(weeks.first().unwrap().num, 5);
        assert_eq!(weeks.last().unwrap().num, 1);
        for pair in weeks.windows(2) {
            assert!(pair[0].num > pair[1].num);
            assert!(pair[0].start > pair[1].start);
        }

        for week in &weeks {
            assert_eq!(week.start.date().weekday(), Weekday::Wed);
            assert_eq!(week.end, tuesday_after(week.start.date()));
        }
    }

    #[test]
    fn enumerate_weeks_empty_when_start_past_end() {
        assert!(enumerate_weeks(date(2025, 10, 1), date(2025, 9, 1)).is_empty());
    }
}
