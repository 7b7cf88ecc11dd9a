//! Calendar-date helpers for journal operations.
//!
//! Entries belong to calendar days, not timestamps. Everything here is pure
//! over `NaiveDate`; functions that need "today" take it as a parameter so
//! tests control the clock. [`today`] reads the live clock and is the only
//! non-deterministic function in the module.

use std::collections::HashSet;

use chrono::{Duration, Local, NaiveDate};

/// Today's date in the server's reference timezone.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// The date `days` days before today.
pub fn days_ago(days: i64) -> NaiveDate {
    days_before(today(), days)
}

/// The date `days` days before `reference`.
pub fn days_before(reference: NaiveDate, days: i64) -> NaiveDate {
    reference - Duration::days(days)
}

/// Count consecutive calendar days ending at `today` with an entry.
///
/// Greedy backward walk: starting from `today`, step back one day at a
/// time while `dates` contains the day; stop at the first gap. A set
/// without `today` yields 0. This measures the current ongoing streak,
/// not the longest streak in history.
pub fn compute_streak(dates: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut streak = 0;
    let mut day = today;
    while dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_streak_three_consecutive_days() {
        let today = date(2026, 8, 30);
        let dates: HashSet<_> = [today, date(2026, 8, 29), date(2026, 8, 28)]
            .into_iter()
            .collect();
        assert_eq!(compute_streak(&dates, today), 3);
    }

    #[test]
    fn test_streak_zero_without_today() {
        let today = date(2026, 8, 30);
        let dates: HashSet<_> = [date(2026, 8, 29), date(2026, 8, 28)].into_iter().collect();
        assert_eq!(compute_streak(&dates, today), 0);
    }

    #[test]
    fn test_streak_empty_set() {
        let dates = HashSet::new();
        assert_eq!(compute_streak(&dates, date(2026, 8, 30)), 0);
    }

    #[test]
    fn test_streak_stops_at_gap() {
        let today = date(2026, 8, 30);
        // Gap on the 28th; the 27th must not count.
        let dates: HashSet<_> = [today, date(2026, 8, 29), date(2026, 8, 27)]
            .into_iter()
            .collect();
        assert_eq!(compute_streak(&dates, today), 2);
    }

    #[test]
    fn test_streak_is_deterministic() {
        let today = date(2026, 8, 30);
        let dates: HashSet<_> = [today, date(2026, 8, 29)].into_iter().collect();
        assert_eq!(
            compute_streak(&dates, today),
            compute_streak(&dates, today)
        );
    }

    #[test]
    fn test_days_before_crosses_month_boundary() {
        assert_eq!(days_before(date(2026, 3, 2), 5), date(2026, 2, 25));
    }
}
