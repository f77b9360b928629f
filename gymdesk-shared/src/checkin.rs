/// Check-in day aggregation
///
/// Check-in rows are append-only and may repeat within a day; all
/// de-duplication happens at read time by bucketing timestamps into local
/// calendar days in the gym's timezone.

use chrono::{DateTime, FixedOffset, Utc};
use std::collections::HashSet;

/// Number of distinct local calendar days covered by the timestamps
pub fn distinct_days(times: &[DateTime<Utc>], offset: FixedOffset) -> usize {
    times
        .iter()
        .map(|t| t.with_timezone(&offset).date_naive())
        .collect::<HashSet<_>>()
        .len()
}

/// Distinct local days among timestamps at or after `since`
pub fn distinct_days_since(
    times: &[DateTime<Utc>],
    offset: FixedOffset,
    since: DateTime<Utc>,
) -> usize {
    times
        .iter()
        .filter(|t| **t >= since)
        .map(|t| t.with_timezone(&offset).date_naive())
        .collect::<HashSet<_>>()
        .len()
}

/// Local day-of-month for each timestamp, for calendar marking
pub fn days_of_month(times: &[DateTime<Utc>], offset: FixedOffset) -> Vec<u32> {
    use chrono::Datelike;
    times
        .iter()
        .map(|t| t.with_timezone(&offset).day())
        .collect()
}

/// Average distinct check-in days per week since joining
///
/// Members active for less than a week are counted as one full week so a
/// new member's average never explodes.
pub fn weekly_average(
    total_days: usize,
    joined: DateTime<Utc>,
    now: DateTime<Utc>,
) -> f64 {
    let days_since_joined = {
        let secs = (now - joined).num_seconds();
        let mut days = secs.div_euclid(86_400);
        if secs.rem_euclid(86_400) > 0 {
            days += 1;
        }
        days.max(1)
    };
    let weeks = (days_since_joined as f64 / 7.0).max(1.0);
    total_days as f64 / weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn gym_offset() -> FixedOffset {
        FixedOffset::east_opt(8 * 3600).unwrap()
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_repeated_same_day_checkins_count_once() {
        let times = vec![
            at(2024, 3, 15, 1),
            at(2024, 3, 15, 3),
            at(2024, 3, 15, 9),
        ];
        assert_eq!(distinct_days(&times, gym_offset()), 1);
    }

    #[test]
    fn test_day_split_follows_gym_timezone() {
        // 15:00 UTC and 17:00 UTC straddle local midnight (16:00 UTC)
        let times = vec![at(2024, 3, 14, 15), at(2024, 3, 14, 17)];
        assert_eq!(distinct_days(&times, gym_offset()), 2);
    }

    #[test]
    fn test_distinct_days_since_filters() {
        let times = vec![at(2024, 3, 10, 2), at(2024, 3, 12, 2), at(2024, 3, 14, 2)];
        let since = at(2024, 3, 11, 0);
        assert_eq!(distinct_days_since(&times, gym_offset(), since), 2);
    }

    #[test]
    fn test_days_of_month() {
        let times = vec![at(2024, 3, 4, 2), at(2024, 3, 4, 5), at(2024, 3, 20, 2)];
        assert_eq!(days_of_month(&times, gym_offset()), vec![4, 4, 20]);
    }

    #[test]
    fn test_weekly_average_for_new_member_uses_one_week_floor() {
        let now = at(2024, 3, 15, 12);
        let joined = now - Duration::days(2);
        // 2 check-in days over "one week" minimum
        assert!((weekly_average(2, joined, now) - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_weekly_average_long_tenure() {
        let now = at(2024, 3, 15, 12);
        let joined = now - Duration::days(28);
        // 8 days over 4 weeks
        assert!((weekly_average(8, joined, now) - 2.0).abs() < f64::EPSILON);
    }
}
