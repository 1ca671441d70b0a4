use chrono::{DateTime, SecondsFormat, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Get current UTC timestamp
pub fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

/// Whole days from `now` until `target`, rounded up.
///
/// Any positive remainder counts as a full day; a target in the past
/// yields zero or a negative count.
pub fn days_until(target: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let diff_ms = (target - now).num_milliseconds();
    let days = diff_ms / MILLIS_PER_DAY;
    if diff_ms % MILLIS_PER_DAY > 0 {
        days + 1
    } else {
        days
    }
}

/// RFC 3339 with whole seconds and a `Z` suffix, as written to exports
pub fn format_rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_days_until_rounds_up() {
        assert_eq!(days_until(now() + Duration::milliseconds(1), now()), 1);
        assert_eq!(days_until(now() + Duration::days(1), now()), 1);
        assert_eq!(days_until(now() + Duration::hours(25), now()), 2);
        assert_eq!(days_until(now(), now()), 0);
    }

    #[test]
    fn test_days_until_past_is_not_positive() {
        assert_eq!(days_until(now() - Duration::hours(12), now()), 0);
        assert_eq!(days_until(now() - Duration::hours(36), now()), -1);
        assert_eq!(days_until(now() - Duration::days(3), now()), -3);
    }

    #[test]
    fn test_format_rfc3339() {
        assert_eq!(format_rfc3339(now()), "2025-01-10T00:00:00Z");
        assert_eq!(format_rfc3339(now() + Duration::milliseconds(1500)), "2025-01-10T00:00:01Z");
    }
}
