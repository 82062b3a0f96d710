use std::cmp::Ordering;

use chrono::{DateTime, Datelike as _, NaiveTime, TimeZone, Utc};

/// Returns the first instant of the calendar month containing `now`, as seen
/// in `now`'s own time zone.
pub(crate) fn month_start<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Utc> {
    let first_day = now
        .date_naive()
        .with_day(1)
        .expect("copying a NaiveDate with overridden day=1 should never fail")
        .and_time(NaiveTime::MIN);
    now.timezone()
        .from_local_datetime(&first_day)
        .earliest()
        .map(|d| d.with_timezone(&Utc))
        // Midnight skipped by a DST transition.
        .unwrap_or_else(|| first_day.and_utc())
}

pub(crate) fn to_cents(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}

pub(crate) fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

/// Splits `total_cents` in proportion to `weights`, so that the parts always
/// add up to exactly `total_cents`. Cents lost to rounding down go to the
/// largest fractional remainders (earlier entries win ties).
///
/// If all weights are zero nothing can be allocated and every part is zero.
pub(crate) fn allocate_cents(total_cents: i64, weights: &[f64]) -> Vec<i64> {
    let weight_sum: f64 = weights.iter().sum();
    if weights.is_empty() || weight_sum <= 0.0 {
        return vec![0; weights.len()];
    }

    let exact: Vec<f64> = weights
        .iter()
        .map(|w| total_cents as f64 * w / weight_sum)
        .collect();
    let mut parts: Vec<i64> = exact.iter().map(|e| e.floor() as i64).collect();
    let residue = total_cents - parts.iter().sum::<i64>();

    let by_remainder = {
        let mut v: Vec<usize> = (0..exact.len()).collect();
        v.sort_by(|&a, &b| {
            let ra = exact[a] - exact[a].floor();
            let rb = exact[b] - exact[b].floor();
            rb.partial_cmp(&ra).unwrap_or(Ordering::Equal)
        });
        v
    };
    for &i in by_remainder.iter().cycle().take(residue.max(0) as usize) {
        parts[i] += 1;
    }
    parts
}

#[cfg(test)]
mod tests {
    use chrono::FixedOffset;

    use super::*;

    #[test]
    fn month_start_in_utc() {
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 8, 15, 0).unwrap();
        assert_eq!(
            month_start(&now),
            Utc.with_ymd_and_hms(2026, 10, 1, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn month_start_respects_offset() {
        let tz = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = tz.with_ymd_and_hms(2026, 11, 1, 3, 0, 0).unwrap();
        // Midnight of Nov 1st in UTC+9 is Oct 31st 15:00 UTC.
        assert_eq!(
            month_start(&now),
            Utc.with_ymd_and_hms(2026, 10, 31, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn allocation_sums_to_total() {
        let parts = allocate_cents(1000, &[1.0, 1.0, 1.0]);
        assert_eq!(parts.iter().sum::<i64>(), 1000);
        assert_eq!(parts, vec![334, 333, 333]);
    }

    #[test]
    fn allocation_favours_largest_remainder() {
        // Exact shares: 1.5, 2.5 and 6.0 cents.
        let parts = allocate_cents(10, &[15.0, 25.0, 60.0]);
        assert_eq!(parts, vec![2, 2, 6]);
    }

    #[test]
    fn allocation_with_zero_weights() {
        assert_eq!(allocate_cents(500, &[0.0, 0.0]), vec![0, 0]);
        assert!(allocate_cents(500, &[]).is_empty());
    }

    #[test]
    fn cents_conversion_rounds() {
        assert_eq!(to_cents(89.47), 8947);
        assert_eq!(to_cents(0.126), 13);
        assert_eq!(from_cents(1855), 18.55);
    }
}
