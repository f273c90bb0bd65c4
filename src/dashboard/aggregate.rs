//! Activity aggregation.
//!
//! Buckets a workspace's request activity into the fixed time grid of a
//! timeframe and computes the dashboard's headline statistics. `now` is an
//! explicit parameter: callers sample the clock once per render and pass it
//! in, so repeated calls over the same inputs are bit-identical.

use chrono::{DateTime, Duration, Utc};
use std::collections::HashSet;

use super::models::{ActivityOverview, ActivityRecord, ActivitySummary, TimeBucket};
use super::timeframe::Timeframe;

/// Truncate an instant down to the start of its containing bucket.
pub fn floor_to_bucket(instant: DateTime<Utc>, width: Duration) -> DateTime<Utc> {
    let step = width.num_seconds().max(1);
    let ts = instant.timestamp();
    let floored = ts - (ts % step);
    DateTime::from_timestamp(floored, 0).unwrap_or(instant)
}

/// Aggregate `activities` over the timeframe ending at `now`.
///
/// The bucket sequence always covers the whole window: it runs from the
/// floored window start to the floored `now` inclusive, so it is non-empty
/// even when no record matches.
pub fn aggregate(
    activities: &[ActivityRecord],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> ActivityOverview {
    let width = timeframe.bucket_width();
    let step = width.num_seconds().max(1);
    let window_start = now - timeframe.lookback();

    let in_window: Vec<&ActivityRecord> = activities
        .iter()
        .filter(|a| a.created_at >= window_start)
        .collect();

    // 1. Lay out the bucket grid.
    let first = floor_to_bucket(window_start, width);
    let last = floor_to_bucket(now, width);
    let len = ((last.timestamp() - first.timestamp()) / step) as usize + 1;

    let mut buckets: Vec<TimeBucket> = (0..len)
        .map(|i| TimeBucket {
            start: DateTime::from_timestamp(first.timestamp() + i as i64 * step, 0)
                .unwrap_or(first),
            success: 0,
            error: 0,
        })
        .collect();

    // 2. Count each record into its slot. A record stamped after `now` was
    // sampled floors past the final bucket and is dropped.
    for record in &in_window {
        let slot = floor_to_bucket(record.created_at, width);
        let idx = ((slot.timestamp() - first.timestamp()) / step) as usize;

        let Some(bucket) = buckets.get_mut(idx) else {
            continue;
        };

        if record.is_error() {
            bucket.error += 1;
        } else {
            bucket.success += 1;
        }
    }

    // 3. Headline statistics over the filtered set.
    let total_requests = in_window.len() as u64;
    let error_requests = in_window.iter().filter(|a| a.is_error()).count() as u64;
    let avg_error_rate = if total_requests == 0 {
        0.0
    } else {
        error_requests as f64 / total_requests as f64 * 100.0
    };
    let total_consumers = in_window
        .iter()
        .map(|a| a.consumer_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;
    let total_services = in_window
        .iter()
        .map(|a| a.service_id.as_str())
        .collect::<HashSet<_>>()
        .len() as u64;

    tracing::debug!(
        "Aggregated {} records into {} buckets ({})",
        total_requests,
        buckets.len(),
        timeframe
    );

    ActivityOverview {
        buckets,
        summary: ActivitySummary {
            total_requests,
            error_requests,
            avg_error_rate,
            total_consumers,
            total_services,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(status: i32, created_at: DateTime<Utc>) -> ActivityRecord {
        ActivityRecord {
            id: format!("req-{}", created_at.timestamp()),
            status_code: status,
            service_id: "svc-1".to_string(),
            route_id: None,
            consumer_id: "consumer-1".to_string(),
            created_at,
        }
    }

    #[test]
    fn test_floor_to_bucket() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 56).unwrap();

        assert_eq!(
            floor_to_bucket(dt, Duration::minutes(2)),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 34, 0).unwrap()
        );
        assert_eq!(
            floor_to_bucket(dt, Duration::minutes(10)),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 30, 0).unwrap()
        );
        assert_eq!(
            floor_to_bucket(dt, Duration::minutes(240)),
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_one_hour_grid_has_31_buckets() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let overview = aggregate(&[], Timeframe::OneHour, now);

        // floor(60 / 2) + 1, inclusive of both grid ends
        assert_eq!(overview.buckets.len(), 31);
        assert_eq!(
            overview.buckets[0].start,
            Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap()
        );
        assert_eq!(overview.buckets[30].start, now);
    }

    #[test]
    fn test_off_grid_now_still_spans_window() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 1, 30).unwrap();
        let overview = aggregate(&[], Timeframe::OneHour, now);

        assert_eq!(overview.buckets.len(), 31);
        assert_eq!(
            overview.buckets[0].start,
            Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap()
        );
        assert_eq!(
            overview.buckets[30].start,
            Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_records_counted_into_slots() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let activities = vec![
            record(200, Utc.with_ymd_and_hms(2024, 1, 1, 11, 30, 10).unwrap()),
            record(201, Utc.with_ymd_and_hms(2024, 1, 1, 11, 31, 59).unwrap()),
            record(502, Utc.with_ymd_and_hms(2024, 1, 1, 11, 30, 45).unwrap()),
        ];

        let overview = aggregate(&activities, Timeframe::OneHour, now);

        // 11:30 is bucket 15 on the 2-minute grid starting at 11:00
        assert_eq!(overview.buckets[15].success, 2);
        assert_eq!(overview.buckets[15].error, 1);
        assert_eq!(overview.summary.total_requests, 3);
        assert_eq!(overview.summary.error_requests, 1);
    }

    #[test]
    fn test_window_filter_is_inclusive_at_start() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let activities = vec![
            record(200, Utc.with_ymd_and_hms(2024, 1, 1, 11, 0, 0).unwrap()),
            record(200, Utc.with_ymd_and_hms(2024, 1, 1, 10, 59, 59).unwrap()),
        ];

        let overview = aggregate(&activities, Timeframe::OneHour, now);
        assert_eq!(overview.summary.total_requests, 1);
    }

    #[test]
    fn test_error_rate_zero_when_empty() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let overview = aggregate(&[], Timeframe::OneHour, now);

        assert_eq!(overview.summary.total_requests, 0);
        assert_eq!(overview.summary.avg_error_rate, 0.0);
    }

    #[test]
    fn test_error_rate_split() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 11, 45, 0).unwrap();

        let mut activities = Vec::new();
        for _ in 0..60 {
            activities.push(record(200, at));
        }
        for _ in 0..40 {
            activities.push(record(500, at));
        }

        let overview = aggregate(&activities, Timeframe::OneHour, now);
        assert_eq!(overview.summary.total_requests, 100);
        assert_eq!(overview.summary.error_requests, 40);
        assert_eq!(overview.summary.avg_error_rate, 40.0);
    }

    #[test]
    fn test_distinct_consumers_and_services() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 11, 45, 0).unwrap();

        let mut a = record(200, at);
        a.consumer_id = "alice".to_string();
        a.service_id = "svc-a".to_string();
        let mut b = record(200, at);
        b.consumer_id = "bob".to_string();
        b.service_id = "svc-a".to_string();
        let mut c = record(404, at);
        c.consumer_id = "alice".to_string();
        c.service_id = "svc-b".to_string();

        let overview = aggregate(&[a, b, c], Timeframe::OneHour, now);
        assert_eq!(overview.summary.total_consumers, 2);
        assert_eq!(overview.summary.total_services, 2);
    }

    #[test]
    fn test_deterministic_for_fixed_now() {
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 1, 30).unwrap();
        let activities = vec![
            record(200, Utc.with_ymd_and_hms(2024, 1, 1, 11, 10, 0).unwrap()),
            record(500, Utc.with_ymd_and_hms(2024, 1, 1, 11, 50, 0).unwrap()),
        ];

        let first = aggregate(&activities, Timeframe::OneHour, now);
        let second = aggregate(&activities, Timeframe::OneHour, now);

        assert_eq!(first.buckets, second.buckets);
        assert_eq!(first.summary, second.summary);
    }
}
