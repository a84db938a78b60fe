use std::cmp::Reverse;

use chrono::{DateTime, Utc};

use crate::models::{ChannelRecord, ResultRow};

/// Keep channels created at or after `cutoff`, most subscribers first.
///
/// Records without a creation date never survive. Ties keep input order.
pub fn rank_new_channels(records: Vec<ChannelRecord>, cutoff: DateTime<Utc>) -> Vec<ResultRow> {
    let mut rows: Vec<ResultRow> = records
        .into_iter()
        .filter_map(|record| {
            let created_at = record.created_at?;
            Some(ResultRow {
                is_new: created_at >= cutoff,
                record,
            })
        })
        .filter(|row| row.is_new)
        .collect();

    // sort_by_key is stable
    rows.sort_by_key(|row| Reverse(row.record.subscriber_count));
    rows
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, FixedOffset, TimeZone};

    use super::*;

    fn record(id: &str, created_at: Option<DateTime<Utc>>, subscribers: u64) -> ChannelRecord {
        ChannelRecord {
            id: id.to_string(),
            name: id.to_string(),
            description: String::new(),
            created_at: created_at.map(|t| t.fixed_offset()),
            subscriber_count: subscribers,
            view_count: 0,
            video_count: 0,
            hidden_subscriber_count: false,
        }
    }

    fn ids(rows: &[ResultRow]) -> Vec<&str> {
        rows.iter().map(|r| r.record.id.as_str()).collect()
    }

    #[test]
    fn keeps_recent_channels_ordered_by_subscribers() {
        let now = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let cutoff = now - Duration::days(30);
        let records = vec![
            record("A", Some(now - Duration::days(10)), 1000),
            record("B", Some(now - Duration::days(60)), 5000),
            record("C", Some(now - Duration::days(5)), 50),
        ];

        let rows = rank_new_channels(records, cutoff);
        assert_eq!(ids(&rows), ["A", "C"]);
        assert!(rows.iter().all(|r| r.is_new));
    }

    #[test]
    fn cutoff_is_inclusive() {
        let cutoff = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let records = vec![
            record("at", Some(cutoff), 1),
            record("before", Some(cutoff - Duration::seconds(1)), 1),
        ];
        assert_eq!(ids(&rank_new_channels(records, cutoff)), ["at"]);
    }

    #[test]
    fn compares_across_offsets() {
        let cutoff = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        // 2025-06-01T08:30 at +09:00 is 2025-05-31T23:30Z
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        let mut early = record("early", None, 1);
        early.created_at = Some(tokyo.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap());
        let mut late = record("late", None, 1);
        late.created_at = Some(tokyo.with_ymd_and_hms(2025, 6, 1, 9, 30, 0).unwrap());

        assert_eq!(ids(&rank_new_channels(vec![early, late], cutoff)), ["late"]);
    }

    #[test]
    fn drops_records_without_creation_date() {
        let cutoff = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let rows = rank_new_channels(vec![record("none", None, 10_000)], cutoff);
        assert!(rows.is_empty());
    }

    #[test]
    fn equal_counts_keep_input_order() {
        let cutoff = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
        let created = Some(cutoff + Duration::days(1));
        let records = vec![
            record("x", created, 5),
            record("y", created, 7),
            record("z", created, 5),
            record("w", created, 5),
        ];
        assert_eq!(ids(&rank_new_channels(records, cutoff)), ["y", "x", "z", "w"]);
    }
}
