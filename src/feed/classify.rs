//! Upcoming/past partitioning of feed records.

use chrono::{DateTime, Utc};

use super::client::FeedError;
use super::types::{EventRecord, FeedPayload};

/// Records split around a single reference instant, each side in display
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Classification {
    /// Ascending by start time.
    pub upcoming: Vec<EventRecord>,
    /// Descending by start time.
    pub past: Vec<EventRecord>,
}

/// Successful result of one render cycle's fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedOutcome {
    Events(Classification),
    /// The feed did not report success or carried no data section.
    EmptyFeed,
}

/// Parses a response body. Valid JSON that is not an object is treated like
/// a payload without `success`.
pub fn parse_payload(body: &str) -> Result<FeedPayload, FeedError> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if !value.is_object() {
        return Ok(FeedPayload::default());
    }
    Ok(serde_json::from_value(value)?)
}

/// Partitions the payload around `now`.
///
/// An event whose end equals `now` is still upcoming. When past events are
/// enabled and the feed carries no explicit past list, the past side is the
/// complement of the upcoming side. Sorting is stable, so events with equal
/// start times keep feed order.
pub fn classify(payload: FeedPayload, now: DateTime<Utc>, enable_past: bool) -> FeedOutcome {
    let data = match (payload.success, payload.data) {
        (Some(true), Some(data)) => data,
        _ => return FeedOutcome::EmptyFeed,
    };

    let source = data.upcoming_events.unwrap_or_default();
    let (mut upcoming, derived_past): (Vec<_>, Vec<_>) =
        source.into_iter().partition(|event| event.end_date_time >= now);

    let mut past = match (enable_past, data.past_events) {
        (false, _) => Vec::new(),
        (true, Some(explicit)) => explicit,
        (true, None) => derived_past,
    };

    upcoming.sort_by_key(|event| event.start_date_time);
    past.sort_by(|a, b| b.start_date_time.cmp(&a.start_date_time));

    FeedOutcome::Events(Classification { upcoming, past })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::types::FeedData;
    use chrono::{Duration, TimeZone};
    use pretty_assertions::assert_eq;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap()
    }

    fn event(slug: &str, start_h: i64, end_h: i64) -> EventRecord {
        EventRecord {
            event_name: slug.to_uppercase(),
            start_date_time: t0() + Duration::hours(start_h),
            end_date_time: t0() + Duration::hours(end_h),
            venue_name: "Sway".to_string(),
            venue_location: "Austin".to_string(),
            slug: slug.to_string(),
            color: None,
            host_flyer: Vec::new(),
        }
    }

    fn payload(upcoming: Option<Vec<EventRecord>>, past: Option<Vec<EventRecord>>) -> FeedPayload {
        FeedPayload {
            success: Some(true),
            data: Some(FeedData {
                upcoming_events: upcoming,
                past_events: past,
            }),
        }
    }

    fn slugs(events: &[EventRecord]) -> Vec<&str> {
        events.iter().map(|e| e.slug.as_str()).collect()
    }

    fn split(outcome: FeedOutcome) -> Classification {
        match outcome {
            FeedOutcome::Events(c) => c,
            FeedOutcome::EmptyFeed => panic!("expected events"),
        }
    }

    #[test]
    fn test_end_to_end_split() {
        // B ends before it starts; classification only looks at the end.
        let outcome = classify(
            payload(Some(vec![event("a", 1, 2), event("b", -1, -2)]), None),
            t0(),
            true,
        );
        let c = split(outcome);
        assert_eq!(slugs(&c.upcoming), vec!["a"]);
        assert_eq!(slugs(&c.past), vec!["b"]);
    }

    #[test]
    fn test_event_ending_now_is_upcoming() {
        let c = split(classify(payload(Some(vec![event("edge", -3, 0)]), None), t0(), true));
        assert_eq!(slugs(&c.upcoming), vec!["edge"]);
        assert!(c.past.is_empty());
    }

    #[test]
    fn test_derived_partition_is_complete() {
        let records = vec![
            event("a", -5, -4),
            event("b", 2, 3),
            event("c", -1, 1),
            event("d", -9, -8),
            event("e", 0, 0),
        ];
        let c = split(classify(payload(Some(records.clone()), None), t0(), true));

        assert_eq!(c.upcoming.len() + c.past.len(), records.len());
        for record in &records {
            let in_upcoming = c.upcoming.contains(record);
            let in_past = c.past.contains(record);
            assert!(in_upcoming ^ in_past, "{} must be in exactly one set", record.slug);
        }
    }

    #[test]
    fn test_ordering_of_both_partitions() {
        let records = vec![
            event("late", 10, 11),
            event("soon", 1, 2),
            event("mid", 5, 6),
            event("old", -20, -19),
            event("recent", -3, -2),
            event("older", -10, -9),
        ];
        let c = split(classify(payload(Some(records), None), t0(), true));

        assert_eq!(slugs(&c.upcoming), vec!["soon", "mid", "late"]);
        assert_eq!(slugs(&c.past), vec!["recent", "older", "old"]);
        assert!(c
            .upcoming
            .windows(2)
            .all(|w| w[0].start_date_time <= w[1].start_date_time));
        assert!(c.past.windows(2).all(|w| w[0].start_date_time >= w[1].start_date_time));
    }

    #[test]
    fn test_equal_start_times_keep_feed_order() {
        let records = vec![
            event("first", 1, 2),
            event("second", 1, 3),
            event("p1", -4, -1),
            event("p2", -4, -2),
        ];
        let c = split(classify(payload(Some(records), None), t0(), true));
        assert_eq!(slugs(&c.upcoming), vec!["first", "second"]);
        assert_eq!(slugs(&c.past), vec!["p1", "p2"]);
    }

    #[test]
    fn test_explicit_past_list_preferred() {
        let c = split(classify(
            payload(
                Some(vec![event("up", 1, 2), event("stale", -3, -2)]),
                Some(vec![event("x", -30, -29), event("y", -5, -4)]),
            ),
            t0(),
            true,
        ));
        assert_eq!(slugs(&c.upcoming), vec!["up"]);
        assert_eq!(slugs(&c.past), vec!["y", "x"]);
    }

    #[test]
    fn test_past_disabled_yields_no_past_events() {
        let c = split(classify(
            payload(Some(vec![event("up", 1, 2), event("old", -3, -2)]), Some(vec![event("x", -9, -8)])),
            t0(),
            false,
        ));
        assert_eq!(slugs(&c.upcoming), vec!["up"]);
        assert!(c.past.is_empty());
    }

    #[test]
    fn test_unsuccessful_or_missing_data_is_empty_feed() {
        let failed = FeedPayload {
            success: Some(false),
            data: Some(FeedData::default()),
        };
        assert_eq!(classify(failed, t0(), true), FeedOutcome::EmptyFeed);

        let no_data = FeedPayload {
            success: Some(true),
            data: None,
        };
        assert_eq!(classify(no_data, t0(), true), FeedOutcome::EmptyFeed);
        assert_eq!(classify(FeedPayload::default(), t0(), true), FeedOutcome::EmptyFeed);
    }

    #[test]
    fn test_well_formed_empty_data_is_not_empty_feed() {
        let outcome = classify(payload(None, None), t0(), true);
        assert_eq!(outcome, FeedOutcome::Events(Classification::default()));
    }

    #[test]
    fn test_parse_payload() {
        assert!(matches!(parse_payload("{not json"), Err(FeedError::Parse(_))));
        assert_eq!(parse_payload("[]").unwrap(), FeedPayload::default());
        assert_eq!(
            parse_payload(r#"{"success": false}"#).unwrap().success,
            Some(false)
        );
        let body = r#"{"success": true, "data": {"upcomingEvents": [{"startDateTime": "x"}]}}"#;
        let data = parse_payload(body).unwrap().data.unwrap();
        assert_eq!(data.upcoming_events, Some(Vec::new()));
        assert!(matches!(
            parse_payload(r#"{"success": true, "data": {"upcomingEvents": "soon"}}"#),
            Err(FeedError::Parse(_))
        ));
    }

    #[test]
    fn test_bad_record_does_not_hide_good_ones() {
        let body = r#"{
            "success": true,
            "data": {
                "upcomingEvents": [
                    {"slug": "tba", "startDateTime": "TBA", "endDateTime": "TBA"},
                    {"slug": "good", "startDateTime": "2024-06-01T20:00:00Z", "endDateTime": "2024-06-01T23:00:00Z"},
                    {"slug": "no-end", "startDateTime": "2024-06-01T21:00:00Z"}
                ],
                "pastEvents": [
                    {"slug": "old", "startDateTime": "2024-05-01T13:00:00Z", "endDateTime": "2024-05-01T15:00:00Z"},
                    {"slug": "broken", "startDateTime": 12.5, "endDateTime": null}
                ]
            }
        }"#;

        let payload = parse_payload(body).unwrap();
        let FeedOutcome::Events(c) = classify(payload, t0(), true) else {
            panic!("expected events");
        };
        assert_eq!(slugs(&c.upcoming), vec!["good"]);
        assert_eq!(slugs(&c.past), vec!["old"]);
    }
}
