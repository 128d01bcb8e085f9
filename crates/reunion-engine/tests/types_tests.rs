//! Tests for the data model: weight-map parsing, interval arithmetic,
//! window bounds, and snapshot deserialization defaults.

use chrono::{DateTime, Duration, NaiveDate};
use reunion_engine::types::min_attending_interval;
use reunion_engine::{DateWindow, ParticipantPreference, Snapshot};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn weight_overrides_parse_names_and_skip_garbage() {
    let preference = ParticipantPreference {
        id: "p1".into(),
        name: "Ann".into(),
        email_verified: true,
        attending_dates: String::new(),
        preferred_interval_months: 6,
        acceptable_time_range: None,
        min_group_size: 2,
        min_meeting_value: 1,
        weighted_attendants: "Bob:-10, Carol : 3,broken,:-5,Dave:x".into(),
    };
    let overrides = preference.weight_overrides();
    assert_eq!(overrides.get("Bob"), Some(&-10));
    assert_eq!(overrides.get("Carol"), Some(&3));
    assert_eq!(overrides.len(), 2);
}

#[test]
fn min_attending_interval_is_seven_tenths_of_preferred() {
    assert_eq!(min_attending_interval(10), Duration::days(210));
    assert_eq!(min_attending_interval(6), Duration::days(126));
    assert_eq!(min_attending_interval(0), Duration::days(0));
}

#[test]
fn window_rejects_reversed_bounds() {
    assert!(DateWindow::new(date(2026, 6, 1), date(2026, 5, 1)).is_err());
}

#[test]
fn window_iterates_every_contained_day() {
    let window = DateWindow::new(date(2026, 2, 27), date(2026, 3, 2)).unwrap();
    let days: Vec<NaiveDate> = window.iter().collect();
    assert_eq!(days.len(), 4);
    assert_eq!(days.first(), Some(&date(2026, 2, 27)));
    assert_eq!(days.last(), Some(&date(2026, 3, 2)));
}

#[test]
fn snapshot_deserializes_with_field_defaults() {
    let json = r#"{
        "preferences": [
            {"id": "a", "name": "Ann", "preferred_interval_months": 6}
        ]
    }"#;
    let snapshot: Snapshot = serde_json::from_str(json).unwrap();
    let preference = &snapshot.preferences[0];
    assert!(!preference.email_verified);
    assert_eq!(preference.min_group_size, 2);
    assert_eq!(preference.min_meeting_value, 1);
    assert!(preference.attending_dates.is_empty());
    assert!(snapshot.histories.is_empty());
}

#[test]
fn missing_history_defaults_to_the_epoch_sentinel() {
    let snapshot = Snapshot {
        preferences: vec![],
        histories: vec![],
    };
    let history = snapshot.history_for("ghost");
    assert_eq!(history.last_confirmed, DateTime::UNIX_EPOCH);
    assert_eq!(history.last_invited, DateTime::UNIX_EPOCH);
}
