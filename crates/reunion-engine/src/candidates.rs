//! Candidate map construction — which participants could attend which dates.
//!
//! A pure aggregation over the snapshot: resolve each verified participant's
//! availability, then drop dates earlier than their minimal re-attendance
//! threshold.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::holidays::HolidayCalendar;
use crate::rules::resolve_available_dates;
use crate::types::{min_attending_interval, DateWindow, Snapshot};

/// Per-date candidate pools for one scheduling run.
///
/// Values are indices into the snapshot's preference list. The `BTreeMap`
/// keeps date iteration stable (earliest first), which the picker relies on
/// for its tie-break. Built fresh per run, mutated in place by sanitization
/// and exclusion-window propagation, and discarded at the end.
pub type CandidateMap = BTreeMap<NaiveDate, Vec<usize>>;

/// Aggregate every verified participant's resolved dates into per-date
/// candidate pools.
///
/// A participant becomes a candidate for a date only when it is no earlier
/// than `max(last_confirmed, last_invited)` plus their minimal re-attendance
/// interval.
pub fn build_candidate_map(
    snapshot: &Snapshot,
    calendar: &HolidayCalendar,
    window: DateWindow,
) -> CandidateMap {
    let mut map = CandidateMap::new();
    for (index, preference) in snapshot.preferences.iter().enumerate() {
        if !preference.email_verified {
            continue;
        }
        let history = snapshot.history_for(&preference.id);
        let last_contact = history.last_confirmed.max(history.last_invited);
        let earliest_acceptable = (last_contact
            + min_attending_interval(preference.preferred_interval_months))
        .date_naive();
        for date in resolve_available_dates(preference, calendar, window) {
            if date >= earliest_acceptable {
                map.entry(date).or_default().push(index);
            }
        }
    }
    map
}
