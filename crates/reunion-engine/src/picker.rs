//! Greedy meeting selection over the sanitized candidate map.
//!
//! Repeatedly commits the strongest remaining date and propagates each
//! committed participant's exclusion window to the rest of the map, until no
//! candidate date survives sanitization.

use rand::Rng;

use crate::candidates::CandidateMap;
use crate::sanitize::sanitize_date;
use crate::types::{
    min_attending_interval, AttendanceHistory, ParticipantPreference, ScheduleResult,
    ScheduledMeeting,
};

/// Drain the candidate map into an ordered list of committed meetings.
///
/// Each round sanitizes every date to its fixed point, commits the date with
/// the most candidates (ties resolve to the earliest date — the map iterates
/// in date order), and removes every committed participant from all dates
/// strictly inside their exclusion window. Output is insertion-ordered, so
/// the best-attended meetings come first.
pub fn pick_meetings<R: Rng>(
    mut map: CandidateMap,
    preferences: &[ParticipantPreference],
    histories: &[AttendanceHistory],
    rng: &mut R,
) -> ScheduleResult {
    let mut result = ScheduleResult::default();

    while !map.is_empty() {
        let mut sanitized = CandidateMap::new();
        for (date, mut candidates) in std::mem::take(&mut map) {
            sanitize_date(&mut candidates, preferences, histories, date, rng);
            if !candidates.is_empty() {
                sanitized.insert(date, candidates);
            }
        }
        map = sanitized;

        let mut best: Option<(chrono::NaiveDate, usize)> = None;
        for (&date, candidates) in &map {
            // Strict comparison keeps the earliest date on ties.
            if best.is_none_or(|(_, best_len)| candidates.len() > best_len) {
                best = Some((date, candidates.len()));
            }
        }
        let Some((picked_date, _)) = best else {
            break;
        };
        let committed = map.remove(&picked_date).unwrap_or_default();
        if committed.is_empty() {
            continue;
        }

        // A committed participant cannot be picked again for any date
        // strictly inside [date - interval, date + interval].
        for &participant in &committed {
            let interval =
                min_attending_interval(preferences[participant].preferred_interval_months);
            let exclusion_start = picked_date - interval;
            let exclusion_end = picked_date + interval;
            for (&other_date, candidates) in map.iter_mut() {
                if exclusion_start < other_date && other_date < exclusion_end {
                    candidates.retain(|&c| c != participant);
                }
            }
        }
        map.retain(|_, candidates| !candidates.is_empty());

        result.meetings.push(ScheduledMeeting {
            date: picked_date,
            participant_ids: committed
                .iter()
                .map(|&c| preferences[c].id.clone())
                .collect(),
        });
    }

    result
}
