//! # reunion-engine
//!
//! Meeting date and participant selection for recurring group reunions.
//!
//! Given a snapshot of participant preference profiles and attendance
//! history, the engine computes future calendar dates paired with finalized
//! participant lists, honoring each participant's availability rules,
//! minimal group size, minimal meeting value, and re-attendance interval.
//! It is a synchronous, single-threaded batch computation: no I/O, no
//! locks, deterministic for a fixed snapshot and seed.
//!
//! ## Quick start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use reunion_engine::{schedule, DateWindow, HolidayCalendar, ParticipantPreference, Snapshot};
//!
//! let preference = |id: &str, name: &str| ParticipantPreference {
//!     id: id.into(),
//!     name: name.into(),
//!     email_verified: true,
//!     attending_dates: "12/01/2026 - 12/31/2026:none".into(),
//!     preferred_interval_months: 6,
//!     acceptable_time_range: None,
//!     min_group_size: 2,
//!     min_meeting_value: 1,
//!     weighted_attendants: String::new(),
//! };
//! let snapshot = Snapshot {
//!     preferences: vec![preference("a", "Alice"), preference("b", "Bob")],
//!     histories: vec![],
//! };
//! let window = DateWindow::new(
//!     NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2026, 12, 31).unwrap(),
//! )
//! .unwrap();
//!
//! let result = schedule(&snapshot, &HolidayCalendar::new(), window, 0);
//! assert_eq!(result.meetings.len(), 1);
//! assert_eq!(result.meetings[0].participant_ids, vec!["a", "b"]);
//! ```
//!
//! ## Modules
//!
//! - [`rules`] — availability-rule string → concrete candidate dates
//! - [`holidays`] — `(country, year)` holiday lookup service
//! - [`candidates`] — per-date candidate pools for one run
//! - [`sanitize`] — group-size and meeting-value sanitization with exact
//!   conflict resolution
//! - [`picker`] — greedy date selection with exclusion-window propagation
//! - [`error`] — error types

pub mod candidates;
pub mod error;
pub mod holidays;
pub mod picker;
pub mod rules;
pub mod sanitize;
pub mod types;

pub use candidates::{build_candidate_map, CandidateMap};
pub use error::EngineError;
pub use holidays::{HolidayCalendar, HolidayEntry};
pub use rules::resolve_available_dates;
pub use types::{
    AttendanceHistory, DateWindow, ParticipantPreference, ScheduleResult, ScheduledMeeting,
    Snapshot,
};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Run one full scheduling pass over a snapshot.
///
/// The seed drives only the documented random tie-breaks (ordering of
/// equal negative weights during conflict resolution); the same snapshot
/// and seed always yield the same [`ScheduleResult`]. Infeasible input —
/// malformed rules, unknown holidays, groups that can never meet their
/// thresholds — degrades to smaller or empty results, never to an error.
pub fn schedule(
    snapshot: &Snapshot,
    calendar: &HolidayCalendar,
    window: DateWindow,
    seed: u64,
) -> ScheduleResult {
    let map = build_candidate_map(snapshot, calendar, window);
    let histories: Vec<AttendanceHistory> = snapshot
        .preferences
        .iter()
        .map(|p| snapshot.history_for(&p.id))
        .collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    picker::pick_meetings(map, &snapshot.preferences, &histories, &mut rng)
}
