//! Core data model: participant preferences, attendance history, the
//! snapshot fed into one scheduling run, and the schedule output.
//!
//! The engine reads an immutable snapshot and produces a [`ScheduleResult`];
//! persistence, form validation, and notification belong to the surrounding
//! system.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Invite no sooner than 0.7 of the preferred interval — someone who prefers
/// to attend every 10 months is considered again after 7.
pub const MIN_INTERVAL_TO_PREFERRED_RATIO: f64 = 0.7;

/// Minimal spacing between two meetings for the same participant, derived
/// from their preferred re-attendance interval.
pub fn min_attending_interval(preferred_months: u32) -> Duration {
    let days = f64::from(preferred_months) * 30.0 * MIN_INTERVAL_TO_PREFERRED_RATIO;
    Duration::days(days as i64)
}

/// One registered attendee's preferences within a meeting group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticipantPreference {
    /// Registered attendant code; unique across the group.
    pub id: String,
    /// Display name; unique within the group. Weight maps refer to it.
    pub name: String,
    /// Only participants with a verified email are scheduled.
    #[serde(default)]
    pub email_verified: bool,
    /// Raw comma-separated availability rules, e.g.
    /// `"United States:Thanksgiving,12/20/2026 - 12/31/2026:none"`.
    #[serde(default)]
    pub attending_dates: String,
    /// Preferred re-attendance interval in months.
    pub preferred_interval_months: u32,
    /// Earliest/latest acceptable time of day. Carried through untouched;
    /// slot allocation downstream consumes it, the date engine does not.
    #[serde(default)]
    pub acceptable_time_range: Option<String>,
    /// Minimal number of participants (including self) for a meeting to be
    /// worth attending. At least 2.
    #[serde(default = "default_min_group_size")]
    pub min_group_size: u32,
    /// Minimal meeting value for this participant to be included. At least 1.
    #[serde(default = "default_min_meeting_value")]
    pub min_meeting_value: i64,
    /// Raw `name:weight,name:weight,...` overrides toward other attendants.
    /// Anyone not named weighs 1; negative weights are allowed.
    #[serde(default)]
    pub weighted_attendants: String,
}

fn default_min_group_size() -> u32 {
    2
}

fn default_min_meeting_value() -> i64 {
    1
}

impl ParticipantPreference {
    /// Parse the raw weight map. Malformed entries are skipped silently.
    pub fn weight_overrides(&self) -> HashMap<&str, i64> {
        let mut overrides = HashMap::new();
        for entry in self.weighted_attendants.split(',') {
            let Some((name, weight)) = entry.rsplit_once(':') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            if let Ok(weight) = weight.trim().parse::<i64>() {
                overrides.insert(name, weight);
            }
        }
        overrides
    }
}

/// Attendance bookkeeping for one participant. Written by the confirmation
/// and invitation workflows outside the engine; read-only here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceHistory {
    pub participant_id: String,
    /// Last confirmed attendance; the Unix epoch means "never attended".
    #[serde(default = "epoch")]
    pub last_confirmed: DateTime<Utc>,
    /// Last invitation sent; the Unix epoch means "never invited".
    #[serde(default = "epoch")]
    pub last_invited: DateTime<Utc>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

impl AttendanceHistory {
    /// A participant with no record on file: never attended, never invited.
    pub fn never(participant_id: impl Into<String>) -> Self {
        Self {
            participant_id: participant_id.into(),
            last_confirmed: epoch(),
            last_invited: epoch(),
        }
    }
}

/// Consistent point-in-time view of one meeting group's registration data.
///
/// The external loader is responsible for taking this snapshot under
/// whatever locking it uses for slot allocation; the engine itself holds no
/// locks and performs no I/O.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub preferences: Vec<ParticipantPreference>,
    #[serde(default)]
    pub histories: Vec<AttendanceHistory>,
}

impl Snapshot {
    /// History lookup. Participants without a record are treated as never
    /// attended and never invited.
    pub fn history_for(&self, participant_id: &str) -> AttendanceHistory {
        self.histories
            .iter()
            .find(|h| h.participant_id == participant_id)
            .cloned()
            .unwrap_or_else(|| AttendanceHistory::never(participant_id))
    }
}

/// Inclusive calendar-day window for one scheduling run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(EngineError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every day in the window, earliest first.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }

    /// Calendar years overlapping the window.
    pub fn years(&self) -> std::ops::RangeInclusive<i32> {
        self.start.year()..=self.end.year()
    }
}

/// One committed meeting occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledMeeting {
    pub date: NaiveDate,
    /// Finalized participant ids, in candidate order.
    pub participant_ids: Vec<String>,
}

/// Ordered output of one scheduling run. Earlier entries were committed
/// first, i.e. had the larger sanitized candidate pools.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub meetings: Vec<ScheduledMeeting>,
}

impl ScheduleResult {
    pub fn is_empty(&self) -> bool {
        self.meetings.is_empty()
    }
}
