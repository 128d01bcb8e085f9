//! Availability-rule expansion — converts a preference's encoded attending
//! rules into concrete candidate dates within a scheduling window.
//!
//! Each comma-separated entry is either a holiday rule
//! (`<Country>:<HolidayName>`) or a custom date-range rule
//! (`<MM/DD/YYYY> - <MM/DD/YYYY>:<repeat kind>`). Malformed entries are
//! skipped silently; the engine degrades to fewer dates, never to an error.

use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::holidays::HolidayCalendar;
use crate::types::{DateWindow, ParticipantPreference};

/// Marker prefix for "every holiday of this country" selections, as emitted
/// by the registration form.
const SELECT_ALL_PREFIX: &str = "Select All ";

/// Repeat behavior of a custom date-range rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepeatKind {
    Yearly,
    Monthly,
    Weekly,
    None,
}

impl FromStr for RepeatKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "yearly" => Ok(Self::Yearly),
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "none" => Ok(Self::None),
            _ => Err(()),
        }
    }
}

/// Outcome of expanding a single rule entry.
enum Expansion {
    Dates(Vec<NaiveDate>),
    /// The rule covers the entire window; resolution short-circuits.
    AllDates,
}

/// Expand a participant's availability rules into the set of window dates
/// they can attend.
///
/// Rules are unioned, so the result does not depend on their order. A rule
/// that degenerates to "every date" (a repeating range wider than its
/// period) makes the whole resolution return the full window.
pub fn resolve_available_dates(
    preference: &ParticipantPreference,
    calendar: &HolidayCalendar,
    window: DateWindow,
) -> BTreeSet<NaiveDate> {
    let mut available = BTreeSet::new();
    for rule in preference.attending_dates.split(',') {
        let parts: Vec<&str> = rule.split(':').collect();
        let &[body, kind] = parts.as_slice() else {
            continue;
        };
        // A holiday lookup that matches nothing falls through to the custom
        // date-range interpretation of the same entry.
        let expansion = expand_holiday_rule(body, kind, calendar, window)
            .or_else(|| expand_custom_rule(body, kind, window));
        match expansion {
            Some(Expansion::AllDates) => return window.iter().collect(),
            Some(Expansion::Dates(dates)) => available.extend(dates),
            None => {}
        }
    }
    available
}

/// Holiday rule: `<Country>:<HolidayName>`, underscores in the country name
/// standing in for spaces. Every year overlapping the window is consulted.
fn expand_holiday_rule(
    body: &str,
    holiday: &str,
    calendar: &HolidayCalendar,
    window: DateWindow,
) -> Option<Expansion> {
    let country = body.replace('_', " ");
    let mut dates: Vec<NaiveDate> = Vec::new();
    for year in window.years() {
        let Some(holidays) = calendar.holidays(&country, year) else {
            continue;
        };
        if holiday.starts_with(SELECT_ALL_PREFIX) {
            for holiday_dates in holidays.values() {
                dates.extend(holiday_dates.iter().copied());
            }
        } else if let Some(holiday_dates) = holidays.get(holiday) {
            dates.extend(holiday_dates.iter().copied());
        }
    }

    let mut expanded = BTreeSet::new();
    for date in dates {
        expanded.insert(date);
        expanded.extend(near_weekend_dates(date));
    }
    let clipped: Vec<NaiveDate> = expanded
        .into_iter()
        .filter(|d| window.contains(*d))
        .collect();
    if clipped.is_empty() {
        None
    } else {
        Some(Expansion::Dates(clipped))
    }
}

/// Weekend days adjacent to a holiday: a Monday holiday pulls in the
/// preceding weekend, a Friday the following one, and a weekend holiday its
/// other weekend day. Midweek holidays contribute nothing extra.
fn near_weekend_dates(date: NaiveDate) -> Vec<NaiveDate> {
    match date.weekday() {
        Weekday::Mon => vec![date - Duration::days(1), date - Duration::days(2)],
        Weekday::Fri => vec![date + Duration::days(1), date + Duration::days(2)],
        Weekday::Sat => vec![date + Duration::days(1)],
        Weekday::Sun => vec![date - Duration::days(1)],
        _ => vec![],
    }
}

/// How a custom rule decides whether a window date matches.
enum Matcher {
    MonthDay(BTreeSet<(u32, u32)>),
    DayOfMonth(BTreeSet<u32>),
    Weekday(BTreeSet<u32>),
    /// Exclusive on both ends; longstanding behavior of one-time ranges.
    Between(NaiveDate, NaiveDate),
}

impl Matcher {
    fn matches(&self, date: NaiveDate) -> bool {
        match self {
            Self::MonthDay(keys) => keys.contains(&(date.month(), date.day())),
            Self::DayOfMonth(keys) => keys.contains(&date.day()),
            Self::Weekday(keys) => keys.contains(&date.weekday().num_days_from_monday()),
            Self::Between(start, end) => *start < date && date < *end,
        }
    }
}

/// Custom rule: `<MM/DD/YYYY> - <MM/DD/YYYY>:<RepeatKind>`.
///
/// A repeating range wider than its period already covers every possible
/// key, so it degenerates to the match-everything sentinel.
fn expand_custom_rule(body: &str, kind: &str, window: DateWindow) -> Option<Expansion> {
    let kind: RepeatKind = kind.parse().ok()?;
    let (raw_start, raw_end) = body.split_once(" - ")?;
    let range_start = NaiveDate::parse_from_str(raw_start.trim(), "%m/%d/%Y").ok()?;
    let range_end = NaiveDate::parse_from_str(raw_end.trim(), "%m/%d/%Y").ok()?;
    let span = range_end - range_start;

    let matcher = match kind {
        RepeatKind::Yearly => {
            // A 365-day selection misses Feb 29; that matches how the range
            // was entered, one concrete day at a time.
            if span > Duration::days(365) {
                return Some(Expansion::AllDates);
            }
            Matcher::MonthDay(
                days_in_range(range_start, range_end)
                    .map(|d| (d.month(), d.day()))
                    .collect(),
            )
        }
        RepeatKind::Monthly => {
            // Whole-February selections never match day 30 or 31.
            if span > Duration::days(30) {
                return Some(Expansion::AllDates);
            }
            Matcher::DayOfMonth(days_in_range(range_start, range_end).map(|d| d.day()).collect())
        }
        RepeatKind::Weekly => {
            if span > Duration::days(6) {
                return Some(Expansion::AllDates);
            }
            Matcher::Weekday(
                days_in_range(range_start, range_end)
                    .map(|d| d.weekday().num_days_from_monday())
                    .collect(),
            )
        }
        RepeatKind::None => Matcher::Between(range_start, range_end),
    };

    let dates: Vec<NaiveDate> = window.iter().filter(|d| matcher.matches(*d)).collect();
    Some(Expansion::Dates(dates))
}

fn days_in_range(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}
