//! Holiday calendar lookup service.
//!
//! The engine never fetches holiday data itself. An external loader fills
//! this table (refreshed at least once per calendar year) and passes it into
//! each scheduling run; unknown countries and holiday names resolve to
//! nothing rather than erroring.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One loaded holiday: a named occurrence set for a country and year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayEntry {
    pub country: String,
    pub year: i32,
    pub name: String,
    pub dates: Vec<NaiveDate>,
}

/// In-memory `(country, year) → {holiday name → dates}` table.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    table: HashMap<(String, i32), HashMap<String, Vec<NaiveDate>>>,
}

impl HolidayCalendar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = HolidayEntry>) -> Self {
        let mut calendar = Self::new();
        for entry in entries {
            calendar.insert(entry.country, entry.year, entry.name, entry.dates);
        }
        calendar
    }

    pub fn insert(
        &mut self,
        country: impl Into<String>,
        year: i32,
        name: impl Into<String>,
        dates: Vec<NaiveDate>,
    ) {
        self.table
            .entry((country.into(), year))
            .or_default()
            .insert(name.into(), dates);
    }

    /// All holidays of a country for one year, or `None` when unknown.
    pub fn holidays(&self, country: &str, year: i32) -> Option<&HashMap<String, Vec<NaiveDate>>> {
        self.table.get(&(country.to_string(), year))
    }

    /// Refresh policy: the loader re-inserts the span it needs and evicts
    /// years that can no longer appear in any scheduling window.
    pub fn evict_years_before(&mut self, year: i32) {
        self.table.retain(|(_, y), _| *y >= year);
    }
}
