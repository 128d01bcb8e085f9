//! Error types for the scheduling engine.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid scheduling window: start {start} is after end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}

pub type Result<T> = std::result::Result<T, EngineError>;
