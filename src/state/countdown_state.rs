//! Countdown record, engine state and the date input contract

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Title shown while no countdown is configured
pub const DEFAULT_TITLE: &str = "Countdown";
/// Title shown once the target has passed
pub const FINISHED_TITLE: &str = "Countdown Complete 🎊";

/// Lifecycle of the single countdown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineState {
    #[default]
    Configuring,
    Running,
    Finished,
}

/// The persisted description of the active countdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownRecord {
    pub name: String,
    /// Date string as entered, echoed back in the completion message
    pub date: String,
}

impl CountdownRecord {
    pub fn new(name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            date: date.into(),
        }
    }

    /// Build a record from form input, rejecting empty or unparsable fields
    pub fn from_form(name: &str, date: &str) -> Result<(Self, DateTime<Utc>), ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if date.trim().is_empty() {
            return Err(ValidationError::MissingField("date"));
        }
        let target = parse_target_date(date)?;
        Ok((Self::new(name, date), target))
    }

    /// Absolute instant the countdown runs to
    pub fn target_instant(&self) -> Result<DateTime<Utc>, ValidationError> {
        parse_target_date(&self.date)
    }

    /// Text shown on the finish panel
    pub fn completion_message(&self) -> String {
        format!("{} finished on {}", self.name, self.date)
    }
}

/// Parse a target date the way a browser date input would be read.
///
/// Accepts `YYYY-MM-DD` (midnight UTC), `YYYY-MM-DDTHH:MM[:SS]` (UTC) and
/// RFC 3339 timestamps with an explicit offset.
pub fn parse_target_date(input: &str) -> Result<DateTime<Utc>, ValidationError> {
    let s = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(naive.and_utc());
        }
    }
    if let Some(midnight) = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(ValidationError::InvalidDate(input.to_string()))
}

/// Earliest selectable date for the date input, as `YYYY-MM-DD`
pub fn form_min_date(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%d").to_string()
}
