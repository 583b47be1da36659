//! Flat, store-agnostic record representation of a task.
//!
//! Every persistence format maps through [`TaskRecord`], so field order,
//! priority ordinals, and ISO-8601 date handling live in exactly one place.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::model::{Priority, Task};
use crate::error::{Error, Result};

/// ISO-8601 calendar date, e.g. `2024-01-10`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO-8601 date string.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|_| Error::Format(format!("not an ISO-8601 date: {:?}", s)))
}

/// Format a date as ISO-8601.
pub fn format_iso_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// The flat field set shared by all store formats.
///
/// `id` is deliberately absent: only the relational store assigns ids,
/// and it carries them outside the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    pub description: String,
    pub priority: u8,
    pub due: String,
    pub complete: bool,
    #[serde(rename = "completedDate")]
    pub completed_date: Option<String>,
}

impl Task {
    /// Map to the flat record used by every store format.
    pub fn to_record(&self) -> TaskRecord {
        TaskRecord {
            description: self.description.clone(),
            priority: self.priority.ordinal(),
            due: format_iso_date(&self.due),
            complete: self.complete,
            completed_date: self.completed_date.as_ref().map(format_iso_date),
        }
    }

    /// Rebuild a task from its flat record.
    ///
    /// Fails with [`Error::Format`] on a malformed date and
    /// [`Error::Validation`] on an out-of-range priority ordinal.
    pub fn from_record(record: &TaskRecord) -> Result<Self> {
        let priority = Priority::from_ordinal(record.priority)?;
        let due = parse_iso_date(&record.due)?;

        let completed_date = match &record.completed_date {
            Some(s) => Some(parse_iso_date(s)?),
            None => None,
        };

        let completed_date = if record.complete {
            if completed_date.is_none() {
                return Err(Error::Format(format!(
                    "task {:?} is complete but has no completion date",
                    record.description
                )));
            }
            completed_date
        } else {
            if completed_date.is_some() {
                warn!(
                    description = %record.description,
                    "dropping completion date on incomplete task"
                );
            }
            None
        };

        Ok(Self {
            id: None,
            description: record.description.clone(),
            priority,
            due,
            complete: record.complete,
            completed_date,
        })
    }
}
