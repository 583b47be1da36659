//! Task data model

use chrono::{Local, NaiveDate};
use std::fmt;

use crate::error::{Error, Result};

/// Task priority, ordered from least to most urgent.
///
/// Stores persist the ordinal (`Low = 0`), never the name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Priority {
    #[default]
    Low,
    Medium,
    High,
}

impl Priority {
    /// Parse priority from text, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" | "med" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// The ordinal used at store boundaries.
    pub fn ordinal(&self) -> u8 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Reverse of [`ordinal`](Self::ordinal).
    pub fn from_ordinal(n: u8) -> Result<Self> {
        match n {
            0 => Ok(Self::Low),
            1 => Ok(Self::Medium),
            2 => Ok(Self::High),
            _ => Err(Error::Validation(format!(
                "priority ordinal {} out of range",
                n
            ))),
        }
    }

    /// Get the display name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A single to-do item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Assigned by an id-capable store; `None` for in-memory and file-backed tasks.
    pub id: Option<i64>,

    /// Free-text description
    pub description: String,

    /// Priority level
    pub priority: Priority,

    /// Due date (calendar date, no time component)
    pub due: NaiveDate,

    /// Whether the task is done
    pub complete: bool,

    /// Set when the task is marked complete, `None` otherwise
    pub completed_date: Option<NaiveDate>,
}

impl Task {
    /// Create a new, incomplete task.
    pub fn new(description: impl Into<String>, priority: Priority, due: NaiveDate) -> Self {
        Self {
            id: None,
            description: description.into(),
            priority,
            due,
            complete: false,
            completed_date: None,
        }
    }

    /// Mark the task as done, stamping today's date.
    ///
    /// Calling this on an already-complete task moves `completed_date`
    /// forward to the current day. Inherited quirk; callers that care
    /// should check `complete` first.
    pub fn mark_complete(&mut self) {
        self.complete = true;
        self.completed_date = Some(Local::now().date_naive());
    }

    /// Check if the task is overdue
    pub fn is_overdue(&self) -> bool {
        !self.complete && self.due < Local::now().date_naive()
    }

    /// Whether `other` names the same task for removal purposes: matching
    /// ids when both carry one, structural equality otherwise.
    pub fn matches(&self, other: &Task) -> bool {
        match (self.id, other.id) {
            (Some(a), Some(b)) => a == b,
            _ => self == other,
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} ({})", self.due, self.description, self.priority)?;

        if self.complete {
            if let Some(date) = &self.completed_date {
                write!(f, " completed {}", date)?;
            }
        }

        Ok(())
    }
}
