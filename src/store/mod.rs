//! Pluggable persistence formats.
//!
//! One data model, many encodings: every store maps tasks through
//! [`TaskRecord`](crate::task::TaskRecord) and implements [`TaskStore`].
//! The relational store additionally assigns row ids and implements
//! [`IdentityStore`] for per-row updates.

pub mod binary;
pub mod delimited;
pub mod json;
pub mod sqlite;
pub mod xml;

pub use binary::BinaryStore;
pub use delimited::DelimitedStore;
pub use json::JsonStore;
pub use sqlite::SqliteStore;
pub use xml::XmlStore;

use chrono::NaiveDate;

use crate::error::Result;
use crate::task::Task;

/// The format-agnostic persistence contract.
///
/// `write_all` fully overwrites the destination; a failure partway through
/// may leave it partially written. `read_all` fails if the destination is
/// absent, unreadable, or malformed.
pub trait TaskStore {
    /// Serialize the entire ordered sequence, replacing existing content.
    /// Id-assigning stores issue fresh ids in sequence order; ids held from
    /// an earlier read go stale, so reload after saving.
    fn write_all(&self, tasks: &[Task]) -> Result<()>;

    /// Decode the entire ordered sequence.
    fn read_all(&self) -> Result<Vec<Task>>;
}

/// Extra operations for stores that assign ids to rows.
pub trait IdentityStore: TaskStore {
    /// Delete a single row. Fails with `NotFound` if no such id exists.
    fn delete_by_id(&self, id: i64) -> Result<()>;

    /// Persist a single row's completion flag and date.
    fn update_complete_by_id(&self, id: i64, completed_date: NaiveDate) -> Result<()>;
}
