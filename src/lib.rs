//! Taskpad library - personal task tracking with pluggable persistence
//!
//! One `Task`/`TaskList` data model, five interchangeable store formats
//! (delimited text, JSON, binary, SQLite, XML). Front ends drive the list
//! through `TaskList` and pick a store at save/load time.

pub mod error;
pub mod store;
pub mod task;

pub use error::{Error, Result};
pub use store::{
    BinaryStore, DelimitedStore, IdentityStore, JsonStore, SqliteStore, TaskStore, XmlStore,
};
pub use task::{Priority, Task, TaskList, TaskRecord};
