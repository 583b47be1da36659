//! Task tracking core
//!
//! One task model shared by every persistence format:
//! - `Task` / `Priority` value types and completion handling
//! - `TaskRecord`, the flat field set all stores serialize
//! - `TaskList`, the ordered collection with save/load entry points

pub mod list;
pub mod model;
pub mod record;

pub use list::TaskList;
pub use model::{Priority, Task};
pub use record::{format_iso_date, parse_iso_date, TaskRecord};
