//! Whole-collection JSON document store.
//!
//! A top-level array; each element a field map with keys
//! `description, priority, due, complete, completedDate`.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::TaskStore;
use crate::error::{Error, Result};
use crate::task::{Task, TaskRecord};

pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStore for JsonStore {
    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
        let content =
            serde_json::to_string_pretty(&records).map_err(|e| Error::Format(e.to_string()))?;

        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote JSON store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<TaskRecord> =
            serde_json::from_str(&content).map_err(|e| Error::Format(e.to_string()))?;
        debug!(path = %self.path.display(), count = records.len(), "read JSON store");

        records.iter().map(Task::from_record).collect()
    }
}
