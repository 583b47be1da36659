//! Binary store: postcard encoding of the record sequence.
//!
//! Compact, length-prefixed, not intended to be hand-edited. Anything that
//! fails to decode is treated as corrupt.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::TaskStore;
use crate::error::{Error, Result};
use crate::task::{Task, TaskRecord};

pub struct BinaryStore {
    path: PathBuf,
}

impl BinaryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStore for BinaryStore {
    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let records: Vec<TaskRecord> = tasks.iter().map(Task::to_record).collect();
        let bytes = postcard::to_allocvec(&records).map_err(|e| Error::Format(e.to_string()))?;

        fs::write(&self.path, bytes)?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote binary store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let bytes = fs::read(&self.path)?;
        if bytes.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<TaskRecord> =
            postcard::from_bytes(&bytes).map_err(|e| Error::Format(e.to_string()))?;
        debug!(path = %self.path.display(), count = records.len(), "read binary store");

        records.iter().map(Task::from_record).collect()
    }
}
