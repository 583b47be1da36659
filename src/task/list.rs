//! Ordered task collection and its persistence entry points.

use tracing::debug;

use super::model::Task;
use crate::error::{Error, Result};
use crate::store::{IdentityStore, TaskStore};

/// An ordered collection of tasks. Insertion order defines display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    /// Create an empty list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task to the end of the list.
    pub fn add_task(&mut self, task: Task) {
        self.tasks.push(task);
    }

    /// Remove the first task matching `task` (by id when both carry one,
    /// structurally otherwise) and return it.
    pub fn delete_task(&mut self, task: &Task) -> Result<Task> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.matches(task))
            .ok_or_else(|| Error::NotFound(task.description.clone()))?;
        Ok(self.tasks.remove(pos))
    }

    /// Read-only view of the full ordered sequence.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by position.
    pub fn get(&self, index: usize) -> Result<&Task> {
        let len = self.tasks.len();
        self.tasks
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Get a task by position, mutably.
    pub fn get_mut(&mut self, index: usize) -> Result<&mut Task> {
        let len = self.tasks.len();
        self.tasks
            .get_mut(index)
            .ok_or(Error::IndexOutOfRange { index, len })
    }

    /// Mark the task at `index` complete, in memory only.
    pub fn mark_complete(&mut self, index: usize) -> Result<()> {
        self.get_mut(index)?.mark_complete();
        Ok(())
    }

    /// Mark the task at `index` complete and persist the single-row update
    /// through an id-capable store. The task must already carry a store id.
    pub fn mark_task_complete<S: IdentityStore>(&mut self, index: usize, store: &S) -> Result<()> {
        let task = self.get_mut(index)?;
        task.mark_complete();

        let id = task.id.ok_or_else(|| {
            Error::Validation(format!("task {:?} has no store id", task.description))
        })?;
        let date = task.completed_date.ok_or_else(|| {
            Error::Validation(format!("task {:?} has no completion date", task.description))
        })?;

        store.update_complete_by_id(id, date)
    }

    /// Serialize the whole list, replacing whatever the store held before.
    pub fn save<S: TaskStore + ?Sized>(&self, store: &S) -> Result<()> {
        debug!(count = self.tasks.len(), "saving task list");
        store.write_all(&self.tasks)
    }

    /// Build a fresh list from a store. Always constructs a new list rather
    /// than appending, so repeated loads are reproducible.
    pub fn load<S: TaskStore + ?Sized>(store: &S) -> Result<Self> {
        let tasks = store.read_all()?;
        debug!(count = tasks.len(), "loaded task list");
        Ok(Self { tasks })
    }
}
