//! Relational store backed by SQLite.
//!
//! Rows carry an autoincrement identity column, so this is the one store
//! that assigns `Task::id` and supports per-row updates.

use std::path::Path;

use chrono::NaiveDate;
use rusqlite::{params, Connection, Row};
use tracing::debug;

use super::{IdentityStore, TaskStore};
use crate::error::{Error, Result};
use crate::task::{format_iso_date, Task, TaskRecord};

const SCHEMA: &str = "\
CREATE TABLE IF NOT EXISTS task (
    id             INTEGER PRIMARY KEY AUTOINCREMENT,
    description    TEXT NOT NULL,
    priority       INTEGER NOT NULL,
    due_date       TEXT NOT NULL,
    complete       INTEGER NOT NULL DEFAULT 0,
    completed_date TEXT
);
";

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the database file and apply the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;
        conn.execute_batch(SCHEMA)?;
        debug!(path = %path.as_ref().display(), "opened sqlite store");
        Ok(Self { conn })
    }

    /// In-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn })
    }

    /// Insert a single task and assign it the new row id.
    pub fn insert(&self, task: &mut Task) -> Result<()> {
        let record = task.to_record();
        self.conn.execute(
            "INSERT INTO task (description, priority, due_date, complete, completed_date) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.description,
                record.priority,
                record.due,
                record.complete,
                record.completed_date,
            ],
        )?;

        task.id = Some(self.conn.last_insert_rowid());
        Ok(())
    }
}

fn row_to_task(row: &Row<'_>) -> rusqlite::Result<(i64, TaskRecord)> {
    let record = TaskRecord {
        description: row.get("description")?,
        priority: row.get("priority")?,
        due: row.get("due_date")?,
        complete: row.get("complete")?,
        completed_date: row.get("completed_date")?,
    };
    Ok((row.get("id")?, record))
}

impl TaskStore for SqliteStore {
    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        self.conn.execute("DELETE FROM task", [])?;

        for task in tasks {
            let record = task.to_record();
            // Fresh autoincrement ids follow insertion order, so read_all's
            // ORDER BY id reproduces the list sequence even after reordering.
            // Previously loaded ids go stale; reload to pick up the new ones.
            self.conn.execute(
                "INSERT INTO task (description, priority, due_date, complete, completed_date) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.description,
                    record.priority,
                    record.due,
                    record.complete,
                    record.completed_date,
                ],
            )?;
        }

        debug!(count = tasks.len(), "wrote sqlite store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, description, priority, due_date, complete, completed_date \
             FROM task ORDER BY id",
        )?;
        let rows = stmt.query_map([], row_to_task)?;

        let mut tasks = Vec::new();
        for row in rows {
            let (id, record) = row?;
            let mut task = Task::from_record(&record)?;
            task.id = Some(id);
            tasks.push(task);
        }

        debug!(count = tasks.len(), "read sqlite store");
        Ok(tasks)
    }
}

impl IdentityStore for SqliteStore {
    fn delete_by_id(&self, id: i64) -> Result<()> {
        let affected = self
            .conn
            .execute("DELETE FROM task WHERE id = ?1", params![id])?;
        if affected == 0 {
            return Err(Error::NotFound(format!("no task row with id {}", id)));
        }
        Ok(())
    }

    fn update_complete_by_id(&self, id: i64, completed_date: NaiveDate) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE task SET complete = 1, completed_date = ?2 WHERE id = ?1",
            params![id, format_iso_date(&completed_date)],
        )?;
        if affected == 0 {
            return Err(Error::NotFound(format!("no task row with id {}", id)));
        }
        Ok(())
    }
}
