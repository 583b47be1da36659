//! Delimited-record file store.
//!
//! One task per line, fields in fixed column order:
//! `description,priority,due,complete,completed_date`. Fields containing a
//! comma or quote are double-quoted with `""` escapes. The format is strictly
//! line-oriented, so newlines inside a description are flattened to spaces
//! on write.

use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::TaskStore;
use crate::error::{Error, Result};
use crate::task::{Task, TaskRecord};

pub struct DelimitedStore {
    path: PathBuf,
}

impl DelimitedStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn quote_field(field: &str) -> String {
    let flat = if field.contains(['\n', '\r']) {
        field.replace(['\n', '\r'], " ")
    } else {
        field.to_string()
    };

    if flat.contains([',', '"']) {
        format!("\"{}\"", flat.replace('"', "\"\""))
    } else {
        flat
    }
}

fn record_to_line(record: &TaskRecord) -> String {
    format!(
        "{},{},{},{},{}",
        quote_field(&record.description),
        record.priority,
        record.due,
        record.complete,
        record.completed_date.as_deref().unwrap_or("")
    )
}

/// Split one line into fields, honoring double-quoted sections.
fn split_line(line: &str) -> Result<Vec<String>> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut chars = line.chars().peekable();
    let mut in_quotes = false;

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                // "" inside a quoted field is an escaped quote
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::Format(format!("unterminated quote in line {:?}", line)));
    }

    fields.push(current);
    Ok(fields)
}

fn line_to_record(line: &str) -> Result<TaskRecord> {
    let fields = split_line(line)?;
    let [description, priority, due, complete, completed_date] = fields.as_slice() else {
        return Err(Error::Format(format!(
            "expected 5 fields, got {} in line {:?}",
            fields.len(),
            line
        )));
    };

    let priority: u8 = priority
        .parse()
        .map_err(|_| Error::Format(format!("not a priority ordinal: {:?}", priority)))?;
    let complete = match complete.as_str() {
        "true" => true,
        "false" => false,
        other => return Err(Error::Format(format!("not a boolean: {:?}", other))),
    };

    Ok(TaskRecord {
        description: description.clone(),
        priority,
        due: due.clone(),
        complete,
        completed_date: if completed_date.is_empty() {
            None
        } else {
            Some(completed_date.clone())
        },
    })
}

impl TaskStore for DelimitedStore {
    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let mut content = String::new();
        for task in tasks {
            content.push_str(&record_to_line(&task.to_record()));
            content.push('\n');
        }

        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote delimited store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let content = fs::read_to_string(&self.path)?;

        let mut tasks = Vec::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            tasks.push(Task::from_record(&line_to_record(line)?)?);
        }

        debug!(path = %self.path.display(), count = tasks.len(), "read delimited store");
        Ok(tasks)
    }
}
