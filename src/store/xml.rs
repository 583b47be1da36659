//! Markup document store.
//!
//! Root element `TaskList` containing repeated `Task` elements, each with
//! child elements `Description`, `Priority`, `DueDate`, `Complete`, and
//! `CompletionDate` only when complete. One element per line; text content
//! is entity-escaped, and the reader is line-oriented, so newlines inside a
//! description are flattened to spaces on write.

use std::fs;
use std::path::PathBuf;

use regex::Regex;
use tracing::debug;

use super::TaskStore;
use crate::error::{Error, Result};
use crate::task::{Task, TaskRecord};

pub struct XmlStore {
    path: PathBuf,
}

impl XmlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

fn escape(text: &str) -> String {
    // The reader parses one element per line, so embedded newlines would
    // split the element and make the document unreadable.
    let flat = if text.contains(['\n', '\r']) {
        text.replace(['\n', '\r'], " ")
    } else {
        text.to_string()
    };

    flat.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

fn push_element(out: &mut String, name: &str, text: &str) {
    out.push_str(&format!("    <{}>{}</{}>\n", name, escape(text), name));
}

fn record_to_elements(out: &mut String, record: &TaskRecord) {
    out.push_str("  <Task>\n");
    push_element(out, "Description", &record.description);
    push_element(out, "Priority", &record.priority.to_string());
    push_element(out, "DueDate", &record.due);
    push_element(out, "Complete", &record.complete.to_string());
    if let Some(date) = &record.completed_date {
        push_element(out, "CompletionDate", date);
    }
    out.push_str("  </Task>\n");
}

/// Field accumulator for one `<Task>` element.
#[derive(Default)]
struct PartialTask {
    description: Option<String>,
    priority: Option<String>,
    due: Option<String>,
    complete: Option<String>,
    completed_date: Option<String>,
}

impl PartialTask {
    fn set(&mut self, name: &str, value: String) -> Result<()> {
        let slot = match name {
            "Description" => &mut self.description,
            "Priority" => &mut self.priority,
            "DueDate" => &mut self.due,
            "Complete" => &mut self.complete,
            "CompletionDate" => &mut self.completed_date,
            other => {
                return Err(Error::Format(format!("unknown element <{}>", other)));
            }
        };

        if slot.replace(value).is_some() {
            return Err(Error::Format(format!("duplicate element <{}>", name)));
        }
        Ok(())
    }

    fn finish(self) -> Result<TaskRecord> {
        let require = |field: Option<String>, name: &str| {
            field.ok_or_else(|| Error::Format(format!("task is missing <{}>", name)))
        };

        let priority = require(self.priority, "Priority")?;
        let priority: u8 = priority
            .parse()
            .map_err(|_| Error::Format(format!("not a priority ordinal: {:?}", priority)))?;

        let complete = match require(self.complete, "Complete")?.as_str() {
            "true" => true,
            "false" => false,
            other => return Err(Error::Format(format!("not a boolean: {:?}", other))),
        };

        Ok(TaskRecord {
            description: require(self.description, "Description")?,
            priority,
            due: require(self.due, "DueDate")?,
            complete,
            completed_date: self.completed_date,
        })
    }
}

fn parse_document(content: &str) -> Result<Vec<TaskRecord>> {
    // One element per line: <Name>text</Name>
    let element_re = Regex::new(r"^<(\w+)>(.*)</(\w+)>$").expect("static regex");

    let mut records = Vec::new();
    let mut current: Option<PartialTask> = None;

    for line in content.lines() {
        let line = line.trim();
        match line {
            "" | "<TaskList>" | "</TaskList>" => continue,
            "<Task>" => {
                if current.is_some() {
                    return Err(Error::Format("nested <Task> element".into()));
                }
                current = Some(PartialTask::default());
            }
            "</Task>" => {
                let partial = current
                    .take()
                    .ok_or_else(|| Error::Format("</Task> without opening <Task>".into()))?;
                records.push(partial.finish()?);
            }
            _ => {
                let caps = element_re
                    .captures(line)
                    .ok_or_else(|| Error::Format(format!("unparsable line {:?}", line)))?;
                if caps[1] != caps[3] {
                    return Err(Error::Format(format!(
                        "mismatched tags <{}> and </{}>",
                        &caps[1], &caps[3]
                    )));
                }

                let partial = current
                    .as_mut()
                    .ok_or_else(|| Error::Format(format!("element {:?} outside <Task>", line)))?;
                partial.set(&caps[1], unescape(&caps[2]))?;
            }
        }
    }

    if current.is_some() {
        return Err(Error::Format("unclosed <Task> element".into()));
    }
    Ok(records)
}

impl TaskStore for XmlStore {
    fn write_all(&self, tasks: &[Task]) -> Result<()> {
        let mut content = String::from("<TaskList>\n");
        for task in tasks {
            record_to_elements(&mut content, &task.to_record());
        }
        content.push_str("</TaskList>\n");

        fs::write(&self.path, content)?;
        debug!(path = %self.path.display(), count = tasks.len(), "wrote XML store");
        Ok(())
    }

    fn read_all(&self) -> Result<Vec<Task>> {
        let content = fs::read_to_string(&self.path)?;
        let records = parse_document(&content)?;
        debug!(path = %self.path.display(), count = records.len(), "read XML store");

        records.iter().map(Task::from_record).collect()
    }
}
