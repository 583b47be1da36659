//! Save/load behavior across every persistence format.
//!
//! Each format gets the same treatment: build a list, save it, load into a
//! fresh list, and compare the ordered sequence field-for-field.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use tempfile::tempdir;

use taskpad::{
    BinaryStore, DelimitedStore, JsonStore, Priority, SqliteStore, Task, TaskList, TaskStore,
    XmlStore,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Build the reference list: one open errand, one completed chore.
fn sample_list() -> TaskList {
    let mut list = TaskList::new();
    list.add_task(Task::new("Buy milk", Priority::Low, date(2024, 1, 10)));

    let mut done = Task::new("File taxes", Priority::High, date(2024, 4, 15));
    done.complete = true;
    done.completed_date = Some(date(2024, 4, 1));
    list.add_task(done);

    list
}

fn assert_fields_match(loaded: &TaskList, original: &TaskList) {
    assert_eq!(loaded.len(), original.len());
    for (got, want) in loaded.tasks().iter().zip(original.tasks()) {
        assert_eq!(got.description, want.description);
        assert_eq!(got.priority, want.priority);
        assert_eq!(got.due, want.due);
        assert_eq!(got.complete, want.complete);
        assert_eq!(got.completed_date, want.completed_date);
    }
}

fn check_roundtrip<S: TaskStore>(store: &S) -> Result<()> {
    let list = sample_list();
    list.save(store)?;

    let loaded = TaskList::load(store)?;
    assert_fields_match(&loaded, &list);
    Ok(())
}

#[test]
fn delimited_roundtrip() -> Result<()> {
    let temp = tempdir()?;
    check_roundtrip(&DelimitedStore::new(temp.path().join("tasks.txt")))
}

#[test]
fn json_roundtrip() -> Result<()> {
    let temp = tempdir()?;
    check_roundtrip(&JsonStore::new(temp.path().join("tasks.json")))
}

#[test]
fn binary_roundtrip() -> Result<()> {
    let temp = tempdir()?;
    check_roundtrip(&BinaryStore::new(temp.path().join("tasks.bin")))
}

#[test]
fn sqlite_roundtrip() -> Result<()> {
    let temp = tempdir()?;
    check_roundtrip(&SqliteStore::open(temp.path().join("tasks.db"))?)
}

#[test]
fn xml_roundtrip() -> Result<()> {
    let temp = tempdir()?;
    check_roundtrip(&XmlStore::new(temp.path().join("tasks.xml")))
}

/// Start empty, add two tasks, mark the second complete, save, load fresh.
fn check_scenario<S: TaskStore>(store: &S) -> Result<()> {
    let mut list = TaskList::new();
    list.add_task(Task::new("Buy milk", Priority::Low, date(2024, 1, 10)));
    list.add_task(Task::new("File taxes", Priority::High, date(2024, 4, 15)));
    list.mark_complete(1)?;
    list.save(store)?;

    let loaded = TaskList::load(store)?;
    assert_eq!(loaded.len(), 2);

    let first = loaded.get(0)?;
    assert_eq!(first.description, "Buy milk");
    assert!(!first.complete);

    let second = loaded.get(1)?;
    assert_eq!(second.description, "File taxes");
    assert!(second.complete);
    assert_eq!(second.completed_date, Some(Local::now().date_naive()));
    Ok(())
}

#[test]
fn scenario_runs_against_every_format() -> Result<()> {
    let temp = tempdir()?;

    check_scenario(&DelimitedStore::new(temp.path().join("tasks.txt")))?;
    check_scenario(&JsonStore::new(temp.path().join("tasks.json")))?;
    check_scenario(&BinaryStore::new(temp.path().join("tasks.bin")))?;
    check_scenario(&SqliteStore::open(temp.path().join("tasks.db"))?)?;
    check_scenario(&XmlStore::new(temp.path().join("tasks.xml")))?;
    Ok(())
}

#[test]
fn empty_list_roundtrips_everywhere() -> Result<()> {
    let temp = tempdir()?;

    let stores: Vec<Box<dyn TaskStore>> = vec![
        Box::new(DelimitedStore::new(temp.path().join("e.txt"))),
        Box::new(JsonStore::new(temp.path().join("e.json"))),
        Box::new(BinaryStore::new(temp.path().join("e.bin"))),
        Box::new(SqliteStore::open(temp.path().join("e.db"))?),
        Box::new(XmlStore::new(temp.path().join("e.xml"))),
    ];

    for store in &stores {
        TaskList::new().save(store.as_ref())?;
        assert!(TaskList::load(store.as_ref())?.is_empty());
    }
    Ok(())
}

#[test]
fn sqlite_mark_task_complete_persists_single_row() -> Result<()> {
    let temp = tempdir()?;
    let store = SqliteStore::open(temp.path().join("tasks.db"))?;

    sample_list().save(&store)?;

    // Load to pick up row ids, then complete the open errand through the store.
    let mut list = TaskList::load(&store)?;
    assert!(!list.get(0)?.complete);
    list.mark_task_complete(0, &store)?;

    let reloaded = TaskList::load(&store)?;
    assert!(reloaded.get(0)?.complete);
    assert_eq!(
        reloaded.get(0)?.completed_date,
        Some(Local::now().date_naive())
    );
    // The other row is untouched.
    assert_eq!(reloaded.get(1)?.completed_date, Some(date(2024, 4, 1)));
    Ok(())
}

#[test]
fn sqlite_delete_by_id_flows_through_list() -> Result<()> {
    use taskpad::IdentityStore;

    let temp = tempdir()?;
    let store = SqliteStore::open(temp.path().join("tasks.db"))?;

    sample_list().save(&store)?;

    let mut list = TaskList::load(&store)?;
    let target = list.get(0)?.clone();
    let removed = list.delete_task(&target)?;
    store.delete_by_id(removed.id.unwrap())?;

    let reloaded = TaskList::load(&store)?;
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded.get(0)?.description, "File taxes");
    Ok(())
}

#[test]
fn sqlite_save_after_reorder_keeps_list_order() -> Result<()> {
    let temp = tempdir()?;
    let store = SqliteStore::open(temp.path().join("tasks.db"))?;

    sample_list().save(&store)?;

    // Delete the first task and re-append it, then save the reordered list.
    let mut list = TaskList::load(&store)?;
    let target = list.get(0)?.clone();
    let removed = list.delete_task(&target)?;
    list.add_task(removed);
    list.save(&store)?;

    let reloaded = TaskList::load(&store)?;
    assert_eq!(reloaded.get(0)?.description, "File taxes");
    assert_eq!(reloaded.get(1)?.description, "Buy milk");
    Ok(())
}

#[test]
fn formats_are_interchangeable() -> Result<()> {
    let temp = tempdir()?;
    let list = sample_list();

    // Save as JSON, reload, save the reload as XML, reload again.
    let json = JsonStore::new(temp.path().join("tasks.json"));
    list.save(&json)?;
    let via_json = TaskList::load(&json)?;

    let xml = XmlStore::new(temp.path().join("tasks.xml"));
    via_json.save(&xml)?;
    let via_xml = TaskList::load(&xml)?;

    assert_fields_match(&via_xml, &list);
    Ok(())
}
