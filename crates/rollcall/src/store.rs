//! Concurrency-safe in-memory record table.
//!
//! One [`RwLock`] covers the id counter and the record map together. Every
//! mutation (create, update, delete) takes the write half, so mutations are
//! serialized against each other and against readers; `get` and `list` take
//! the read half and may run in parallel. A reader therefore sees each
//! mutation either entirely or not at all.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::record::{NewRecord, Record, RecordPatch};

#[derive(Debug, Default)]
struct Table {
    /// Last id handed out. Only ever incremented.
    counter: u64,
    /// Keyed by id. Ids are assigned in increasing order, so key order is
    /// insertion order.
    records: BTreeMap<u64, Record>,
}

/// The authoritative set of records.
///
/// Construct one per process and share it behind an `Arc`; tests build as
/// many isolated instances as they like.
#[derive(Debug, Default)]
pub struct RecordStore {
    table: RwLock<Table>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panic while holding the lock cannot leave the table half-written:
    // every mutation is a single map operation after all fallible work.
    fn read(&self) -> RwLockReadGuard<'_, Table> {
        self.table.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Table> {
        self.table.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate and insert a new record under the next id.
    ///
    /// The counter advances only when the record is actually inserted, and
    /// ids are never reused, even after deletion.
    pub fn create(&self, new: NewRecord) -> Result<Record> {
        new.validate()?;

        let record = {
            let mut table = self.write();
            table.counter += 1;
            let record = new.into_record(table.counter);
            table.records.insert(record.id, record.clone());
            record
        };

        info!(id = record.id, "record created");
        Ok(record)
    }

    /// Snapshot of a single record.
    pub fn get(&self, id: u64) -> Result<Record> {
        self.read().records.get(&id).cloned().ok_or(Error::NotFound(id))
    }

    /// Snapshot of all live records, in insertion order.
    pub fn list(&self) -> Vec<Record> {
        self.read().records.values().cloned().collect()
    }

    /// Apply a partial update.
    ///
    /// Provided fields are validated first; an invalid field fails the whole
    /// update and leaves the record untouched. The stored record is replaced
    /// in one step, so no reader observes a half-applied patch. A patch with
    /// no fields succeeds and returns the record unchanged.
    pub fn update(&self, id: u64, patch: &RecordPatch) -> Result<Record> {
        patch.validate()?;

        let mut table = self.write();
        let current = table.records.get(&id).ok_or(Error::NotFound(id))?;
        if patch.is_empty() {
            debug!(id, "empty patch, record unchanged");
            return Ok(current.clone());
        }

        let updated = patch.apply(current);
        table.records.insert(id, updated.clone());
        drop(table);

        info!(id, "record updated");
        Ok(updated)
    }

    /// Remove a record. Returns `false` if no record had this id.
    pub fn delete(&self, id: u64) -> bool {
        let removed = self.write().records.remove(&id).is_some();
        if removed {
            info!(id, "record deleted");
        }
        removed
    }

    /// Number of live records.
    pub fn len(&self) -> usize {
        self.read().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::thread;

    use super::*;

    fn jo() -> NewRecord {
        NewRecord::new("Jo", 20, "jo@example.com")
    }

    #[test]
    fn create_then_get_returns_same_record() {
        let store = RecordStore::new();
        let created = store
            .create(NewRecord::new("Grace Hopper", 85, "grace@navy.mil"))
            .unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.get(created.id).unwrap(), created);
    }

    #[test]
    fn ids_increase_and_are_never_reused() {
        let store = RecordStore::new();
        let a = store.create(jo()).unwrap();
        let b = store.create(jo()).unwrap();
        assert!(b.id > a.id);

        assert!(store.delete(b.id));
        let c = store.create(jo()).unwrap();
        assert_eq!(c.id, b.id + 1);
    }

    #[test]
    fn failed_create_does_not_advance_counter() {
        let store = RecordStore::new();
        assert!(store.create(NewRecord::new("", 20, "a@b.com")).is_err());
        assert!(store.create(NewRecord::new("Jo", 15, "a@b.com")).is_err());
        assert!(store.create(NewRecord::new("Jo", 20, "not-an-email")).is_err());
        assert!(store.is_empty());
        assert_eq!(store.create(jo()).unwrap().id, 1);
    }

    #[test]
    fn get_missing_is_not_found() {
        let store = RecordStore::new();
        assert_eq!(store.get(42), Err(Error::NotFound(42)));
    }

    #[test]
    fn update_changes_only_provided_field() {
        let store = RecordStore::new();
        let before = store.create(jo()).unwrap();

        let after = store
            .update(before.id, &RecordPatch::new().with_age(33))
            .unwrap();
        assert_eq!(after.age, 33);
        assert_eq!(after.id, before.id);
        assert_eq!(after.name, before.name);
        assert_eq!(after.email, before.email);
        assert_eq!(store.get(before.id).unwrap(), after);
    }

    #[test]
    fn empty_update_is_a_successful_noop() {
        let store = RecordStore::new();
        let before = store.create(jo()).unwrap();
        let after = store.update(before.id, &RecordPatch::new()).unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn invalid_update_leaves_record_untouched() {
        let store = RecordStore::new();
        let before = store.create(jo()).unwrap();

        let patch = RecordPatch::new().with_name("Joanna").with_age(200);
        let err = store.update(before.id, &patch).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert_eq!(store.get(before.id).unwrap(), before);
    }

    #[test]
    fn update_missing_is_not_found() {
        let store = RecordStore::new();
        let patch = RecordPatch::new().with_name("Nobody");
        assert_eq!(store.update(9, &patch), Err(Error::NotFound(9)));
    }

    #[test]
    fn delete_then_get_and_second_delete() {
        let store = RecordStore::new();
        let rec = store.create(jo()).unwrap();
        assert!(store.delete(rec.id));
        assert_eq!(store.get(rec.id), Err(Error::NotFound(rec.id)));
        assert!(!store.delete(rec.id));
    }

    #[test]
    fn list_has_every_live_id_once_in_order() {
        let store = RecordStore::new();
        for _ in 0..5 {
            store.create(jo()).unwrap();
        }
        store.delete(2);
        store.delete(4);

        let ids: Vec<u64> = store.list().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn returned_records_are_snapshots() {
        let store = RecordStore::new();
        let mut rec = store.create(jo()).unwrap();
        rec.name = "Mallory".into();
        rec.age = 3;
        assert_eq!(store.get(rec.id).unwrap().name, "Jo");
    }

    #[test]
    fn concurrent_creates_get_unique_gapless_ids() {
        let store = RecordStore::new();
        let ids: Vec<u64> = thread::scope(|s| {
            let handles: Vec<_> = (0..100)
                .map(|i| {
                    let store = &store;
                    s.spawn(move || {
                        store
                            .create(NewRecord::new(format!("Student {i}"), 20, "s@example.com"))
                            .unwrap()
                            .id
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), 100);
        assert_eq!(unique, (1..=100).collect::<HashSet<u64>>());
        assert_eq!(store.len(), 100);
    }

    #[test]
    fn readers_never_see_half_applied_updates() {
        let store = RecordStore::new();
        let id = store
            .create(NewRecord::new("alpha", 20, "alpha@example.com"))
            .unwrap()
            .id;

        thread::scope(|s| {
            s.spawn(|| {
                for i in 0..500 {
                    let tag = if i % 2 == 0 { "beta" } else { "alpha" };
                    let patch = RecordPatch::new()
                        .with_name(tag)
                        .with_email(format!("{tag}@example.com"));
                    store.update(id, &patch).unwrap();
                }
            });
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..500 {
                        let rec = store.get(id).unwrap();
                        assert_eq!(rec.email, format!("{}@example.com", rec.name));
                    }
                });
            }
        });
    }
}
