//! Employee record collection store.
//!
//! # Responsibility
//! - Hold the ordered record collection and its add/update/delete/lookup
//!   operations.
//! - Keep the records key equal to a full serialization of in-memory state
//!   after every mutation.
//!
//! # Invariants
//! - Collection order is insertion order; updates preserve position.
//! - `next_id` is a pure function of current content (`max + 1`), so the
//!   highest id is reused after the record holding it is deleted.
//! - Missed `update`/`delete` leave state untouched and write nothing.

use crate::model::employee::{Employee, EmployeeDraft, EmployeePatch};
use crate::storage::kv::{JsonStore, KeyValueStorage};
use crate::storage::StorageResult;
use log::info;

/// Storage key for the full record collection.
pub const RECORDS_KEY: &str = "employee_records";

/// Long-lived ordered record collection store.
pub struct RecordStore<S: KeyValueStorage> {
    kv: JsonStore<S>,
    records: Vec<Employee>,
}

impl<S: KeyValueStorage> RecordStore<S> {
    /// Constructs the store, hydrating from storage or seeding the fixed
    /// default dataset when the key is absent or undecodable.
    ///
    /// Seeding persists immediately, so a freshly seeded store and its
    /// storage agree from the first read.
    pub fn open(storage: S) -> StorageResult<Self> {
        let kv = JsonStore::new(storage);
        let records = match kv.read::<Vec<Employee>>(RECORDS_KEY)? {
            Some(records) => {
                info!(
                    "event=records_hydrate module=records status=ok count={}",
                    records.len()
                );
                records
            }
            None => {
                let seed = Employee::seed_dataset();
                kv.write(RECORDS_KEY, &seed)?;
                info!(
                    "event=records_hydrate module=records status=seeded count={}",
                    seed.len()
                );
                seed
            }
        };

        Ok(Self { kv, records })
    }

    /// Full collection in insertion order.
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Next id to allocate: `1` when empty, else `max(existing ids) + 1`.
    pub fn next_id(&self) -> i64 {
        self.records
            .iter()
            .map(|record| record.id)
            .max()
            .map_or(1, |max| max + 1)
    }

    /// Appends a new record with a freshly allocated id and persists the
    /// full collection. Returns the stored record.
    pub fn add(&mut self, draft: EmployeeDraft) -> StorageResult<Employee> {
        let record = draft.into_record(self.next_id());
        self.records.push(record.clone());
        self.persist()?;
        info!(
            "event=record_add module=records status=ok id={}",
            record.id
        );

        Ok(record)
    }

    /// Shallow-merges a patch into the record with the given id, in place.
    ///
    /// Returns the updated record, or `None` (with no write) when the id
    /// does not exist.
    pub fn update(&mut self, id: i64, patch: &EmployeePatch) -> StorageResult<Option<Employee>> {
        let Some(record) = self.records.iter_mut().find(|record| record.id == id) else {
            return Ok(None);
        };

        record.apply_patch(patch);
        let updated = record.clone();
        self.persist()?;
        info!("event=record_update module=records status=ok id={id}");

        Ok(Some(updated))
    }

    /// Removes the record with the given id.
    ///
    /// Returns whether a removal happened; nothing is written on a miss.
    pub fn delete(&mut self, id: i64) -> StorageResult<bool> {
        let Some(index) = self.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };

        self.records.remove(index);
        self.persist()?;
        info!("event=record_delete module=records status=ok id={id}");

        Ok(true)
    }

    /// Looks up one record by exact id.
    pub fn get_by_id(&self, id: i64) -> Option<&Employee> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Looks up one record by the textual form of its id, as delivered by
    /// route parameters. Non-numeric input is a plain miss.
    pub fn get_by_id_text(&self, raw: &str) -> Option<&Employee> {
        let id = raw.trim().parse::<i64>().ok()?;
        self.get_by_id(id)
    }

    /// Read-only filtered projection of the collection.
    ///
    /// An empty term returns every record; otherwise records whose name,
    /// email or role contains the term case-insensitively, in original
    /// relative order. Stored state is never mutated or reordered.
    pub fn filtered(&self, term: &str) -> Vec<&Employee> {
        if term.is_empty() {
            return self.records.iter().collect();
        }

        let needle = term.to_lowercase();
        self.records
            .iter()
            .filter(|record| record.matches_term(&needle))
            .collect()
    }

    // Full-collection serialization on every mutation. Deliberate
    // simplicity: cost is O(collection size) per write.
    fn persist(&self) -> StorageResult<()> {
        self.kv.write(RECORDS_KEY, &self.records)
    }
}
