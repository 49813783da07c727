//! Per-kind record stores.
//!
//! A registry owns every record of one kind. Ids are unique per registry,
//! not globally. Records are stored in insertion order and never removed,
//! so a [`Handle`] (the record's slot) stays valid for the life of the
//! directory; handles are the post-link form of a cross-record reference.
//!
//! Each registry also owns its kind's auxiliary link state (counters,
//! pools, index tables) in `aux`, reset once before the linking pass and
//! populated monotonically during it.

use std::collections::HashMap;
use std::marker::PhantomData;

use thiserror::Error;

use crate::kind::Kind;

/// Errors raised by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("{kind}: duplicate id `{id}`")]
    DuplicateId { kind: String, id: String },
    #[error("{kind}: no record with id `{id}`")]
    NotFound { kind: String, id: String },
}

/// Minimum surface a stored record must provide.
pub trait RecordData: Clone {
    /// Kind-specific registry state (counters, pools, index tables).
    type Aux: Default + std::fmt::Debug;

    fn id(&self) -> &str;
    fn set_id(&mut self, id: &str);
}

/// Typed reference to a record's slot in its registry.
///
/// Slots are assigned in insertion order and never reused, so a handle
/// taken during linking remains valid afterward.
pub struct Handle<R> {
    slot: u32,
    _marker: PhantomData<fn() -> R>,
}

impl<R> Handle<R> {
    pub(crate) fn new(slot: u32) -> Handle<R> {
        Handle { slot, _marker: PhantomData }
    }

    pub fn slot(self) -> u32 {
        self.slot
    }
}

impl<R> Clone for Handle<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for Handle<R> {}

impl<R> PartialEq for Handle<R> {
    fn eq(&self, other: &Self) -> bool {
        self.slot == other.slot
    }
}

impl<R> Eq for Handle<R> {}

impl<R> std::fmt::Debug for Handle<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Handle({})", self.slot)
    }
}

/// Append-mostly store of all records of one kind.
#[derive(Debug)]
pub struct Registry<R: RecordData> {
    kind: Kind,
    records: Vec<R>,
    by_id: HashMap<String, u32>,
    /// Kind-specific link state. Reset before linking, read-only after.
    pub aux: R::Aux,
}

impl<R: RecordData> Registry<R> {
    pub fn new(kind: Kind) -> Registry<R> {
        Registry {
            kind,
            records: Vec::new(),
            by_id: HashMap::new(),
            aux: R::Aux::default(),
        }
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    /// Store a record, preserving insertion order.
    ///
    /// Fails without modifying the registry if the id is already present.
    pub fn add(&mut self, record: R) -> Result<Handle<R>, RegistryError> {
        let id = record.id().to_string();
        if self.by_id.contains_key(&id) {
            return Err(RegistryError::DuplicateId { kind: self.kind.tag().to_string(), id });
        }
        let slot = self.records.len() as u32;
        self.by_id.insert(id, slot);
        self.records.push(record);
        Ok(Handle::new(slot))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Point lookup, erroring when the id is absent.
    pub fn get(&self, id: &str) -> Result<&R, RegistryError> {
        self.find(id).ok_or_else(|| self.not_found(id))
    }

    pub fn get_mut(&mut self, id: &str) -> Result<&mut R, RegistryError> {
        match self.by_id.get(id) {
            Some(&slot) => Ok(&mut self.records[slot as usize]),
            None => Err(self.not_found(id)),
        }
    }

    /// Point lookup for callers that treat absence as a warning, not an error.
    pub fn find(&self, id: &str) -> Option<&R> {
        self.by_id.get(id).map(|&slot| &self.records[slot as usize])
    }

    /// Id to handle, confirming the record is present.
    pub fn resolve(&self, id: &str) -> Option<Handle<R>> {
        self.by_id.get(id).map(|&slot| Handle::new(slot))
    }

    pub fn record(&self, handle: Handle<R>) -> &R {
        &self.records[handle.slot as usize]
    }

    pub fn record_mut(&mut self, handle: Handle<R>) -> &mut R {
        &mut self.records[handle.slot as usize]
    }

    /// Deep-copy `source_id` under `new_id` and store the copy.
    ///
    /// The clone is independent of the source; mutating one never touches
    /// the other. Fails with `NotFound` for a missing source and with
    /// `DuplicateId` (registry unchanged) when `new_id` is taken.
    pub fn clone_record(&mut self, new_id: &str, source_id: &str) -> Result<Handle<R>, RegistryError> {
        let mut copy = self.get(source_id)?.clone();
        copy.set_id(new_id);
        self.add(copy)
    }

    /// Overwrite the stored record with the same id, keeping its slot.
    pub fn replace(&mut self, record: R) -> Result<(), RegistryError> {
        match self.by_id.get(record.id()) {
            Some(&slot) => {
                self.records[slot as usize] = record;
                Ok(())
            }
            None => Err(self.not_found(record.id())),
        }
    }

    /// Records in insertion order. Restartable; records added after an
    /// enumeration started are not guaranteed visible to it (loading and
    /// linking never interleave, so this is an ordering contract only).
    pub fn iter(&self) -> impl Iterator<Item = &R> {
        self.records.iter()
    }

    /// Handles in insertion order, for scans that also need registry access.
    pub fn handles(&self) -> impl Iterator<Item = Handle<R>> {
        (0..self.records.len() as u32).map(Handle::new)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Drop accumulated link state. Called once before a linking pass.
    pub fn reset_aux(&mut self) {
        self.aux = R::Aux::default();
    }

    fn not_found(&self, id: &str) -> RegistryError {
        RegistryError::NotFound { kind: self.kind.tag().to_string(), id: id.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Dummy {
        id: String,
        value: i32,
    }

    impl RecordData for Dummy {
        type Aux = ();

        fn id(&self) -> &str {
            &self.id
        }

        fn set_id(&mut self, id: &str) {
            self.id = id.to_string();
        }
    }

    fn registry() -> Registry<Dummy> {
        Registry::new(Kind::Custom("dummy".into()))
    }

    #[test]
    fn test_add_and_get() {
        let mut reg = registry();
        reg.add(Dummy { id: "a".into(), value: 1 }).unwrap();
        assert_eq!(reg.get("a").unwrap().value, 1);
        assert!(matches!(reg.get("b"), Err(RegistryError::NotFound { .. })));
    }

    #[test]
    fn test_duplicate_add_leaves_registry_unchanged() {
        let mut reg = registry();
        reg.add(Dummy { id: "a".into(), value: 1 }).unwrap();
        let err = reg.add(Dummy { id: "a".into(), value: 2 }).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateId { .. }));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.get("a").unwrap().value, 1);
    }

    #[test]
    fn test_clone_fidelity_and_independence() {
        let mut reg = registry();
        reg.add(Dummy { id: "src".into(), value: 7 }).unwrap();
        let handle = reg.clone_record("copy", "src").unwrap();

        assert_eq!(reg.record(handle).id, "copy");
        assert_eq!(reg.record(handle).value, 7);

        reg.get_mut("copy").unwrap().value = 9;
        assert_eq!(reg.get("src").unwrap().value, 7);
    }

    #[test]
    fn test_clone_missing_source_and_duplicate_target() {
        let mut reg = registry();
        reg.add(Dummy { id: "a".into(), value: 1 }).unwrap();

        assert!(matches!(reg.clone_record("b", "missing"), Err(RegistryError::NotFound { .. })));
        assert!(matches!(reg.clone_record("a", "a"), Err(RegistryError::DuplicateId { .. })));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_iteration_in_insertion_order() {
        let mut reg = registry();
        for id in ["c", "a", "b"] {
            reg.add(Dummy { id: id.into(), value: 0 }).unwrap();
        }
        let order: Vec<_> = reg.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(order, ["c", "a", "b"]);
    }

    #[test]
    fn test_replace_keeps_slot() {
        let mut reg = registry();
        let handle = reg.add(Dummy { id: "a".into(), value: 1 }).unwrap();
        reg.replace(Dummy { id: "a".into(), value: 5 }).unwrap();
        assert_eq!(reg.record(handle).value, 5);
        assert!(reg.replace(Dummy { id: "zz".into(), value: 0 }).is_err());
    }
}
