use std::fmt;
use std::sync::{Mutex, MutexGuard};

use tracing::trace;

use crate::entity::Record;
use crate::repository::{Repository, StoreError};

/// Keeps records in a vector guarded by a mutex. Nothing survives a restart.
pub struct MemoryRepository<E> {
    records: Mutex<Vec<E>>,
}

impl<E: Record> MemoryRepository<E> {
    pub fn new() -> Self {
        Self { records: Mutex::new(Vec::new()) }
    }

    fn records(&self) -> Result<MutexGuard<'_, Vec<E>>, StoreError> {
        self.records.lock().map_err(StoreError::unavailable)
    }
}

impl<E: Record> Default for MemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for MemoryRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.records.lock().map(|records| records.len()).ok();
        f.debug_struct("MemoryRepository").field("len", &len).finish()
    }
}

impl<E: Record> Repository<E> for MemoryRepository<E> {
    fn insert(&self, record: E) -> Result<(), StoreError> {
        let mut records = self.records()?;
        if records.iter().any(|existing| existing.id() == record.id()) {
            return Err(StoreError::Duplicate { kind: E::NAME, id: record.id().to_owned() });
        }

        trace!(kind = E::NAME, id = record.id(), "insert record");
        records.push(record);
        Ok(())
    }

    fn get_by_id(&self, id: &str) -> Result<Option<E>, StoreError> {
        Ok(self.records()?.iter().find(|record| record.id() == id).cloned())
    }

    fn update(&self, patch: E::Patch) -> Result<bool, StoreError> {
        let mut records = self.records()?;
        let Some(record) = records.iter_mut().find(|record| record.id() == E::patch_id(&patch)) else {
            return Ok(false);
        };

        record.apply(patch);
        Ok(true)
    }

    fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records()?;
        let before = records.len();
        records.retain(|record| record.id() != id);
        Ok(records.len() != before)
    }

    fn get_all(&self) -> Result<Vec<E>, StoreError> {
        Ok(self.records()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Project, ProjectPatch};

    fn project(id: &str, name: &str) -> Project {
        Project { id: id.into(), name: name.into(), description: String::new() }
    }

    #[test]
    fn crud() {
        let repository = MemoryRepository::<Project>::new();
        repository.insert(project("p-1", "one")).unwrap();
        repository.insert(project("p-2", "two")).unwrap();

        assert_eq!(repository.get_by_id("p-2").unwrap(), Some(project("p-2", "two")));
        assert_eq!(repository.get_by_id("p-3").unwrap(), None);

        let patch = ProjectPatch { id: "p-1".into(), name: Some("uno".into()), description: None };
        assert!(repository.update(patch).unwrap());
        assert!(!repository.update(ProjectPatch { id: "p-9".into(), ..Default::default() }).unwrap());

        assert!(repository.delete("p-2").unwrap());
        assert!(!repository.delete("p-2").unwrap());
        assert_eq!(repository.get_all().unwrap(), vec![project("p-1", "uno")]);
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let repository = MemoryRepository::<Project>::new();
        repository.insert(project("p-1", "one")).unwrap();

        let err = repository.insert(project("p-1", "again")).unwrap_err();
        assert_eq!(err, StoreError::Duplicate { kind: "project", id: "p-1".into() });
        assert_eq!(repository.get_all().unwrap().len(), 1);
    }

    #[test]
    fn list_keeps_insertion_order() {
        let repository = MemoryRepository::<Project>::new();
        for id in ["c", "a", "b"] {
            repository.insert(project(id, id)).unwrap();
        }
        let ids: Vec<_> = repository.get_all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, ["c", "a", "b"]);
    }
}
