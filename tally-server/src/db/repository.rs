//! Generic typed repository
//!
//! One [`Repository`] per record kind wraps the shared [`KvStore`] with
//! namespaced CRUD. Repositories are stateless; handlers construct them
//! per request from the state's store handle.

use std::marker::PhantomData;
use std::ops::Bound;

use chrono::{Duration, Utc};
use redb::ReadableTable;
use serde::{Deserialize, Serialize};

use super::{ChildEntity, Entity, KvStore, StoreError, StoreResult, record_table};

/// One page of a key-ordered listing
///
/// `next` carries the last returned id when more records remain; pass it
/// back as the cursor to continue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

/// Typed CRUD over one record namespace
pub struct Repository<E: Entity> {
    store: KvStore,
    _kind: PhantomData<E>,
}

impl<E: Entity> Repository<E> {
    pub fn new(store: KvStore) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    /// List one page of records in key order (redb B-tree order,
    /// lexicographic by id, stable across calls). An empty namespace
    /// yields an empty page, never an error.
    pub fn list(&self, cursor: Option<&str>, limit: usize) -> StoreResult<Page<E>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(record_table(E::NAMESPACE))?;

        let iter = match cursor {
            Some(after) => table.range::<&str>((Bound::Excluded(after), Bound::Unbounded))?,
            None => table.iter()?,
        };

        let mut items: Vec<E> = Vec::new();
        let mut next = None;
        for entry in iter {
            let (_key, value) = entry?;
            if items.len() == limit {
                // One more row exists past the page boundary
                next = items.last().map(|record| record.id().to_string());
                break;
            }
            items.push(serde_json::from_slice(value.value())?);
        }

        Ok(Page { items, next })
    }

    /// List every record of the kind
    pub fn list_all(&self) -> StoreResult<Vec<E>> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(record_table(E::NAMESPACE))?;
        let mut items = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            items.push(serde_json::from_slice(value.value())?);
        }
        Ok(items)
    }

    /// Existence check without deserializing the record
    pub fn exists(&self, id: &str) -> StoreResult<bool> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(record_table(E::NAMESPACE))?;
        Ok(table.get(id)?.is_some())
    }

    pub fn get(&self, id: &str) -> StoreResult<E> {
        let txn = self.store.begin_read()?;
        let table = txn.open_table(record_table(E::NAMESPACE))?;
        match table.get(id)? {
            Some(value) => Ok(serde_json::from_slice(value.value())?),
            None => Err(StoreError::NotFound {
                namespace: E::NAMESPACE,
                id: id.to_string(),
            }),
        }
    }

    /// Create a record, stamping creation time and attribution.
    ///
    /// Id collisions are rejected with [`StoreError::Conflict`]; the check
    /// and the insert share one write transaction, so two racing creates
    /// of the same id cannot both win.
    pub fn create(&self, mut record: E, actor: &str) -> StoreResult<E> {
        record.stamp_created(Utc::now(), actor);
        self.insert_new(&record)?;
        Ok(record)
    }

    /// Atomic read-modify-write.
    ///
    /// Loads the current record, applies `updater`, restores the fields an
    /// updater must not change, restamps `updatedAt` strictly greater than
    /// the stored one, and persists, all inside a single write
    /// transaction, so no concurrent `mutate` on the same id can observe
    /// or produce a torn intermediate state.
    pub fn mutate(&self, id: &str, actor: &str, updater: impl FnOnce(&mut E)) -> StoreResult<E> {
        let txn = self.store.begin_write()?;
        let record = {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            let stored: E = match table.get(id)? {
                Some(value) => serde_json::from_slice(value.value())?,
                None => {
                    return Err(StoreError::NotFound {
                        namespace: E::NAMESPACE,
                        id: id.to_string(),
                    });
                }
            };

            let mut record = stored.clone();
            updater(&mut record);
            record.restore_immutable(&stored);

            // Wall clock at the point of the write, clamped so updatedAt
            // stays strictly monotonic per id even if the clock stalls.
            let mut now = Utc::now();
            if now <= stored.updated_at() {
                now = stored.updated_at() + Duration::milliseconds(1);
            }
            record.stamp_updated(now, actor);

            let value = serde_json::to_vec(&record)?;
            table.insert(id, value.as_slice())?;
            record
        };
        txn.commit()?;
        Ok(record)
    }

    /// Delete a record; returns whether it existed. Absent ids are a
    /// no-op `false`, never an error.
    pub fn delete(&self, id: &str) -> StoreResult<bool> {
        let txn = self.store.begin_write()?;
        let removed = {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            table.remove(id)?.is_some()
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Delete each id in one write transaction, skipping missing ids.
    /// Returns the number actually removed.
    pub fn delete_many<S: AsRef<str>>(&self, ids: &[S]) -> StoreResult<usize> {
        let txn = self.store.begin_write()?;
        let removed = {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            let mut removed = 0;
            for id in ids {
                if table.remove(id.as_ref())?.is_some() {
                    removed += 1;
                }
            }
            removed
        };
        txn.commit()?;
        Ok(removed)
    }

    /// Insert without stamping; rejects an existing id. Used by `create`
    /// and by the aggregate writer, which stamps records itself.
    pub(crate) fn insert_new(&self, record: &E) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            if table.get(record.id())?.is_some() {
                return Err(StoreError::Conflict {
                    namespace: E::NAMESPACE,
                    id: record.id().to_string(),
                });
            }
            let value = serde_json::to_vec(record)?;
            table.insert(record.id(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Idempotent upsert without stamping; journal replay only
    pub(crate) fn put(&self, record: &E) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            let value = serde_json::to_vec(record)?;
            table.insert(record.id(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }
}

impl<E: ChildEntity> Repository<E> {
    /// All children whose foreign key equals `parent_id`, in key order.
    /// Full scan; line-item namespaces stay small.
    pub fn list_for_parent(&self, parent_id: &str) -> StoreResult<Vec<E>> {
        let mut items = self.list_all()?;
        items.retain(|item| item.parent_id() == parent_id);
        Ok(items)
    }
}
