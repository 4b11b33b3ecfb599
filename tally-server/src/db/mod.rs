//! redb-based persistence layer
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | one per namespace (`products`, `sales`, ...) | record id | JSON record | Entity storage |
//! | `seed_meta` | namespace | `()` | Seed markers |
//! | `pending_ops` | op id | JSON [`PendingOp`] | Aggregate write journal |
//!
//! # Durability
//!
//! redb commits with `Durability::Immediate` by default: a commit is
//! persistent as soon as `commit()` returns, and the file is always in a
//! consistent state (copy-on-write with atomic pointer swap). Write
//! transactions are serialized, which is what makes `Repository::mutate`
//! a true atomic read-modify-write rather than a racy get-then-put.

use redb::{Database, ReadableDatabase, TableDefinition};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

mod aggregate;
mod entity;
mod repository;
mod seed;

pub use aggregate::{AggregateWriter, PendingOp, recover_pending};
pub use entity::{ChildEntity, Entity};
pub use repository::{Page, Repository};
pub use seed::{ensure_all, ensure_seed};

/// Table for seed markers: key = namespace, value = empty (existence check)
pub(crate) const SEED_META_TABLE: TableDefinition<&str, ()> = TableDefinition::new("seed_meta");

/// Table for the aggregate write journal: key = op id, value = JSON-serialized PendingOp
pub(crate) const PENDING_OPS_TABLE: TableDefinition<&str, &[u8]> =
    TableDefinition::new("pending_ops");

/// Per-namespace record table: key = record id, value = JSON-serialized record
pub(crate) fn record_table(
    namespace: &'static str,
) -> TableDefinition<'static, &'static str, &'static [u8]> {
    TableDefinition::new(namespace)
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{namespace}/{id} not found")]
    NotFound {
        namespace: &'static str,
        id: String,
    },

    #[error("{namespace}/{id} already exists")]
    Conflict {
        namespace: &'static str,
        id: String,
    },

    /// An aggregate sequence failed after its journal entry was committed.
    /// The completed steps stay in place (no rollback); the journal entry
    /// remains pending and is completed by [`recover_pending`] at startup.
    #[error("aggregate {operation} failed at step '{step}': {source}")]
    PartialAggregate {
        operation: &'static str,
        step: &'static str,
        source: Box<StoreError>,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Key-value store handle backed by redb
///
/// Cheap to clone (`Arc` inside); every repository and the aggregate
/// writer borrow their transactions from this single database.
#[derive(Clone)]
pub struct KvStore {
    db: Arc<Database>,
}

impl KvStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let db = Database::create(path)?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> StoreResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        let store = Self { db: Arc::new(db) };
        store.init_tables()?;
        Ok(store)
    }

    /// Create all tables up front so read transactions never race table creation
    fn init_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write()?;
        {
            for namespace in entity::NAMESPACES {
                let _ = txn.open_table(record_table(namespace))?;
            }
            let _ = txn.open_table(SEED_META_TABLE)?;
            let _ = txn.open_table(PENDING_OPS_TABLE)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Begin a write transaction
    pub(crate) fn begin_write(&self) -> StoreResult<redb::WriteTransaction> {
        Ok(self.db.begin_write()?)
    }

    /// Begin a read transaction
    pub(crate) fn begin_read(&self) -> StoreResult<redb::ReadTransaction> {
        Ok(self.db.begin_read()?)
    }

    /// Cheap liveness probe for the health endpoint
    pub fn check(&self) -> StoreResult<()> {
        let txn = self.begin_read()?;
        let _ = txn.open_table(SEED_META_TABLE)?;
        Ok(())
    }
}
