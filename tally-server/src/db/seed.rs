//! Idempotent seed initialization
//!
//! Each namespace is seeded at most once, guarded by a marker row in
//! `seed_meta` rather than an emptiness heuristic: deleting every seeded
//! record later must not re-trigger seeding. Marker check, seed inserts
//! and marker write share one transaction, so a crash mid-seed persists
//! nothing and a retry starts clean; redb's serialized write transactions
//! make two concurrent first calls safe.

use chrono::Utc;
use redb::ReadableTable;

use super::{Entity, KvStore, SEED_META_TABLE, StoreResult, record_table};
use shared::models::{
    Category, Client, Product, Sale, SaleItem, Supplier, SupplierOrder, SupplierOrderItem,
    Transaction, TransactionCategory,
};

/// Seed one namespace if its marker is absent. Returns whether this call
/// performed the seeding. Safe to call any number of times.
pub fn ensure_seed<E: Entity>(store: &KvStore, actor: &str) -> StoreResult<bool> {
    let txn = store.begin_write()?;
    let seeded = {
        let mut meta = txn.open_table(SEED_META_TABLE)?;
        if meta.get(E::NAMESPACE)?.is_some() {
            false
        } else {
            let mut table = txn.open_table(record_table(E::NAMESPACE))?;
            let now = Utc::now();
            for mut record in E::seed() {
                record.stamp_created(now, actor);
                let value = serde_json::to_vec(&record)?;
                table.insert(record.id(), value.as_slice())?;
            }
            meta.insert(E::NAMESPACE, ())?;
            true
        }
    };
    txn.commit()?;

    if seeded {
        tracing::info!(namespace = E::NAMESPACE, "seeded namespace");
    }
    Ok(seeded)
}

/// Seed every record kind. Runs at process startup; any failure is fatal
/// for initialization.
pub fn ensure_all(store: &KvStore, actor: &str) -> StoreResult<()> {
    ensure_seed::<Product>(store, actor)?;
    ensure_seed::<Category>(store, actor)?;
    ensure_seed::<Client>(store, actor)?;
    ensure_seed::<Supplier>(store, actor)?;
    ensure_seed::<Sale>(store, actor)?;
    ensure_seed::<SaleItem>(store, actor)?;
    ensure_seed::<SupplierOrder>(store, actor)?;
    ensure_seed::<SupplierOrderItem>(store, actor)?;
    ensure_seed::<Transaction>(store, actor)?;
    ensure_seed::<TransactionCategory>(store, actor)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Repository;

    #[test]
    fn seeding_is_idempotent() {
        let store = KvStore::open_in_memory().unwrap();
        assert!(ensure_seed::<Category>(&store, "user-1").unwrap());

        let repo = Repository::<Category>::new(store.clone());
        let once = repo.list_all().unwrap();
        assert!(!once.is_empty());

        for _ in 0..3 {
            assert!(!ensure_seed::<Category>(&store, "user-1").unwrap());
        }
        let after = repo.list_all().unwrap();
        assert_eq!(after.len(), once.len());
        for (a, b) in once.iter().zip(&after) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.created_at, b.created_at);
        }
    }

    #[test]
    fn marker_survives_record_deletion() {
        let store = KvStore::open_in_memory().unwrap();
        ensure_seed::<Category>(&store, "user-1").unwrap();

        let repo = Repository::<Category>::new(store.clone());
        let ids: Vec<String> = repo.list_all().unwrap().into_iter().map(|c| c.id).collect();
        repo.delete_many(&ids).unwrap();

        // Emptiness must not be mistaken for "never seeded"
        assert!(!ensure_seed::<Category>(&store, "user-1").unwrap());
        assert!(repo.list_all().unwrap().is_empty());
    }

    #[test]
    fn transactional_kinds_seed_empty() {
        let store = KvStore::open_in_memory().unwrap();
        ensure_all(&store, "user-1").unwrap();

        assert!(
            Repository::<Sale>::new(store.clone())
                .list_all()
                .unwrap()
                .is_empty()
        );
        assert!(
            Repository::<Transaction>::new(store.clone())
                .list_all()
                .unwrap()
                .is_empty()
        );
        assert!(
            !Repository::<TransactionCategory>::new(store)
                .list_all()
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn seed_records_are_stamped_with_actor() {
        let store = KvStore::open_in_memory().unwrap();
        ensure_seed::<Client>(&store, "seed-bot").unwrap();

        let clients = Repository::<Client>::new(store).list_all().unwrap();
        assert!(clients.iter().all(|c| c.created_by == "seed-bot"));
    }
}
