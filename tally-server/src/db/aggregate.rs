//! Aggregate write sequencer
//!
//! Coordinates a parent record (Sale, SupplierOrder) with its line items
//! across two independent repositories. There is no cross-table
//! transaction: each step is its own store call, so concurrent requests
//! interleave between steps and a third, simultaneously listing caller
//! can observe intermediate child states during a replace.
//!
//! Crash safety comes from a journal instead: before the first
//! destructive or creative child step, the full intended outcome is
//! committed to `pending_ops`; the entry is cleared last. A sequence that
//! fails partway surfaces [`StoreError::PartialAggregate`] (never a
//! claimed success) and leaves its journal entry behind, and
//! [`recover_pending`] completes it at the next startup with idempotent
//! primitives (upsert for creates, no-op-on-missing for deletes).

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{
    ChildEntity, Entity, KvStore, PENDING_OPS_TABLE, Repository, StoreError, StoreResult,
};
use redb::ReadableTable;
use shared::models::{Sale, SaleItem, SupplierOrder, SupplierOrderItem};

/// Journaled intent of one aggregate write
///
/// Records are stored fully stamped, so replay is a pure application of
/// the journal: delete the listed child ids, upsert the parent and the
/// new children, then delete the parent id if requested. That order is
/// correct for all three operation kinds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingOp {
    pub op_id: String,
    pub operation: String,
    pub parent_namespace: String,
    #[serde(default)]
    pub parent: Option<Value>,
    #[serde(default)]
    pub children: Vec<Value>,
    #[serde(default)]
    pub delete_child_ids: Vec<String>,
    #[serde(default)]
    pub delete_parent_id: Option<String>,
    pub journaled_at: i64,
}

/// Parent+children write sequencer for one aggregate kind
pub struct AggregateWriter<P: Entity, C: ChildEntity> {
    store: KvStore,
    parents: Repository<P>,
    children: Repository<C>,
}

impl<P: Entity, C: ChildEntity> AggregateWriter<P, C> {
    pub fn new(store: KvStore) -> Self {
        Self {
            parents: Repository::new(store.clone()),
            children: Repository::new(store.clone()),
            store,
        }
    }

    /// Create the parent and all children. Records arrive id-bearing from
    /// the route layer; stamping and the child foreign keys are applied
    /// here. Returns the parent plus every created child.
    pub fn create(
        &self,
        mut parent: P,
        mut children: Vec<C>,
        actor: &str,
    ) -> StoreResult<(P, Vec<C>)> {
        let now = Utc::now();
        parent.stamp_created(now, actor);
        for child in &mut children {
            child.set_parent_id(parent.id().to_string());
            child.stamp_created(now, actor);
        }

        let op = PendingOp {
            op_id: shared::util::new_id(),
            operation: "create".into(),
            parent_namespace: P::NAMESPACE.into(),
            parent: Some(serde_json::to_value(&parent)?),
            children: to_values(&children)?,
            delete_child_ids: Vec::new(),
            delete_parent_id: None,
            journaled_at: shared::util::now_millis(),
        };
        self.journal(&op)?;

        self.step(&op, "create", "insert_parent", || self.parents.insert_new(&parent))?;
        for child in &children {
            self.step(&op, "create", "insert_child", || self.children.insert_new(child))?;
        }

        self.clear(&op.op_id)?;
        Ok((parent, children))
    }

    /// Merge-update the parent, then destructively replace its children:
    /// every prior child is deleted and each submitted item is created
    /// fresh with a new id. Any child not resubmitted is lost.
    ///
    /// A missing parent fails `NotFound` before anything destructive runs.
    pub fn replace(
        &self,
        parent_id: &str,
        actor: &str,
        updater: impl FnOnce(&mut P),
        mut children: Vec<C>,
    ) -> StoreResult<(P, Vec<C>)> {
        let parent = self.parents.mutate(parent_id, actor, updater)?;

        let old_ids: Vec<String> = self
            .children
            .list_for_parent(parent_id)?
            .into_iter()
            .map(|child| child.id().to_string())
            .collect();

        let now = Utc::now();
        for child in &mut children {
            child.set_parent_id(parent_id.to_string());
            child.stamp_created(now, actor);
        }

        let op = PendingOp {
            op_id: shared::util::new_id(),
            operation: "replace".into(),
            parent_namespace: P::NAMESPACE.into(),
            parent: None,
            children: to_values(&children)?,
            delete_child_ids: old_ids,
            delete_parent_id: None,
            journaled_at: shared::util::now_millis(),
        };
        self.journal(&op)?;

        self.step(&op, "replace", "delete_old_children", || {
            self.children.delete_many(&op.delete_child_ids).map(|_| ())
        })?;
        for child in &children {
            self.step(&op, "replace", "insert_child", || self.children.insert_new(child))?;
        }

        self.clear(&op.op_id)?;
        Ok((parent, children))
    }

    /// Delete the parent and all of its children. Returns whether the
    /// parent existed; an absent parent is a no-op `false`.
    pub fn delete(&self, parent_id: &str) -> StoreResult<bool> {
        if !self.parents.exists(parent_id)? {
            return Ok(false);
        }

        let old_ids: Vec<String> = self
            .children
            .list_for_parent(parent_id)?
            .into_iter()
            .map(|child| child.id().to_string())
            .collect();

        let op = PendingOp {
            op_id: shared::util::new_id(),
            operation: "delete".into(),
            parent_namespace: P::NAMESPACE.into(),
            parent: None,
            children: Vec::new(),
            delete_child_ids: old_ids,
            delete_parent_id: Some(parent_id.to_string()),
            journaled_at: shared::util::now_millis(),
        };
        self.journal(&op)?;

        self.step(&op, "delete", "delete_children", || {
            self.children.delete_many(&op.delete_child_ids).map(|_| ())
        })?;
        let deleted = self.step(&op, "delete", "delete_parent", || self.parents.delete(parent_id))?;

        self.clear(&op.op_id)?;
        Ok(deleted)
    }

    fn journal(&self, op: &PendingOp) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(PENDING_OPS_TABLE)?;
            let value = serde_json::to_vec(op)?;
            table.insert(op.op_id.as_str(), value.as_slice())?;
        }
        txn.commit()?;
        Ok(())
    }

    fn clear(&self, op_id: &str) -> StoreResult<()> {
        let txn = self.store.begin_write()?;
        {
            let mut table = txn.open_table(PENDING_OPS_TABLE)?;
            table.remove(op_id)?;
        }
        txn.commit()?;
        Ok(())
    }

    /// Run one step of a journaled sequence, tagging failures with the
    /// operation and step so the partial state is visible, not silent.
    fn step<T>(
        &self,
        op: &PendingOp,
        operation: &'static str,
        step: &'static str,
        f: impl FnOnce() -> StoreResult<T>,
    ) -> StoreResult<T> {
        f().map_err(|source| {
            tracing::error!(
                op_id = %op.op_id,
                operation,
                step,
                error = %source,
                "aggregate step failed; journal entry retained for recovery"
            );
            StoreError::PartialAggregate {
                operation,
                step,
                source: Box::new(source),
            }
        })
    }
}

fn to_values<T: Serialize>(records: &[T]) -> StoreResult<Vec<Value>> {
    records
        .iter()
        .map(|record| Ok(serde_json::to_value(record)?))
        .collect()
}

/// Complete every journaled aggregate write left behind by a crash or a
/// mid-sequence failure, then drain the journal. Runs at startup, before
/// the server accepts requests. Returns the number of operations
/// completed.
pub fn recover_pending(store: &KvStore) -> StoreResult<usize> {
    let ops: Vec<PendingOp> = {
        let txn = store.begin_read()?;
        let table = txn.open_table(PENDING_OPS_TABLE)?;
        let mut ops = Vec::new();
        for entry in table.iter()? {
            let (_key, value) = entry?;
            ops.push(serde_json::from_slice(value.value())?);
        }
        ops
    };

    let mut recovered = 0;
    for op in &ops {
        match op.parent_namespace.as_str() {
            ns if ns == Sale::NAMESPACE => replay::<Sale, SaleItem>(store, op)?,
            ns if ns == SupplierOrder::NAMESPACE => {
                replay::<SupplierOrder, SupplierOrderItem>(store, op)?
            }
            other => {
                // A journal row from a namespace this build does not know
                // is unrecoverable; keep it for inspection rather than
                // guessing.
                tracing::warn!(op_id = %op.op_id, namespace = other, "unknown pending op skipped");
                continue;
            }
        }

        let txn = store.begin_write()?;
        {
            let mut table = txn.open_table(PENDING_OPS_TABLE)?;
            table.remove(op.op_id.as_str())?;
        }
        txn.commit()?;

        tracing::info!(
            op_id = %op.op_id,
            operation = %op.operation,
            namespace = %op.parent_namespace,
            "completed pending aggregate write"
        );
        recovered += 1;
    }
    Ok(recovered)
}

/// Apply one journal entry with idempotent primitives, so replaying an
/// already-applied step changes nothing.
fn replay<P: Entity, C: ChildEntity>(store: &KvStore, op: &PendingOp) -> StoreResult<()> {
    let parents = Repository::<P>::new(store.clone());
    let children = Repository::<C>::new(store.clone());

    children.delete_many(&op.delete_child_ids)?;
    if let Some(parent) = &op.parent {
        let parent: P = serde_json::from_value(parent.clone())?;
        parents.put(&parent)?;
    }
    for child in &op.children {
        let child: C = serde_json::from_value(child.clone())?;
        children.put(&child)?;
    }
    if let Some(parent_id) = &op.delete_parent_id {
        parents.delete(parent_id)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{
        PaymentMethod, SaleCreate, SaleItemPayload, SaleStatus, SaleUpdate,
    };
    use shared::util::new_id;

    fn writer(store: &KvStore) -> AggregateWriter<Sale, SaleItem> {
        AggregateWriter::new(store.clone())
    }

    fn sale() -> Sale {
        SaleCreate {
            client_id: None,
            sale_date: Utc::now(),
            total_amount: 30.0,
            payment_method: PaymentMethod::Cash,
            status: SaleStatus::Completed,
            notes: None,
        }
        .into_record(new_id())
    }

    fn item(product_id: &str) -> SaleItem {
        SaleItemPayload {
            product_id: product_id.to_string(),
            quantity: 1,
            unit_price: 10.0,
        }
        .into_record(new_id())
    }

    fn pending_count(store: &KvStore) -> usize {
        let txn = store.begin_read().unwrap();
        let table = txn.open_table(PENDING_OPS_TABLE).unwrap();
        table.iter().unwrap().count()
    }

    #[test]
    fn create_stamps_foreign_keys_on_every_child() {
        let store = KvStore::open_in_memory().unwrap();
        let (sale, items) = writer(&store)
            .create(sale(), vec![item("p1"), item("p2"), item("p3")], "user-1")
            .unwrap();

        assert_eq!(items.len(), 3);
        assert!(items.iter().all(|i| i.sale_id == sale.id));

        let stored = Repository::<SaleItem>::new(store.clone())
            .list_for_parent(&sale.id)
            .unwrap();
        assert_eq!(stored.len(), 3);
        assert_eq!(pending_count(&store), 0);
    }

    #[test]
    fn replace_discards_old_children_and_ids() {
        let store = KvStore::open_in_memory().unwrap();
        let w = writer(&store);
        let (sale, old_items) = w
            .create(sale(), vec![item("p1"), item("p2"), item("p3")], "user-1")
            .unwrap();

        let (_, new_items) = w
            .replace(
                &sale.id,
                "user-1",
                |s| {
                    SaleUpdate {
                        client_id: None,
                        sale_date: None,
                        total_amount: Some(12.0),
                        payment_method: None,
                        status: None,
                        notes: None,
                    }
                    .apply(s)
                },
                vec![item("p9")],
            )
            .unwrap();

        assert_eq!(new_items.len(), 1);
        let remaining = Repository::<SaleItem>::new(store.clone())
            .list_for_parent(&sale.id)
            .unwrap();
        assert_eq!(remaining.len(), 1);
        assert!(old_items.iter().all(|old| old.id != remaining[0].id));

        let stored = Repository::<Sale>::new(store.clone()).get(&sale.id).unwrap();
        assert_eq!(stored.total_amount, 12.0);
        assert_eq!(pending_count(&store), 0);
    }

    #[test]
    fn replace_missing_parent_is_not_found_and_harmless() {
        let store = KvStore::open_in_memory().unwrap();
        let err = writer(&store)
            .replace("absent", "user-1", |_| {}, vec![item("p1")])
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert_eq!(pending_count(&store), 0);
    }

    #[test]
    fn delete_removes_parent_and_children() {
        let store = KvStore::open_in_memory().unwrap();
        let w = writer(&store);
        let (sale, _) = w
            .create(sale(), vec![item("p1"), item("p2")], "user-1")
            .unwrap();

        assert!(w.delete(&sale.id).unwrap());
        assert!(!Repository::<Sale>::new(store.clone()).exists(&sale.id).unwrap());
        assert!(
            Repository::<SaleItem>::new(store.clone())
                .list_for_parent(&sale.id)
                .unwrap()
                .is_empty()
        );

        assert!(!w.delete(&sale.id).unwrap());
        assert_eq!(pending_count(&store), 0);
    }

    #[test]
    fn recover_completes_a_journaled_create() {
        let store = KvStore::open_in_memory().unwrap();

        // A create that crashed after journaling but before any step ran
        let mut parent = sale();
        parent.stamp_created(Utc::now(), "user-1");
        let mut child = item("p1");
        child.set_parent_id(parent.id.clone());
        child.stamp_created(Utc::now(), "user-1");

        let op = PendingOp {
            op_id: new_id(),
            operation: "create".into(),
            parent_namespace: Sale::NAMESPACE.into(),
            parent: Some(serde_json::to_value(&parent).unwrap()),
            children: vec![serde_json::to_value(&child).unwrap()],
            delete_child_ids: Vec::new(),
            delete_parent_id: None,
            journaled_at: shared::util::now_millis(),
        };
        let txn = store.begin_write().unwrap();
        {
            let mut table = txn.open_table(PENDING_OPS_TABLE).unwrap();
            let value = serde_json::to_vec(&op).unwrap();
            table.insert(op.op_id.as_str(), value.as_slice()).unwrap();
        }
        txn.commit().unwrap();

        assert_eq!(recover_pending(&store).unwrap(), 1);
        assert_eq!(pending_count(&store), 0);

        let sales = Repository::<Sale>::new(store.clone());
        assert!(sales.exists(&parent.id).unwrap());
        let items = Repository::<SaleItem>::new(store.clone())
            .list_for_parent(&parent.id)
            .unwrap();
        assert_eq!(items.len(), 1);

        // Replay is idempotent even if the crash hit after the parent step
        assert_eq!(recover_pending(&store).unwrap(), 0);
    }

    #[test]
    fn recover_completes_a_journaled_replace() {
        let store = KvStore::open_in_memory().unwrap();
        let w = writer(&store);
        let (sale, old_items) = w
            .create(sale(), vec![item("p1"), item("p2")], "user-1")
            .unwrap();

        // A replace that crashed between journal commit and the delete step
        let mut new_child = item("p7");
        new_child.set_parent_id(sale.id.clone());
        new_child.stamp_created(Utc::now(), "user-1");
        let op = PendingOp {
            op_id: new_id(),
            operation: "replace".into(),
            parent_namespace: Sale::NAMESPACE.into(),
            parent: None,
            children: vec![serde_json::to_value(&new_child).unwrap()],
            delete_child_ids: old_items.iter().map(|i| i.id.clone()).collect(),
            delete_parent_id: None,
            journaled_at: shared::util::now_millis(),
        };
        let txn = store.begin_write().unwrap();
        {
            let mut table = txn.open_table(PENDING_OPS_TABLE).unwrap();
            let value = serde_json::to_vec(&op).unwrap();
            table.insert(op.op_id.as_str(), value.as_slice()).unwrap();
        }
        txn.commit().unwrap();

        assert_eq!(recover_pending(&store).unwrap(), 1);

        let items = Repository::<SaleItem>::new(store.clone())
            .list_for_parent(&sale.id)
            .unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, new_child.id);
    }
}
