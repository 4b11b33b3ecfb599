//! Entity bindings
//!
//! [`Entity`] binds each shared record type to its table namespace and
//! centralizes stamping: the repository (not the route handlers) sets
//! `createdAt`/`updatedAt` and the attribution fields, so every kind gets
//! the same behavior and caller-supplied values for those fields are
//! always overwritten. [`ChildEntity`] adds the parent foreign key
//! accessors the aggregate writer needs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde::de::DeserializeOwned;

use shared::models::{
    Category, Client, Product, Sale, SaleItem, Supplier, SupplierOrder, SupplierOrderItem,
    Transaction, TransactionCategory, TransactionKind,
};

/// All record namespaces, used to create tables up front
pub(crate) const NAMESPACES: [&str; 10] = [
    Product::NAMESPACE,
    Category::NAMESPACE,
    Client::NAMESPACE,
    Supplier::NAMESPACE,
    Sale::NAMESPACE,
    SaleItem::NAMESPACE,
    SupplierOrder::NAMESPACE,
    SupplierOrderItem::NAMESPACE,
    Transaction::NAMESPACE,
    TransactionCategory::NAMESPACE,
];

/// A record kind stored under its own key namespace
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table name; never collides across kinds
    const NAMESPACE: &'static str;

    fn id(&self) -> &str;
    fn updated_at(&self) -> DateTime<Utc>;

    /// Stamp creation time and attribution. Kinds without attribution
    /// fields ignore `actor`.
    fn stamp_created(&mut self, at: DateTime<Utc>, actor: &str);

    /// Stamp mutation time and attribution
    fn stamp_updated(&mut self, at: DateTime<Utc>, actor: &str);

    /// Restore the fields a mutate updater must not change (`id`,
    /// `createdAt`, creation attribution) from the stored record.
    fn restore_immutable(&mut self, prior: &Self);

    /// Baseline records written once by the seed initializer.
    /// Transactional kinds seed empty.
    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// A record kind that only exists as a line item of a parent record
pub trait ChildEntity: Entity {
    fn parent_id(&self) -> &str;
    fn set_parent_id(&mut self, parent_id: String);
}

impl Entity for Product {
    const NAMESPACE: &'static str = "products";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, actor: &str) {
        self.created_at = at;
        self.updated_at = at;
        self.created_by = actor.to_string();
        self.updated_by = actor.to_string();
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, actor: &str) {
        self.updated_at = at;
        self.updated_by = actor.to_string();
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
        self.created_by = prior.created_by.clone();
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now();
        vec![
            Product {
                id: "prod-espresso-machine".into(),
                name: "Espresso Machine".into(),
                sku: "EM-1000".into(),
                description: Some("Counter-top espresso machine".into()),
                price: 549.0,
                stock: 12,
                min_stock: 3,
                category_id: Some("cat-appliances".into()),
                supplier_id: Some("sup-acme-wholesale".into()),
                created_at: now,
                updated_at: now,
                created_by: String::new(),
                updated_by: String::new(),
            },
            Product {
                id: "prod-coffee-beans-1kg".into(),
                name: "Coffee Beans 1kg".into(),
                sku: "CB-0001".into(),
                description: None,
                price: 18.5,
                stock: 140,
                min_stock: 25,
                category_id: Some("cat-consumables".into()),
                supplier_id: Some("sup-acme-wholesale".into()),
                created_at: now,
                updated_at: now,
                created_by: String::new(),
                updated_by: String::new(),
            },
        ]
    }
}

impl Entity for Category {
    const NAMESPACE: &'static str = "categories";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now();
        [
            ("cat-appliances", "Appliances", Some("Machines and equipment")),
            ("cat-consumables", "Consumables", None),
            ("cat-office", "Office Supplies", None),
        ]
        .into_iter()
        .map(|(id, name, description)| Category {
            id: id.into(),
            name: name.into(),
            description: description.map(Into::into),
            created_at: now,
            updated_at: now,
        })
        .collect()
    }
}

impl Entity for Client {
    const NAMESPACE: &'static str = "clients";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, actor: &str) {
        self.created_at = at;
        self.updated_at = at;
        self.created_by = actor.to_string();
        self.updated_by = actor.to_string();
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, actor: &str) {
        self.updated_at = at;
        self.updated_by = actor.to_string();
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
        self.created_by = prior.created_by.clone();
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now();
        vec![Client {
            id: "cli-walkin".into(),
            name: "Walk-in Customer".into(),
            email: None,
            phone: None,
            address: None,
            registration_date: now,
            created_at: now,
            updated_at: now,
            created_by: String::new(),
            updated_by: String::new(),
        }]
    }
}

impl Entity for Supplier {
    const NAMESPACE: &'static str = "suppliers";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, actor: &str) {
        self.created_at = at;
        self.updated_at = at;
        self.created_by = actor.to_string();
        self.updated_by = actor.to_string();
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, actor: &str) {
        self.updated_at = at;
        self.updated_by = actor.to_string();
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
        self.created_by = prior.created_by.clone();
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now();
        vec![Supplier {
            id: "sup-acme-wholesale".into(),
            name: "Acme Wholesale".into(),
            contact_name: Some("J. Doe".into()),
            email: Some("orders@acme-wholesale.example".into()),
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
            created_by: String::new(),
            updated_by: String::new(),
        }]
    }
}

impl Entity for Sale {
    const NAMESPACE: &'static str = "sales";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }
}

impl Entity for SaleItem {
    const NAMESPACE: &'static str = "sale_items";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }
}

impl ChildEntity for SaleItem {
    fn parent_id(&self) -> &str {
        &self.sale_id
    }

    fn set_parent_id(&mut self, parent_id: String) {
        self.sale_id = parent_id;
    }
}

impl Entity for SupplierOrder {
    const NAMESPACE: &'static str = "supplier_orders";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }
}

impl Entity for SupplierOrderItem {
    const NAMESPACE: &'static str = "supplier_order_items";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }
}

impl ChildEntity for SupplierOrderItem {
    fn parent_id(&self) -> &str {
        &self.supplier_order_id
    }

    fn set_parent_id(&mut self, parent_id: String) {
        self.supplier_order_id = parent_id;
    }
}

impl Entity for Transaction {
    const NAMESPACE: &'static str = "transactions";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }
}

impl Entity for TransactionCategory {
    const NAMESPACE: &'static str = "transaction_categories";

    fn id(&self) -> &str {
        &self.id
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    fn stamp_created(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.created_at = at;
        self.updated_at = at;
    }

    fn stamp_updated(&mut self, at: DateTime<Utc>, _actor: &str) {
        self.updated_at = at;
    }

    fn restore_immutable(&mut self, prior: &Self) {
        self.id = prior.id.clone();
        self.created_at = prior.created_at;
    }

    fn seed() -> Vec<Self> {
        let now = Utc::now();
        [
            ("txc-sales", "Sales", TransactionKind::Income),
            ("txc-other-income", "Other Income", TransactionKind::Income),
            ("txc-purchases", "Purchases", TransactionKind::Expense),
            ("txc-rent", "Rent", TransactionKind::Expense),
        ]
        .into_iter()
        .map(|(id, name, kind)| TransactionCategory {
            id: id.into(),
            name: name.into(),
            kind,
            created_at: now,
            updated_at: now,
        })
        .collect()
    }
}
