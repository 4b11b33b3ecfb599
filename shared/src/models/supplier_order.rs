//! Supplier Order Model
//!
//! A supplier order is an aggregate: one `SupplierOrder` parent plus a
//! variable number of `SupplierOrderItem` children referencing it through
//! `supplierOrderId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Supplier order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupplierOrderStatus {
    Pending,
    Shipped,
    Received,
    Cancelled,
}

/// Purchase order placed with a supplier (aggregate parent)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrder {
    pub id: String,
    /// Supplier reference (String ID)
    pub supplier_id: String,
    pub order_date: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub status: SupplierOrderStatus,
    pub total_amount: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Supplier order line item (aggregate child)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderItem {
    pub id: String,
    /// Parent order reference (String ID)
    pub supplier_order_id: String,
    /// Product reference (String ID)
    pub product_id: String,
    pub quantity: i64,
    pub unit_cost: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create supplier order payload (parent part of the aggregate request)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderCreate {
    pub supplier_id: String,
    pub order_date: DateTime<Utc>,
    pub expected_delivery: Option<DateTime<Utc>>,
    pub status: SupplierOrderStatus,
    pub total_amount: f64,
}

impl SupplierOrderCreate {
    /// Build the full record. Timestamps are placeholders here; the
    /// aggregate writer stamps them on write.
    pub fn into_record(self, id: String) -> SupplierOrder {
        let now = Utc::now();
        SupplierOrder {
            id,
            supplier_id: self.supplier_id,
            order_date: self.order_date,
            expected_delivery: self.expected_delivery,
            status: self.status,
            total_amount: self.total_amount,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Line item payload (child part of the aggregate request)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOrderItemPayload {
    pub product_id: String,
    pub quantity: i64,
    pub unit_cost: f64,
}

impl SupplierOrderItemPayload {
    /// Build the full record. `supplierOrderId` and timestamps are filled
    /// in by the aggregate writer.
    pub fn into_record(self, id: String) -> SupplierOrderItem {
        let now = Utc::now();
        SupplierOrderItem {
            id,
            supplier_order_id: String::new(),
            product_id: self.product_id,
            quantity: self.quantity,
            unit_cost: self.unit_cost,
            created_at: now,
            updated_at: now,
        }
    }
}
