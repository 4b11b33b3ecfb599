//! Sale Model
//!
//! A sale is an aggregate: one `Sale` parent plus a variable number of
//! `SaleItem` children referencing it through `saleId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// How a sale was paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Transfer,
}

/// Sale lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    Pending,
    Completed,
    Cancelled,
}

/// Sale record (aggregate parent)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    /// Client reference (String ID), absent for walk-in sales
    pub client_id: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sale line item (aggregate child)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    /// Parent sale reference (String ID)
    pub sale_id: String,
    /// Product reference (String ID)
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Create sale payload (parent part of the aggregate request)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleCreate {
    pub client_id: Option<String>,
    pub sale_date: DateTime<Utc>,
    pub total_amount: f64,
    pub payment_method: PaymentMethod,
    pub status: SaleStatus,
    pub notes: Option<String>,
}

impl SaleCreate {
    /// Build the full record. Timestamps are placeholders here; the
    /// aggregate writer stamps them on write.
    pub fn into_record(self, id: String) -> Sale {
        let now = Utc::now();
        Sale {
            id,
            client_id: self.client_id,
            sale_date: self.sale_date,
            total_amount: self.total_amount,
            payment_method: self.payment_method,
            status: self.status,
            notes: self.notes,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Update sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleUpdate {
    pub client_id: Option<String>,
    pub sale_date: Option<DateTime<Utc>>,
    pub total_amount: Option<f64>,
    pub payment_method: Option<PaymentMethod>,
    pub status: Option<SaleStatus>,
    pub notes: Option<String>,
}

impl SaleUpdate {
    /// Merge the supplied fields into an existing record.
    pub fn apply(self, sale: &mut Sale) {
        if let Some(client_id) = self.client_id {
            sale.client_id = Some(client_id);
        }
        if let Some(sale_date) = self.sale_date {
            sale.sale_date = sale_date;
        }
        if let Some(total_amount) = self.total_amount {
            sale.total_amount = total_amount;
        }
        if let Some(payment_method) = self.payment_method {
            sale.payment_method = payment_method;
        }
        if let Some(status) = self.status {
            sale.status = status;
        }
        if let Some(notes) = self.notes {
            sale.notes = Some(notes);
        }
    }
}

/// Line item payload (child part of the aggregate request).
///
/// Used for both aggregate create and aggregate replace; replaced items
/// always get fresh IDs, so there is no separate update payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItemPayload {
    pub product_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

impl SaleItemPayload {
    /// Build the full record. `saleId` and timestamps are filled in by
    /// the aggregate writer.
    pub fn into_record(self, id: String) -> SaleItem {
        let now = Utc::now();
        SaleItem {
            id,
            sale_id: String::new(),
            product_id: self.product_id,
            quantity: self.quantity,
            unit_price: self.unit_price,
            created_at: now,
            updated_at: now,
        }
    }
}
