//! Product Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory product
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: f64,
    /// Units on hand
    pub stock: i64,
    /// Reorder threshold
    pub min_stock: i64,
    /// Category reference (String ID)
    pub category_id: Option<String>,
    /// Supplier reference (String ID)
    pub supplier_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub price: f64,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub category_id: Option<String>,
    pub supplier_id: Option<String>,
}

impl ProductCreate {
    /// Build the full record. Timestamps and attribution are placeholders
    /// here; the repository stamps them on write.
    pub fn into_record(self, id: String) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: self.name,
            sku: self.sku,
            description: self.description,
            price: self.price,
            stock: self.stock.unwrap_or(0),
            min_stock: self.min_stock.unwrap_or(0),
            category_id: self.category_id,
            supplier_id: self.supplier_id,
            created_at: now,
            updated_at: now,
            created_by: String::new(),
            updated_by: String::new(),
        }
    }
}

/// Update product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub sku: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<i64>,
    pub min_stock: Option<i64>,
    pub category_id: Option<String>,
    pub supplier_id: Option<String>,
}

impl ProductUpdate {
    /// Merge the supplied fields into an existing record.
    pub fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(sku) = self.sku {
            product.sku = sku;
        }
        if let Some(description) = self.description {
            product.description = Some(description);
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        if let Some(min_stock) = self.min_stock {
            product.min_stock = min_stock;
        }
        if let Some(category_id) = self.category_id {
            product.category_id = Some(category_id);
        }
        if let Some(supplier_id) = self.supplier_id {
            product.supplier_id = Some(supplier_id);
        }
    }
}
