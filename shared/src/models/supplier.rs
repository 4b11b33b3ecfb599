//! Supplier Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Goods supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_by: String,
}

/// Create supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierCreate {
    pub name: String,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SupplierCreate {
    /// Build the full record. Timestamps and attribution are placeholders
    /// here; the repository stamps them on write.
    pub fn into_record(self, id: String) -> Supplier {
        let now = Utc::now();
        Supplier {
            id,
            name: self.name,
            contact_name: self.contact_name,
            email: self.email,
            phone: self.phone,
            address: self.address,
            created_at: now,
            updated_at: now,
            created_by: String::new(),
            updated_by: String::new(),
        }
    }
}

/// Update supplier payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierUpdate {
    pub name: Option<String>,
    pub contact_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl SupplierUpdate {
    /// Merge the supplied fields into an existing record.
    pub fn apply(self, supplier: &mut Supplier) {
        if let Some(name) = self.name {
            supplier.name = name;
        }
        if let Some(contact_name) = self.contact_name {
            supplier.contact_name = Some(contact_name);
        }
        if let Some(email) = self.email {
            supplier.email = Some(email);
        }
        if let Some(phone) = self.phone {
            supplier.phone = Some(phone);
        }
        if let Some(address) = self.address {
            supplier.address = Some(address);
        }
    }
}
