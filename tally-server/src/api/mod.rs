//! API route modules
//!
//! One module per resource, each with a `router()` nesting its routes
//! under `/api/<resource>` and a `handler` submodule. Handlers are thin:
//! build the typed record or patch from the payload, delegate to the
//! repository or aggregate writer, return the stored result as JSON.
//!
//! - [`health`] - liveness (public, outside `/api`)
//! - [`products`], [`clients`], [`suppliers`], [`transactions`] - plain CRUD
//! - [`categories`], [`transaction_categories`] - read-only seeded reference data
//! - [`sales`], [`supplier_orders`] - parent+line-item aggregates

use serde::{Deserialize, Serialize};

pub mod categories;
pub mod clients;
pub mod health;
pub mod products;
pub mod sales;
pub mod supplier_orders;
pub mod suppliers;
pub mod transaction_categories;
pub mod transactions;

/// Default page size when the query omits `limit`
pub const DEFAULT_PAGE_LIMIT: usize = 100;

/// Query parameters accepted by every list route
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Last id of the previous page; listing resumes after it
    pub cursor: Option<String>,
    pub limit: Option<usize>,
}

impl ListParams {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_PAGE_LIMIT)
    }
}

/// Response body of every delete route
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub id: String,
    pub deleted: bool,
}
