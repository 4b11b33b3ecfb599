//! Data models
//!
//! Shared between tally-server and frontend (via API).
//! Every record carries a string UUID `id` plus `createdAt`/`updatedAt`
//! stamps; Product, Client and Supplier additionally carry
//! `createdBy`/`updatedBy` attribution. Create/Update payload types sit
//! next to their record type.

pub mod category;
pub mod client;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod supplier_order;
pub mod transaction;

// Re-exports
pub use category::*;
pub use client::*;
pub use product::*;
pub use sale::*;
pub use supplier::*;
pub use supplier_order::*;
pub use transaction::*;
