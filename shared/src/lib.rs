//! Shared types for the Tally back end
//!
//! Domain record types, create/update payloads, and small utilities used
//! by the server crate and its tests. All wire types serialize as
//! camelCase JSON with ISO-8601 timestamps.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
