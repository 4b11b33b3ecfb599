//! Tally Server - small-business inventory/sales/finance back end
//!
//! REST endpoints for products, categories, clients, suppliers, supplier
//! orders, sales and transactions over a generic typed persistence layer.
//!
//! # Module structure
//!
//! ```text
//! tally-server/src/
//! ├── core/          # Config, state, server lifecycle
//! ├── db/            # KvStore, entity traits, repository, seeding, aggregates
//! ├── api/           # HTTP routes and handlers (one module per resource)
//! ├── routes/        # Router assembly and request-logging middleware
//! └── utils/         # Error envelope, logging setup
//! ```

pub mod api;
pub mod core;
pub mod db;
pub mod routes;
pub mod utils;

// Re-export public types
pub use self::core::{Config, Server, ServerState};
pub use db::{AggregateWriter, Entity, KvStore, Page, Repository, StoreError};
pub use utils::{AppError, AppResult};

/// Load `.env` and initialize logging. Must run before anything logs.
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();
    utils::logger::init_logger(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
  ______        ____
 /_  __/____ _ / / /_  __
  / /  / __ `// / / / / /
 / /  / /_/ // / / /_/ /
/_/   \__,_//_/_/\__, /
                /____/
    "#
    );
}
