//! Server state
//!
//! [`ServerState`] is the per-request handle handlers receive through
//! axum's `State` extractor: the immutable config plus the cloneable
//! store handle. Repositories and aggregate writers are stateless, so
//! handlers construct them on demand from the store.

use crate::core::{Config, Result};
use crate::db::{self, KvStore};

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Key-value store handle (Arc inside, cheap to clone)
    pub store: KvStore,
}

impl ServerState {
    pub fn new(config: Config, store: KvStore) -> Self {
        Self { config, store }
    }

    /// Initialize the server state:
    ///
    /// 1. Ensure the work directory structure exists
    /// 2. Open the database at `work_dir/database/tally.db`
    /// 3. Seed every namespace (idempotent, marker-guarded)
    /// 4. Complete any aggregate writes left pending by a crash
    ///
    /// Any failure here is fatal; the process must not serve on a store
    /// that failed to seed or recover.
    pub fn initialize(config: &Config) -> Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("tally.db");
        let store = KvStore::open(&db_path)?;
        tracing::info!(path = %db_path.display(), "database opened");

        let state = Self::new(config.clone(), store);
        state.bootstrap()?;
        Ok(state)
    }

    /// Seed and recover on an already-open store. Split out so tests can
    /// run it against an in-memory database.
    pub fn bootstrap(&self) -> Result<()> {
        db::ensure_all(&self.store, &self.config.default_actor)?;

        let recovered = db::recover_pending(&self.store)?;
        if recovered > 0 {
            tracing::warn!(recovered, "completed pending aggregate writes from previous run");
        }
        Ok(())
    }
}
