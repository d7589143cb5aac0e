//! Embedded PostgreSQL databases for the storage integration suites.
//!
//! Every test gets its own temporary database on a cluster shared by the test
//! binary, with the embedded migrations applied. Setup and teardown run
//! outside any Tokio runtime; async work goes through [`TestDatabase::block_on`].

use std::future::Future;

use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use roster::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use tokio::runtime::Runtime;

use super::cluster_skip::handle_cluster_setup_failure;

/// A migrated temporary database plus a runtime and pool bound to it.
///
/// Field order matters: the pool closes before the database is dropped.
pub struct TestDatabase {
    pool: DbPool,
    runtime: Runtime,
    _database: TemporaryDatabase,
}

impl TestDatabase {
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drive `future` to completion on the database's runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

/// Keeps `PG_PASSWORD` stable so a reused data directory still accepts the
/// password it was initialised with.
fn ensure_stable_password() {
    if std::env::var_os("PG_PASSWORD").is_none() {
        // SAFETY: runs before the cluster bootstrap spawns any threads.
        unsafe {
            std::env::set_var("PG_PASSWORD", "roster_embedded_test");
        }
    }
}

fn shared_cluster() -> Result<&'static ClusterHandle, String> {
    ensure_stable_password();
    pg_embedded_setup_unpriv::test_support::shared_cluster_handle()
        .map_err(|err| format!("bootstrap embedded cluster: {err:?}"))
}

fn provision_database(cluster: &ClusterHandle) -> Result<TemporaryDatabase, String> {
    let name = format!("roster_test_{}", uuid::Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create temporary database: {err:?}"))?;
    run_pending_migrations(database.url()).map_err(|err| format!("migrations: {err}"))?;
    Ok(database)
}

fn setup_test_database() -> Result<TestDatabase, String> {
    assert!(
        tokio::runtime::Handle::try_current().is_err(),
        "set up test databases outside a Tokio runtime"
    );
    let cluster = shared_cluster()?;
    let database = provision_database(cluster)?;
    let runtime = Runtime::new().map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database.url())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(TestDatabase {
        pool,
        runtime,
        _database: database,
    })
}

/// A fresh migrated database, or `None` when cluster setup failed and
/// `SKIP_TEST_CLUSTER` allows skipping.
pub fn test_database() -> Option<TestDatabase> {
    match setup_test_database() {
        Ok(database) => Some(database),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_password_keeps_an_existing_value() {
        let _guard = env_lock::lock_env([("PG_PASSWORD", Some("custom_value"))]);
        ensure_stable_password();
        assert_eq!(
            std::env::var("PG_PASSWORD").expect("PG_PASSWORD is set"),
            "custom_value"
        );
    }
}
