// src/db/mod.rs
//
// Database module
//
// Provides:
// - Connection pooling
// - Schema setup and teardown
// - Database utilities

pub mod connection;
pub mod migrations;

pub use connection::{create_connection_pool, get_connection, ConnectionPool, PooledConn};

pub use migrations::{
    get_database_stats, initialize_database, reset_database, verify_database_integrity,
    DatabaseStats,
};

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use tempfile::TempDir;

    use super::{create_connection_pool, initialize_database, ConnectionPool};

    /// File-backed pool with the schema applied.
    ///
    /// Every pooled connection must see the same data, which an in-memory
    /// database cannot give us. Keep the `TempDir` alive for the test.
    pub fn setup_test_pool() -> (Arc<ConnectionPool>, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let pool = create_connection_pool(&temp_dir.path().join("test.db"), 4).unwrap();
        {
            let conn = pool.get().unwrap();
            initialize_database(&conn).unwrap();
        }
        (Arc::new(pool), temp_dir)
    }
}
