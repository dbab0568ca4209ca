/// Database layer for taskledger
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health check and graceful close
/// - `migrations`: embedded migration runner
///
/// Store implementations over the pool live in [`crate::store::postgres`].

pub mod migrations;
pub mod pool;
