/// Database layer
///
/// # Modules
///
/// - `pool`: PostgreSQL connection pool with health check
/// - `migrations`: sqlx migration runner
///
/// Models live in the `models` module at crate root.

pub mod migrations;
pub mod pool;
