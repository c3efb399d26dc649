/// Database access layer
///
/// This module owns PostgreSQL connectivity:
///
/// - `pool`: connection pool construction and health checking
/// - `migrations`: embedded schema migrations

pub mod migrations;
pub mod pool;
