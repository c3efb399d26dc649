/// Database models for taskboard
///
/// Each model is a `sqlx::FromRow` struct with its CRUD queries attached as
/// static methods. Ownership-scoped lookups (`find_by_id_and_owner`) are the
/// authorization gate: a row that exists but belongs to someone else is
/// indistinguishable from a row that does not exist.
///
/// # Models
///
/// - `user`: accounts; owns boards
/// - `board`: a named collection of tasks, owned by exactly one user
/// - `task`: a unit of work on a board; its effective owner is the board's owner

pub mod board;
pub mod task;
pub mod user;
