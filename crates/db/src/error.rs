use chatflow_core::error::CoreError;

/// Failure of a repository operation that validates as well as persists.
///
/// Plain CRUD methods return `sqlx::Error` directly; methods that run
/// domain checks inside a transaction (reorder, append, typed update)
/// return this so callers can tell a rejected request from a database fault.
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Whether `err` is a unique violation (SQLSTATE 23505) on `constraint`.
pub fn is_unique_violation(err: &sqlx::Error, constraint: &str) -> bool {
    match err {
        sqlx::Error::Database(db_err) => {
            db_err.code().as_deref() == Some("23505") && db_err.constraint() == Some(constraint)
        }
        _ => false,
    }
}
