//! Classification of PostgreSQL errors.

/// Unique constraints guarding generated keys.
const KEY_CONSTRAINTS: &[&str] = &["urls_key_key", "urls_secret_key_key"];

/// Returns true if `e` is a unique violation on the `key` or `secret_key` column.
pub fn is_unique_violation_on_key(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    db_err
        .constraint()
        .is_some_and(|name| KEY_CONSTRAINTS.contains(&name))
}

/// Returns true if `e` means the database could not be reached at all,
/// as opposed to a statement failing once it got there.
pub fn is_connectivity_error(e: &sqlx::Error) -> bool {
    matches!(
        e,
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
    )
}
