pub mod memory;
pub mod users;

use async_trait::async_trait;

use crate::models::{NewUser, User, UserId};

pub use memory::MemoryUserStore;
pub use users::PgUserStore;

/// Durable home of user records.
///
/// Every operation is a single statement against the backing store. Lookups
/// report a missing user as `Ok(None)`; errors are reserved for the store
/// itself misbehaving.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user and return the identifier the store assigned to it.
    async fn create_user(&self, user: &NewUser) -> Result<UserId, StoreError>;

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>, StoreError>;
}

#[derive(Debug)]
pub enum StoreError {
    /// The email is already taken. Raised by the store's unique constraint.
    DuplicateKey(String),
    /// The record breaks a schema constraint other than uniqueness
    /// (for instance an empty name or email).
    Constraint(String),
    /// The store or its pool could not be reached.
    Connection(String),
    /// A persisted row carries a role outside the known set.
    InvalidRole(String),
    Database(sqlx::Error),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::DuplicateKey(msg) => write!(f, "Duplicate key: {msg}"),
            StoreError::Constraint(msg) => write!(f, "Constraint violation: {msg}"),
            StoreError::Connection(msg) => write!(f, "Connection error: {msg}"),
            StoreError::InvalidRole(role) => write!(f, "Invalid role in store: {role}"),
            StoreError::Database(err) => write!(f, "Database error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Database(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                StoreError::DuplicateKey(db_err.message().to_string())
            }
            sqlx::Error::Database(ref db_err) if db_err.is_check_violation() => {
                StoreError::Constraint(db_err.message().to_string())
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => StoreError::Connection(err.to_string()),
            _ => StoreError::Database(err),
        }
    }
}
