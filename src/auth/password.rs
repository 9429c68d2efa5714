//! Password hashing and verification with bcrypt.
//!
//! The cost and salt are embedded in every hash string, so verification reads
//! them back from the stored hash rather than assuming [`COST`]. bcrypt only
//! looks at the first [`MAX_PASSWORD_BYTES`] bytes of a password.

use std::sync::LazyLock;

/// Work factor for newly created hashes.
pub const COST: u32 = 10;

/// Input bytes bcrypt actually reads; anything past this is ignored.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Stand-in hash checked when a login names no account, so that path costs
/// the same bcrypt work as a wrong password.
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash("clinic-auth:no-such-account").ok());

#[derive(Debug)]
pub enum PasswordError {
    /// The stored hash is not a bcrypt encoding (prefix, cost, salt, digest).
    MalformedHash(String),
    Hashing(String),
}

impl std::fmt::Display for PasswordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PasswordError::MalformedHash(msg) => write!(f, "Malformed password hash: {msg}"),
            PasswordError::Hashing(msg) => write!(f, "Hashing failed: {msg}"),
        }
    }
}

impl std::error::Error for PasswordError {}

/// Hash a password with a fresh random salt at [`COST`].
pub fn hash(password: &str) -> Result<String, PasswordError> {
    bcrypt::hash(password, COST).map_err(|e| PasswordError::Hashing(e.to_string()))
}

/// Verify a password against a stored hash.
pub fn verify(password: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(password, hash).map_err(|e| PasswordError::MalformedHash(e.to_string()))
}

/// [`hash`] on the blocking thread pool.
pub async fn hash_blocking(password: String) -> Result<String, PasswordError> {
    tokio::task::spawn_blocking(move || hash(&password))
        .await
        .map_err(|e| PasswordError::Hashing(format!("Hashing task failed: {e}")))?
}

/// [`verify`] on the blocking thread pool.
pub async fn verify_blocking(password: String, hash: String) -> Result<bool, PasswordError> {
    tokio::task::spawn_blocking(move || verify(&password, &hash))
        .await
        .map_err(|e| PasswordError::Hashing(format!("Verification task failed: {e}")))?
}

/// Spend one verification's worth of work against [`DUMMY_HASH`], on the
/// blocking pool. The outcome is discarded.
pub async fn verify_dummy(password: String) {
    let outcome = tokio::task::spawn_blocking(move || {
        DUMMY_HASH.as_ref().map(|dummy| verify(&password, dummy))
    })
    .await;

    match outcome {
        Ok(Some(Err(e))) => tracing::warn!("Dummy password verification failed: {e}"),
        Err(e) => tracing::warn!("Dummy verification task failed: {e}"),
        Ok(_) => {}
    }
}
