pub mod auth;
pub mod users;

use axum::Router;
use axum::routing::{get, post};

use crate::auth::password::MAX_PASSWORD_BYTES;
use crate::error::AppError;
use crate::state::SharedState;

const MIN_PASSWORD_LEN: usize = 8;

pub fn api_routes() -> Router<SharedState> {
    Router::new()
        // Auth
        .route("/api/v1/auth/register", post(auth::register))
        .route("/api/v1/auth/login", post(auth::login))
        .route("/api/v1/auth/me", get(auth::me))
        // Users
        .route("/api/v1/users", post(users::create))
        .route("/api/v1/users/{id}", get(users::get))
}

/// Request-level checks. Email format is deliberately left to the caller.
pub(crate) fn validate_account(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
) -> Result<(), AppError> {
    if [first_name, last_name, email, password]
        .iter()
        .any(|field| field.trim().is_empty())
    {
        return Err(AppError::BadRequest("All fields are required".to_string()));
    }

    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }

    // bcrypt would silently ignore the tail, letting distinct passwords match
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(AppError::BadRequest(format!(
            "Password must be at most {MAX_PASSWORD_BYTES} bytes"
        )));
    }

    Ok(())
}
