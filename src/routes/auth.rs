use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};

use crate::auth::extractor::AuthUser;
use crate::auth::jwt::{Claims, encode_token};
use crate::auth::password;
use crate::config::RegistrationMode;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{NewUser, Role, User};
use crate::routes::validate_account;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

fn issue_token(state: &SharedState, user: &User) -> Result<String, AppError> {
    let claims = Claims::new(user, state.config.token_ttl_minutes);
    encode_token(&claims, &state.config.jwt_secret).map_err(AppError::Internal)
}

/// Patient self-registration.
pub async fn register(
    State(state): State<SharedState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.config.registration == RegistrationMode::Closed {
        return Err(AppError::Forbidden(
            "Registration is disabled. Ask the front desk to create your account.".to_string(),
        ));
    }

    validate_account(&req.first_name, &req.last_name, &req.email, &req.password)?;

    let password_hash = password::hash_blocking(req.password).await?;
    let new_user = NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password_hash,
        role: Role::Patient,
    };

    let id = state.users.create_user(&new_user).await?;
    let user = new_user.into_user(id);

    audit::log_event(Some(user.id), "user.registered", Some(user.id), Some(user.role));

    let access_token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { access_token, user }))
}

pub async fn login(
    State(state): State<SharedState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    if state.login_limiter.check(&req.email).is_err() {
        return Err(AppError::RateLimited(
            "Too many login attempts. Please try again later.".to_string(),
        ));
    }

    let Some(user) = state.users.get_user_by_email(&req.email).await? else {
        password::verify_dummy(req.password).await;
        state.login_limiter.record_failure(&req.email);
        audit::log_event(None, "user.login_failed", None, None);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    };

    let valid = password::verify_blocking(req.password, user.password_hash.clone()).await?;

    if !valid {
        state.login_limiter.record_failure(&req.email);
        audit::log_event(None, "user.login_failed", Some(user.id), None);
        return Err(AppError::Unauthorized("Invalid credentials".to_string()));
    }

    state.login_limiter.reset(&req.email);
    audit::log_event(Some(user.id), "user.login", Some(user.id), Some(user.role));

    let access_token = issue_token(&state, &user)?;
    Ok(Json(AuthResponse { access_token, user }))
}

pub async fn me(
    auth: AuthUser,
    State(state): State<SharedState>,
) -> Result<Json<User>, AppError> {
    let user = state
        .users
        .get_user_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}
