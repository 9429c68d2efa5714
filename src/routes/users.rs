use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::auth::password;
use crate::error::AppError;
use crate::middleware::audit;
use crate::models::{NewUser, Role, User, UserId};
use crate::routes::validate_account;
use crate::state::SharedState;

#[derive(Deserialize)]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Staff account creation: admins create anyone, receptionists create patients.
pub async fn create(
    auth: AuthUser,
    State(state): State<SharedState>,
    Json(req): Json<CreateUser>,
) -> Result<Json<User>, AppError> {
    auth.require_role(&[Role::Admin, Role::Receptionist])?;

    let role: Role = req.role.parse().map_err(AppError::BadRequest)?;
    if !auth.can_create(role) {
        return Err(AppError::Forbidden(format!(
            "Role {} may not create {role} accounts",
            auth.role
        )));
    }

    validate_account(&req.first_name, &req.last_name, &req.email, &req.password)?;

    let password_hash = password::hash_blocking(req.password).await?;
    let new_user = NewUser {
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        password_hash,
        role,
    };

    let id = state.users.create_user(&new_user).await?;

    audit::log_event(Some(auth.user_id), "user.created", Some(id), Some(role));

    Ok(Json(new_user.into_user(id)))
}

pub async fn get(
    auth: AuthUser,
    State(state): State<SharedState>,
    Path(id): Path<UserId>,
) -> Result<Json<User>, AppError> {
    if !auth.can_view(id) {
        return Err(AppError::Forbidden(
            "Patients may only view their own record".to_string(),
        ));
    }

    let user = state
        .users
        .get_user_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;
    Ok(Json(user))
}
