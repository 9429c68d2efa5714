use crate::auth::password;
use crate::config::AdminSeed;
use crate::db::{StoreError, UserStore};
use crate::models::{NewUser, Role, UserId};

/// Create the seed admin unless its email is already taken.
///
/// Returns the new id, or `None` when an account with that email exists. An
/// existing account is left alone even if it is not an admin.
pub async fn ensure_admin(
    store: &dyn UserStore,
    seed: &AdminSeed,
) -> Result<Option<UserId>, String> {
    if let Some(existing) = store
        .get_user_by_email(&seed.email)
        .await
        .map_err(|e| e.to_string())?
    {
        if existing.role != Role::Admin {
            tracing::warn!(
                "Seed admin email {} belongs to a {} account",
                seed.email,
                existing.role
            );
        }
        return Ok(None);
    }

    let password_hash = password::hash_blocking(seed.password.clone())
        .await
        .map_err(|e| e.to_string())?;

    let new_user = NewUser {
        first_name: seed.first_name.clone(),
        last_name: seed.last_name.clone(),
        email: seed.email.clone(),
        password_hash,
        role: Role::Admin,
    };

    match store.create_user(&new_user).await {
        Ok(id) => Ok(Some(id)),
        // Another instance seeded it first
        Err(StoreError::DuplicateKey(_)) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}
