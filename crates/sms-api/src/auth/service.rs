use sqlx::PgPool;

use sms_db::{models::User, repositories::user as user_repo};

use super::roles::Role;
use crate::{
    error::ApiError,
    validation::{validate_email, validate_name, validate_password},
};

/// Seed the initial admin account. Returns true when a new account was
/// created, false when the email was already taken.
pub async fn seed_admin(pool: &PgPool, email: &str, password: &str) -> anyhow::Result<bool> {
    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let created = user_repo::create_if_absent(
        pool,
        email,
        &password_hash,
        "Administrator",
        Role::Admin.as_str(),
    )
    .await?;
    Ok(created)
}

/// Create a user account with the given role.
pub async fn register_user(
    pool: &PgPool,
    email: &str,
    password: &str,
    full_name: &str,
    role: Role,
) -> Result<User, ApiError> {
    validate_email(email)?;
    validate_password(password)?;
    validate_name("full_name", full_name)?;

    if user_repo::exists_by_email(pool, email).await? {
        return Err(ApiError::Conflict(format!(
            "A user with email {email} already exists"
        )));
    }

    let password_hash = bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .map_err(|e| ApiError::Internal(format!("failed to hash password: {e}")))?;

    let user = user_repo::create(pool, email, &password_hash, full_name, role.as_str()).await?;
    Ok(user)
}

/// Verify credentials and return the account.
///
/// The same message is returned for unknown email and wrong password so the
/// endpoint cannot be used for account enumeration.
pub async fn login(pool: &PgPool, email: &str, password: &str) -> Result<User, ApiError> {
    let user = user_repo::find_by_email(pool, email)
        .await?
        .ok_or_else(|| ApiError::Auth("Invalid email or password".to_string()))?;

    if !user.is_active {
        return Err(ApiError::Auth("Account is deactivated".to_string()));
    }

    let valid = bcrypt::verify(password, &user.password_hash)
        .map_err(|e| ApiError::Internal(format!("failed to verify password: {e}")))?;

    if !valid {
        return Err(ApiError::Auth("Invalid email or password".to_string()));
    }

    Ok(user)
}
