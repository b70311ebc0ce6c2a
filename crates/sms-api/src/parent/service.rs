use sqlx::PgPool;
use uuid::Uuid;

use sms_db::{
    models::{NewParent, Parent, ParentQueryFilter},
    repositories::parent as parent_repo,
};

use super::model::PARENT_TYPES;
use crate::{
    error::ApiError,
    validation::{validate_email, validate_name},
};

fn validate_payload(new: &NewParent) -> Result<(), ApiError> {
    validate_name("first_name", &new.first_name)?;
    validate_name("last_name", &new.last_name)?;
    validate_email(&new.email)?;

    if !PARENT_TYPES.contains(&new.parent_type.as_str()) {
        return Err(ApiError::Validation(format!(
            "Unknown parent_type: {}",
            new.parent_type
        )));
    }

    Ok(())
}

pub async fn create_parent(pool: &PgPool, new: NewParent) -> Result<Parent, ApiError> {
    validate_payload(&new)?;

    match parent_repo::create(pool, &new).await {
        Ok(parent) => Ok(parent),
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("parents_email_key") => {
            Err(ApiError::Conflict(format!(
                "A parent with email {} already exists",
                new.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn update_parent(
    pool: &PgPool,
    parent_id: Uuid,
    new: NewParent,
) -> Result<Parent, ApiError> {
    validate_payload(&new)?;

    match parent_repo::update(pool, parent_id, &new).await {
        Ok(Some(parent)) => Ok(parent),
        Ok(None) => Err(ApiError::NotFound(format!("Parent {parent_id} not found"))),
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("parents_email_key") => {
            Err(ApiError::Conflict(format!(
                "A parent with email {} already exists",
                new.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_parent(pool: &PgPool, parent_id: Uuid) -> Result<Parent, ApiError> {
    parent_repo::find_by_id(pool, parent_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Parent {parent_id} not found")))
}

pub async fn list_parents(
    pool: &PgPool,
    filter: ParentQueryFilter,
) -> Result<Vec<Parent>, ApiError> {
    Ok(parent_repo::list(pool, &filter).await?)
}

/// Hard delete: assignment links cascade away and any legacy pointer on a
/// student is nulled by the schema.
pub async fn delete_parent(pool: &PgPool, parent_id: Uuid) -> Result<(), ApiError> {
    if parent_repo::delete(pool, parent_id).await? == 0 {
        return Err(ApiError::NotFound(format!("Parent {parent_id} not found")));
    }
    Ok(())
}
