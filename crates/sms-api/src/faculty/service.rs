use sqlx::PgPool;
use uuid::Uuid;

use sms_db::{
    models::{Faculty, FacultyQueryFilter, NewFaculty},
    repositories::faculty as faculty_repo,
};

use crate::{
    error::ApiError,
    validation::{validate_email, validate_name},
};

fn validate_payload(new: &NewFaculty) -> Result<(), ApiError> {
    validate_name("first_name", &new.first_name)?;
    validate_name("last_name", &new.last_name)?;
    validate_email(&new.email)?;
    validate_name("department", &new.department)?;
    validate_name("subject", &new.subject)?;
    Ok(())
}

/// Create a faculty member with a generated `faculty_<n>` employee id.
///
/// Same retry-on-conflict scheme as student roll numbers: rescan the suffix
/// when a concurrent insert claims it first.
pub async fn create_faculty(pool: &PgPool, new: NewFaculty) -> Result<Faculty, ApiError> {
    validate_payload(&new)?;

    loop {
        let suffix = faculty_repo::max_employee_suffix(pool).await?;
        let employee_id = format!("faculty_{}", suffix + 1);

        match faculty_repo::create(pool, &new, &employee_id).await {
            Ok(faculty) => return Ok(faculty),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("faculty_employee_id_key") =>
            {
                continue;
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("faculty_email_key") =>
            {
                return Err(ApiError::Conflict(format!(
                    "A faculty member with email {} already exists",
                    new.email
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

pub async fn update_faculty(
    pool: &PgPool,
    faculty_id: Uuid,
    new: NewFaculty,
) -> Result<Faculty, ApiError> {
    validate_payload(&new)?;

    match faculty_repo::update(pool, faculty_id, &new).await {
        Ok(Some(faculty)) => Ok(faculty),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Faculty member {faculty_id} not found"
        ))),
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("faculty_email_key") => {
            Err(ApiError::Conflict(format!(
                "A faculty member with email {} already exists",
                new.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_faculty(pool: &PgPool, faculty_id: Uuid) -> Result<Faculty, ApiError> {
    faculty_repo::find_by_id(pool, faculty_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Faculty member {faculty_id} not found")))
}

pub async fn list_faculty(
    pool: &PgPool,
    filter: FacultyQueryFilter,
) -> Result<Vec<Faculty>, ApiError> {
    Ok(faculty_repo::list(pool, &filter).await?)
}

/// Delete is a soft deactivation; assignments are preserved.
pub async fn deactivate_faculty(pool: &PgPool, faculty_id: Uuid) -> Result<(), ApiError> {
    if !faculty_repo::set_active(pool, faculty_id, false).await? {
        return Err(ApiError::NotFound(format!(
            "Faculty member {faculty_id} not found"
        )));
    }
    Ok(())
}
