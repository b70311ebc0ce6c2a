use sqlx::PgPool;
use uuid::Uuid;

use sms_db::{
    models::{NewStudent, Student, StudentQueryFilter},
    repositories::student as student_repo,
};

use super::model::STUDENT_STATUSES;
use crate::{
    error::ApiError,
    validation::{validate_email, validate_name},
};

fn validate_payload(new: &NewStudent) -> Result<(), ApiError> {
    validate_name("first_name", &new.first_name)?;
    validate_name("last_name", &new.last_name)?;
    validate_email(&new.email)?;
    Ok(())
}

/// Create a student with a generated `student_<n>` roll number.
///
/// The suffix scan and insert are not one atomic statement, so the insert
/// retries when a concurrent creation claims the same roll number first. The
/// unique index guarantees no two students ever share one.
pub async fn create_student(pool: &PgPool, new: NewStudent) -> Result<Student, ApiError> {
    validate_payload(&new)?;

    loop {
        let suffix = student_repo::max_roll_suffix(pool).await?;
        let roll_number = format!("student_{}", suffix + 1);

        match student_repo::create(pool, &new, &roll_number).await {
            Ok(student) => return Ok(student),
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("students_roll_number_key") =>
            {
                // Lost the race for this suffix, rescan and try the next one
                continue;
            }
            Err(sqlx::Error::Database(db_err))
                if db_err.constraint() == Some("students_email_key") =>
            {
                return Err(ApiError::Conflict(format!(
                    "A student with email {} already exists",
                    new.email
                )));
            }
            Err(e) => return Err(e.into()),
        }
    }
}

pub async fn update_student(
    pool: &PgPool,
    student_id: Uuid,
    new: NewStudent,
) -> Result<Student, ApiError> {
    validate_payload(&new)?;

    match student_repo::update(pool, student_id, &new).await {
        Ok(Some(student)) => Ok(student),
        Ok(None) => Err(ApiError::NotFound(format!(
            "Student {student_id} not found"
        ))),
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("students_email_key") => {
            Err(ApiError::Conflict(format!(
                "A student with email {} already exists",
                new.email
            )))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn get_student(pool: &PgPool, student_id: Uuid) -> Result<Student, ApiError> {
    student_repo::find_by_id(pool, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Student {student_id} not found")))
}

pub async fn list_students(
    pool: &PgPool,
    filter: StudentQueryFilter,
) -> Result<Vec<Student>, ApiError> {
    if let Some(status) = filter.status.as_deref() {
        if !STUDENT_STATUSES.contains(&status) {
            return Err(ApiError::Validation(format!("Unknown status: {status}")));
        }
    }

    Ok(student_repo::list(pool, &filter).await?)
}

pub async fn set_status(pool: &PgPool, student_id: Uuid, status: &str) -> Result<(), ApiError> {
    if !STUDENT_STATUSES.contains(&status) {
        return Err(ApiError::Validation(format!("Unknown status: {status}")));
    }

    if !student_repo::set_status(pool, student_id, status).await? {
        return Err(ApiError::NotFound(format!(
            "Student {student_id} not found"
        )));
    }

    Ok(())
}

/// Delete is a soft deactivation; history and assignments are preserved.
pub async fn deactivate_student(pool: &PgPool, student_id: Uuid) -> Result<(), ApiError> {
    set_status(pool, student_id, "Inactive").await
}
