use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{Faculty, FacultyQueryFilter, NewFaculty};

pub async fn list<'e, E>(
    executor: E,
    filter: &FacultyQueryFilter,
) -> Result<Vec<Faculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, department, subject,
                   employee_id, is_active, created_at, updated_at
            FROM faculty
            WHERE ($1::text IS NULL OR department = $1)
              AND ($2::text IS NULL OR subject = $2)
              AND (NOT $3 OR is_active)
            ORDER BY employee_id
            LIMIT COALESCE($4, 50) OFFSET COALESCE($5, 0)
        "#,
    )
    .bind(filter.department.as_deref())
    .bind(filter.subject.as_deref())
    .bind(filter.active_only)
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, faculty_id: Uuid) -> Result<Option<Faculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, department, subject,
                   employee_id, is_active, created_at, updated_at
            FROM faculty
            WHERE id = $1
        "#,
    )
    .bind(faculty_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, faculty_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let id: Option<Uuid> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM faculty WHERE id = $1
        "#,
    )
    .bind(faculty_id)
    .fetch_optional(executor)
    .await?;
    Ok(id.is_some())
}

/// Highest numeric suffix among generated employee ids. The caller inserts
/// `faculty_<suffix + 1>` and retries on a unique-index conflict.
pub async fn max_employee_suffix<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(MAX((substring(employee_id from 9))::bigint), 0)
            FROM faculty
            WHERE employee_id ~ '^faculty_[0-9]+$'
        "#,
    )
    .fetch_one(executor)
    .await
}

pub async fn create<'e, E>(
    executor: E,
    new: &NewFaculty,
    employee_id: &str,
) -> Result<Faculty, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO faculty (first_name, last_name, email, phone, department, subject, employee_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, first_name, last_name, email, phone, department, subject,
                      employee_id, is_active, created_at, updated_at
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(&new.department)
    .bind(&new.subject)
    .bind(employee_id)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    faculty_id: Uuid,
    new: &NewFaculty,
) -> Result<Option<Faculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE faculty
            SET first_name = $2, last_name = $3, email = $4, phone = $5,
                department = $6, subject = $7, updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, department, subject,
                      employee_id, is_active, created_at, updated_at
        "#,
    )
    .bind(faculty_id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(&new.department)
    .bind(&new.subject)
    .fetch_optional(executor)
    .await
}

pub async fn set_active<'e, E>(
    executor: E,
    faculty_id: Uuid,
    is_active: bool,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE faculty SET is_active = $2, updated_at = NOW() WHERE id = $1
        "#,
    )
    .bind(faculty_id)
    .bind(is_active)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}
