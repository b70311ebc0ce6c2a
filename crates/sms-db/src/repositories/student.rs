use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{CountBucket, NewStudent, Student, StudentQueryFilter};

pub async fn list<'e, E>(
    executor: E,
    filter: &StudentQueryFilter,
) -> Result<Vec<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, address, city, state,
                   date_of_birth, roll_number, status, parent_id, enrollment_date,
                   created_at, updated_at
            FROM students
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL OR city = $2)
              AND ($3::text IS NULL OR state = $3)
              AND ($4::text IS NULL
                   OR first_name ILIKE '%' || $4 || '%'
                   OR last_name ILIKE '%' || $4 || '%'
                   OR roll_number ILIKE '%' || $4 || '%')
            ORDER BY roll_number
            LIMIT COALESCE($5, 50) OFFSET COALESCE($6, 0)
        "#,
    )
    .bind(filter.status.as_deref())
    .bind(filter.city.as_deref())
    .bind(filter.state.as_deref())
    .bind(filter.search.as_deref())
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(executor)
    .await
}

pub async fn find_by_id<'e, E>(executor: E, student_id: Uuid) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, first_name, last_name, email, phone, address, city, state,
                   date_of_birth, roll_number, status, parent_id, enrollment_date,
                   created_at, updated_at
            FROM students
            WHERE id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

pub async fn exists<'e, E>(executor: E, student_id: Uuid) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let id: Option<Uuid> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM students WHERE id = $1
        "#,
    )
    .bind(student_id)
    .fetch_optional(executor)
    .await?;
    Ok(id.is_some())
}

/// Which of the given ids actually exist. Used for all-or-nothing validation
/// of bulk assignments.
pub async fn find_existing_ids<'e, E>(
    executor: E,
    student_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM students WHERE id = ANY($1)
        "#,
    )
    .bind(student_ids)
    .fetch_all(executor)
    .await
}

/// Highest numeric suffix among generated roll numbers. The caller inserts
/// `student_<suffix + 1>` and retries on a unique-index conflict.
pub async fn max_roll_suffix<'e, E>(executor: E) -> Result<i64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(MAX((substring(roll_number from 9))::bigint), 0)
            FROM students
            WHERE roll_number ~ '^student_[0-9]+$'
        "#,
    )
    .fetch_one(executor)
    .await
}

pub async fn create<'e, E>(
    executor: E,
    new: &NewStudent,
    roll_number: &str,
) -> Result<Student, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO students
                (first_name, last_name, email, phone, address, city, state,
                 date_of_birth, roll_number, enrollment_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, COALESCE($10, CURRENT_DATE))
            RETURNING id, first_name, last_name, email, phone, address, city, state,
                      date_of_birth, roll_number, status, parent_id, enrollment_date,
                      created_at, updated_at
        "#,
    )
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(new.address.as_deref())
    .bind(new.city.as_deref())
    .bind(new.state.as_deref())
    .bind(new.date_of_birth)
    .bind(roll_number)
    .bind(new.enrollment_date)
    .fetch_one(executor)
    .await
}

pub async fn update<'e, E>(
    executor: E,
    student_id: Uuid,
    new: &NewStudent,
) -> Result<Option<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE students
            SET first_name = $2, last_name = $3, email = $4, phone = $5, address = $6,
                city = $7, state = $8, date_of_birth = $9,
                enrollment_date = COALESCE($10, enrollment_date),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, first_name, last_name, email, phone, address, city, state,
                      date_of_birth, roll_number, status, parent_id, enrollment_date,
                      created_at, updated_at
        "#,
    )
    .bind(student_id)
    .bind(&new.first_name)
    .bind(&new.last_name)
    .bind(&new.email)
    .bind(new.phone.as_deref())
    .bind(new.address.as_deref())
    .bind(new.city.as_deref())
    .bind(new.state.as_deref())
    .bind(new.date_of_birth)
    .bind(new.enrollment_date)
    .fetch_optional(executor)
    .await
}

pub async fn set_status<'e, E>(
    executor: E,
    student_id: Uuid,
    status: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE students SET status = $2, updated_at = NOW() WHERE id = $1
        "#,
    )
    .bind(student_id)
    .bind(status)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Sync the legacy single-parent pointer. The parent_students table is the
/// source of truth; this column is a cached projection of the primary contact.
pub async fn set_legacy_parent<'e, E>(
    executor: E,
    student_id: Uuid,
    parent_id: Option<Uuid>,
) -> Result<(), sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE students SET parent_id = $2, updated_at = NOW() WHERE id = $1
        "#,
    )
    .bind(student_id)
    .bind(parent_id)
    .execute(executor)
    .await?;
    Ok(())
}

pub async fn counts_by_status<'e, E>(executor: E) -> Result<Vec<CountBucket>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT status AS label, COUNT(*) AS count
            FROM students
            GROUP BY status
            ORDER BY count DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn counts_by_state<'e, E>(executor: E) -> Result<Vec<CountBucket>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(state, 'Unknown') AS label, COUNT(*) AS count
            FROM students
            GROUP BY state
            ORDER BY count DESC
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn counts_by_city<'e, E>(executor: E) -> Result<Vec<CountBucket>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT COALESCE(city, 'Unknown') AS label, COUNT(*) AS count
            FROM students
            GROUP BY city
            ORDER BY count DESC
        "#,
    )
    .fetch_all(executor)
    .await
}
