use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{CountBucket, NewParentStudent, Parent, ParentStudent, Student};

pub async fn find<'e, E>(
    executor: E,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<Option<ParentStudent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT parent_id, student_id, relationship, is_primary_contact,
                   is_authorized_to_pickup, is_emergency_contact, is_active, notes,
                   created_at, updated_at
            FROM parent_students
            WHERE parent_id = $1 AND student_id = $2
        "#,
    )
    .bind(parent_id)
    .bind(student_id)
    .fetch_optional(executor)
    .await
}

/// Insert a link with an explicit timestamp so bulk operations stamp every
/// row uniformly.
pub async fn create<'e, E>(
    executor: E,
    new: &NewParentStudent,
    stamped_at: DateTime<Utc>,
) -> Result<ParentStudent, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO parent_students
                (parent_id, student_id, relationship, is_primary_contact,
                 is_authorized_to_pickup, is_emergency_contact, notes, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            RETURNING parent_id, student_id, relationship, is_primary_contact,
                      is_authorized_to_pickup, is_emergency_contact, is_active, notes,
                      created_at, updated_at
        "#,
    )
    .bind(new.parent_id)
    .bind(new.student_id)
    .bind(&new.relationship)
    .bind(new.is_primary_contact)
    .bind(new.is_authorized_to_pickup)
    .bind(new.is_emergency_contact)
    .bind(new.notes.as_deref())
    .bind(stamped_at)
    .fetch_one(executor)
    .await
}

pub async fn list_by_student<'e, E>(
    executor: E,
    student_id: Uuid,
    active_only: bool,
) -> Result<Vec<ParentStudent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT parent_id, student_id, relationship, is_primary_contact,
                   is_authorized_to_pickup, is_emergency_contact, is_active, notes,
                   created_at, updated_at
            FROM parent_students
            WHERE student_id = $1 AND (NOT $2 OR is_active)
            ORDER BY is_primary_contact DESC, created_at
        "#,
    )
    .bind(student_id)
    .bind(active_only)
    .fetch_all(executor)
    .await
}

pub async fn list_by_parent<'e, E>(
    executor: E,
    parent_id: Uuid,
    active_only: bool,
) -> Result<Vec<ParentStudent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT parent_id, student_id, relationship, is_primary_contact,
                   is_authorized_to_pickup, is_emergency_contact, is_active, notes,
                   created_at, updated_at
            FROM parent_students
            WHERE parent_id = $1 AND (NOT $2 OR is_active)
            ORDER BY created_at
        "#,
    )
    .bind(parent_id)
    .bind(active_only)
    .fetch_all(executor)
    .await
}

/// Clear the primary flag on every active link of the student. Run inside the
/// same transaction as [`promote`] so the swap is atomic.
pub async fn demote_primaries<'e, E>(executor: E, student_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE parent_students
            SET is_primary_contact = FALSE, updated_at = NOW()
            WHERE student_id = $1 AND is_primary_contact AND is_active
        "#,
    )
    .bind(student_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Mark the link as the student's primary contact. A primary contact is
/// always an emergency contact as well.
pub async fn promote<'e, E>(
    executor: E,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE parent_students
            SET is_primary_contact = TRUE, is_emergency_contact = TRUE, updated_at = NOW()
            WHERE parent_id = $1 AND student_id = $2 AND is_active
        "#,
    )
    .bind(parent_id)
    .bind(student_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Soft delete: a deactivated link cannot remain the primary contact.
pub async fn deactivate<'e, E>(
    executor: E,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE parent_students
            SET is_active = FALSE, is_primary_contact = FALSE, updated_at = NOW()
            WHERE parent_id = $1 AND student_id = $2
        "#,
    )
    .bind(parent_id)
    .bind(student_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<'e, E>(
    executor: E,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM parent_students WHERE parent_id = $1 AND student_id = $2
        "#,
    )
    .bind(parent_id)
    .bind(student_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}

/// Active students with no active parent link.
pub async fn orphaned_students<'e, E>(executor: E) -> Result<Vec<Student>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT s.id, s.first_name, s.last_name, s.email, s.phone, s.address, s.city,
                   s.state, s.date_of_birth, s.roll_number, s.status, s.parent_id,
                   s.enrollment_date, s.created_at, s.updated_at
            FROM students s
            WHERE s.status = 'Active'
              AND NOT EXISTS (
                  SELECT 1 FROM parent_students ps
                  WHERE ps.student_id = s.id AND ps.is_active
              )
            ORDER BY s.roll_number
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Parents with no active student link.
pub async fn parents_without_students<'e, E>(executor: E) -> Result<Vec<Parent>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT p.id, p.first_name, p.last_name, p.email, p.phone, p.occupation,
                   p.address, p.city, p.state, p.parent_type, p.created_at, p.updated_at
            FROM parents p
            WHERE NOT EXISTS (
                SELECT 1 FROM parent_students ps
                WHERE ps.parent_id = p.id AND ps.is_active
            )
            ORDER BY p.last_name, p.first_name
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn counts_by_relationship<'e, E>(executor: E) -> Result<Vec<CountBucket>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT relationship AS label, COUNT(*) AS count
            FROM parent_students
            WHERE is_active
            GROUP BY relationship
            ORDER BY count DESC
        "#,
    )
    .fetch_all(executor)
    .await
}
