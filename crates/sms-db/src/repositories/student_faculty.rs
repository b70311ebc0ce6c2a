use chrono::{DateTime, Utc};
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::{NewStudentFaculty, StudentFaculty};

pub async fn find<'e, E>(
    executor: E,
    student_id: Uuid,
    faculty_id: Uuid,
) -> Result<Option<StudentFaculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT student_id, faculty_id, is_active, assigned_date, subject,
                   academic_year, semester, notes, created_at, updated_at
            FROM student_faculty
            WHERE student_id = $1 AND faculty_id = $2
        "#,
    )
    .bind(student_id)
    .bind(faculty_id)
    .fetch_optional(executor)
    .await
}

/// Insert a link with an explicit timestamp so bulk operations stamp every
/// row uniformly.
pub async fn create<'e, E>(
    executor: E,
    new: &NewStudentFaculty,
    stamped_at: DateTime<Utc>,
) -> Result<StudentFaculty, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO student_faculty
                (student_id, faculty_id, subject, academic_year, semester, notes,
                 assigned_date, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7::date, $7, $7)
            RETURNING student_id, faculty_id, is_active, assigned_date, subject,
                      academic_year, semester, notes, created_at, updated_at
        "#,
    )
    .bind(new.student_id)
    .bind(new.faculty_id)
    .bind(new.subject.as_deref())
    .bind(new.academic_year.as_deref())
    .bind(new.semester.as_deref())
    .bind(new.notes.as_deref())
    .bind(stamped_at)
    .fetch_one(executor)
    .await
}

pub async fn list_by_student<'e, E>(
    executor: E,
    student_id: Uuid,
    active_only: bool,
) -> Result<Vec<StudentFaculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT student_id, faculty_id, is_active, assigned_date, subject,
                   academic_year, semester, notes, created_at, updated_at
            FROM student_faculty
            WHERE student_id = $1 AND (NOT $2 OR is_active)
            ORDER BY assigned_date, faculty_id
        "#,
    )
    .bind(student_id)
    .bind(active_only)
    .fetch_all(executor)
    .await
}

pub async fn list_by_faculty<'e, E>(
    executor: E,
    faculty_id: Uuid,
    active_only: bool,
) -> Result<Vec<StudentFaculty>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT student_id, faculty_id, is_active, assigned_date, subject,
                   academic_year, semester, notes, created_at, updated_at
            FROM student_faculty
            WHERE faculty_id = $1 AND (NOT $2 OR is_active)
            ORDER BY assigned_date, student_id
        "#,
    )
    .bind(faculty_id)
    .bind(active_only)
    .fetch_all(executor)
    .await
}

/// Which of the given students already hold a link to this faculty member.
/// Used for duplicate skipping in bulk assignment.
pub async fn existing_student_ids<'e, E>(
    executor: E,
    faculty_id: Uuid,
    student_ids: &[Uuid],
) -> Result<Vec<Uuid>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT student_id FROM student_faculty
            WHERE faculty_id = $1 AND student_id = ANY($2)
        "#,
    )
    .bind(faculty_id)
    .bind(student_ids)
    .fetch_all(executor)
    .await
}

pub async fn deactivate<'e, E>(
    executor: E,
    student_id: Uuid,
    faculty_id: Uuid,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            UPDATE student_faculty
            SET is_active = FALSE, updated_at = NOW()
            WHERE student_id = $1 AND faculty_id = $2
        "#,
    )
    .bind(student_id)
    .bind(faculty_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn delete<'e, E>(
    executor: E,
    student_id: Uuid,
    faculty_id: Uuid,
) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM student_faculty WHERE student_id = $1 AND faculty_id = $2
        "#,
    )
    .bind(student_id)
    .bind(faculty_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
