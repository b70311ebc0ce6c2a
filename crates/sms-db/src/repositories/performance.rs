use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::StudentPerformance;

pub async fn find_by_id<'e, E>(
    executor: E,
    record_id: Uuid,
) -> Result<Option<StudentPerformance>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, subject, exam_type, exam_date, score_enc, max_score,
                   remarks, created_at, updated_at
            FROM student_performance
            WHERE id = $1
        "#,
    )
    .bind(record_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_by_student<'e, E>(
    executor: E,
    student_id: Uuid,
) -> Result<Vec<StudentPerformance>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, subject, exam_type, exam_date, score_enc, max_score,
                   remarks, created_at, updated_at
            FROM student_performance
            WHERE student_id = $1
            ORDER BY exam_date DESC, subject
        "#,
    )
    .bind(student_id)
    .fetch_all(executor)
    .await
}

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<StudentPerformance>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, subject, exam_type, exam_date, score_enc, max_score,
                   remarks, created_at, updated_at
            FROM student_performance
            ORDER BY exam_date DESC, subject
        "#,
    )
    .fetch_all(executor)
    .await
}

pub async fn exists_for_exam<'e, E>(
    executor: E,
    student_id: Uuid,
    subject: &str,
    exam_type: &str,
    exam_date: NaiveDate,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let id: Option<Uuid> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM student_performance
            WHERE student_id = $1 AND subject = $2 AND exam_type = $3 AND exam_date = $4
        "#,
    )
    .bind(student_id)
    .bind(subject)
    .bind(exam_type)
    .bind(exam_date)
    .fetch_optional(executor)
    .await?;
    Ok(id.is_some())
}

#[allow(clippy::too_many_arguments)]
pub async fn create<'e, E>(
    executor: E,
    student_id: Uuid,
    subject: &str,
    exam_type: &str,
    exam_date: NaiveDate,
    score_enc: &str,
    max_score: f64,
    remarks: Option<&str>,
) -> Result<StudentPerformance, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO student_performance
                (student_id, subject, exam_type, exam_date, score_enc, max_score, remarks)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, student_id, subject, exam_type, exam_date, score_enc, max_score,
                      remarks, created_at, updated_at
        "#,
    )
    .bind(student_id)
    .bind(subject)
    .bind(exam_type)
    .bind(exam_date)
    .bind(score_enc)
    .bind(max_score)
    .bind(remarks)
    .fetch_one(executor)
    .await
}

pub async fn update_score<'e, E>(
    executor: E,
    record_id: Uuid,
    score_enc: &str,
    max_score: f64,
    remarks: Option<&str>,
) -> Result<Option<StudentPerformance>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE student_performance
            SET score_enc = $2, max_score = $3, remarks = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING id, student_id, subject, exam_type, exam_date, score_enc, max_score,
                      remarks, created_at, updated_at
        "#,
    )
    .bind(record_id)
    .bind(score_enc)
    .bind(max_score)
    .bind(remarks)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, record_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM student_performance WHERE id = $1
        "#,
    )
    .bind(record_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
