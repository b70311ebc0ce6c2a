use chrono::NaiveDate;
use sqlx::{Executor, Postgres};
use uuid::Uuid;

use crate::models::StudentFee;

pub async fn find_by_id<'e, E>(executor: E, fee_id: Uuid) -> Result<Option<StudentFee>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                   fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
            FROM student_fees
            WHERE id = $1
        "#,
    )
    .bind(fee_id)
    .fetch_optional(executor)
    .await
}

pub async fn list_by_student<'e, E>(
    executor: E,
    student_id: Uuid,
) -> Result<Vec<StudentFee>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                   fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
            FROM student_fees
            WHERE student_id = $1
            ORDER BY due_date
        "#,
    )
    .bind(student_id)
    .fetch_all(executor)
    .await
}

pub async fn list_all<'e, E>(executor: E) -> Result<Vec<StudentFee>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                   fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
            FROM student_fees
            ORDER BY due_date
        "#,
    )
    .fetch_all(executor)
    .await
}

/// Unsettled fees whose due date has passed. The Overdue status itself is
/// derived in the service layer; this only narrows the candidate set.
pub async fn list_past_due<'e, E>(
    executor: E,
    today: NaiveDate,
) -> Result<Vec<StudentFee>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            SELECT id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                   fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
            FROM student_fees
            WHERE payment_status <> 'Paid' AND due_date < $1
            ORDER BY due_date
        "#,
    )
    .bind(today)
    .fetch_all(executor)
    .await
}

pub async fn exists_for_type_and_term<'e, E>(
    executor: E,
    student_id: Uuid,
    fee_type: &str,
    term: &str,
) -> Result<bool, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let id: Option<Uuid> = sqlx::query_scalar(
        // language=PostgreSQL
        r#"
            SELECT id FROM student_fees
            WHERE student_id = $1 AND fee_type = $2 AND term = $3
        "#,
    )
    .bind(student_id)
    .bind(fee_type)
    .bind(term)
    .fetch_optional(executor)
    .await?;
    Ok(id.is_some())
}

#[allow(clippy::too_many_arguments)]
pub async fn create<'e, E>(
    executor: E,
    student_id: Uuid,
    fee_type: &str,
    term: &str,
    total_amount_enc: &str,
    paid_amount_enc: &str,
    fine_amount_enc: &str,
    due_date: NaiveDate,
) -> Result<StudentFee, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            INSERT INTO student_fees
                (student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                 fine_amount_enc, due_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                      fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
        "#,
    )
    .bind(student_id)
    .bind(fee_type)
    .bind(term)
    .bind(total_amount_enc)
    .bind(paid_amount_enc)
    .bind(fine_amount_enc)
    .bind(due_date)
    .fetch_one(executor)
    .await
}

/// Persist re-derived amounts and status after a payment or late-fee update.
pub async fn update_amounts<'e, E>(
    executor: E,
    fee_id: Uuid,
    paid_amount_enc: &str,
    fine_amount_enc: &str,
    payment_status: &str,
    paid_date: Option<NaiveDate>,
) -> Result<Option<StudentFee>, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    sqlx::query_as(
        // language=PostgreSQL
        r#"
            UPDATE student_fees
            SET paid_amount_enc = $2, fine_amount_enc = $3, payment_status = $4,
                paid_date = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, student_id, fee_type, term, total_amount_enc, paid_amount_enc,
                      fine_amount_enc, payment_status, due_date, paid_date, created_at, updated_at
        "#,
    )
    .bind(fee_id)
    .bind(paid_amount_enc)
    .bind(fine_amount_enc)
    .bind(payment_status)
    .bind(paid_date)
    .fetch_optional(executor)
    .await
}

pub async fn delete<'e, E>(executor: E, fee_id: Uuid) -> Result<u64, sqlx::Error>
where
    E: Executor<'e, Database = Postgres>,
{
    let result = sqlx::query(
        // language=PostgreSQL
        r#"
            DELETE FROM student_fees WHERE id = $1
        "#,
    )
    .bind(fee_id)
    .execute(executor)
    .await?;
    Ok(result.rows_affected())
}
