use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sms_core::fees::{self, PaymentStatus};
use sms_db::repositories::{fee as fee_repo, student as student_repo};

use super::model::{CreateFeePayload, FeeResponse};
use crate::{crypto::FieldCipher, error::ApiError, validation::validate_amount};

/// Default late-fee accrual: 0.1% of the outstanding amount per day overdue.
pub const DEFAULT_LATE_FEE_DAILY_RATE: f64 = 0.001;

pub async fn create_fee(
    pool: &PgPool,
    cipher: &FieldCipher,
    payload: CreateFeePayload,
) -> Result<FeeResponse, ApiError> {
    validate_amount("total_amount", payload.total_amount)?;
    if payload.fee_type.trim().is_empty() || payload.term.trim().is_empty() {
        return Err(ApiError::Validation(
            "fee_type and term cannot be empty".to_string(),
        ));
    }

    if !student_repo::exists(pool, payload.student_id).await? {
        return Err(ApiError::Validation(format!(
            "Student {} does not exist",
            payload.student_id
        )));
    }

    if fee_repo::exists_for_type_and_term(pool, payload.student_id, &payload.fee_type, &payload.term)
        .await?
    {
        return Err(ApiError::Conflict(format!(
            "A {} fee for term {} already exists for this student",
            payload.fee_type, payload.term
        )));
    }

    let record = match fee_repo::create(
        pool,
        payload.student_id,
        &payload.fee_type,
        &payload.term,
        &cipher.encrypt_amount(payload.total_amount),
        &cipher.encrypt_amount(0.0),
        &cipher.encrypt_amount(0.0),
        payload.due_date,
    )
    .await
    {
        Ok(record) => record,
        // The pre-check races against concurrent creates; the unique index has
        // the final say
        Err(sqlx::Error::Database(db_err)) if db_err.constraint() == Some("uq_fee_type_term") => {
            return Err(ApiError::Conflict(format!(
                "A {} fee for term {} already exists for this student",
                payload.fee_type, payload.term
            )));
        }
        Err(e) => return Err(e.into()),
    };

    FeeResponse::from_record(&record, cipher, Utc::now().date_naive())
}

/// Record a payment against a fee, re-deriving the stored payment status.
pub async fn record_payment(
    pool: &PgPool,
    cipher: &FieldCipher,
    fee_id: Uuid,
    amount: f64,
) -> Result<FeeResponse, ApiError> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(ApiError::Validation(
            "Payment amount must be positive".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    let record = fee_repo::find_by_id(&mut *tx, fee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fee record {fee_id} not found")))?;

    let total = cipher.decrypt_amount(&record.total_amount_enc)?;
    let paid = cipher.decrypt_amount(&record.paid_amount_enc)?;
    let fine = cipher.decrypt_amount(&record.fine_amount_enc)?;

    let amount_due = fees::calculate_amount_due(total, paid, fine);
    if amount > amount_due {
        return Err(ApiError::Validation(format!(
            "Payment of {amount:.2} exceeds the amount due ({amount_due:.2})"
        )));
    }

    let new_paid = paid + amount;
    let status = fees::derive_payment_status(total, fine, new_paid);
    let paid_date = if status.is_paid() {
        Some(Utc::now().date_naive())
    } else {
        record.paid_date
    };

    let updated = fee_repo::update_amounts(
        &mut *tx,
        fee_id,
        &cipher.encrypt_amount(new_paid),
        &record.fine_amount_enc,
        status.as_str(),
        paid_date,
    )
    .await?
    .ok_or_else(|| ApiError::Internal("fee record vanished mid-transaction".to_string()))?;

    tx.commit().await?;

    FeeResponse::from_record(&updated, cipher, Utc::now().date_naive())
}

/// Recompute the late fee from the current days-overdue count.
///
/// The fine is an absolute value derived from today's overdue span, so
/// applying it twice on the same day changes nothing. Settled or not-yet-due
/// records pass through unchanged.
pub async fn apply_late_fee(
    pool: &PgPool,
    cipher: &FieldCipher,
    fee_id: Uuid,
    daily_rate: Option<f64>,
) -> Result<FeeResponse, ApiError> {
    let rate = daily_rate.unwrap_or(DEFAULT_LATE_FEE_DAILY_RATE);
    if !rate.is_finite() || rate < 0.0 {
        return Err(ApiError::Validation(
            "daily_rate must be a non-negative fraction".to_string(),
        ));
    }

    let today = Utc::now().date_naive();
    let mut tx = pool.begin().await?;

    let record = fee_repo::find_by_id(&mut *tx, fee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fee record {fee_id} not found")))?;

    let stored_status = PaymentStatus::parse(&record.payment_status);
    let days = fees::days_overdue(record.due_date, today, stored_status);
    if days == 0 {
        tx.commit().await?;
        return FeeResponse::from_record(&record, cipher, today);
    }

    let total = cipher.decrypt_amount(&record.total_amount_enc)?;
    let paid = cipher.decrypt_amount(&record.paid_amount_enc)?;

    let outstanding = total - paid;
    let fine = fees::late_fee(outstanding, days, rate);
    let status = fees::derive_payment_status(total, fine, paid);

    let updated = fee_repo::update_amounts(
        &mut *tx,
        fee_id,
        &record.paid_amount_enc,
        &cipher.encrypt_amount(fine),
        status.as_str(),
        record.paid_date,
    )
    .await?
    .ok_or_else(|| ApiError::Internal("fee record vanished mid-transaction".to_string()))?;

    tx.commit().await?;

    FeeResponse::from_record(&updated, cipher, today)
}

pub async fn get_fee(
    pool: &PgPool,
    cipher: &FieldCipher,
    fee_id: Uuid,
) -> Result<FeeResponse, ApiError> {
    let record = fee_repo::find_by_id(pool, fee_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Fee record {fee_id} not found")))?;
    FeeResponse::from_record(&record, cipher, Utc::now().date_naive())
}

pub async fn list_by_student(
    pool: &PgPool,
    cipher: &FieldCipher,
    student_id: Uuid,
) -> Result<Vec<FeeResponse>, ApiError> {
    if !student_repo::exists(pool, student_id).await? {
        return Err(ApiError::NotFound(format!(
            "Student {student_id} not found"
        )));
    }

    let today = Utc::now().date_naive();
    fee_repo::list_by_student(pool, student_id)
        .await?
        .iter()
        .map(|record| FeeResponse::from_record(record, cipher, today))
        .collect()
}

/// All fees currently overdue.
pub async fn list_overdue(pool: &PgPool, cipher: &FieldCipher) -> Result<Vec<FeeResponse>, ApiError> {
    let today = Utc::now().date_naive();
    fee_repo::list_past_due(pool, today)
        .await?
        .iter()
        .map(|record| FeeResponse::from_record(record, cipher, today))
        .collect()
}
