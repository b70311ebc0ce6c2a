use sqlx::PgPool;
use uuid::Uuid;

use sms_db::repositories::{performance as perf_repo, student as student_repo};

use super::model::{CreatePerformancePayload, PerformanceResponse, UpdatePerformancePayload};
use crate::{crypto::FieldCipher, error::ApiError, validation::validate_score};

pub async fn create_record(
    pool: &PgPool,
    cipher: &FieldCipher,
    payload: CreatePerformancePayload,
) -> Result<PerformanceResponse, ApiError> {
    if payload.subject.trim().is_empty() || payload.exam_type.trim().is_empty() {
        return Err(ApiError::Validation(
            "subject and exam_type cannot be empty".to_string(),
        ));
    }
    validate_score(payload.score, payload.max_score)?;

    if !student_repo::exists(pool, payload.student_id).await? {
        return Err(ApiError::Validation(format!(
            "Student {} does not exist",
            payload.student_id
        )));
    }

    if perf_repo::exists_for_exam(
        pool,
        payload.student_id,
        &payload.subject,
        &payload.exam_type,
        payload.exam_date,
    )
    .await?
    {
        return Err(ApiError::Conflict(format!(
            "A {} {} record for {} already exists for this student",
            payload.subject, payload.exam_type, payload.exam_date
        )));
    }

    let record = match perf_repo::create(
        pool,
        payload.student_id,
        &payload.subject,
        &payload.exam_type,
        payload.exam_date,
        &cipher.encrypt_amount(payload.score),
        payload.max_score,
        payload.remarks.as_deref(),
    )
    .await
    {
        Ok(record) => record,
        Err(sqlx::Error::Database(db_err))
            if db_err.constraint() == Some("uq_perf_subject_exam") =>
        {
            return Err(ApiError::Conflict(format!(
                "A {} {} record for {} already exists for this student",
                payload.subject, payload.exam_type, payload.exam_date
            )));
        }
        Err(e) => return Err(e.into()),
    };

    PerformanceResponse::from_record(&record, cipher)
}

pub async fn update_record(
    pool: &PgPool,
    cipher: &FieldCipher,
    record_id: Uuid,
    payload: UpdatePerformancePayload,
) -> Result<PerformanceResponse, ApiError> {
    validate_score(payload.score, payload.max_score)?;

    let updated = perf_repo::update_score(
        pool,
        record_id,
        &cipher.encrypt_amount(payload.score),
        payload.max_score,
        payload.remarks.as_deref(),
    )
    .await?
    .ok_or_else(|| ApiError::NotFound(format!("Performance record {record_id} not found")))?;

    PerformanceResponse::from_record(&updated, cipher)
}

pub async fn get_record(
    pool: &PgPool,
    cipher: &FieldCipher,
    record_id: Uuid,
) -> Result<PerformanceResponse, ApiError> {
    let record = perf_repo::find_by_id(pool, record_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Performance record {record_id} not found")))?;
    PerformanceResponse::from_record(&record, cipher)
}

pub async fn list_by_student(
    pool: &PgPool,
    cipher: &FieldCipher,
    student_id: Uuid,
) -> Result<Vec<PerformanceResponse>, ApiError> {
    if !student_repo::exists(pool, student_id).await? {
        return Err(ApiError::NotFound(format!(
            "Student {student_id} not found"
        )));
    }

    perf_repo::list_by_student(pool, student_id)
        .await?
        .iter()
        .map(|record| PerformanceResponse::from_record(record, cipher))
        .collect()
}

pub async fn delete_record(pool: &PgPool, record_id: Uuid) -> Result<(), ApiError> {
    if perf_repo::delete(pool, record_id).await? == 0 {
        return Err(ApiError::NotFound(format!(
            "Performance record {record_id} not found"
        )));
    }
    Ok(())
}
