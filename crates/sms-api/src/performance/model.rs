use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sms_core::grading;
use sms_db::models::StudentPerformance;

use crate::{crypto::FieldCipher, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreatePerformancePayload {
    pub student_id: Uuid,
    pub subject: String,
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub score: f64,
    pub max_score: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePerformancePayload {
    pub score: f64,
    pub max_score: f64,
    pub remarks: Option<String>,
}

/// Performance record with the score decrypted and grade fields derived.
#[derive(Debug, Serialize)]
pub struct PerformanceResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub grade: String,
    pub remarks: Option<String>,
}

impl PerformanceResponse {
    pub fn from_record(
        record: &StudentPerformance,
        cipher: &FieldCipher,
    ) -> Result<Self, ApiError> {
        let score = cipher.decrypt_amount(&record.score_enc)?;
        let percentage = grading::percentage(score, record.max_score);

        Ok(Self {
            id: record.id,
            student_id: record.student_id,
            subject: record.subject.clone(),
            exam_type: record.exam_type.clone(),
            exam_date: record.exam_date,
            score,
            max_score: record.max_score,
            percentage,
            grade: grading::grade_for_percentage(percentage).as_str().to_string(),
            remarks: record.remarks.clone(),
        })
    }
}
