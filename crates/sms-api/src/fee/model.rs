use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sms_core::fees::{self, PaymentStatus};
use sms_db::models::StudentFee;

use crate::{crypto::FieldCipher, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct CreateFeePayload {
    pub student_id: Uuid,
    pub fee_type: String,
    pub term: String,
    pub total_amount: f64,
    pub due_date: NaiveDate,
}

#[derive(Debug, Deserialize)]
pub struct PaymentPayload {
    pub amount: f64,
}

#[derive(Debug, Default, Deserialize)]
pub struct LateFeePayload {
    /// Daily accrual rate as a fraction of the outstanding amount; the
    /// service default applies when omitted
    pub daily_rate: Option<f64>,
}

/// Fee record with amounts decrypted and derived fields computed.
#[derive(Debug, Serialize)]
pub struct FeeResponse {
    pub id: Uuid,
    pub student_id: Uuid,
    pub fee_type: String,
    pub term: String,
    pub total_amount: f64,
    pub paid_amount: f64,
    pub fine_amount: f64,
    pub amount_due: f64,
    /// Effective status: the stored value, or Overdue when past due
    pub payment_status: String,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
}

impl FeeResponse {
    /// Decrypt a stored record and derive status/overdue fields as of `today`.
    pub fn from_record(
        record: &StudentFee,
        cipher: &FieldCipher,
        today: NaiveDate,
    ) -> Result<Self, ApiError> {
        let total_amount = cipher.decrypt_amount(&record.total_amount_enc)?;
        let paid_amount = cipher.decrypt_amount(&record.paid_amount_enc)?;
        let fine_amount = cipher.decrypt_amount(&record.fine_amount_enc)?;

        let stored_status = PaymentStatus::parse(&record.payment_status);
        let is_overdue = fees::is_overdue(record.due_date, today, stored_status);
        let effective_status = if is_overdue {
            PaymentStatus::Overdue
        } else {
            stored_status
        };

        Ok(Self {
            id: record.id,
            student_id: record.student_id,
            fee_type: record.fee_type.clone(),
            term: record.term.clone(),
            total_amount,
            paid_amount,
            fine_amount,
            amount_due: fees::calculate_amount_due(total_amount, paid_amount, fine_amount),
            payment_status: effective_status.as_str().to_string(),
            is_overdue,
            days_overdue: fees::days_overdue(record.due_date, today, stored_status),
            due_date: record.due_date,
            paid_date: record.paid_date,
        })
    }
}
