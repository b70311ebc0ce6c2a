//! Statistics aggregation.
//!
//! Counts over plaintext dimensions (status, location, relationship) are SQL
//! aggregates. Score and amount aggregates cannot run in SQL because those
//! columns are encrypted, so the rows are fetched, decrypted and grouped in
//! memory.

use std::collections::BTreeMap;

use chrono::{NaiveDate, Utc};
use sqlx::PgPool;

use sms_core::fees::{self, PaymentStatus};
use sms_core::grading;
use sms_db::repositories::{
    fee as fee_repo, parent as parent_repo, parent_student as ps_repo,
    performance as perf_repo, student as student_repo,
};

use super::model::{FeeCollectionStats, ParentStats, StudentStats, SubjectPerformanceStats};
use crate::{crypto::FieldCipher, error::ApiError};

pub async fn student_stats(pool: &PgPool) -> Result<StudentStats, ApiError> {
    Ok(StudentStats {
        by_status: student_repo::counts_by_status(pool).await?,
        by_state: student_repo::counts_by_state(pool).await?,
        by_city: student_repo::counts_by_city(pool).await?,
    })
}

pub async fn parent_stats(pool: &PgPool) -> Result<ParentStats, ApiError> {
    Ok(ParentStats {
        by_parent_type: parent_repo::counts_by_parent_type(pool).await?,
        by_relationship: ps_repo::counts_by_relationship(pool).await?,
    })
}

pub async fn performance_stats(
    pool: &PgPool,
    cipher: &FieldCipher,
) -> Result<Vec<SubjectPerformanceStats>, ApiError> {
    let records = perf_repo::list_all(pool).await?;

    let mut decrypted = Vec::with_capacity(records.len());
    for record in &records {
        let score = cipher.decrypt_amount(&record.score_enc)?;
        decrypted.push((record.subject.clone(), score, record.max_score));
    }

    Ok(summarize_performance(decrypted))
}

pub async fn fee_stats(pool: &PgPool, cipher: &FieldCipher) -> Result<FeeCollectionStats, ApiError> {
    let records = fee_repo::list_all(pool).await?;
    let today = Utc::now().date_naive();

    let mut decrypted = Vec::with_capacity(records.len());
    for record in &records {
        decrypted.push(FeeAmounts {
            total: cipher.decrypt_amount(&record.total_amount_enc)?,
            paid: cipher.decrypt_amount(&record.paid_amount_enc)?,
            fine: cipher.decrypt_amount(&record.fine_amount_enc)?,
            due_date: record.due_date,
            status: PaymentStatus::parse(&record.payment_status),
        });
    }

    Ok(summarize_fees(&decrypted, today))
}

/// Decrypted amounts of one fee record.
#[derive(Debug, Clone, Copy)]
pub struct FeeAmounts {
    pub total: f64,
    pub paid: f64,
    pub fine: f64,
    pub due_date: NaiveDate,
    pub status: PaymentStatus,
}

/// Group decrypted `(subject, score, max_score)` rows by subject.
fn summarize_performance(rows: Vec<(String, f64, f64)>) -> Vec<SubjectPerformanceStats> {
    let mut by_subject: BTreeMap<String, Vec<(f64, f64)>> = BTreeMap::new();
    for (subject, score, max_score) in rows {
        by_subject
            .entry(subject)
            .or_default()
            .push((score, grading::percentage(score, max_score)));
    }

    by_subject
        .into_iter()
        .map(|(subject, scores)| {
            let exams = scores.len();
            let (score_sum, pct_sum) = scores
                .iter()
                .fold((0.0, 0.0), |(s, p), (score, pct)| (s + score, p + pct));
            SubjectPerformanceStats {
                subject,
                exams,
                average_score: score_sum / exams as f64,
                average_percentage: pct_sum / exams as f64,
            }
        })
        .collect()
}

/// Fold decrypted fee amounts into collection-wide totals.
fn summarize_fees(rows: &[FeeAmounts], today: NaiveDate) -> FeeCollectionStats {
    let mut stats = FeeCollectionStats {
        records: rows.len(),
        ..FeeCollectionStats::default()
    };

    for row in rows {
        stats.total_billed += row.total;
        stats.total_collected += row.paid;
        stats.total_fines += row.fine;
        stats.total_outstanding += fees::calculate_amount_due(row.total, row.paid, row.fine);
        if fees::is_overdue(row.due_date, today, row.status) {
            stats.overdue_count += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_summarize_performance_groups_by_subject() {
        let rows = vec![
            ("Mathematics".to_string(), 80.0, 100.0),
            ("Mathematics".to_string(), 90.0, 100.0),
            ("Physics".to_string(), 35.0, 50.0),
        ];

        let stats = summarize_performance(rows);

        assert_eq!(stats.len(), 2);
        // BTreeMap ordering: Mathematics before Physics
        assert_eq!(stats[0].subject, "Mathematics");
        assert_eq!(stats[0].exams, 2);
        assert_eq!(stats[0].average_score, 85.0);
        assert_eq!(stats[0].average_percentage, 85.0);

        assert_eq!(stats[1].subject, "Physics");
        assert_eq!(stats[1].exams, 1);
        assert_eq!(stats[1].average_score, 35.0);
        assert_eq!(stats[1].average_percentage, 70.0);
    }

    #[test]
    fn test_summarize_performance_empty() {
        assert!(summarize_performance(Vec::new()).is_empty());
    }

    #[test]
    fn test_summarize_fees_totals_and_overdue() {
        let today = NaiveDate::from_ymd_opt(2026, 8, 4).unwrap();
        let rows = vec![
            FeeAmounts {
                total: 1000.0,
                paid: 400.0,
                fine: 50.0,
                due_date: today - Duration::days(10),
                status: PaymentStatus::Partial,
            },
            FeeAmounts {
                total: 500.0,
                paid: 500.0,
                fine: 0.0,
                due_date: today - Duration::days(10),
                status: PaymentStatus::Paid,
            },
            FeeAmounts {
                total: 200.0,
                paid: 0.0,
                fine: 0.0,
                due_date: today + Duration::days(10),
                status: PaymentStatus::Pending,
            },
        ];

        let stats = summarize_fees(&rows, today);

        assert_eq!(stats.records, 3);
        assert_eq!(stats.total_billed, 1700.0);
        assert_eq!(stats.total_collected, 900.0);
        assert_eq!(stats.total_fines, 50.0);
        // 650 outstanding on the first record, 0 on the paid one, 200 pending
        assert_eq!(stats.total_outstanding, 850.0);
        // Only the first record is overdue: the paid one is settled, the
        // pending one is not yet due
        assert_eq!(stats.overdue_count, 1);
    }
}
