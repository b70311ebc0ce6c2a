use serde::Serialize;

use sms_db::models::CountBucket;

#[derive(Debug, Serialize)]
pub struct StudentStats {
    pub by_status: Vec<CountBucket>,
    pub by_state: Vec<CountBucket>,
    pub by_city: Vec<CountBucket>,
}

#[derive(Debug, Serialize)]
pub struct ParentStats {
    pub by_parent_type: Vec<CountBucket>,
    pub by_relationship: Vec<CountBucket>,
}

/// Per-subject aggregate over decrypted exam scores.
#[derive(Debug, PartialEq, Serialize)]
pub struct SubjectPerformanceStats {
    pub subject: String,
    pub exams: usize,
    pub average_score: f64,
    pub average_percentage: f64,
}

/// Collection-wide fee aggregate over decrypted amounts.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct FeeCollectionStats {
    pub records: usize,
    pub total_billed: f64,
    pub total_collected: f64,
    pub total_fines: f64,
    pub total_outstanding: f64,
    pub overdue_count: usize,
}
