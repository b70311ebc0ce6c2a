use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Application user account, gated by a role claim.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub full_name: String,
    /// Role string: Admin, Faculty, Student, Parent or DevAuth
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Student record.
///
/// `parent_id` is the legacy single-parent pointer kept in sync with the
/// primary contact link in `parent_students`; the join table is the source
/// of truth.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Student {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    /// Unique, monotonic `student_<n>`
    pub roll_number: String,
    /// Active, Inactive, Graduated or Suspended
    pub status: String,
    pub parent_id: Option<Uuid>,
    pub enrollment_date: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Faculty member.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Faculty {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub subject: String,
    /// Unique, monotonic `faculty_<n>`
    pub employee_id: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parent or guardian.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Parent {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Primary, Secondary or Guardian
    pub parent_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Faculty-student assignment link (composite key `(student_id, faculty_id)`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentFaculty {
    pub student_id: Uuid,
    pub faculty_id: Uuid,
    pub is_active: bool,
    pub assigned_date: NaiveDate,
    pub subject: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Parent-student assignment link (composite key `(parent_id, student_id)`).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ParentStudent {
    pub parent_id: Uuid,
    pub student_id: Uuid,
    pub relationship: String,
    pub is_primary_contact: bool,
    pub is_authorized_to_pickup: bool,
    pub is_emergency_contact: bool,
    pub is_active: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fee record. Monetary columns hold ciphertext; decryption happens in the
/// service layer.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentFee {
    pub id: Uuid,
    pub student_id: Uuid,
    pub fee_type: String,
    pub term: String,
    pub total_amount_enc: String,
    pub paid_amount_enc: String,
    pub fine_amount_enc: String,
    /// Stored status: Pending, Partial or Paid. Overdue is derived at read time.
    pub payment_status: String,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Exam performance record. The score column holds ciphertext.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StudentPerformance {
    pub id: Uuid,
    pub student_id: Uuid,
    pub subject: String,
    pub exam_type: String,
    pub exam_date: NaiveDate,
    pub score_enc: String,
    pub max_score: f64,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for students. The roll number is generated by the service,
/// not supplied by callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    pub enrollment_date: Option<NaiveDate>,
}

/// Insert payload for faculty. The employee id is generated by the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewFaculty {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub department: String,
    pub subject: String,
}

/// Insert payload for parents.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParent {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub occupation: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub parent_type: String,
}

/// Insert payload for a parent-student link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewParentStudent {
    pub parent_id: Uuid,
    pub student_id: Uuid,
    pub relationship: String,
    pub is_primary_contact: bool,
    pub is_authorized_to_pickup: bool,
    pub is_emergency_contact: bool,
    pub notes: Option<String>,
}

/// Insert payload for a faculty-student link.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewStudentFaculty {
    pub student_id: Uuid,
    pub faculty_id: Uuid,
    pub subject: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub notes: Option<String>,
}

/// Query filters for student listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StudentQueryFilter {
    pub status: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// Substring match on name or roll number
    pub search: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// Query filters for faculty listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacultyQueryFilter {
    pub department: Option<String>,
    pub subject: Option<String>,
    pub active_only: bool,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// Query filters for parent listings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParentQueryFilter {
    pub parent_type: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub limit: Option<i32>,
    pub offset: Option<i32>,
}

/// A `(label, count)` aggregation bucket.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CountBucket {
    pub label: String,
    pub count: i64,
}
