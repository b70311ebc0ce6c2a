use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sms_db::models::{NewParentStudent, NewStudentFaculty};

#[derive(Debug, Clone, Deserialize)]
pub struct ParentStudentPayload {
    pub parent_id: Uuid,
    pub student_id: Uuid,
    pub relationship: String,
    #[serde(default)]
    pub is_primary_contact: bool,
    #[serde(default)]
    pub is_authorized_to_pickup: bool,
    #[serde(default)]
    pub is_emergency_contact: bool,
    pub notes: Option<String>,
}

impl From<ParentStudentPayload> for NewParentStudent {
    fn from(payload: ParentStudentPayload) -> Self {
        Self {
            parent_id: payload.parent_id,
            student_id: payload.student_id,
            relationship: payload.relationship,
            is_primary_contact: payload.is_primary_contact,
            is_authorized_to_pickup: payload.is_authorized_to_pickup,
            // A primary contact is always an emergency contact
            is_emergency_contact: payload.is_emergency_contact || payload.is_primary_contact,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkParentStudentPayload {
    pub assignments: Vec<ParentStudentPayload>,
}

/// A (parent, student) pair for bulk removal.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ParentStudentPair {
    pub parent_id: Uuid,
    pub student_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct BulkRemovePayload {
    pub pairs: Vec<ParentStudentPair>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StudentFacultyPayload {
    pub student_id: Uuid,
    pub faculty_id: Uuid,
    pub subject: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub notes: Option<String>,
}

impl From<StudentFacultyPayload> for NewStudentFaculty {
    fn from(payload: StudentFacultyPayload) -> Self {
        Self {
            student_id: payload.student_id,
            faculty_id: payload.faculty_id,
            subject: payload.subject,
            academic_year: payload.academic_year,
            semester: payload.semester,
            notes: payload.notes,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BulkAssignFacultyPayload {
    pub faculty_id: Uuid,
    pub student_ids: Vec<Uuid>,
    pub subject: Option<String>,
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub notes: Option<String>,
}

/// Outcome of a bulk faculty assignment: per-item duplicate skipping with
/// partial success reporting.
#[derive(Debug, Serialize)]
pub struct BulkAssignResult {
    pub assigned: Vec<Uuid>,
    pub errors: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ActiveQuery {
    #[serde(default = "default_active_only")]
    pub active_only: bool,
}

fn default_active_only() -> bool {
    true
}
