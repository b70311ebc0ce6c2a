//! Faculty-student assignment management.
//!
//! Mirror of the parent-student module without a primary-contact concept: a
//! student may be actively assigned to many faculty members.

use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sms_db::{
    models::{NewStudentFaculty, StudentFaculty},
    repositories::{faculty as faculty_repo, student as student_repo, student_faculty as sf_repo},
};

use super::model::{BulkAssignFacultyPayload, BulkAssignResult};
use crate::error::ApiError;

/// Create a faculty-student assignment.
pub async fn create_assignment(
    pool: &PgPool,
    new: NewStudentFaculty,
) -> Result<StudentFaculty, ApiError> {
    let mut tx = pool.begin().await?;

    if !faculty_repo::exists(&mut *tx, new.faculty_id).await? {
        return Err(ApiError::Validation(format!(
            "Faculty member {} does not exist",
            new.faculty_id
        )));
    }
    if !student_repo::exists(&mut *tx, new.student_id).await? {
        return Err(ApiError::Validation(format!(
            "Student {} does not exist",
            new.student_id
        )));
    }
    if sf_repo::find(&mut *tx, new.student_id, new.faculty_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "This student is already assigned to this faculty member".to_string(),
        ));
    }

    let link = sf_repo::create(&mut *tx, &new, Utc::now()).await?;

    tx.commit().await?;
    Ok(link)
}

/// Assign many students to one faculty member.
///
/// Every student id is validated up front and a single missing id fails the
/// whole batch before any write. Duplicates are then skipped per item with
/// partial success reporting: the result carries both the assigned ids and a
/// list of error strings.
pub async fn bulk_assign(
    pool: &PgPool,
    payload: BulkAssignFacultyPayload,
) -> Result<BulkAssignResult, ApiError> {
    if payload.student_ids.is_empty() {
        return Err(ApiError::Validation(
            "student_ids cannot be empty".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    if !faculty_repo::exists(&mut *tx, payload.faculty_id).await? {
        return Err(ApiError::Validation(format!(
            "Faculty member {} does not exist",
            payload.faculty_id
        )));
    }

    // Validate every student id before writing anything
    let existing: HashSet<Uuid> = student_repo::find_existing_ids(&mut *tx, &payload.student_ids)
        .await?
        .into_iter()
        .collect();
    let missing: Vec<Uuid> = payload
        .student_ids
        .iter()
        .filter(|id| !existing.contains(id))
        .copied()
        .collect();
    if !missing.is_empty() {
        let ids = missing
            .iter()
            .map(Uuid::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        return Err(ApiError::Validation(format!(
            "Students do not exist: {ids}"
        )));
    }

    let already_assigned: HashSet<Uuid> =
        sf_repo::existing_student_ids(&mut *tx, payload.faculty_id, &payload.student_ids)
            .await?
            .into_iter()
            .collect();

    let stamped_at = Utc::now();
    let mut assigned = Vec::new();
    let mut errors = Vec::new();
    let mut seen = HashSet::new();

    for student_id in &payload.student_ids {
        if !seen.insert(*student_id) {
            errors.push(format!("Student {student_id} listed more than once"));
            continue;
        }
        if already_assigned.contains(student_id) {
            errors.push(format!(
                "Student {student_id} is already assigned to this faculty member"
            ));
            continue;
        }

        let new = NewStudentFaculty {
            student_id: *student_id,
            faculty_id: payload.faculty_id,
            subject: payload.subject.clone(),
            academic_year: payload.academic_year.clone(),
            semester: payload.semester.clone(),
            notes: payload.notes.clone(),
        };
        sf_repo::create(&mut *tx, &new, stamped_at).await?;
        assigned.push(*student_id);
    }

    tx.commit().await?;
    Ok(BulkAssignResult { assigned, errors })
}

/// Soft delete an assignment.
pub async fn deactivate_assignment(
    pool: &PgPool,
    student_id: Uuid,
    faculty_id: Uuid,
) -> Result<(), ApiError> {
    if !sf_repo::deactivate(pool, student_id, faculty_id).await? {
        return Err(ApiError::NotFound("Assignment not found".to_string()));
    }
    Ok(())
}

pub async fn list_by_student(
    pool: &PgPool,
    student_id: Uuid,
    active_only: bool,
) -> Result<Vec<StudentFaculty>, ApiError> {
    Ok(sf_repo::list_by_student(pool, student_id, active_only).await?)
}

pub async fn list_by_faculty(
    pool: &PgPool,
    faculty_id: Uuid,
    active_only: bool,
) -> Result<Vec<StudentFaculty>, ApiError> {
    Ok(sf_repo::list_by_faculty(pool, faculty_id, active_only).await?)
}
