//! Parent-student assignment management, including primary-contact semantics.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use sms_db::{
    models::{NewParentStudent, Parent, ParentStudent, Student},
    repositories::{parent as parent_repo, parent_student as ps_repo, student as student_repo},
};

use super::model::ParentStudentPair;
use crate::error::ApiError;

/// Create a parent-student assignment.
///
/// Fails with a validation error when either side of the link does not exist
/// and with a conflict when the pair already has an assignment. When the new
/// link is the primary contact, the demote-promote swap and the legacy
/// pointer sync happen in the same transaction as the insert.
pub async fn create_assignment(
    pool: &PgPool,
    new: NewParentStudent,
) -> Result<ParentStudent, ApiError> {
    if new.relationship.trim().is_empty() {
        return Err(ApiError::Validation(
            "relationship cannot be empty".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;

    if !parent_repo::exists(&mut *tx, new.parent_id).await? {
        return Err(ApiError::Validation(format!(
            "Parent {} does not exist",
            new.parent_id
        )));
    }
    if !student_repo::exists(&mut *tx, new.student_id).await? {
        return Err(ApiError::Validation(format!(
            "Student {} does not exist",
            new.student_id
        )));
    }
    if ps_repo::find(&mut *tx, new.parent_id, new.student_id)
        .await?
        .is_some()
    {
        return Err(ApiError::Conflict(
            "This parent is already assigned to this student".to_string(),
        ));
    }

    if new.is_primary_contact {
        ps_repo::demote_primaries(&mut *tx, new.student_id).await?;
    }

    let link = ps_repo::create(&mut *tx, &new, Utc::now()).await?;

    if new.is_primary_contact {
        student_repo::set_legacy_parent(&mut *tx, new.student_id, Some(new.parent_id)).await?;
    }

    tx.commit().await?;
    Ok(link)
}

/// Make the given assignment the student's primary contact.
///
/// Demote-then-promote runs in one transaction so no interleaving can observe
/// two primaries or zero; concurrent promotions for the same student
/// serialize on the partial unique index and the last committed one wins.
pub async fn set_primary_contact(
    pool: &PgPool,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<ParentStudent, ApiError> {
    let mut tx = pool.begin().await?;

    let link = ps_repo::find(&mut *tx, parent_id, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".to_string()))?;

    if !link.is_active {
        return Err(ApiError::Validation(
            "An inactive assignment cannot be the primary contact".to_string(),
        ));
    }

    ps_repo::demote_primaries(&mut *tx, student_id).await?;
    ps_repo::promote(&mut *tx, parent_id, student_id).await?;

    // Keep the legacy single-parent pointer in sync with the primary contact
    student_repo::set_legacy_parent(&mut *tx, student_id, Some(parent_id)).await?;

    let updated = ps_repo::find(&mut *tx, parent_id, student_id)
        .await?
        .ok_or_else(|| ApiError::Internal("assignment vanished mid-transaction".to_string()))?;

    tx.commit().await?;
    Ok(updated)
}

/// Deactivate an assignment. A deactivated link cannot remain the primary
/// contact; when it was, the student is left with zero primaries and the
/// legacy pointer is cleared.
pub async fn deactivate_assignment(
    pool: &PgPool,
    parent_id: Uuid,
    student_id: Uuid,
) -> Result<(), ApiError> {
    let mut tx = pool.begin().await?;

    let link = ps_repo::find(&mut *tx, parent_id, student_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Assignment not found".to_string()))?;

    ps_repo::deactivate(&mut *tx, parent_id, student_id).await?;

    if link.is_primary_contact {
        student_repo::set_legacy_parent(&mut *tx, student_id, None).await?;
    }

    tx.commit().await?;
    Ok(())
}

/// Create a batch of assignments with a uniform timestamp. All-or-nothing:
/// any invalid reference or duplicate pair aborts the whole batch.
pub async fn bulk_create(
    pool: &PgPool,
    assignments: Vec<NewParentStudent>,
) -> Result<Vec<ParentStudent>, ApiError> {
    if assignments.is_empty() {
        return Err(ApiError::Validation(
            "assignments cannot be empty".to_string(),
        ));
    }

    let mut tx = pool.begin().await?;
    let stamped_at = Utc::now();
    let mut created = Vec::with_capacity(assignments.len());

    for new in &assignments {
        if !parent_repo::exists(&mut *tx, new.parent_id).await? {
            return Err(ApiError::Validation(format!(
                "Parent {} does not exist",
                new.parent_id
            )));
        }
        if !student_repo::exists(&mut *tx, new.student_id).await? {
            return Err(ApiError::Validation(format!(
                "Student {} does not exist",
                new.student_id
            )));
        }
        if ps_repo::find(&mut *tx, new.parent_id, new.student_id)
            .await?
            .is_some()
        {
            return Err(ApiError::Conflict(format!(
                "Parent {} is already assigned to student {}",
                new.parent_id, new.student_id
            )));
        }

        if new.is_primary_contact {
            ps_repo::demote_primaries(&mut *tx, new.student_id).await?;
        }

        let link = ps_repo::create(&mut *tx, new, stamped_at).await?;

        if new.is_primary_contact {
            student_repo::set_legacy_parent(&mut *tx, new.student_id, Some(new.parent_id)).await?;
        }

        created.push(link);
    }

    tx.commit().await?;
    Ok(created)
}

/// Remove a batch of assignments. Primary links clear the student's legacy
/// pointer on the way out.
pub async fn bulk_remove(pool: &PgPool, pairs: Vec<ParentStudentPair>) -> Result<u64, ApiError> {
    if pairs.is_empty() {
        return Err(ApiError::Validation("pairs cannot be empty".to_string()));
    }

    let mut tx = pool.begin().await?;
    let mut removed = 0;

    for pair in &pairs {
        if let Some(link) = ps_repo::find(&mut *tx, pair.parent_id, pair.student_id).await? {
            if link.is_primary_contact {
                student_repo::set_legacy_parent(&mut *tx, pair.student_id, None).await?;
            }
            removed += ps_repo::delete(&mut *tx, pair.parent_id, pair.student_id).await?;
        }
    }

    tx.commit().await?;
    Ok(removed)
}

pub async fn list_by_student(
    pool: &PgPool,
    student_id: Uuid,
    active_only: bool,
) -> Result<Vec<ParentStudent>, ApiError> {
    Ok(ps_repo::list_by_student(pool, student_id, active_only).await?)
}

pub async fn list_by_parent(
    pool: &PgPool,
    parent_id: Uuid,
    active_only: bool,
) -> Result<Vec<ParentStudent>, ApiError> {
    Ok(ps_repo::list_by_parent(pool, parent_id, active_only).await?)
}

/// Active students with no active parent link.
pub async fn orphaned_students(pool: &PgPool) -> Result<Vec<Student>, ApiError> {
    Ok(ps_repo::orphaned_students(pool).await?)
}

/// Parents with no active student link.
pub async fn parents_without_students(pool: &PgPool) -> Result<Vec<Parent>, ApiError> {
    Ok(ps_repo::parents_without_students(pool).await?)
}
