use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use serde_json::json;
use uuid::Uuid;

use sms_db::models::{Parent, ParentStudent, Student, StudentFaculty};

use super::{
    model::{
        ActiveQuery, BulkAssignFacultyPayload, BulkAssignResult, BulkParentStudentPayload,
        BulkRemovePayload, ParentStudentPayload, StudentFacultyPayload,
    },
    parent_student, student_faculty,
};
use crate::{
    ApiState,
    auth::{AuthUser, roles},
    error::ApiError,
    make_rate_limit_layer,
    middleware::rate_limit,
};

pub fn routes() -> Router<ApiState> {
    // Bulk endpoints get the stricter budget
    let bulk_routes = Router::new()
        .route("/assignments/parent-student/bulk", post(bulk_create_parent_student))
        .route("/assignments/parent-student/bulk", delete(bulk_remove_parent_student))
        .route("/assignments/faculty-student/bulk", post(bulk_assign_faculty))
        .layer(make_rate_limit_layer!(
            rate_limit::SENSITIVE_RATE_PER_SECOND,
            rate_limit::SENSITIVE_BURST_SIZE
        ));

    let single_routes = Router::new()
        .route("/assignments/parent-student", post(create_parent_student))
        .route(
            "/assignments/parent-student/{parent_id}/{student_id}",
            delete(deactivate_parent_student),
        )
        .route(
            "/assignments/parent-student/{parent_id}/{student_id}/primary",
            put(set_primary_contact),
        )
        .route(
            "/assignments/parent-student/by-student/{student_id}",
            get(parents_of_student),
        )
        .route(
            "/assignments/parent-student/by-parent/{parent_id}",
            get(students_of_parent),
        )
        .route("/assignments/orphaned-students", get(orphaned_students))
        .route(
            "/assignments/parents-without-students",
            get(parents_without_students),
        )
        .route("/assignments/faculty-student", post(create_faculty_student))
        .route(
            "/assignments/faculty-student/{student_id}/{faculty_id}",
            delete(deactivate_faculty_student),
        )
        .route(
            "/assignments/faculty-student/by-student/{student_id}",
            get(faculty_of_student),
        )
        .route(
            "/assignments/faculty-student/by-faculty/{faculty_id}",
            get(students_of_faculty),
        )
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(bulk_routes).merge(single_routes)
}

async fn create_parent_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<ParentStudentPayload>,
) -> Result<(StatusCode, Json<ParentStudent>), ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let link = parent_student::create_assignment(&state.pool, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn bulk_create_parent_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<BulkParentStudentPayload>,
) -> Result<(StatusCode, Json<Vec<ParentStudent>>), ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let assignments = payload.assignments.into_iter().map(Into::into).collect();
    let links = parent_student::bulk_create(&state.pool, assignments).await?;
    Ok((StatusCode::CREATED, Json(links)))
}

async fn bulk_remove_parent_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<BulkRemovePayload>,
) -> Result<Json<serde_json::Value>, ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let removed = parent_student::bulk_remove(&state.pool, payload.pairs).await?;
    Ok(Json(json!({ "removed": removed })))
}

async fn set_primary_contact(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((parent_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ParentStudent>, ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let link = parent_student::set_primary_contact(&state.pool, parent_id, student_id).await?;
    Ok(Json(link))
}

async fn deactivate_parent_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((parent_id, student_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    parent_student::deactivate_assignment(&state.pool, parent_id, student_id).await?;
    Ok(StatusCode::OK)
}

async fn parents_of_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<Vec<ParentStudent>>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let links =
        parent_student::list_by_student(&state.pool, student_id, query.active_only).await?;
    Ok(Json(links))
}

async fn students_of_parent(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(parent_id): Path<Uuid>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<Vec<ParentStudent>>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let links = parent_student::list_by_parent(&state.pool, parent_id, query.active_only).await?;
    Ok(Json(links))
}

async fn orphaned_students(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let students = parent_student::orphaned_students(&state.pool).await?;
    Ok(Json(students))
}

async fn parents_without_students(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<Parent>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let parents = parent_student::parents_without_students(&state.pool).await?;
    Ok(Json(parents))
}

async fn create_faculty_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<StudentFacultyPayload>,
) -> Result<(StatusCode, Json<StudentFaculty>), ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let link = student_faculty::create_assignment(&state.pool, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(link)))
}

async fn bulk_assign_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<BulkAssignFacultyPayload>,
) -> Result<Json<BulkAssignResult>, ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    let result = student_faculty::bulk_assign(&state.pool, payload).await?;
    Ok(Json(result))
}

async fn deactivate_faculty_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path((student_id, faculty_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::ASSIGNMENT_WRITE)?;
    student_faculty::deactivate_assignment(&state.pool, student_id, faculty_id).await?;
    Ok(StatusCode::OK)
}

async fn faculty_of_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(student_id): Path<Uuid>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<Vec<StudentFaculty>>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let links =
        student_faculty::list_by_student(&state.pool, student_id, query.active_only).await?;
    Ok(Json(links))
}

async fn students_of_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(faculty_id): Path<Uuid>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<Vec<StudentFaculty>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let links =
        student_faculty::list_by_faculty(&state.pool, faculty_id, query.active_only).await?;
    Ok(Json(links))
}
