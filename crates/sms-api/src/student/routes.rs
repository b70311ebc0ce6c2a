use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use sms_db::models::Student;

use super::{
    model::{StatusPayload, StudentListQuery, StudentPayload},
    service,
};
use crate::{
    ApiState,
    auth::{AuthUser, roles},
    error::ApiError,
    make_rate_limit_layer,
    middleware::rate_limit,
};

pub fn routes() -> Router<ApiState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students", post(create_student))
        .route("/students/{id}", get(get_student))
        .route("/students/{id}", put(update_student))
        .route("/students/{id}", delete(delete_student))
        .route("/students/{id}/status", put(set_status))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn list_students(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<StudentListQuery>,
) -> Result<Json<Vec<Student>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let students = service::list_students(&state.pool, query.into()).await?;
    Ok(Json(students))
}

async fn get_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let student = service::get_student(&state.pool, id).await?;
    Ok(Json(student))
}

async fn create_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<StudentPayload>,
) -> Result<(StatusCode, Json<Student>), ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let student = service::create_student(&state.pool, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(student)))
}

async fn update_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StudentPayload>,
) -> Result<Json<Student>, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let student = service::update_student(&state.pool, id, payload.into()).await?;
    Ok(Json(student))
}

async fn set_status(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<StatusPayload>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    service::set_status(&state.pool, id, &payload.status).await?;
    Ok(StatusCode::OK)
}

async fn delete_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    service::deactivate_student(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
