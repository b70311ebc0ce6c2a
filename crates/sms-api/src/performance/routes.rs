use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use super::{
    model::{CreatePerformancePayload, PerformanceResponse, UpdatePerformancePayload},
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
        .route("/performance", post(create_record))
        .route("/performance/{id}", get(get_record))
        .route("/performance/{id}", put(update_record))
        .route("/performance/{id}", delete(delete_record))
        .route("/performance/student/{student_id}", get(list_by_student))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn create_record(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreatePerformancePayload>,
) -> Result<(StatusCode, Json<PerformanceResponse>), ApiError> {
    auth_user.require(roles::ACADEMIC_WRITE)?;
    let record = service::create_record(&state.pool, &state.cipher, payload).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let record = service::get_record(&state.pool, &state.cipher, id).await?;
    Ok(Json(record))
}

async fn update_record(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePerformancePayload>,
) -> Result<Json<PerformanceResponse>, ApiError> {
    auth_user.require(roles::ACADEMIC_WRITE)?;
    let record = service::update_record(&state.pool, &state.cipher, id, payload).await?;
    Ok(Json(record))
}

async fn delete_record(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::ACADEMIC_WRITE)?;
    service::delete_record(&state.pool, id).await?;
    Ok(StatusCode::OK)
}

async fn list_by_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<PerformanceResponse>>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let records = service::list_by_student(&state.pool, &state.cipher, student_id).await?;
    Ok(Json(records))
}
