use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use super::{
    model::{CreateFeePayload, FeeResponse, LateFeePayload, PaymentPayload},
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
    // Money-moving endpoints get the stricter budget
    let write_routes = Router::new()
        .route("/fees", post(create_fee))
        .route("/fees/{id}/payments", post(record_payment))
        .route("/fees/{id}/late-fee", post(apply_late_fee))
        .layer(make_rate_limit_layer!(
            rate_limit::SENSITIVE_RATE_PER_SECOND,
            rate_limit::SENSITIVE_BURST_SIZE
        ));

    let read_routes = Router::new()
        .route("/fees/{id}", get(get_fee))
        .route("/fees/overdue", get(list_overdue))
        .route("/fees/student/{student_id}", get(list_by_student))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(write_routes).merge(read_routes)
}

async fn create_fee(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<CreateFeePayload>,
) -> Result<(StatusCode, Json<FeeResponse>), ApiError> {
    auth_user.require(roles::FEE_WRITE)?;
    let fee = service::create_fee(&state.pool, &state.cipher, payload).await?;
    Ok((StatusCode::CREATED, Json(fee)))
}

async fn record_payment(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<PaymentPayload>,
) -> Result<Json<FeeResponse>, ApiError> {
    auth_user.require(roles::FEE_WRITE)?;
    let fee = service::record_payment(&state.pool, &state.cipher, id, payload.amount).await?;
    Ok(Json(fee))
}

async fn apply_late_fee(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<LateFeePayload>,
) -> Result<Json<FeeResponse>, ApiError> {
    auth_user.require(roles::FEE_WRITE)?;
    let fee = service::apply_late_fee(&state.pool, &state.cipher, id, payload.daily_rate).await?;
    Ok(Json(fee))
}

async fn get_fee(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<FeeResponse>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let fee = service::get_fee(&state.pool, &state.cipher, id).await?;
    Ok(Json(fee))
}

async fn list_by_student(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(student_id): Path<Uuid>,
) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let fees = service::list_by_student(&state.pool, &state.cipher, student_id).await?;
    Ok(Json(fees))
}

async fn list_overdue(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<FeeResponse>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let fees = service::list_overdue(&state.pool, &state.cipher).await?;
    Ok(Json(fees))
}
