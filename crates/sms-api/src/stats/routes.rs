use axum::{Json, Router, extract::State, routing::get};

use super::{
    model::{FeeCollectionStats, ParentStats, StudentStats, SubjectPerformanceStats},
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
        .route("/stats/students", get(student_stats))
        .route("/stats/parents", get(parent_stats))
        .route("/stats/performance", get(performance_stats))
        .route("/stats/fees", get(fee_stats))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn student_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<StudentStats>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let stats = service::student_stats(&state.pool).await?;
    Ok(Json(stats))
}

async fn parent_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<ParentStats>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let stats = service::parent_stats(&state.pool).await?;
    Ok(Json(stats))
}

async fn performance_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<Vec<SubjectPerformanceStats>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let stats = service::performance_stats(&state.pool, &state.cipher).await?;
    Ok(Json(stats))
}

async fn fee_stats(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<FeeCollectionStats>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let stats = service::fee_stats(&state.pool, &state.cipher).await?;
    Ok(Json(stats))
}
