use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use sms_db::models::Parent;

use super::{
    model::{ParentListQuery, ParentPayload},
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
        .route("/parents", get(list_parents))
        .route("/parents", post(create_parent))
        .route("/parents/{id}", get(get_parent))
        .route("/parents/{id}", put(update_parent))
        .route("/parents/{id}", delete(delete_parent))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn list_parents(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<ParentListQuery>,
) -> Result<Json<Vec<Parent>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let parents = service::list_parents(&state.pool, query.into()).await?;
    Ok(Json(parents))
}

async fn get_parent(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Parent>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let parent = service::get_parent(&state.pool, id).await?;
    Ok(Json(parent))
}

async fn create_parent(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<ParentPayload>,
) -> Result<(StatusCode, Json<Parent>), ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let parent = service::create_parent(&state.pool, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(parent)))
}

async fn update_parent(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ParentPayload>,
) -> Result<Json<Parent>, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let parent = service::update_parent(&state.pool, id, payload.into()).await?;
    Ok(Json(parent))
}

async fn delete_parent(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    service::delete_parent(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
