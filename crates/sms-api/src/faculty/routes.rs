use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get, post, put},
};
use uuid::Uuid;

use sms_db::models::Faculty;

use super::{
    model::{FacultyListQuery, FacultyPayload},
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
        .route("/faculty", get(list_faculty))
        .route("/faculty", post(create_faculty))
        .route("/faculty/{id}", get(get_faculty))
        .route("/faculty/{id}", put(update_faculty))
        .route("/faculty/{id}", delete(delete_faculty))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ))
}

async fn list_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Query(query): Query<FacultyListQuery>,
) -> Result<Json<Vec<Faculty>>, ApiError> {
    auth_user.require(roles::STAFF_READ)?;
    let members = service::list_faculty(&state.pool, query.into()).await?;
    Ok(Json(members))
}

async fn get_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Faculty>, ApiError> {
    auth_user.require(roles::ANY_ROLE)?;
    let member = service::get_faculty(&state.pool, id).await?;
    Ok(Json(member))
}

async fn create_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<FacultyPayload>,
) -> Result<(StatusCode, Json<Faculty>), ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let member = service::create_faculty(&state.pool, payload.into()).await?;
    Ok((StatusCode::CREATED, Json(member)))
}

async fn update_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<FacultyPayload>,
) -> Result<Json<Faculty>, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    let member = service::update_faculty(&state.pool, id, payload.into()).await?;
    Ok(Json(member))
}

async fn delete_faculty(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    auth_user.require(roles::DIRECTORY_WRITE)?;
    service::deactivate_faculty(&state.pool, id).await?;
    Ok(StatusCode::OK)
}
