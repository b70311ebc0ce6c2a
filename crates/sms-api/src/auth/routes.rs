use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sms_db::repositories::user as user_repo;

use super::{jwt, middleware::AuthUser, roles, roles::Role, service};
use crate::{ApiState, error::ApiError, make_rate_limit_layer, metrics, middleware::rate_limit};

pub fn routes() -> Router<ApiState> {
    // Credential endpoints with strict rate limiting
    let credential_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .layer(make_rate_limit_layer!(
            rate_limit::AUTH_RATE_PER_SECOND,
            rate_limit::AUTH_BURST_SIZE
        ));

    // Authenticated routes with general rate limiting
    let session_routes = Router::new()
        .route("/auth/me", get(auth_me))
        .layer(make_rate_limit_layer!(
            rate_limit::GENERAL_RATE_PER_SECOND,
            rate_limit::GENERAL_BURST_SIZE
        ));

    Router::new().merge(credential_routes).merge(session_routes)
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RegisterRequest {
    email: String,
    password: String,
    full_name: String,
    role: String,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

async fn login(
    State(state): State<ApiState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let result = service::login(&state.pool, &payload.email, &payload.password).await;
    metrics::record_auth_event("login", result.is_ok());
    let user = result?;

    let role = Role::parse(&user.role)
        .ok_or_else(|| ApiError::Internal(format!("unknown role stored for user: {}", user.role)))?;

    let token = jwt::generate_jwt_token(
        user.id,
        user.email.clone(),
        role,
        &state.jwt_secret,
        state.jwt_expiry_hours,
    )?;

    Ok(Json(LoginResponse {
        token,
        user: UserResponse {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        },
    }))
}

async fn register(
    auth_user: AuthUser,
    State(state): State<ApiState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    auth_user.require(roles::USER_ADMIN)?;

    let role = Role::parse(&payload.role)
        .ok_or_else(|| ApiError::Validation(format!("Unknown role: {}", payload.role)))?;

    let user = service::register_user(
        &state.pool,
        &payload.email,
        &payload.password,
        &payload.full_name,
        role,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
        }),
    ))
}

async fn auth_me(
    auth_user: AuthUser,
    State(state): State<ApiState>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = user_repo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| ApiError::Auth("User not found".to_string()))?;

    Ok(Json(UserResponse {
        id: user.id,
        email: user.email,
        full_name: user.full_name,
        role: user.role,
    }))
}
