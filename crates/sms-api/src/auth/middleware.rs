use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use uuid::Uuid;

use super::{jwt::verify_jwt_token, roles::Role};
use crate::{error::ApiError, state::AuthConfig};

/// Authenticated user extractor
///
/// Use this in route handlers to ensure the caller is authenticated. It
/// validates the bearer token from the `Authorization` header and exposes the
/// role claim for per-operation checks:
///
/// ```ignore
/// async fn protected_route(auth_user: AuthUser) -> Result<(), ApiError> {
///     auth_user.require(roles::ASSIGNMENT_WRITE)?;
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: Role,
}

impl AuthUser {
    /// Check the role claim against an operation's allow-list.
    pub fn require(&self, allowed: &[Role]) -> Result<(), ApiError> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(ApiError::Forbidden(format!(
                "Role {} is not permitted to perform this operation",
                self.role.as_str()
            )))
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AuthConfig: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_config = AuthConfig::from_ref(state);

        // Get the bearer token from the Authorization header
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or_else(|| ApiError::Auth("Not authenticated".to_string()))?;

        // Verify the token
        let claims = verify_jwt_token(token, &auth_config.jwt_secret)?;

        // Parse user_id from claims
        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| ApiError::Auth("Invalid user ID in token".to_string()))?;

        // Parse the role claim
        let role = Role::parse(&claims.role)
            .ok_or_else(|| ApiError::Auth("Invalid role in token".to_string()))?;

        Ok(AuthUser {
            user_id,
            email: claims.email,
            role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::roles;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
            email: "someone@example.com".to_string(),
            role,
        }
    }

    #[test]
    fn test_require_allows_listed_roles() {
        assert!(user(Role::Admin).require(roles::ASSIGNMENT_WRITE).is_ok());
        assert!(user(Role::DevAuth).require(roles::ASSIGNMENT_WRITE).is_ok());
    }

    #[test]
    fn test_require_rejects_unlisted_roles() {
        let result = user(Role::Parent).require(roles::ASSIGNMENT_WRITE);
        assert!(matches!(result, Err(ApiError::Forbidden(_))));
    }
}
