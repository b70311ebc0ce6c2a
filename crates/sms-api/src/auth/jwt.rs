use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::roles::Role;
use crate::error::ApiError;

/// Claims carried by every token; `role` drives the per-operation
/// allow-list checks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    /// User id, stringified UUID
    pub sub: String,
    pub email: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn generate_jwt_token(
    user_id: Uuid,
    email: String,
    role: Role,
    jwt_secret: &str,
    expiry_hours: i64,
) -> Result<String, ApiError> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::hours(expiry_hours);

    let claims = Claims {
        sub: user_id.to_string(),
        email,
        role: role.as_str().to_string(),
        exp: expires_at.timestamp() as usize,
        iat: issued_at.timestamp() as usize,
    };

    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )?;

    Ok(token)
}

pub fn verify_jwt_token(token: &str, jwt_secret: &str) -> Result<Claims, ApiError> {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| ApiError::Auth("Invalid or expired token".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test_jwt_secret_minimum_32_characters_long";

    fn mint(role: Role, expiry_hours: i64) -> (Uuid, String) {
        let user_id = Uuid::new_v4();
        let token = generate_jwt_token(
            user_id,
            "someone@example.com".to_string(),
            role,
            SECRET,
            expiry_hours,
        )
        .expect("token generation failed");
        (user_id, token)
    }

    #[test]
    fn test_round_trip_preserves_claims() {
        let (user_id, token) = mint(Role::Admin, 24);

        let claims = verify_jwt_token(&token, SECRET).expect("verification failed");
        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, "someone@example.com");
        assert_eq!(claims.role, "Admin");
    }

    #[test]
    fn test_expiry_matches_configured_hours() {
        let (_, token) = mint(Role::Parent, 24);
        let claims = verify_jwt_token(&token, SECRET).expect("verification failed");

        // 24 hours, allowing for the second boundary during minting
        let lifetime = claims.exp - claims.iat;
        assert!((86390..=86410).contains(&lifetime), "lifetime {lifetime}s");
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let (_, token) = mint(Role::Faculty, 24);

        match verify_jwt_token(&token, "another_secret_also_32_characters_x") {
            Err(ApiError::Auth(msg)) => assert!(msg.contains("Invalid or expired token")),
            other => panic!("expected Auth error, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        assert!(verify_jwt_token("not.a.jwt", SECRET).is_err());
    }

    #[test]
    fn test_every_role_survives_the_claim() {
        for role in [
            Role::Admin,
            Role::Faculty,
            Role::Student,
            Role::Parent,
            Role::DevAuth,
        ] {
            let (_, token) = mint(role, 1);
            let claims = verify_jwt_token(&token, SECRET).expect("verification failed");
            assert_eq!(Role::parse(&claims.role), Some(role));
        }
    }
}
