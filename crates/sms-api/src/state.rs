use axum::extract::FromRef;
use sqlx::PgPool;

use crate::{ApiConfig, auth, config::Environment, crypto::FieldCipher};

#[derive(Clone)]
pub struct ApiState {
    pub pool: PgPool,
    pub jwt_secret: String,
    pub jwt_expiry_hours: i64,
    pub environment: Environment,
    pub cipher: FieldCipher,
}

impl std::fmt::Debug for ApiState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiState")
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

impl ApiState {
    pub async fn new(config: ApiConfig, pool: PgPool) -> anyhow::Result<Self> {
        let cipher = FieldCipher::new(&config.field_encryption_key);

        // Seed the initial admin account if configured
        if let (Some(email), Some(password)) =
            (config.admin_email.as_ref(), config.admin_password.as_ref())
        {
            match auth::service::seed_admin(&pool, email, password).await {
                Ok(true) => tracing::info!("Seeded initial admin account"),
                Ok(false) => tracing::debug!("Admin account already present, skipping seed"),
                Err(e) => tracing::error!("Failed to seed admin account: {e}"),
            }
        } else {
            tracing::warn!("No admin account configured (missing ADMIN_EMAIL/ADMIN_PASSWORD)");
        }

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret,
            jwt_expiry_hours: config.jwt_expiry_hours,
            environment: config.env,
            cipher,
        })
    }
}

/// The subset of state the auth extractor needs.
#[derive(Clone, Debug)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

impl FromRef<ApiState> for AuthConfig {
    fn from_ref(state: &ApiState) -> Self {
        Self {
            jwt_secret: state.jwt_secret.clone(),
        }
    }
}
