use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};

use sms_api::{
    ApiConfig, ApiState,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{cors, request_id::request_id_middleware, security_headers},
    router, tracing as api_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    api_tracing::init_tracing(&config.env);

    // Connect to the database and run migrations
    let pool = sms_db::create_pool(&config.database_url, 10).await?;
    sms_db::ensure_db_and_migrate(&config.database_url, &pool).await?;

    // Prometheus exporter
    let metrics_handle = init_metrics()?;

    let environment = config.env;
    let bind_addr = config.bind_addr.clone();
    let cors_layer = cors::create_cors_layer(&config.allowed_origins);

    // Initialize the application state
    let state = ApiState::new(config, pool).await?;

    // Assemble the application router
    let app = router::router()
        .with_state(state)
        .merge(Router::new().route("/metrics", get(metrics_handler)).with_state(metrics_handle))
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer);
    let app = security_headers::apply_security_headers(app, environment);

    // Start the server
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("Server running on http://{bind_addr}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
