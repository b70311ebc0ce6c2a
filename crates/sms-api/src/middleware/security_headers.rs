//! Hardening headers applied to every response.

use axum::{
    Router,
    extract::Request,
    http::{HeaderValue, header::HeaderName},
    middleware::{self, Next},
    response::Response,
};

use crate::config::Environment;

const NOSNIFF: (&str, &str) = ("x-content-type-options", "nosniff");
const FRAME_DENY: (&str, &str) = ("x-frame-options", "DENY");
// HSTS is production-only so local development over plain HTTP keeps working
const HSTS: (&str, &str) = (
    "strict-transport-security",
    "max-age=31536000; includeSubDomains",
);

async fn set_security_headers(environment: Environment, req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let mut pairs = vec![NOSNIFF, FRAME_DENY];
    if environment.is_production() {
        pairs.push(HSTS);
    }

    let headers = response.headers_mut();
    for (name, value) in pairs {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

pub fn apply_security_headers<S>(router: Router<S>, environment: Environment) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn(move |req, next| {
        set_security_headers(environment, req, next)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::StatusCode, routing::get};
    use tower::ServiceExt;

    async fn respond(environment: Environment) -> Response {
        let app = apply_security_headers(
            Router::new().route("/ping", get(|| async { "pong" })),
            environment,
        );
        app.oneshot(
            axum::http::Request::builder()
                .uri("/ping")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_headers_in_production_include_hsts() {
        let response = respond(Environment::Production).await;
        assert_eq!(response.status(), StatusCode::OK);

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert!(headers.get("strict-transport-security").is_some());
    }

    #[tokio::test]
    async fn test_development_omits_hsts() {
        let response = respond(Environment::Development).await;

        let headers = response.headers();
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert!(headers.get("strict-transport-security").is_none());
    }
}
