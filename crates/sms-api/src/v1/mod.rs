use axum::Router;

use crate::{assignment, auth, faculty, fee, parent, performance, state::ApiState, stats, student};

/// V1 API routes
pub fn routes() -> Router<ApiState> {
    Router::new()
        .merge(auth::routes::routes())
        .merge(student::routes::routes())
        .merge(faculty::routes::routes())
        .merge(parent::routes::routes())
        .merge(assignment::routes::routes())
        .merge(fee::routes::routes())
        .merge(performance::routes::routes())
        .merge(stats::routes::routes())
}
