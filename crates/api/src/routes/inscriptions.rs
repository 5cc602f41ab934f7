//! Route definitions for inscription submissions.
//!
//! Mounted at `/inscriptions` by `app_routes()`.

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use crate::handlers::inscriptions;
use crate::state::AppState;

/// Largest accepted multipart submission. Three scanned documents plus the
/// text fields fit comfortably; axum's 2 MiB default would reject them.
const MAX_SUBMISSION_BYTES: usize = 25 * 1024 * 1024;

/// Inscription routes.
///
/// ```text
/// POST   /                  -> create_inscription (multipart)
/// GET    /                  -> list_inscriptions
/// GET    /{id}              -> get_inscription
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(inscriptions::create_inscription).get(inscriptions::list_inscriptions),
        )
        .route("/{id}", get(inscriptions::get_inscription))
        .layer(DefaultBodyLimit::max(MAX_SUBMISSION_BYTES))
}
