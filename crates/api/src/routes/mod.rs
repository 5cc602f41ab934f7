pub mod health;
pub mod inscriptions;

use std::path::Path;

use axum::Router;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Build the application route tree.
///
/// ```text
/// /health                     service and database health
///
/// /inscriptions               submit (POST, multipart), list (GET)
/// /inscriptions/{id}          get one (GET)
///
/// /uploads/{filename}         stored documents (static, read-only)
/// ```
pub fn app_routes(upload_root: &Path) -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/inscriptions", inscriptions::router())
        .nest_service("/uploads", ServeDir::new(upload_root))
}
