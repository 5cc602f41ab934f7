use std::sync::Arc;

use inscription_notify::NotificationMailer;

use crate::config::ServerConfig;
use crate::uploads::UploadStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: inscription_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Durable storage for uploaded documents.
    pub uploads: Arc<UploadStore>,
    /// Administrative notification mailer; `None` when notification is
    /// disabled or unconfigured, in which case no attempt is ever made.
    pub mailer: Option<Arc<NotificationMailer>>,
}
