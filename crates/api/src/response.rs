//! Shared response envelope types for API handlers.

use inscription_db::models::inscription::Inscription;
use serde::Serialize;

/// Standard `{ "data": T }` envelope used by the read endpoints.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// Typed response for the submission endpoint.
///
/// `notification_sent` reports whether the administrative email is known
/// to have been delivered before this response was produced; under the
/// detached policy it is always `false`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    pub notification_sent: bool,
    pub message: String,
    pub inscription: Inscription,
}
