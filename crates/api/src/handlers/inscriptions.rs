//! Handlers for inscription submissions.
//!
//! The submission endpoint accepts a multipart form carrying up to five
//! JSON-encoded composite text fields and up to three uploaded documents.
//! The flow is linear: parse (tolerantly), validate the fiche, resolve
//! document references, assemble, persist, then respond and attempt the
//! administrative notification according to the configured policy.

use std::sync::Arc;

use axum::extract::multipart::Field;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::header::HOST;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;

use inscription_core::documents::DocumentRefs;
use inscription_core::pagination::{clamp_limit, clamp_offset};
use inscription_core::types::DbId;
use inscription_core::{fiche, normalize::lenient_json, submission, CoreError};
use inscription_db::models::inscription::{Inscription, InscriptionListParams};
use inscription_db::repositories::InscriptionRepo;
use inscription_notify::{AttachmentFile, NotificationMailer};

use crate::config::NotifyPolicy;
use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, SubmissionResponse};
use crate::state::AppState;
use crate::uploads::StoredUpload;

// -- Multipart field names -------------------------------------------------

const FIELD_FICHE: &str = "ficheRenseignement";
const FIELD_ETABLISSEMENTS: &str = "etablissements";
const FIELD_FORMULAIRE: &str = "formulaireBtsDts";
const FIELD_PAIEMENT: &str = "paiement";
const FIELD_DOCUMENTS: &str = "documents";
const FIELD_DIPLOME: &str = "diplome";
const FIELD_CARTE_IDENTITE: &str = "carteIdentite";
const FIELD_RECU_PAIEMENT: &str = "recuPaiement";

// -- User-facing messages --------------------------------------------------

const MSG_NOTIFY_PENDING: &str =
    "Inscription enregistrée. Tentative d'envoi de l'e-mail à l'administration...";
const MSG_NOTIFY_SENT: &str = "Inscription enregistrée et administration notifiée.";
const MSG_NOTIFY_FAILED: &str =
    "Inscription enregistrée. L'e-mail à l'administration n'a pas pu être envoyé.";
const MSG_NOTIFY_DISABLED: &str =
    "Inscription enregistrée. L'envoi d'e-mail à l'administration est désactivé.";

/// The raw multipart submission: five tolerantly-normalized composite
/// fields plus the stored uploads.
#[derive(Default)]
struct RawSubmission {
    fiche: Option<serde_json::Value>,
    etablissements: Option<serde_json::Value>,
    formulaire: Option<serde_json::Value>,
    paiement: Option<serde_json::Value>,
    documents: Option<serde_json::Value>,
    diplome: Option<StoredUpload>,
    carte_identite: Option<StoredUpload>,
    recu_paiement: Option<StoredUpload>,
}

// ---------------------------------------------------------------------------
// POST /inscriptions
// ---------------------------------------------------------------------------

/// Accept a new inscription submission.
pub async fn create_inscription(
    State(state): State<AppState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<SubmissionResponse>)> {
    let raw = read_submission(&state, &mut multipart).await?;

    // Reject before any persistence work; uploads already written for a
    // rejected submission are never referenced by a record.
    fiche::validate(raw.fiche.as_ref())?;

    let base_url = request_base_url(&headers);
    let documents = DocumentRefs::resolve(
        &base_url,
        raw.diplome.as_ref().map(|u| u.stored_name.as_str()),
        raw.carte_identite.as_ref().map(|u| u.stored_name.as_str()),
        raw.recu_paiement.as_ref().map(|u| u.stored_name.as_str()),
        raw.documents.as_ref(),
    );

    let attachments = collect_attachments(&raw);

    let record = submission::assemble(
        raw.fiche,
        raw.etablissements,
        raw.formulaire,
        documents,
        raw.paiement.as_ref(),
    );

    let inscription = InscriptionRepo::create(&state.pool, &record).await?;
    tracing::info!(inscription_id = inscription.id, "Inscription persisted");

    // Notification is best effort from here on: the record is durable and
    // the response must say so regardless of what the mailer does.
    let Some(mailer) = state.mailer.clone() else {
        tracing::info!(
            inscription_id = inscription.id,
            "Notification disabled, skipping email"
        );
        return Ok(respond(StatusCode::CREATED, false, MSG_NOTIFY_DISABLED, inscription));
    };

    match state.config.notify_policy {
        NotifyPolicy::Detached => {
            spawn_notification(mailer, inscription.clone(), attachments);
            Ok(respond(StatusCode::CREATED, false, MSG_NOTIFY_PENDING, inscription))
        }
        NotifyPolicy::Sync => match mailer.deliver(&inscription, &attachments).await {
            Ok(()) => Ok(respond(StatusCode::OK, true, MSG_NOTIFY_SENT, inscription)),
            Err(err) => {
                tracing::warn!(
                    inscription_id = inscription.id,
                    error = %err,
                    "Notification email failed"
                );
                Ok(respond(StatusCode::CREATED, false, MSG_NOTIFY_FAILED, inscription))
            }
        },
    }
}

// ---------------------------------------------------------------------------
// GET /inscriptions
// ---------------------------------------------------------------------------

/// List inscriptions, newest first.
pub async fn list_inscriptions(
    State(state): State<AppState>,
    Query(params): Query<InscriptionListParams>,
) -> AppResult<Json<DataResponse<Vec<Inscription>>>> {
    let limit = clamp_limit(params.limit, 50, 200);
    let offset = clamp_offset(params.offset);

    let inscriptions = InscriptionRepo::list(&state.pool, limit, offset).await?;
    Ok(Json(DataResponse { data: inscriptions }))
}

// ---------------------------------------------------------------------------
// GET /inscriptions/:id
// ---------------------------------------------------------------------------

/// Get a single inscription by ID.
pub async fn get_inscription(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Inscription>>> {
    let inscription = InscriptionRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Inscription",
            id,
        }))?;

    Ok(Json(DataResponse { data: inscription }))
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

/// Drain the multipart body into a [`RawSubmission`].
///
/// Text fields are normalized tolerantly (malformed JSON degrades to a
/// plain string and is caught by validation if required structure is
/// missing). File fields are written to upload storage before the loop
/// advances. Unknown fields are ignored.
async fn read_submission(
    state: &AppState,
    multipart: &mut Multipart,
) -> AppResult<RawSubmission> {
    let mut raw = RawSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        match name.as_str() {
            FIELD_FICHE => raw.fiche = Some(lenient_json(&text(field).await?)),
            FIELD_ETABLISSEMENTS => {
                raw.etablissements = Some(lenient_json(&text(field).await?));
            }
            FIELD_FORMULAIRE => raw.formulaire = Some(lenient_json(&text(field).await?)),
            FIELD_PAIEMENT => raw.paiement = Some(lenient_json(&text(field).await?)),
            FIELD_DOCUMENTS => raw.documents = Some(lenient_json(&text(field).await?)),
            FIELD_DIPLOME => raw.diplome = store_file(state, field).await?,
            FIELD_CARTE_IDENTITE => raw.carte_identite = store_file(state, field).await?,
            FIELD_RECU_PAIEMENT => raw.recu_paiement = store_file(state, field).await?,
            _ => {}
        }
    }

    Ok(raw)
}

async fn text(field: Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

/// Store one uploaded file. A field without a filename or without content
/// counts as an absent upload.
async fn store_file(state: &AppState, field: Field<'_>) -> AppResult<Option<StoredUpload>> {
    let Some(original_name) = field.file_name().map(str::to_string) else {
        return Ok(None);
    };

    let data = field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    if data.is_empty() {
        return Ok(None);
    }

    let stored = state
        .uploads
        .store(&original_name, &data)
        .await
        .map_err(|e| AppError::InternalError(format!("Failed to store upload: {e}")))?;

    Ok(Some(stored))
}

/// Base URL of this deployment, derived from the inbound request.
///
/// Honours `X-Forwarded-Proto` (first value) when running behind a
/// reverse proxy; the scheme otherwise defaults to plain HTTP.
fn request_base_url(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or("http");

    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    format!("{scheme}://{host}")
}

fn collect_attachments(raw: &RawSubmission) -> Vec<AttachmentFile> {
    [&raw.diplome, &raw.carte_identite, &raw.recu_paiement]
        .into_iter()
        .flatten()
        .map(|upload| AttachmentFile {
            filename: upload.original_name.clone(),
            path: upload.path.clone(),
        })
        .collect()
}

/// Attempt the notification on a detached task. Its outcome is observable
/// only in the logs; the response has already been decided.
fn spawn_notification(
    mailer: Arc<NotificationMailer>,
    inscription: Inscription,
    attachments: Vec<AttachmentFile>,
) {
    tokio::spawn(async move {
        if let Err(err) = mailer.deliver(&inscription, &attachments).await {
            tracing::warn!(
                inscription_id = inscription.id,
                error = %err,
                "Notification email failed"
            );
        }
    });
}

fn respond(
    status: StatusCode,
    notification_sent: bool,
    message: &str,
    inscription: Inscription,
) -> (StatusCode, Json<SubmissionResponse>) {
    (
        status,
        Json(SubmissionResponse {
            success: true,
            notification_sent,
            message: message.to_string(),
            inscription,
        }),
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn base_url_uses_host_header() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("inscriptions.example.org"));
        assert_eq!(
            request_base_url(&headers),
            "http://inscriptions.example.org"
        );
    }

    #[test]
    fn base_url_honours_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("inscriptions.example.org"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https"));
        assert_eq!(
            request_base_url(&headers),
            "https://inscriptions.example.org"
        );
    }

    #[test]
    fn base_url_takes_first_forwarded_proto() {
        let mut headers = HeaderMap::new();
        headers.insert(HOST, HeaderValue::from_static("app.local:3000"));
        headers.insert("x-forwarded-proto", HeaderValue::from_static("https, http"));
        assert_eq!(request_base_url(&headers), "https://app.local:3000");
    }

    #[test]
    fn base_url_falls_back_without_headers() {
        let headers = HeaderMap::new();
        assert_eq!(request_base_url(&headers), "http://localhost");
    }
}
