//! Repository for the `inscriptions` table.

use inscription_core::submission::NewInscription;
use inscription_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::inscription::Inscription;

/// Column list for `inscriptions` queries.
const COLUMNS: &str = "\
    id, fiche_renseignement, etablissements, formulaire_bts_dts, \
    documents, paiement, created_at, updated_at";

/// Provides persistence operations for inscriptions. Creation is
/// all-or-nothing: a failed insert leaves no partial record behind.
pub struct InscriptionRepo;

impl InscriptionRepo {
    /// Persist an assembled submission, returning the full row with its
    /// generated id and timestamps.
    pub async fn create(pool: &PgPool, input: &NewInscription) -> Result<Inscription, sqlx::Error> {
        let query = format!(
            "INSERT INTO inscriptions \
                (fiche_renseignement, etablissements, formulaire_bts_dts, documents, paiement) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Inscription>(&query)
            .bind(&input.fiche_renseignement)
            .bind(&input.etablissements)
            .bind(&input.formulaire_bts_dts)
            .bind(Json(&input.documents))
            .bind(Json(&input.paiement))
            .fetch_one(pool)
            .await
    }

    /// Find an inscription by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Inscription>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM inscriptions WHERE id = $1");
        sqlx::query_as::<_, Inscription>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List inscriptions, newest first.
    pub async fn list(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Inscription>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM inscriptions \
             ORDER BY created_at DESC \
             LIMIT $1 OFFSET $2"
        );
        sqlx::query_as::<_, Inscription>(&query)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }
}
