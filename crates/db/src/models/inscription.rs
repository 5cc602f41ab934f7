//! Inscription entity model.

use inscription_core::documents::DocumentRefs;
use inscription_core::paiement::PaymentInfo;
use inscription_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `inscriptions` table.
///
/// The fiche, school history, and program form are stored exactly as
/// submitted (JSONB pass-through); documents and payment are typed since
/// the assembler shapes them.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Inscription {
    pub id: DbId,
    pub fiche_renseignement: serde_json::Value,
    pub etablissements: serde_json::Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formulaire_bts_dts: Option<serde_json::Value>,
    pub documents: Json<DocumentRefs>,
    pub paiement: Json<PaymentInfo>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Query parameters for listing inscriptions.
#[derive(Debug, serde::Deserialize)]
pub struct InscriptionListParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use inscription_core::paiement::PaymentMode;
    use serde_json::json;

    fn sample() -> Inscription {
        Inscription {
            id: 7,
            fiche_renseignement: json!({"prenom": "Awa", "nom": "Diop"}),
            etablissements: json!([]),
            formulaire_bts_dts: None,
            documents: Json(DocumentRefs::default()),
            paiement: Json(PaymentInfo::default()),
            created_at: chrono::DateTime::UNIX_EPOCH,
            updated_at: chrono::DateTime::UNIX_EPOCH,
        }
    }

    #[test]
    fn serializes_with_wire_keys() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["ficheRenseignement"]["prenom"], "Awa");
        assert!(value.get("createdAt").is_some());
        assert!(value.get("updatedAt").is_some());
        // Optional program form is omitted, not null.
        assert!(value.get("formulaireBtsDts").is_none());
    }

    #[test]
    fn default_payment_serializes_as_aucun() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["paiement"]["mode"], "AUCUN");
        assert_eq!(value["paiement"]["reference"], "");
    }

    #[test]
    fn unfilled_document_slots_are_absent() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["documents"], json!({}));
        assert_eq!(
            PaymentMode::Aucun,
            serde_json::from_value::<PaymentMode>(json!("AUCUN")).unwrap()
        );
    }
}
