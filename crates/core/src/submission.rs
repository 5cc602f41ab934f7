//! Submission assembly.
//!
//! Combines the normalized composite fields and the resolved document
//! references into the record handed to the persistence layer. The only
//! shaping applied here is the school-history sequence coercion and the
//! payment defaulting; every other field passes through exactly as
//! submitted.

use serde_json::Value;

use crate::documents::DocumentRefs;
use crate::paiement::PaymentInfo;

/// The assembled record, ready to persist.
#[derive(Debug, Clone)]
pub struct NewInscription {
    pub fiche_renseignement: Value,
    pub etablissements: Value,
    pub formulaire_bts_dts: Option<Value>,
    pub documents: DocumentRefs,
    pub paiement: PaymentInfo,
}

/// Assemble the candidate record from the normalized fields.
///
/// The caller has already validated the fiche; a missing fiche here would
/// be a bug upstream, so it is stored as an empty object rather than
/// panicking.
pub fn assemble(
    fiche_renseignement: Option<Value>,
    etablissements: Option<Value>,
    formulaire_bts_dts: Option<Value>,
    documents: DocumentRefs,
    paiement: Option<&Value>,
) -> NewInscription {
    NewInscription {
        fiche_renseignement: fiche_renseignement
            .unwrap_or_else(|| Value::Object(Default::default())),
        etablissements: coerce_sequence(etablissements),
        formulaire_bts_dts,
        documents,
        paiement: PaymentInfo::from_value(paiement),
    }
}

/// Coerce the school history to a sequence: an array is used as-is, a
/// single non-null value is wrapped, null/absent becomes empty.
fn coerce_sequence(value: Option<Value>) -> Value {
    match value {
        Some(Value::Array(items)) => Value::Array(items),
        Some(Value::Null) | None => Value::Array(Vec::new()),
        Some(single) => Value::Array(vec![single]),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paiement::PaymentMode;
    use serde_json::json;

    #[test]
    fn array_etablissements_used_as_is() {
        let record = assemble(
            Some(json!({"prenom": "Awa", "nom": "Diop"})),
            Some(json!([{"annee": "2022"}, {"annee": "2023"}])),
            None,
            DocumentRefs::default(),
            None,
        );
        assert_eq!(
            record.etablissements,
            json!([{"annee": "2022"}, {"annee": "2023"}])
        );
    }

    #[test]
    fn single_etablissement_is_wrapped() {
        let record = assemble(
            Some(json!({"prenom": "Awa", "nom": "Diop"})),
            Some(json!({"annee": "2023", "etablissement": "Lycée Blaise Diagne"})),
            None,
            DocumentRefs::default(),
            None,
        );
        assert_eq!(
            record.etablissements,
            json!([{"annee": "2023", "etablissement": "Lycée Blaise Diagne"}])
        );
    }

    #[test]
    fn absent_etablissements_becomes_empty_sequence() {
        let record = assemble(
            Some(json!({"prenom": "Awa", "nom": "Diop"})),
            None,
            None,
            DocumentRefs::default(),
            None,
        );
        assert_eq!(record.etablissements, json!([]));
    }

    #[test]
    fn null_etablissements_becomes_empty_sequence() {
        let record = assemble(
            Some(json!({"prenom": "Awa", "nom": "Diop"})),
            Some(Value::Null),
            None,
            DocumentRefs::default(),
            None,
        );
        assert_eq!(record.etablissements, json!([]));
    }

    #[test]
    fn absent_paiement_defaults() {
        let record = assemble(
            Some(json!({"prenom": "Awa", "nom": "Diop"})),
            None,
            None,
            DocumentRefs::default(),
            None,
        );
        assert_eq!(record.paiement.mode, PaymentMode::Aucun);
        assert_eq!(record.paiement.reference, "");
    }

    #[test]
    fn other_fields_pass_through_unchanged() {
        let fiche = json!({"prenom": "Awa", "nom": "Diop", "mention": "Bien"});
        let formulaire = json!({"filiere": "BTS Informatique", "annee": "2024"});
        let record = assemble(
            Some(fiche.clone()),
            None,
            Some(formulaire.clone()),
            DocumentRefs::default(),
            Some(&json!({"mode": "INSTITUT", "reference": "R-1"})),
        );
        assert_eq!(record.fiche_renseignement, fiche);
        assert_eq!(record.formulaire_bts_dts, Some(formulaire));
        assert_eq!(record.paiement.mode, PaymentMode::Institut);
        assert_eq!(record.paiement.reference, "R-1");
    }
}
