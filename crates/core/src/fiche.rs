//! Validation of the fiche de renseignement (personal-info sheet).
//!
//! The fiche is the only mandatory part of a submission: it must be an
//! object carrying a non-empty `prenom` and `nom`. Everything else on the
//! sheet (birth date, address, exam year, ...) is optional and stored as
//! submitted.

use serde_json::Value;

use crate::error::CoreError;

/// Wire key of the applicant's first name.
pub const KEY_PRENOM: &str = "prenom";
/// Wire key of the applicant's last name.
pub const KEY_NOM: &str = "nom";

/// Rejection message, in the deployment's working language.
pub const MSG_FICHE_REQUIRED: &str =
    "Les champs prénom et nom de la fiche de renseignement sont obligatoires";

/// Validate that the normalized fiche carries a non-empty first and last
/// name. A fiche that degraded to a plain string during normalization
/// fails here, as does a missing fiche.
pub fn validate(fiche: Option<&Value>) -> Result<(), CoreError> {
    let has_name = |key: &str| {
        fiche
            .and_then(|f| f.get(key))
            .and_then(Value::as_str)
            .is_some_and(|s| !s.trim().is_empty())
    };

    if has_name(KEY_PRENOM) && has_name(KEY_NOM) {
        Ok(())
    } else {
        Err(CoreError::Validation(MSG_FICHE_REQUIRED.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_fiche_is_valid() {
        let fiche = json!({"prenom": "Awa", "nom": "Diop", "adresse": "Dakar"});
        assert!(validate(Some(&fiche)).is_ok());
    }

    #[test]
    fn missing_fiche_is_rejected() {
        assert!(validate(None).is_err());
    }

    #[test]
    fn missing_nom_is_rejected() {
        let fiche = json!({"prenom": "Awa"});
        assert!(validate(Some(&fiche)).is_err());
    }

    #[test]
    fn missing_prenom_is_rejected() {
        let fiche = json!({"nom": "Diop"});
        assert!(validate(Some(&fiche)).is_err());
    }

    #[test]
    fn whitespace_only_names_are_rejected() {
        let fiche = json!({"prenom": "   ", "nom": "Diop"});
        assert!(validate(Some(&fiche)).is_err());
        let fiche = json!({"prenom": "Awa", "nom": "\t"});
        assert!(validate(Some(&fiche)).is_err());
    }

    #[test]
    fn fiche_degraded_to_plain_text_is_rejected() {
        // A fiche that failed JSON decoding surfaces here as a validation
        // failure, not as a parse error.
        let fiche = json!("{prenom: Awa, nom: Diop");
        assert!(validate(Some(&fiche)).is_err());
    }

    #[test]
    fn non_string_names_are_rejected() {
        let fiche = json!({"prenom": 12, "nom": true});
        assert!(validate(Some(&fiche)).is_err());
    }

    #[test]
    fn rejection_message_is_user_facing() {
        let err = validate(None).unwrap_err();
        assert!(err.to_string().contains(MSG_FICHE_REQUIRED));
    }
}
