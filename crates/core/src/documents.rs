//! Document reference resolution.
//!
//! Each submission carries up to three supporting documents (diploma,
//! identity card, payment receipt). A document reference is either the
//! public URL of a file uploaded in this request, or a URL supplied
//! directly in the request body; the latter lets a resubmission reuse
//! documents without uploading them again. A freshly uploaded file always
//! wins over a body-supplied URL for the same slot.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Path segment under which stored uploads are served.
pub const UPLOADS_SEGMENT: &str = "uploads";

/// Wire keys of the three document slots in the `documents` body field.
pub const KEY_DIPLOME_URL: &str = "diplomeUrl";
pub const KEY_CARTE_IDENTITE_URL: &str = "carteIdentiteUrl";
pub const KEY_RECU_PAIEMENT_URL: &str = "recuPaiementUrl";

/// Resolved document references as persisted with the record.
///
/// Unfilled slots are absent from the serialized form, never empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRefs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diplome_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub carte_identite_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recu_paiement_url: Option<String>,
}

impl DocumentRefs {
    /// Resolve the three document slots from this request's stored uploads
    /// and the normalized `documents` body field.
    pub fn resolve(
        base_url: &str,
        diplome: Option<&str>,
        carte_identite: Option<&str>,
        recu_paiement: Option<&str>,
        fallback: Option<&Value>,
    ) -> Self {
        Self {
            diplome_url: resolve_slot(
                diplome,
                fallback_url(fallback, KEY_DIPLOME_URL),
                base_url,
            ),
            carte_identite_url: resolve_slot(
                carte_identite,
                fallback_url(fallback, KEY_CARTE_IDENTITE_URL),
                base_url,
            ),
            recu_paiement_url: resolve_slot(
                recu_paiement,
                fallback_url(fallback, KEY_RECU_PAIEMENT_URL),
                base_url,
            ),
        }
    }
}

/// Resolve one document slot: a stored upload takes precedence over a
/// body-supplied fallback URL; with neither, the slot stays unset.
pub fn resolve_slot(
    stored_filename: Option<&str>,
    fallback_url: Option<&str>,
    base_url: &str,
) -> Option<String> {
    match stored_filename {
        Some(name) => Some(public_upload_url(base_url, name)),
        None => fallback_url.map(str::to_string),
    }
}

/// Public URL of a stored upload: `{base_url}/uploads/{filename}`.
pub fn public_upload_url(base_url: &str, stored_filename: &str) -> String {
    format!(
        "{}/{UPLOADS_SEGMENT}/{stored_filename}",
        base_url.trim_end_matches('/')
    )
}

fn fallback_url<'a>(fallback: Option<&'a Value>, key: &str) -> Option<&'a str> {
    fallback
        .and_then(|v| v.get(key))
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const BASE: &str = "https://inscriptions.example.org";

    #[test]
    fn upload_wins_over_fallback() {
        let url = resolve_slot(Some("171234-99.pdf"), Some("https://old/diplome.pdf"), BASE);
        assert_eq!(
            url.as_deref(),
            Some("https://inscriptions.example.org/uploads/171234-99.pdf")
        );
    }

    #[test]
    fn fallback_used_without_upload() {
        let url = resolve_slot(None, Some("https://old/diplome.pdf"), BASE);
        assert_eq!(url.as_deref(), Some("https://old/diplome.pdf"));
    }

    #[test]
    fn slot_stays_unset_with_neither() {
        assert_eq!(resolve_slot(None, None, BASE), None);
    }

    #[test]
    fn base_url_trailing_slash_does_not_double() {
        let url = public_upload_url("http://localhost:3000/", "f.png");
        assert_eq!(url, "http://localhost:3000/uploads/f.png");
    }

    #[test]
    fn resolve_reads_fallback_bundle_keys() {
        let fallback = json!({
            "diplomeUrl": "https://old/diplome.pdf",
            "recuPaiementUrl": "https://old/recu.jpg"
        });
        let docs = DocumentRefs::resolve(BASE, None, Some("55-7.png"), None, Some(&fallback));

        assert_eq!(docs.diplome_url.as_deref(), Some("https://old/diplome.pdf"));
        assert_eq!(
            docs.carte_identite_url.as_deref(),
            Some("https://inscriptions.example.org/uploads/55-7.png")
        );
        assert_eq!(docs.recu_paiement_url.as_deref(), Some("https://old/recu.jpg"));
    }

    #[test]
    fn degraded_fallback_bundle_is_ignored() {
        // A documents field that failed JSON decoding is a plain string
        // and contributes nothing.
        let fallback = json!("not-a-bundle");
        let docs = DocumentRefs::resolve(BASE, None, None, None, Some(&fallback));
        assert_eq!(docs, DocumentRefs::default());
    }

    #[test]
    fn empty_string_fallback_leaves_slot_unset() {
        let fallback = json!({"diplomeUrl": ""});
        let docs = DocumentRefs::resolve(BASE, None, None, None, Some(&fallback));
        assert_eq!(docs.diplome_url, None);
    }

    #[test]
    fn unset_slots_are_absent_from_json() {
        let docs = DocumentRefs {
            diplome_url: Some("https://x/uploads/a.pdf".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&docs).unwrap();
        assert_eq!(json, json!({"diplomeUrl": "https://x/uploads/a.pdf"}));
    }
}
