//! Tolerant decoding of composite form fields.
//!
//! The inscription form is submitted as multipart form data, so nested
//! structures (the fiche, the school history, the payment info) arrive as
//! JSON-encoded text fields. Some legitimate values are plain strings that
//! were never JSON to begin with, so decoding is lenient: text that fails
//! to parse is passed through unchanged and caught later by validation if
//! it lacks required structure.

use serde_json::Value;

/// Decode a textual field into structured data, passing malformed input
/// through as a plain string. Total: never fails.
pub fn lenient_json(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn valid_json_object_decodes() {
        let value = lenient_json(r#"{"prenom":"Awa","nom":"Diop"}"#);
        assert_eq!(value, json!({"prenom": "Awa", "nom": "Diop"}));
    }

    #[test]
    fn valid_json_array_decodes() {
        let value = lenient_json(r#"[{"annee":"2023"}]"#);
        assert_eq!(value, json!([{"annee": "2023"}]));
    }

    #[test]
    fn malformed_json_passes_through_as_string() {
        let value = lenient_json("{prenom: Awa");
        assert_eq!(value, Value::String("{prenom: Awa".to_string()));
    }

    #[test]
    fn plain_reference_string_passes_through() {
        let value = lenient_json("WV-2024-00123");
        assert_eq!(value, Value::String("WV-2024-00123".to_string()));
    }

    #[test]
    fn bare_json_scalars_decode() {
        assert_eq!(lenient_json("42"), json!(42));
        assert_eq!(lenient_json("null"), Value::Null);
        assert_eq!(lenient_json(r#""quoted""#), json!("quoted"));
    }
}
