//! Payment info defaulting.
//!
//! Payment is optional at submission time: an applicant may enroll first
//! and pay at the institute later. The mode is therefore a closed set with
//! an explicit "none" sentinel, and unrecognized input falls back to the
//! sentinel instead of being rejected.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Accepted payment channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    #[default]
    #[serde(rename = "AUCUN")]
    Aucun,
    #[serde(rename = "INSTITUT")]
    Institut,
    #[serde(rename = "WAVE")]
    Wave,
    #[serde(rename = "ORANGE_MONEY")]
    OrangeMoney,
}

impl PaymentMode {
    /// Parse a submitted mode string. Anything outside the closed set maps
    /// to [`PaymentMode::Aucun`].
    pub fn parse(raw: &str) -> Self {
        match raw {
            "INSTITUT" => Self::Institut,
            "WAVE" => Self::Wave,
            "ORANGE_MONEY" => Self::OrangeMoney,
            _ => Self::Aucun,
        }
    }
}

/// Payment details persisted with the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub mode: PaymentMode,
    pub reference: String,
}

impl PaymentInfo {
    /// Extract payment info from the normalized `paiement` field.
    ///
    /// The mode is taken only when present and non-empty; the reference
    /// only when it is a string. Everything else defaults.
    pub fn from_value(paiement: Option<&Value>) -> Self {
        let mode = paiement
            .and_then(|p| p.get("mode"))
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(PaymentMode::parse)
            .unwrap_or_default();

        let reference = paiement
            .and_then(|p| p.get("reference"))
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Self { mode, reference }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
