//! GDPR consent context and consent-string normalization.

use serde::{Deserialize, Serialize};

/// Auction-wide GDPR consent information passed by the host framework.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GdprConsent {
    /// Whether GDPR applies to this auction.
    #[serde(default)]
    pub gdpr_applies: bool,
    /// IAB TCF consent string, if the CMP produced one.
    #[serde(default)]
    pub consent_string: Option<String>,
}

/// Remap a consent string to the endpoint's URL-safe base64 alphabet.
///
/// `+` becomes `-`, `/` becomes `_`, and trailing `=` padding is dropped.
pub fn normalize_consent_string(consent: &str) -> String {
    let remapped: String = consent
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    remapped.trim_end_matches('=').to_string()
}
