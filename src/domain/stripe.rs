//! Provider payload shapes.
//!
//! Every field is optional: the provider may omit anything, and a missing field
//! must never abort a validation run. Fallbacks for absent values are the named
//! constants below and are applied in [`crate::domain::normalize`] only.

use serde::{Deserialize, Deserializer};
use serde::de::DeserializeOwned;
use serde_json::Value;

pub const BUSINESS_NAME_FALLBACK: &str = "N/A";
pub const ERROR_TYPE_FALLBACK: &str = "unknown";
pub const ERROR_MESSAGE_FALLBACK: &str = "No additional error information provided.";
pub const TOTAL_COUNT_FALLBACK: u64 = 0;

/// Field-level fallback: `null`, a wrong type or a malformed nested value
/// becomes `T::default()` without failing the enclosing payload.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(&value).unwrap_or_default())
}

/// Like [`lenient`] for arrays, but keeps every well-formed element when some
/// elements are malformed.
fn lenient_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items
            .iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct BusinessProfile {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AccountPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub business_profile: Option<BusinessProfile>,
    #[serde(default, deserialize_with = "lenient")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub default_currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub payouts_enabled: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub charges_enabled: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalanceEntry {
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct BalancePayload {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub available: Vec<BalanceEntry>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub pending: Vec<BalanceEntry>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ListPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub total_count: Option<u64>,
}

/// Token and charge creation share the fields the report reads.
#[derive(Debug, Default, Deserialize)]
pub struct ObjectPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub amount: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type", default, deserialize_with = "lenient")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ErrorEnvelope {
    #[serde(default, deserialize_with = "lenient")]
    pub error: Option<ApiError>,
}

/// Reads a payload out of a parsed body. An absent body, or one whose shape
/// does not match, yields the all-empty payload.
pub fn decode<T: DeserializeOwned + Default>(body: Option<&Value>) -> T {
    body.and_then(|value| T::deserialize(value).ok())
        .unwrap_or_default()
}
