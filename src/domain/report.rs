use crate::domain::money::MoneyAmount;
use chrono::{DateTime, FixedOffset, SecondsFormat, TimeZone, Timelike, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const NO_KEY_MESSAGE: &str = "No Stripe key provided.";
pub const VALID_KEY_MESSAGE: &str = "Stripe key is valid.";
pub const INVALID_KEY_MESSAGE: &str = "The Stripe key is invalid.";
pub const UNREACHABLE_MESSAGE: &str = "Could not reach the Stripe API.";

/// Report construction time, second precision, in the configured timezone.
///
/// Serialised as ISO-8601 with a numeric offset (`2024-05-01T10:00:00-03:00`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    pub fn now_in<Tz: TimeZone>(tz: &Tz) -> Self {
        Self::at(Utc::now().with_timezone(tz).fixed_offset())
    }

    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self(instant.with_nanosecond(0).unwrap_or(instant))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_rfc3339_opts(SecondsFormat::Secs, false))
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(Self::at)
            .map_err(serde::de::Error::custom)
    }
}

/// The single output of a validation run: exactly one of success or error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ValidationReport {
    Success(SuccessReport),
    Error(ErrorReport),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessReport {
    pub message: String,
    pub timestamp: Timestamp,
    pub stripe_key: String,
    pub account_info: AccountInfo,
    pub balance_info: BalanceInfo,
    pub customer_count: u64,
    pub charge_count: u64,
    pub test_charge_result: TestChargeResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub message: String,
    pub timestamp: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_details: Option<ErrorDetails>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    pub id: Option<String>,
    pub business_name: String,
    pub country: Option<String>,
    pub default_currency: Option<String>,
    pub payouts_enabled: bool,
    pub charges_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BalanceInfo {
    pub available: Vec<MoneyAmount>,
    pub pending: Vec<MoneyAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestChargeResult {
    pub success: bool,
    pub charge_id: Option<String>,
    pub amount: Option<i64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub http_code: u16,
    pub error_type: String,
    pub error_message: String,
}

impl ValidationReport {
    pub fn no_key(timestamp: Timestamp) -> Self {
        ValidationReport::Error(ErrorReport {
            message: NO_KEY_MESSAGE.to_string(),
            timestamp,
            error_details: None,
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ValidationReport::Success(_))
    }

    /// Pretty JSON with slashes and non-ASCII left unescaped.
    pub fn to_pretty_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
