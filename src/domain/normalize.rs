//! Maps raw probe results onto the report's sub-structures.

use crate::domain::money::MoneyAmount;
use crate::domain::probe::ProbeResult;
use crate::domain::report::{AccountInfo, BalanceInfo, ErrorDetails, TestChargeResult};
use crate::domain::stripe::{
    AccountPayload, BUSINESS_NAME_FALLBACK, BalanceEntry, BalancePayload, ERROR_MESSAGE_FALLBACK,
    ERROR_TYPE_FALLBACK, ErrorEnvelope, ListPayload, ObjectPayload, TOTAL_COUNT_FALLBACK, decode,
};
use tracing::warn;

pub const TOKEN_WITHOUT_ID_MESSAGE: &str = "Token response did not include an id.";

/// How far the live test transaction got.
#[derive(Debug, Clone, PartialEq)]
pub enum TestTransaction {
    /// Token creation failed, no charge was attempted.
    TokenFailed(ProbeResult),
    /// Token creation answered 200 without an id, no charge was attempted.
    TokenWithoutId,
    /// The charge call was made; carries its result.
    Charged(ProbeResult),
}

pub fn account_info(probe: &ProbeResult) -> AccountInfo {
    let account: AccountPayload = decode(probe.body.as_ref());
    AccountInfo {
        id: account.id,
        business_name: account
            .business_profile
            .and_then(|profile| profile.name)
            .unwrap_or_else(|| BUSINESS_NAME_FALLBACK.to_string()),
        country: account.country,
        default_currency: account.default_currency,
        payouts_enabled: account.payouts_enabled.unwrap_or(false),
        charges_enabled: account.charges_enabled.unwrap_or(false),
    }
}

/// Formats both balance arrays, preserving upstream order. A failed probe
/// yields empty arrays.
pub fn balance_info(probe: &ProbeResult) -> BalanceInfo {
    if !probe.is_success() {
        return BalanceInfo::default();
    }
    let balance: BalancePayload = decode(probe.body.as_ref());
    BalanceInfo {
        available: money_amounts("available", balance.available),
        pending: money_amounts("pending", balance.pending),
    }
}

fn money_amounts(bucket: &str, entries: Vec<BalanceEntry>) -> Vec<MoneyAmount> {
    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match (entry.amount, entry.currency) {
            (Some(amount), Some(currency)) => Some(MoneyAmount::new(amount, currency)),
            _ => {
                warn!(bucket, index, "Skipping balance entry without amount or currency");
                None
            }
        })
        .collect()
}

/// `total_count` of a list probe, `0` when absent or the probe failed.
pub fn total_count(probe: &ProbeResult) -> u64 {
    if !probe.is_success() {
        return TOTAL_COUNT_FALLBACK;
    }
    decode::<ListPayload>(probe.body.as_ref())
        .total_count
        .unwrap_or(TOTAL_COUNT_FALLBACK)
}

/// Details for a rejected primary probe.
pub fn error_details(probe: &ProbeResult) -> ErrorDetails {
    let error = decode::<ErrorEnvelope>(probe.body.as_ref()).error.unwrap_or_default();
    ErrorDetails {
        http_code: probe.http_status,
        error_type: error
            .error_type
            .unwrap_or_else(|| ERROR_TYPE_FALLBACK.to_string()),
        error_message: error
            .message
            .or_else(|| probe.transport_error.clone())
            .unwrap_or_else(|| ERROR_MESSAGE_FALLBACK.to_string()),
    }
}

pub fn test_charge_result(transaction: &TestTransaction) -> TestChargeResult {
    match transaction {
        TestTransaction::TokenFailed(token) => TestChargeResult {
            success: false,
            charge_id: None,
            amount: None,
            currency: None,
            status: None,
            error: failure_message(token),
        },
        TestTransaction::TokenWithoutId => TestChargeResult {
            success: false,
            charge_id: None,
            amount: None,
            currency: None,
            status: None,
            error: Some(TOKEN_WITHOUT_ID_MESSAGE.to_string()),
        },
        TestTransaction::Charged(charge) => {
            let object: ObjectPayload = decode(charge.body.as_ref());
            TestChargeResult {
                success: charge.is_success(),
                charge_id: object.id,
                amount: object.amount,
                currency: object.currency,
                status: object.status,
                error: failure_message(charge),
            }
        }
    }
}

/// Token id from a successful token creation.
pub fn token_id(probe: &ProbeResult) -> Option<String> {
    decode::<ObjectPayload>(probe.body.as_ref()).id
}

/// The provider's `error.message`, else the transport error text.
fn failure_message(probe: &ProbeResult) -> Option<String> {
    decode::<ErrorEnvelope>(probe.body.as_ref())
        .error
        .and_then(|error| error.message)
        .or_else(|| probe.transport_error.clone())
}
