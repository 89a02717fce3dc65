use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Minor units per major unit. Applied to every currency alike, zero-decimal
/// currencies included.
const MINOR_UNIT_SCALE: u32 = 2;

/// Renders an amount in minor units as `1,234.56 USD`.
///
/// The amount is divided by 100 regardless of currency and grouped in
/// thousands. Integer minor units scale exactly to two decimals, so no
/// rounding takes place.
pub fn format_money(amount: i64, currency: &str) -> String {
    let major = Decimal::new(amount, MINOR_UNIT_SCALE);
    format!("{} {}", group_thousands(&format!("{major:.2}")), currency.to_uppercase())
}

fn group_thousands(number: &str) -> String {
    let (sign, digits) = match number.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", number),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if fraction.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{fraction}")
    }
}

/// One balance line: raw minor units, the provider's currency code and the
/// human-readable rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoneyAmount {
    pub amount: i64,
    pub currency: String,
    pub formatted: String,
}

impl MoneyAmount {
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        let currency = currency.into();
        let formatted = format_money(amount, &currency);
        Self {
            amount,
            currency,
            formatted,
        }
    }
}
