//! Runtime settings for the validator and its adapters.
//!
//! Built once at start-up from CLI flags and environment variables and passed
//! down explicitly.

use crate::error::{Result, SkCheckError};
use chrono_tz::Tz;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.stripe.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_TIMEZONE: &str = "America/Argentina/Buenos_Aires";
pub const DEFAULT_ERROR_LOG: &str = "error_log.txt";

/// Card used to mint the disposable token. Defaults to the provider's
/// documented test card, which is only accepted in test mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCard {
    pub number: String,
    pub exp_month: String,
    pub exp_year: String,
    pub cvc: String,
}

impl Default for TestCard {
    fn default() -> Self {
        Self {
            number: "4242424242424242".to_string(),
            exp_month: "12".to_string(),
            exp_year: "2034".to_string(),
            cvc: "123".to_string(),
        }
    }
}

impl TestCard {
    pub fn form(&self) -> Vec<(String, String)> {
        vec![
            ("card[number]".to_string(), self.number.clone()),
            ("card[exp_month]".to_string(), self.exp_month.clone()),
            ("card[exp_year]".to_string(), self.exp_year.clone()),
            ("card[cvc]".to_string(), self.cvc.clone()),
        ]
    }
}

/// The live charge made against the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCharge {
    pub amount: i64,
    pub currency: String,
    pub description: String,
}

impl Default for TestCharge {
    fn default() -> Self {
        Self {
            amount: 100,
            currency: "usd".to_string(),
            description: "Test charge for Stripe key validation".to_string(),
        }
    }
}

impl TestCharge {
    pub fn form(&self, token_id: &str) -> Vec<(String, String)> {
        vec![
            ("amount".to_string(), self.amount.to_string()),
            ("currency".to_string(), self.currency.clone()),
            ("source".to_string(), token_id.to_string()),
            ("description".to_string(), self.description.clone()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_base: String,
    pub timeout: Duration,
    /// Zone used for report timestamps.
    pub timezone: Tz,
    /// Transport failures are appended here when set.
    pub error_log: Option<PathBuf>,
    pub test_card: TestCard,
    pub test_charge: TestCharge,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            timezone: chrono_tz::America::Argentina::Buenos_Aires,
            error_log: None,
            test_card: TestCard::default(),
            test_charge: TestCharge::default(),
        }
    }
}

impl Settings {
    /// Checks values that clap cannot: non-empty base, non-zero timeout.
    pub fn validate(&self) -> Result<()> {
        if self.api_base.trim().is_empty() {
            return Err(SkCheckError::Config("API base URL is empty".to_string()));
        }
        if !self.api_base.starts_with("http://") && !self.api_base.starts_with("https://") {
            return Err(SkCheckError::Config(format!(
                "API base URL must start with http:// or https://, got {}",
                self.api_base
            )));
        }
        if self.timeout.is_zero() {
            return Err(SkCheckError::Config(
                "Timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses an IANA zone name such as `America/Argentina/Buenos_Aires`.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.parse::<Tz>()
        .map_err(|e| SkCheckError::Config(format!("Unknown timezone '{name}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert_eq!(settings.api_base, "https://api.stripe.com");
    }

    #[test]
    fn test_rejects_bad_settings() {
        let settings = Settings {
            timeout: Duration::ZERO,
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SkCheckError::Config(_))));

        let settings = Settings {
            api_base: "  ".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SkCheckError::Config(_))));

        let settings = Settings {
            api_base: "api.stripe.com".to_string(),
            ..Settings::default()
        };
        assert!(matches!(settings.validate(), Err(SkCheckError::Config(_))));
    }

    #[test]
    fn test_parse_timezone() {
        assert_eq!(
            parse_timezone("America/Argentina/Buenos_Aires").unwrap(),
            chrono_tz::America::Argentina::Buenos_Aires
        );
        assert_eq!(parse_timezone("UTC").unwrap(), chrono_tz::UTC);
        assert!(matches!(
            parse_timezone("Mars/Olympus_Mons"),
            Err(SkCheckError::Config(_))
        ));
    }

    #[test]
    fn test_form_encoding_pairs() {
        let card = TestCard::default().form();
        assert_eq!(card[0], ("card[number]".to_string(), "4242424242424242".to_string()));
        assert_eq!(card.len(), 4);

        let charge = TestCharge::default().form("tok_abc");
        assert!(charge.contains(&("amount".to_string(), "100".to_string())));
        assert!(charge.contains(&("currency".to_string(), "usd".to_string())));
        assert!(charge.contains(&("source".to_string(), "tok_abc".to_string())));
    }
}
