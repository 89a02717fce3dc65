mod common;

use common::{FakeStripe, VALID_KEY};
use skcheck::application::validator::KeyValidator;
use skcheck::config::{Settings, TestCard};
use skcheck::domain::report::ValidationReport;
use skcheck::infrastructure::error_log::{FileErrorLog, NullErrorLog};
use skcheck::infrastructure::http::HttpTransport;
use std::time::Duration;

fn settings_for(base_url: &str) -> Settings {
    Settings {
        api_base: base_url.to_string(),
        timeout: Duration::from_secs(5),
        ..Settings::default()
    }
}

fn http_validator(settings: &Settings) -> KeyValidator {
    KeyValidator::new(
        Box::new(HttpTransport::new(settings.api_base.clone(), settings.timeout).unwrap()),
        Box::new(NullErrorLog),
        settings,
    )
}

#[tokio::test]
async fn test_valid_key_end_to_end() {
    let stripe = FakeStripe::start().await;
    let validator = http_validator(&settings_for(&stripe.base_url));

    let report = validator.validate(VALID_KEY).await;
    let ValidationReport::Success(success) = report else {
        panic!("expected success, got {report:?}");
    };

    assert_eq!(success.stripe_key, VALID_KEY);
    assert_eq!(success.account_info.id.as_deref(), Some("acct_1Fake"));
    assert_eq!(success.account_info.business_name, "Fake Shop");
    assert_eq!(success.balance_info.available[0].formatted, "12,345.67 USD");
    assert_eq!(success.balance_info.pending[0].formatted, "25.00 USD");
    assert_eq!(success.balance_info.pending[1].formatted, "-3.00 EUR");
    assert_eq!(success.customer_count, 3);
    assert_eq!(success.charge_count, 11);

    let charge = success.test_charge_result;
    assert!(charge.success);
    assert_eq!(charge.charge_id.as_deref(), Some("ch_1Fake"));
    assert_eq!(charge.amount, Some(100));
    assert_eq!(charge.currency.as_deref(), Some("usd"));
    assert_eq!(charge.status.as_deref(), Some("succeeded"));
    assert!(charge.error.is_none());

    // four probes, token, charge
    assert_eq!(stripe.hits(), 6);
}

#[tokio::test]
async fn test_invalid_key_end_to_end() {
    let stripe = FakeStripe::start().await;
    let validator = http_validator(&settings_for(&stripe.base_url));

    let report = validator.validate("sk_test_revoked").await;
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["status"], "error");
    assert_eq!(value["message"], "The Stripe key is invalid.");
    assert_eq!(value["error_details"]["http_code"], 401);
    assert_eq!(value["error_details"]["error_type"], "authentication_error");
    assert_eq!(stripe.hits(), 4);
}

#[tokio::test]
async fn test_card_rejection_is_reported_in_success() {
    let stripe = FakeStripe::start().await;
    let settings = Settings {
        test_card: TestCard {
            number: "4000000000000002".to_string(),
            ..TestCard::default()
        },
        ..settings_for(&stripe.base_url)
    };
    let validator = http_validator(&settings);

    let ValidationReport::Success(success) = validator.validate(VALID_KEY).await else {
        panic!("expected success");
    };
    let charge = success.test_charge_result;
    assert!(!charge.success);
    assert!(charge.charge_id.is_none());
    assert_eq!(charge.error.as_deref(), Some("Your card number is incorrect."));
    assert_eq!(stripe.hits(), 5);
}

#[tokio::test]
async fn test_unreachable_api_is_logged_to_file() {
    let base = common::closed_base_url().await;
    let settings = settings_for(&base);
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("error_log.txt");

    let validator = KeyValidator::new(
        Box::new(HttpTransport::new(base, settings.timeout).unwrap()),
        Box::new(FileErrorLog::new(&log_path)),
        &settings,
    );

    let report = validator.validate(VALID_KEY).await;
    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["status"], "error");
    assert_eq!(value["message"], "Could not reach the Stripe API.");
    assert_eq!(value["error_details"]["http_code"], 0);
    assert_eq!(value["error_details"]["error_type"], "unknown");

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 4);
    for line in &lines {
        assert!(line.starts_with('['));
        assert!(line.contains("Z] GET /v1/"));
    }
    assert!(lines.iter().any(|line| line.contains("GET /v1/account:")));
}

#[tokio::test]
async fn test_error_log_appends_across_runs() {
    let base = common::closed_base_url().await;
    let settings = settings_for(&base);
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("error_log.txt");
    std::fs::write(&log_path, "[2024-01-01T00:00:00Z] earlier failure\n").unwrap();

    let validator = KeyValidator::new(
        Box::new(HttpTransport::new(base, settings.timeout).unwrap()),
        Box::new(FileErrorLog::new(&log_path)),
        &settings,
    );
    validator.validate(VALID_KEY).await;

    let contents = std::fs::read_to_string(&log_path).unwrap();
    assert!(contents.starts_with("[2024-01-01T00:00:00Z] earlier failure\n"));
    assert_eq!(contents.lines().count(), 5);
}
