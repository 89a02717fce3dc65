use crate::config::{Settings, TestCard, TestCharge};
use crate::domain::credential::Credential;
use crate::domain::normalize::{self, TestTransaction};
use crate::domain::ports::{ApiTransportBox, ErrorLogBox};
use crate::domain::probe::{ApiRequest, Endpoint, ProbeResult};
use crate::domain::report::{
    ErrorReport, INVALID_KEY_MESSAGE, SuccessReport, Timestamp, UNREACHABLE_MESSAGE,
    VALID_KEY_MESSAGE, ValidationReport,
};
use chrono_tz::Tz;
use tracing::{debug, info, instrument, warn};

/// Validates secret keys against the provider.
///
/// `KeyValidator` owns the transport and the error log. It holds no state
/// between runs, so one instance can serve concurrent validations.
pub struct KeyValidator {
    transport: ApiTransportBox,
    error_log: ErrorLogBox,
    timezone: Tz,
    test_card: TestCard,
    test_charge: TestCharge,
}

impl KeyValidator {
    /// Creates a new `KeyValidator`.
    ///
    /// # Arguments
    ///
    /// * `transport` - Executes the remote calls.
    /// * `error_log` - Receives the text of every transport failure.
    /// * `settings` - Supplies the timestamp zone and test transaction parameters.
    pub fn new(transport: ApiTransportBox, error_log: ErrorLogBox, settings: &Settings) -> Self {
        Self {
            transport,
            error_log,
            timezone: settings.timezone,
            test_card: settings.test_card.clone(),
            test_charge: settings.test_charge.clone(),
        }
    }

    /// Runs the full validation recipe for `raw_key` and returns the report.
    ///
    /// Never fails: blank input, transport failures and provider rejections all
    /// end up in the returned report.
    #[instrument(skip_all)]
    pub async fn validate(&self, raw_key: &str) -> ValidationReport {
        let Some(credential) = Credential::parse(raw_key) else {
            info!("No key provided, skipping remote calls");
            return ValidationReport::no_key(self.now());
        };
        info!(key = %credential, "Validating key");

        let (account, balance, customers, charges) = tokio::join!(
            self.call(ApiRequest::get(Endpoint::Account, credential.clone())),
            self.call(ApiRequest::get(Endpoint::Balance, credential.clone())),
            self.call(ApiRequest::get(Endpoint::RecentCustomer, credential.clone())),
            self.call(ApiRequest::get(Endpoint::RecentCharge, credential.clone())),
        );

        if !account.is_success() {
            info!(
                key = %credential,
                status = account.http_status,
                "Account probe rejected the key"
            );
            return self.error_report(&account);
        }

        let transaction = self.run_test_transaction(&credential).await;
        let report = SuccessReport {
            message: VALID_KEY_MESSAGE.to_string(),
            timestamp: self.now(),
            stripe_key: credential.expose().to_string(),
            account_info: normalize::account_info(&account),
            balance_info: normalize::balance_info(&balance),
            customer_count: normalize::total_count(&customers),
            charge_count: normalize::total_count(&charges),
            test_charge_result: normalize::test_charge_result(&transaction),
        };
        info!(
            key = %credential,
            test_charge_success = report.test_charge_result.success,
            "Key is valid"
        );
        ValidationReport::Success(report)
    }

    /// Token creation, then a charge against the token. The charge is only
    /// attempted once a token id is in hand.
    async fn run_test_transaction(&self, credential: &Credential) -> TestTransaction {
        let token = self
            .call(ApiRequest::post(
                Endpoint::CreateToken,
                credential.clone(),
                self.test_card.form(),
            ))
            .await;
        if !token.is_success() {
            debug!(status = token.http_status, "Token creation failed");
            return TestTransaction::TokenFailed(token);
        }
        let Some(token_id) = normalize::token_id(&token) else {
            warn!("Token creation succeeded without an id");
            return TestTransaction::TokenWithoutId;
        };

        let charge = self
            .call(ApiRequest::post(
                Endpoint::CreateCharge,
                credential.clone(),
                self.test_charge.form(&token_id),
            ))
            .await;
        TestTransaction::Charged(charge)
    }

    async fn call(&self, request: ApiRequest) -> ProbeResult {
        let endpoint = request.endpoint;
        let result = self.transport.execute(request).await;
        if let Some(error) = &result.transport_error
            && let Err(e) = self.error_log.record(&format!("{endpoint}: {error}")).await
        {
            warn!(error = %e, "Failed to write error log");
        }
        result
    }

    fn error_report(&self, account: &ProbeResult) -> ValidationReport {
        let message = if account.transport_error.is_some() {
            UNREACHABLE_MESSAGE
        } else {
            INVALID_KEY_MESSAGE
        };
        ValidationReport::Error(ErrorReport {
            message: message.to_string(),
            timestamp: self.now(),
            error_details: Some(normalize::error_details(account)),
        })
    }

    fn now(&self) -> Timestamp {
        Timestamp::now_in(&self.timezone)
    }
}
