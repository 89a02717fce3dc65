use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use skcheck::application::validator::KeyValidator;
use skcheck::config::{
    DEFAULT_API_BASE, DEFAULT_ERROR_LOG, DEFAULT_TIMEOUT_SECS, DEFAULT_TIMEZONE, Settings, TestCard, TestCharge,
    parse_timezone,
};
use skcheck::domain::ports::{ApiTransportBox, ErrorLogBox};
use skcheck::infrastructure::error_log::{FileErrorLog, NullErrorLog};
use skcheck::infrastructure::http::HttpTransport;
use skcheck::interfaces::http as server;
use skcheck::interfaces::json::report_writer::ReportWriter;
use skcheck::telemetry;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Validate a Stripe secret key", long_about = None)]
struct Cli {
    #[command(flatten)]
    options: GlobalOptions,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate one key and print the JSON report
    Check {
        /// Secret key to validate (an empty value yields the no-key report)
        key: String,
    },
    /// Serve GET /validate_key?sk=<key> over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, env = "SKCHECK_LISTEN", default_value = "127.0.0.1:8080")]
        listen: SocketAddr,
    },
}

#[derive(Args)]
struct GlobalOptions {
    /// Base URL of the Stripe API
    #[arg(long, global = true, env = "SKCHECK_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,

    /// Per-request timeout in seconds
    #[arg(long, global = true, env = "SKCHECK_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// IANA timezone for report timestamps
    #[arg(long, global = true, env = "SKCHECK_TIMEZONE", default_value = DEFAULT_TIMEZONE)]
    timezone: String,

    /// Append transport errors to this file
    #[arg(long, global = true, env = "SKCHECK_ERROR_LOG", default_value = DEFAULT_ERROR_LOG)]
    error_log: PathBuf,

    /// Do not write transport errors to a file
    #[arg(long, global = true, env = "SKCHECK_NO_ERROR_LOG", conflicts_with = "error_log")]
    no_error_log: bool,

    /// Card number used for the test token
    #[arg(long, global = true, env = "SKCHECK_CARD_NUMBER")]
    card_number: Option<String>,

    /// Expiry month of the test card
    #[arg(long, global = true, env = "SKCHECK_CARD_EXP_MONTH")]
    card_exp_month: Option<String>,

    /// Expiry year of the test card
    #[arg(long, global = true, env = "SKCHECK_CARD_EXP_YEAR")]
    card_exp_year: Option<String>,

    /// CVC of the test card
    #[arg(long, global = true, env = "SKCHECK_CARD_CVC")]
    card_cvc: Option<String>,

    /// Log level (trace, debug, info, warn, error); RUST_LOG overrides
    #[arg(long, global = true, env = "SKCHECK_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true, env = "SKCHECK_JSON_LOGS")]
    json_logs: bool,
}

impl GlobalOptions {
    fn settings(&self) -> skcheck::error::Result<Settings> {
        let defaults = TestCard::default();
        let settings = Settings {
            api_base: self.api_base.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            timezone: parse_timezone(&self.timezone)?,
            error_log: (!self.no_error_log).then(|| self.error_log.clone()),
            test_card: TestCard {
                number: self.card_number.clone().unwrap_or(defaults.number),
                exp_month: self.card_exp_month.clone().unwrap_or(defaults.exp_month),
                exp_year: self.card_exp_year.clone().unwrap_or(defaults.exp_year),
                cvc: self.card_cvc.clone().unwrap_or(defaults.cvc),
            },
            test_charge: TestCharge::default(),
        };
        settings.validate()?;
        Ok(settings)
    }
}

fn build_validator(settings: &Settings) -> skcheck::error::Result<KeyValidator> {
    let transport: ApiTransportBox =
        Box::new(HttpTransport::new(settings.api_base.clone(), settings.timeout)?);
    let error_log: ErrorLogBox = match &settings.error_log {
        Some(path) => Box::new(FileErrorLog::new(path.clone())),
        None => Box::new(NullErrorLog),
    };
    Ok(KeyValidator::new(transport, error_log, settings))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    telemetry::init(&cli.options.log_level, cli.options.json_logs).into_diagnostic()?;

    let settings = cli.options.settings().into_diagnostic()?;
    let validator = build_validator(&settings).into_diagnostic()?;

    match cli.command {
        Command::Check { key } => {
            let report = validator.validate(&key).await;
            let stdout = io::stdout();
            let mut writer = ReportWriter::new(stdout.lock());
            writer.write_report(&report).into_diagnostic()?;
        }
        Command::Serve { listen } => {
            let listener = server::bind(listen).await.into_diagnostic()?;
            server::serve(listener, Arc::new(validator), shutdown_signal())
                .await
                .into_diagnostic()?;
        }
    }

    Ok(())
}
