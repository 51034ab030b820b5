//! Launch notification CLI
//!
//! Thin wrapper around notifyme-core for signing up from a terminal.
//!
//! ## Usage
//!
//! ```bash
//! # Sign up for the launch notification
//! notifyme signup --name Ada --surname Lovelace --email ada@example.com
//!
//! # Check whether an email is already registered
//! notifyme check ada@example.com
//!
//! # Show the resolved configuration (API key redacted)
//! notifyme config
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use notifyme_core::logging::{LoggingBuilder, REDACTED};
use notifyme_core::{
    ApiSource, DuplicateCheckPolicy, NotifyConfig, SignupFields, SignupWorkflow, StatusMessage,
    SubmissionOutcome,
};

/// Launch notification signup
#[derive(Parser)]
#[command(name = "notifyme")]
#[command(version = "0.1.0")]
#[command(about = "Sign up to be notified before the launch")]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// GraphQL endpoint URL
    #[arg(long, env = "APPSYNC_API_URL", global = true)]
    api_url: Option<String>,

    /// GraphQL API key
    #[arg(long, env = "APPSYNC_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Secret holding the endpoint and key
    #[arg(long, env = "NOTIFYME_SECRET_ID", global = true)]
    secret_id: Option<String>,

    /// Region of the secret (default: us-east-1)
    #[arg(long, env = "NOTIFYME_SECRET_REGION", global = true)]
    region: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true, value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Skip record creation when the duplicate check fails
    #[arg(long, global = true)]
    fail_closed: bool,

    /// Also write JSONL logs to this directory
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register for the launch notification
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        surname: String,
        #[arg(long)]
        email: String,
    },

    /// Check whether an email is already registered
    Check {
        email: String,
    },

    /// Show the resolved configuration
    Config,
}

fn setup_logging(cli: &Cli) -> Result<()> {
    let mut builder = LoggingBuilder::new("cli").with_verbosity(cli.verbose);
    if let Some(dir) = &cli.logs_dir {
        builder = builder.with_logs_dir(dir);
    }
    if let Some(path) = builder.init()? {
        tracing::debug!(path = %path.display(), "Writing JSONL logs");
    }
    Ok(())
}

/// Environment first, then flags on top.
fn build_config(cli: &Cli) -> Result<NotifyConfig> {
    let mut config = NotifyConfig::from_env()?;

    let api = ApiSource::select(
        cli.api_url.clone(),
        cli.api_key.clone(),
        cli.secret_id.clone(),
        cli.region.clone(),
    );
    if api != ApiSource::Unconfigured {
        config.api = api;
    }
    if let Some(secs) = cli.timeout {
        config.request_timeout = Duration::from_secs(secs);
    }
    if cli.fail_closed {
        config.duplicate_policy = DuplicateCheckPolicy::FailClosed;
    }
    Ok(config)
}

fn print_config(config: &NotifyConfig) {
    println!("API source: {}", config.api.kind());
    match &config.api {
        ApiSource::Static(credentials) => {
            println!("  Endpoint: {}", credentials.api_url);
            println!("  API key: {}", REDACTED);
        }
        ApiSource::SecretStore(secret) => {
            println!("  Secret: {}", secret.secret_id);
            println!("  Region: {}", secret.region);
        }
        ApiSource::Unconfigured => {}
    }
    println!("Request timeout: {}s", config.request_timeout.as_secs());
    println!("Reset delay: {}s", config.reset_delay.as_secs());
    println!("Duplicate check policy: {}", config.duplicate_policy.as_str());
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    setup_logging(&cli)?;
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Config => {
            print_config(&config);
            Ok(ExitCode::SUCCESS)
        }

        Commands::Check { email } => {
            let workflow = SignupWorkflow::connect(&config).await;
            if !workflow.is_configured() {
                println!("{}", StatusMessage::ConfigurationMissing);
                return Ok(ExitCode::FAILURE);
            }

            if workflow.check_exists(&email).await {
                println!("{} is registered", email);
            } else {
                println!("{} is not registered", email);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Signup {
            name,
            surname,
            email,
        } => {
            let fields = SignupFields::new(name, surname, email);
            fields.validate()?;

            let workflow = SignupWorkflow::connect(&config).await;
            let outcome = workflow
                .run(&fields, |state| tracing::info!(state = state.label(), "Submission progress"))
                .await;

            println!("{}", outcome.status_message());
            if let Some(record) = outcome.record() {
                println!("  CustomerID: {}", record.customer_id);
            }

            match outcome {
                SubmissionOutcome::Created(_) | SubmissionOutcome::Duplicate => {
                    Ok(ExitCode::SUCCESS)
                }
                SubmissionOutcome::Failed | SubmissionOutcome::ConfigurationMissing => {
                    Ok(ExitCode::FAILURE)
                }
            }
        }
    }
}
