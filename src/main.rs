#![allow(non_snake_case)]

mod app;
mod components;
pub mod context;
mod pages;
mod theme;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use dioxus::desktop::{Config, WindowBuilder};
use notifyme_core::logging::LoggingBuilder;
use notifyme_core::{ApiSource, DuplicateCheckPolicy, NotifyConfig};

/// EventHero - Coming Soon
#[derive(Parser, Debug)]
#[command(name = "notifyme-desktop")]
#[command(about = "Coming-soon page that signs visitors up for launch notifications")]
struct Args {
    /// GraphQL endpoint URL
    #[arg(long, env = "APPSYNC_API_URL")]
    api_url: Option<String>,

    /// GraphQL API key
    #[arg(long, env = "APPSYNC_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Secret holding the endpoint and key (used when they are not given directly)
    #[arg(long, env = "NOTIFYME_SECRET_ID")]
    secret_id: Option<String>,

    /// Region of the secret
    #[arg(long, env = "NOTIFYME_SECRET_REGION")]
    region: Option<String>,

    /// Skip record creation when the duplicate check fails
    #[arg(long)]
    fail_closed: bool,

    /// Directory for JSONL logs
    #[arg(long)]
    logs_dir: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn default_logs_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("notifyme")
        .join("logs")
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_path = LoggingBuilder::new("desktop")
        .with_verbosity(args.verbose.max(1))
        .with_logs_dir(args.logs_dir.clone().unwrap_or_else(default_logs_dir))
        .init()?;

    let mut config = NotifyConfig::from_env()?;
    let api = ApiSource::select(args.api_url, args.api_key, args.secret_id, args.region);
    if api != ApiSource::Unconfigured {
        config.api = api;
    }
    if args.fail_closed {
        config.duplicate_policy = DuplicateCheckPolicy::FailClosed;
    }

    tracing::info!(
        api_source = config.api.kind(),
        duplicate_policy = config.duplicate_policy.as_str(),
        log_path = ?log_path,
        "Starting coming-soon page"
    );

    let window = WindowBuilder::new()
        .with_title("EventHero - Coming Soon")
        .with_inner_size(dioxus::desktop::LogicalSize::new(600.0, 800.0))
        .with_resizable(true);

    dioxus::LaunchBuilder::desktop()
        .with_cfg(Config::new().with_window(window))
        .with_context(config)
        .launch(app::App);

    Ok(())
}
