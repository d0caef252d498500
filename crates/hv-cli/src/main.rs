use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use hv_api::HarvestClient;
use hv_cli::commands::{local_now, start, status, stop};
use hv_cli::{Cli, Commands, Config, FuzzyPicker, view_mode};
use hv_core::Session;

/// Load config, build the HTTP client and identify the user.
fn open_session(config_path: Option<&Path>) -> Result<Session<HarvestClient>> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");

    let credentials = config.credentials()?;
    let client = HarvestClient::new(&credentials, &config.base_url, config.timeout())
        .context("failed to build Harvest client")?;
    Session::open(client).context("failed to identify the current user")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Logs go to stderr so stdout stays parseable with --json
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let now = local_now();
    let today = now.date();
    let mut stdout = std::io::stdout().lock();

    match &cli.command {
        Some(Commands::Status {
            date,
            week,
            total,
            json,
        }) => {
            let session = open_session(cli.config.as_deref())?;
            let anchor = date.unwrap_or(today);
            status::run(
                &mut stdout,
                &session,
                view_mode(*week, *total),
                anchor,
                now,
                *json,
            )?;
        }
        Some(Commands::Start { switch }) => {
            let session = open_session(cli.config.as_deref())?;
            let mut picker = FuzzyPicker::default();
            start::run(&mut stdout, &session, &mut picker, today, *switch)?;
        }
        Some(Commands::Stop) => {
            let session = open_session(cli.config.as_deref())?;
            stop::run(&mut stdout, &session, today)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
