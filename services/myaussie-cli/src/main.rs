//! MyAussie command-line client
//!
//! Reads account settings from TOML, restores the saved session (or logs in
//! with the configured password), runs one command and prints its result as
//! JSON on stdout. Structured logs go to stderr.
//!
//! Usage: `myaussie [--config PATH] <customer|usage|transactions|outages|tests|logout> [SERVICE_ID]`

mod command;
mod config;
mod error;

use anyhow::{Context, Result};
use myaussie_auth::CredentialFile;
use myaussie_client::{Session, Transport};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::command::Command;
use crate::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing with JSON output and LOG_LEVEL / RUST_LOG support
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(std::io::stderr),
        )
        .init();

    let (cli_config_path, positional) = split_args(std::env::args().skip(1).collect());
    let command = Command::parse(&positional)?;

    let config_path = Config::resolve_path(cli_config_path.as_deref());
    let config = Config::load(&config_path)
        .with_context(|| format!("failed to load config from {}", config_path.display()))?;
    info!(
        path = %config_path.display(),
        username = %config.account.username,
        credentials = %config.account.credentials_path.display(),
        "configuration loaded"
    );

    let credential_file = CredentialFile::new(&config.account.credentials_path);

    if !command.needs_session() {
        credential_file
            .clear()
            .await
            .context("failed to clear saved credentials")?;
        info!("saved credentials cleared");
        return Ok(());
    }

    let transport = Transport::new().context("failed to build HTTP client")?;
    let mut session = open_session(&config, transport, &credential_file).await?;

    let output = match command::run(&session, &command).await {
        Ok(output) => output,
        Err(e) if is_auth_rejection(&e) && config.account.password.is_some() => {
            warn!(error = %e, "saved session rejected, logging in again");
            session = session.login_again().await.context("login failed")?;
            command::run(&session, &command).await?
        }
        Err(e) => return Err(e),
    };

    // Refreshes during the run rotate the cookie; keep the newest material
    credential_file
        .save(&session.credentials().await)
        .await
        .context("failed to save credentials")?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

/// Restore the saved session for this username, or log in with the password.
async fn open_session(
    config: &Config,
    transport: Transport,
    credential_file: &CredentialFile,
) -> Result<Session> {
    let account = &config.account;
    let password = account.password.as_ref().map(|p| p.expose().clone());

    match credential_file.load().await {
        Ok(Some(saved)) if saved.username == account.username => {
            info!(username = %account.username, "restoring saved session");
            return Ok(Session::restore(transport, saved, password));
        }
        Ok(Some(saved)) => {
            info!(saved = %saved.username, "saved credentials belong to another user, ignoring");
        }
        Ok(None) => {}
        Err(e) => warn!(error = %e, "unreadable saved credentials, logging in"),
    }

    let password = password.ok_or(common::Error::MissingPassword)?;
    let session = Session::login(transport, &account.username, &password)
        .await
        .context("login failed")?;
    Ok(session)
}

fn is_auth_rejection(err: &anyhow::Error) -> bool {
    err.downcast_ref::<myaussie_client::Error>()
        .is_some_and(myaussie_client::Error::is_auth_rejection)
}

/// Pull `--config PATH` out of the argument list, returning it and the rest.
fn split_args(args: Vec<String>) -> (Option<String>, Vec<String>) {
    let mut config = None;
    let mut positional = Vec::new();
    let mut iter = args.into_iter();
    while let Some(arg) = iter.next() {
        if arg == "--config" {
            config = iter.next();
        } else {
            positional.push(arg);
        }
    }
    (config, positional)
}
