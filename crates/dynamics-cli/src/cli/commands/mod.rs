use anyhow::Context;
use dynamics_results::{ResultsClient, ResultsConfig};
use tracing::debug;

use super::args::{Cli, Command};

mod email;
mod format_code;
mod parse;
mod resolve;
mod submit;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    let config = config_from(&cli);
    debug!(server = %config.server_url, email = ?config.email_url, "loaded configuration");
    match cli.cmd {
        Command::Parse(args) => parse::run(args),
        Command::FormatCode(args) => format_code::run(args),
        Command::Resolve(args) => resolve::run(args, client(config)?).await,
        Command::Email(args) => email::run(args, client(config)?).await,
        Command::Submit(args) => submit::run(args, client(config)?).await,
    }
}

fn config_from(cli: &Cli) -> ResultsConfig {
    let mut config = ResultsConfig::from_env();
    if let Some(server) = &cli.server {
        config = config.with_server_url(server.as_str());
    }
    if let Some(email_url) = &cli.email_url {
        config = config.with_email_url(email_url.as_str());
    }
    config
}

fn client(config: ResultsConfig) -> anyhow::Result<ResultsClient> {
    ResultsClient::new(config).context("failed to set up results client")
}

/// Pretty JSON on stdout.
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
