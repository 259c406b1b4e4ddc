//! `send-sms` entry point: configuration, stdin, shorten, compose, send.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use send_sms::cli::{Args, Config, normalize_args};
use send_sms::{SendMessage, SmsClient, compose_body};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse_from(normalize_args(std::env::args_os()));
    let config = match args.into_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", Args::command().render_help());
            eprintln!("Error: {err}");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

async fn run(config: Config) -> anyhow::Result<()> {
    let mut raw = Vec::new();
    io::stdin()
        .read_to_end(&mut raw)
        .context("unable to read from stdin")?;
    let body = String::from_utf8_lossy(&raw);
    debug!(chars = body.chars().count(), "read message body");

    let client = SmsClient::builder(config.credentials)
        .api_base(config.api_base)
        .build()
        .context("unable to build HTTP client")?;

    let short_url = match &config.link {
        Some(link) => Some(
            client
                .shorten(&link.template, &link.long_url)
                .await
                .context("unable to get shortened URL")?,
        ),
        None => None,
    };

    let composed = compose_body(&body, short_url.as_ref());
    debug!(chars = composed.char_count(), "composed message");

    let request = SendMessage::composed(config.from, config.to, composed);
    client
        .send_message(request)
        .await
        .context("unable to send SMS")?;
    Ok(())
}
