mod config;
mod digest;
mod github;
mod handler;
mod http;
mod logger;
mod secrets;
mod webhook;

use anyhow::{Context, Result};
use config::Config;
use handler::{Handler, Request};
use secrets::UnconfiguredSecretStore;

#[tokio::main]
async fn main() -> Result<()> {
    logger::init()?;

    log::info!("Starting");
    let config = Config::load(&UnconfiguredSecretStore)
        .await
        .context("Cannot load configuration")?;

    let handler = Handler::new(config)?;

    let response = handler
        .handle(Request {
            invocation: format!("pid-{}", std::process::id()),
        })
        .await
        .context("Cannot build the pull request digest")?;

    log::debug!("{}", response.body);
    log::info!("Finished with status {}", response.status_code);

    Ok(())
}
