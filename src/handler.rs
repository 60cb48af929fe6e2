use crate::{
    config::Config,
    digest::{Aggregator, Formatter, RepositoryCollector},
    github::{GithubClient, PageFetcher},
    webhook::{SlackWebhook, WebhookPoster},
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::sync::Arc;

const STATUS_OK: u16 = 200;

#[derive(Debug, Clone)]
pub struct Request {
    pub invocation: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status_code: u16,
    pub body: String,
}

/// One invocation: build the digest, deliver it unless running in test mode.
pub struct Handler {
    config: Config,
    fetcher: Arc<dyn PageFetcher>,
    webhook: Arc<dyn WebhookPoster>,
    clock: fn() -> DateTime<Utc>,
}

impl Handler {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher =
            GithubClient::new(&config.github).context("Cannot create the github client")?;
        let webhook =
            SlackWebhook::new(&config.webhook).context("Cannot create the webhook client")?;

        Ok(Handler::with(config, Arc::new(fetcher), Arc::new(webhook)))
    }

    pub fn with(
        config: Config,
        fetcher: Arc<dyn PageFetcher>,
        webhook: Arc<dyn WebhookPoster>,
    ) -> Self {
        Handler {
            config,
            fetcher,
            webhook,
            clock: Utc::now,
        }
    }

    #[cfg(test)]
    pub fn clock(mut self, clock: fn() -> DateTime<Utc>) -> Self {
        self.clock = clock;
        self
    }

    pub async fn handle(&self, request: Request) -> Result<Response> {
        log::info!("Handling invocation {}", request.invocation);

        let digest = self.build_digest().await;

        if self.config.test_mode {
            log::info!("Test mode, skipping the webhook\n{}", digest);
            return Ok(Response {
                status_code: STATUS_OK,
                body: digest,
            });
        }

        let reply = self
            .webhook
            .post(&digest)
            .await
            .context("Cannot post the digest")?;
        log::info!("Response from webhook: {}", reply);

        Ok(Response {
            status_code: STATUS_OK,
            body: digest,
        })
    }

    pub async fn build_digest(&self) -> String {
        let settings = &self.config.digest;

        let collector = RepositoryCollector::new(
            self.fetcher.clone(),
            self.config.github.token.as_str(),
            settings.teammates.iter().cloned(),
        )
        .num_pages(settings.num_pages)
        .delay(settings.request_delay);

        let digest = Aggregator::new(collector)
            .max_concurrent(settings.max_concurrent)
            .max_results(settings.max_results)
            .collect(&settings.repos)
            .await;

        let text = digest.render(
            &settings.header,
            settings.skip_drafts,
            &Formatter::new((self.clock)()),
        );
        log::info!(
            "Digest ready: {} pull requests, {} bytes",
            digest.pull_requests().len(),
            text.len()
        );

        text
    }
}
