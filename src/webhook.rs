use crate::{
    config::WebhookConfig,
    http::{self, HttpClient, ResponseHandler},
};
use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Slack webhook cannot be empty")]
    EmptyUrl,
    #[error("Payload content cannot be empty")]
    EmptyPayload,
    #[error("Failed to post to the webhook")]
    PostFailure(#[from] http::Error),
}

/// Delivers a rendered digest to a chat channel, returning the remote reply.
#[async_trait]
pub trait WebhookPoster: Send + Sync {
    async fn post(&self, message: &str) -> Result<String, Error>;
}

#[derive(Serialize)]
struct Payload<'a> {
    text: &'a str,
}

pub struct SlackWebhook {
    http: HttpClient,
    url: Option<String>,
}

impl SlackWebhook {
    pub fn new(config: &WebhookConfig) -> Result<Self, http::Error> {
        Ok(SlackWebhook {
            http: HttpClient::new(config.timeout)?,
            url: config.url.to_owned(),
        })
    }
}

#[async_trait]
impl WebhookPoster for SlackWebhook {
    async fn post(&self, message: &str) -> Result<String, Error> {
        let url = self
            .url
            .as_deref()
            .filter(|url| !url.is_empty())
            .ok_or(Error::EmptyUrl)?;

        if message.is_empty() {
            return Err(Error::EmptyPayload);
        }

        log::info!("Posting to Slack webhook, payload length {}", message.len());

        let response = self
            .http
            .post(url)
            .json(&Payload { text: message })
            .send()
            .await
            .map_err(http::Error::from)?;

        Ok(response.success_text().await?)
    }
}
