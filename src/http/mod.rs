mod response_handler;

pub use response_handler::ResponseHandler;

use reqwest::{
    header::{ACCEPT, USER_AGENT},
    Client, RequestBuilder,
};
use std::{ops::Deref, time::Duration};
use thiserror::Error;

const USER_AGENT_VALUE: &str = "pr-digest";
const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Clone, Debug)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT_VALUE)
            .build()
            .map_err(|cause| Error::Network { cause })?;

        Ok(HttpClient { client })
    }
}

impl Deref for HttpClient {
    type Target = Client;

    fn deref(&self) -> &Self::Target {
        &self.client
    }
}

pub trait Headers {
    fn github_headers(self, token: &str) -> RequestBuilder;
}

impl Headers for RequestBuilder {
    fn github_headers(self, token: &str) -> RequestBuilder {
        self.bearer_auth(token)
            .header(ACCEPT, GITHUB_ACCEPT)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION)
            .header(USER_AGENT, USER_AGENT_VALUE)
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to send request")]
    Network {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to read response text")]
    ReadBody {
        #[source]
        cause: reqwest::Error,
    },
    #[error("Failed to parse response")]
    Decode {
        #[source]
        cause: serde_json::Error,
    },
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },
}

impl From<reqwest::Error> for Error {
    fn from(cause: reqwest::Error) -> Self {
        Error::Network { cause }
    }
}
