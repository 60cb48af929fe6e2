use crate::secrets::{SecretError, SecretResolver};
use std::{env, str::FromStr, time::Duration};
use thiserror::Error;

const REPOS_ENV: &str = "REPOS";
const TEAMMATES_ENV: &str = "TEAMMATES";
const REPO_OWNER_ENV: &str = "REPO_OWNER";
const TOKEN_ENV: &str = "GITHUB_ACCESS_TOKEN";
const TOKEN_SECRET_NAME_ENV: &str = "AWS_SECRET_TOKEN";
const WEBHOOK_ENV: &str = "SLACK_WEBHOOK_URL";
const WEBHOOK_SECRET_NAME_ENV: &str = "AWS_SECRET_SLACK_WEBHOOK_URL";
const REGION_ENV: &str = "AWS_REGION_NAME";
const NUM_PAGES_ENV: &str = "NUM_PAGES";
const MAX_RESULTS_ENV: &str = "MAX_RESULTS";
const MAX_CONCURRENT_ENV: &str = "MAX_CONCURRENT_REPOS";
const REQUEST_DELAY_ENV: &str = "REQUEST_DELAY_MS";
const REQUEST_TIMEOUT_ENV: &str = "REQUEST_TIMEOUT_SECS";
const API_URL_ENV: &str = "GITHUB_API_URL";
const SKIP_DRAFTS_ENV: &str = "SKIP_DRAFTS";
const HEADER_ENV: &str = "DIGEST_HEADER";
const TEST_MODE_ENV: &str = "TEST_MODE";

pub const DEFAULT_NUM_PAGES: u32 = 10;
pub const DEFAULT_MAX_RESULTS: usize = 100;
pub const DEFAULT_MAX_CONCURRENT: usize = 3;
const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_HEADER: &str = "Here's the list of open PRs:";

#[derive(Debug, Error)]
pub enum Error {
    #[error("required configuration '{key}' is missing")]
    ConfigMissing { key: String },
    #[error(transparent)]
    Secret(#[from] SecretError),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub github: GithubConfig,
    pub digest: DigestConfig,
    pub webhook: WebhookConfig,
    pub test_mode: bool,
}

#[derive(Debug, Clone)]
pub struct GithubConfig {
    pub api_url: String,
    pub owner: String,
    pub token: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct DigestConfig {
    pub repos: Vec<String>,
    pub teammates: Vec<String>,
    pub num_pages: u32,
    pub max_results: usize,
    pub max_concurrent: usize,
    pub request_delay: Duration,
    pub skip_drafts: bool,
    pub header: String,
}

impl Default for DigestConfig {
    fn default() -> Self {
        DigestConfig {
            repos: vec![],
            teammates: vec![],
            num_pages: DEFAULT_NUM_PAGES,
            max_results: DEFAULT_MAX_RESULTS,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            request_delay: Duration::from_millis(DEFAULT_REQUEST_DELAY_MS),
            skip_drafts: true,
            header: DEFAULT_HEADER.to_owned(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: Option<String>,
    pub timeout: Duration,
}

impl Config {
    pub async fn load(secrets: &dyn SecretResolver) -> Result<Config, Error> {
        Config::from_lookup(|key| env::var(key).ok(), secrets).await
    }

    /// Builds the configuration from an arbitrary key lookup, falling back to the
    /// secret resolver for the token and the webhook URL.
    pub async fn from_lookup<F>(lookup: F, secrets: &dyn SecretResolver) -> Result<Config, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let region = get(REGION_ENV).unwrap_or_default();
        let timeout = Duration::from_secs(positive_or(
            &get,
            REQUEST_TIMEOUT_ENV,
            DEFAULT_REQUEST_TIMEOUT_SECS,
        ));

        let owner = get(REPO_OWNER_ENV).unwrap_or_else(|| {
            log::warn!("Repo owner not found in {}", REPO_OWNER_ENV);
            String::new()
        });

        let token = match get(TOKEN_ENV) {
            Some(token) => {
                log::debug!("Token found in {}", TOKEN_ENV);
                token
            }
            None => {
                log::info!("Token not found in {}, trying the secret store", TOKEN_ENV);
                let name = get(TOKEN_SECRET_NAME_ENV).ok_or_else(|| Error::ConfigMissing {
                    key: TOKEN_ENV.to_owned(),
                })?;
                secrets.resolve(&name, &region).await?
            }
        };

        let test_mode = lookup(TEST_MODE_ENV).is_some();

        let webhook_url = if test_mode {
            None
        } else {
            resolve_webhook(&get, secrets, &region).await
        };

        let defaults = DigestConfig::default();
        let digest = DigestConfig {
            repos: list(&get, REPOS_ENV),
            teammates: list(&get, TEAMMATES_ENV),
            num_pages: positive_or(&get, NUM_PAGES_ENV, defaults.num_pages),
            max_results: positive_or(&get, MAX_RESULTS_ENV, defaults.max_results),
            max_concurrent: positive_or(&get, MAX_CONCURRENT_ENV, defaults.max_concurrent),
            request_delay: delay_or(&get, REQUEST_DELAY_ENV, defaults.request_delay),
            skip_drafts: get(SKIP_DRAFTS_ENV)
                .map(|value| !is_falsy(&value))
                .unwrap_or(defaults.skip_drafts),
            header: get(HEADER_ENV).unwrap_or(defaults.header),
        };

        Ok(Config {
            github: GithubConfig {
                api_url: get(API_URL_ENV)
                    .map(|url| url.trim_end_matches('/').to_owned())
                    .unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
                owner,
                token,
                timeout,
            },
            digest,
            webhook: WebhookConfig {
                url: webhook_url,
                timeout,
            },
            test_mode,
        })
    }
}

async fn resolve_webhook<F>(get: &F, secrets: &dyn SecretResolver, region: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = get(WEBHOOK_ENV) {
        log::debug!("Webhook found in {}", WEBHOOK_ENV);
        return Some(url);
    }

    log::info!("Webhook not found in {}, trying the secret store", WEBHOOK_ENV);
    let name = match get(WEBHOOK_SECRET_NAME_ENV) {
        Some(name) => name,
        None => {
            log::warn!("{} is not set", WEBHOOK_SECRET_NAME_ENV);
            return None;
        }
    };

    match secrets.resolve(&name, region).await {
        Ok(url) => Some(url),
        Err(err) => {
            log::warn!("{}", err);
            None
        }
    }
}

/// Splits a comma-separated value, trimming every entry and dropping empty ones.
pub fn split_and_trim(input: &str, separator: char) -> Vec<String> {
    input
        .split(separator)
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_owned)
        .collect()
}

fn list<F>(get: &F, key: &str) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => split_and_trim(&value, ','),
        None => {
            log::warn!(
                "{}",
                Error::ConfigMissing {
                    key: key.to_owned()
                }
            );
            vec![]
        }
    }
}

fn positive_or<F, T>(get: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr + PartialEq + Default,
{
    match get(key) {
        Some(value) => match value.trim().parse::<T>() {
            Ok(parsed) if parsed != T::default() => parsed,
            _ => {
                log::warn!("Ignoring invalid {}='{}', using the default", key, value);
                default
            }
        },
        None => default,
    }
}

fn delay_or<F>(get: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => match value.trim().parse::<u64>() {
            Ok(millis) => Duration::from_millis(millis),
            Err(_) => {
                log::warn!("Ignoring invalid {}='{}', using the default", key, value);
                default
            }
        },
        None => default,
    }
}

fn is_falsy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "false" | "0" | "no" | "off"
    )
}
