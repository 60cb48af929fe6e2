pub mod github_client;
mod handler;
pub mod response;

pub use github_client::GithubClient;
pub use response::PullRequest;

use crate::http;
use async_trait::async_trait;

/// Fetches one page of open pull requests for a repository.
///
/// Exactly one request is issued per call and nothing is retried.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_page(
        &self,
        repo: &str,
        page: u32,
        token: &str,
    ) -> Result<Vec<PullRequest>, http::Error>;
}
