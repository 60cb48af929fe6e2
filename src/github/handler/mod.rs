pub mod pull_request_handler;
pub mod repository_handler;

use super::github_client::GithubClient;
use repository_handler::RepositoryHandler;

/// Github repo handler access implementation
impl GithubClient {
    pub fn repo(&self, name: impl Into<String>) -> RepositoryHandler<'_> {
        RepositoryHandler::new(self, name)
    }
}
