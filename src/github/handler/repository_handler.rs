use super::pull_request_handler::PullRequestHandler;
use crate::github::github_client::GithubClient;

pub struct RepositoryHandler<'a> {
    client: &'a GithubClient,
    repo: String,
}

impl<'a> RepositoryHandler<'a> {
    pub fn new(client: &'a GithubClient, repo: impl Into<String>) -> Self {
        RepositoryHandler {
            client,
            repo: repo.into(),
        }
    }

    pub fn pull_requests(&self) -> PullRequestHandler<'a> {
        PullRequestHandler::new(self.client, &self.repo)
    }
}
