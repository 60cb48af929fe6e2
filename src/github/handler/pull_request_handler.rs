use crate::{
    github::{github_client::GithubClient, response::PullRequest},
    http,
};

pub struct PullRequestHandler<'a> {
    client: &'a GithubClient,
    repo: String,
    page: u32,
}

impl<'a> PullRequestHandler<'a> {
    pub fn new(client: &'a GithubClient, repo: impl Into<String>) -> Self {
        PullRequestHandler {
            client,
            repo: repo.into(),
            page: 1,
        }
    }

    /// 1-based page number.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub async fn list_open(self, token: &str) -> Result<Vec<PullRequest>, http::Error> {
        self.client
            .list_open_pull_requests(&self.repo, self.page, token)
            .await
    }
}
