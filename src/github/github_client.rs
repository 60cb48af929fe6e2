use super::{response::PullRequest, PageFetcher};
use crate::{
    config::GithubConfig,
    http::{self, Headers, HttpClient, ResponseHandler},
};
use async_trait::async_trait;

#[derive(Clone, Debug)]
pub struct GithubClient {
    http: HttpClient,
    api_url: String,
    owner: String,
}

impl GithubClient {
    pub fn new(config: &GithubConfig) -> Result<Self, http::Error> {
        Ok(GithubClient {
            http: HttpClient::new(config.timeout)?,
            api_url: config.api_url.to_owned(),
            owner: config.owner.to_owned(),
        })
    }

    pub(super) async fn list_open_pull_requests(
        &self,
        repo: &str,
        page: u32,
        token: &str,
    ) -> Result<Vec<PullRequest>, http::Error> {
        let uri = format!(
            "{}/repos/{}/{}/pulls?state=open&page={}",
            self.api_url, self.owner, repo, page
        );

        log::info!("Sending request for {}", uri);

        let response = self.http.get(&uri).github_headers(token).send().await?;

        response.json_body::<Vec<PullRequest>>().await
    }
}

#[async_trait]
impl PageFetcher for GithubClient {
    async fn fetch_page(
        &self,
        repo: &str,
        page: u32,
        token: &str,
    ) -> Result<Vec<PullRequest>, http::Error> {
        self.repo(repo)
            .pull_requests()
            .page(page)
            .list_open(token)
            .await
    }
}
