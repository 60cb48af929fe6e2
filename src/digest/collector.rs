use crate::github::{PageFetcher, PullRequest};
use std::{collections::HashSet, sync::Arc, time::Duration};

/// Walks the pages of one repository and keeps the pull requests opened by teammates.
#[derive(Clone)]
pub struct RepositoryCollector {
    fetcher: Arc<dyn PageFetcher>,
    token: Arc<str>,
    teammates: Arc<HashSet<String>>,
    num_pages: u32,
    delay: Duration,
}

impl RepositoryCollector {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        token: impl Into<Arc<str>>,
        teammates: impl IntoIterator<Item = String>,
    ) -> Self {
        RepositoryCollector {
            fetcher,
            token: token.into(),
            teammates: Arc::new(teammates.into_iter().collect()),
            num_pages: crate::config::DEFAULT_NUM_PAGES,
            delay: Duration::ZERO,
        }
    }

    pub fn num_pages(mut self, num_pages: u32) -> Self {
        self.num_pages = num_pages;
        self
    }

    /// Pause taken before every page request, the first one included.
    pub fn delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub async fn collect(&self, repo: &str) -> Vec<PullRequest> {
        let mut collected = vec![];

        for page in 1..=self.num_pages {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let prs = match self.fetcher.fetch_page(repo, page, &self.token).await {
                Ok(prs) => prs,
                Err(err) => {
                    log::warn!("{} page {}: {:#}", repo, page, anyhow::Error::from(err));
                    continue;
                }
            };

            if prs.is_empty() {
                log::debug!("{} has no more pull requests after page {}", repo, page - 1);
                break;
            }

            let fetched = prs.len();
            let kept = self.filter(prs);
            log::debug!(
                "{} page {}: kept {} of {} pull requests",
                repo,
                page,
                kept.len(),
                fetched
            );
            collected.extend(kept);
        }

        collected
    }

    fn filter(&self, prs: Vec<PullRequest>) -> Vec<PullRequest> {
        prs.into_iter()
            .filter(|pr| self.teammates.contains(pr.author()))
            .collect()
    }
}
