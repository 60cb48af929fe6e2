use super::{collector::RepositoryCollector, Digest};
use crate::{
    config::{DEFAULT_MAX_CONCURRENT, DEFAULT_MAX_RESULTS},
    github::PullRequest,
};
use itertools::Itertools;
use std::sync::Arc;
use tokio::{sync::Semaphore, task::JoinSet};

/// Fans the collector out over every repository and merges what comes back.
pub struct Aggregator {
    collector: RepositoryCollector,
    max_concurrent: usize,
    max_results: usize,
}

impl Aggregator {
    pub fn new(collector: RepositoryCollector) -> Self {
        Aggregator {
            collector,
            max_concurrent: DEFAULT_MAX_CONCURRENT,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }

    /// Number of repositories scanned at the same time.
    pub fn max_concurrent(mut self, max_concurrent: usize) -> Self {
        self.max_concurrent = max_concurrent.max(1);
        self
    }

    pub fn max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub async fn collect(&self, repos: &[String]) -> Digest {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrent));
        let mut tasks = JoinSet::new();

        for (index, repo) in repos.iter().enumerate() {
            let semaphore = semaphore.clone();
            let collector = self.collector.clone();
            let repo = repo.to_owned();

            tasks.spawn(async move {
                let prs = match semaphore.acquire_owned().await {
                    Ok(_permit) => collector.collect(&repo).await,
                    Err(err) => {
                        log::error!("cannot schedule {}: {}", repo, err);
                        vec![]
                    }
                };
                log::info!("{} contributed {} pull requests", repo, prs.len());
                (index, prs)
            });
        }

        let mut results: Vec<(usize, Vec<PullRequest>)> = Vec::with_capacity(repos.len());
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(result) => results.push(result),
                Err(err) => log::error!("repository task failed: {}", err),
            }
        }

        Digest::new(self.merge(results))
    }

    /// Merges per-repository results in configuration order, then keeps the
    /// `max_results` oldest by creation time.
    fn merge(&self, results: Vec<(usize, Vec<PullRequest>)>) -> Vec<PullRequest> {
        results
            .into_iter()
            .sorted_by_key(|(index, _)| *index)
            .flat_map(|(_, prs)| prs)
            .sorted_by(|a, b| a.created_at.cmp(&b.created_at))
            .take(self.max_results)
            .collect_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::tests::{pr, Page, StubFetcher};
    use std::time::Duration;

    fn repos(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn aggregator(fetcher: Arc<StubFetcher>, teammates: &[&str]) -> Aggregator {
        Aggregator::new(RepositoryCollector::new(
            fetcher,
            "token",
            teammates.iter().map(|t| t.to_string()),
        ))
    }

    #[tokio::test]
    async fn should_sort_merged_results_oldest_first() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .page(
                    "r1",
                    1,
                    Page::Items(vec![
                        pr("alice", "2024-03-01T00:00:00Z"),
                        pr("alice", "2024-01-01T00:00:00Z"),
                    ]),
                )
                .page("r2", 1, Page::Items(vec![pr("bob", "2024-02-01T00:00:00Z")]))
                .page("r3", 1, Page::Items(vec![pr("alice", "2023-12-31T23:59:59Z")])),
        );

        let digest = aggregator(fetcher, &["alice", "bob"])
            .collect(&repos(&["r1", "r2", "r3"]))
            .await;

        let created: Vec<&str> = digest
            .pull_requests()
            .iter()
            .map(|pr| pr.created_at.as_str())
            .collect();
        assert_eq!(
            created,
            vec![
                "2023-12-31T23:59:59Z",
                "2024-01-01T00:00:00Z",
                "2024-02-01T00:00:00Z",
                "2024-03-01T00:00:00Z",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn order_does_not_depend_on_completion_order() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .page("slow", 1, Page::Items(vec![pr("alice", "2024-01-01T00:00:00Z")]))
                .page("fast", 1, Page::Items(vec![pr("alice", "2024-01-02T00:00:00Z")]))
                .latency("slow", Duration::from_secs(5)),
        );

        let digest = aggregator(fetcher, &["alice"])
            .collect(&repos(&["fast", "slow"]))
            .await;

        let created: Vec<&str> = digest
            .pull_requests()
            .iter()
            .map(|pr| pr.created_at.as_str())
            .collect();
        assert_eq!(created, vec!["2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"]);
    }

    #[tokio::test]
    async fn should_keep_the_oldest_max_results() {
        let mut stub = StubFetcher::default();
        let mut items = vec![];
        for day in (1..=9).rev() {
            items.push(pr("alice", &format!("2024-01-0{}T00:00:00Z", day)));
        }
        stub = stub.page("r1", 1, Page::Items(items));

        let digest = aggregator(Arc::new(stub), &["alice"])
            .max_results(3)
            .collect(&repos(&["r1"]))
            .await;

        let created: Vec<&str> = digest
            .pull_requests()
            .iter()
            .map(|pr| pr.created_at.as_str())
            .collect();
        assert_eq!(
            created,
            vec![
                "2024-01-01T00:00:00Z",
                "2024-01-02T00:00:00Z",
                "2024-01-03T00:00:00Z",
            ]
        );
    }

    #[tokio::test]
    async fn max_results_of_one_keeps_the_older() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .page("r1", 1, Page::Items(vec![pr("alice", "2024-01-05T00:00:00Z")]))
                .page("r2", 1, Page::Items(vec![pr("alice", "2024-01-03T00:00:00Z")])),
        );

        let digest = aggregator(fetcher, &["alice"])
            .max_results(1)
            .collect(&repos(&["r1", "r2"]))
            .await;

        assert_eq!(digest.pull_requests().len(), 1);
        assert_eq!(digest.pull_requests()[0].created_at, "2024-01-03T00:00:00Z");
    }

    #[tokio::test]
    async fn failing_repository_does_not_affect_others() {
        let fetcher = Arc::new(
            StubFetcher::default()
                .page("r1", 1, Page::Items(vec![pr("alice", "2024-01-01T00:00:00Z")]))
                .page("r2", 1, Page::DecodeError),
        );

        let digest = aggregator(fetcher.clone(), &["alice"])
            .collect(&repos(&["r1", "r2"]))
            .await;

        assert_eq!(digest.pull_requests().len(), 1);
        assert_eq!(digest.pull_requests()[0].author(), "alice");
        assert_eq!(fetcher.calls("r2"), vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn should_cap_concurrent_repositories() {
        let mut stub = StubFetcher::default();
        let names = ["r1", "r2", "r3", "r4", "r5", "r6", "r7"];
        for name in names {
            stub = stub
                .page(name, 1, Page::Items(vec![pr("alice", "2024-01-01T00:00:00Z")]))
                .latency(name, Duration::from_millis(100));
        }
        let fetcher = Arc::new(stub);

        let digest = aggregator(fetcher.clone(), &["alice"])
            .max_concurrent(3)
            .collect(&repos(&names))
            .await;

        assert_eq!(digest.pull_requests().len(), names.len());
        assert!(fetcher.max_in_flight() <= 3);
        assert!(fetcher.max_in_flight() >= 2);
    }

    #[tokio::test]
    async fn no_repositories_is_an_empty_digest() {
        let digest = aggregator(Arc::new(StubFetcher::default()), &["alice"])
            .collect(&[])
            .await;

        assert!(digest.pull_requests().is_empty());
    }
}
