mod age;
mod aggregator;
mod collector;
mod formatter;

pub use aggregator::Aggregator;
pub use collector::RepositoryCollector;
pub use formatter::Formatter;

use crate::github::PullRequest;

/// Pull requests selected for one run, oldest first and already capped.
#[derive(Debug, Clone, Default)]
pub struct Digest {
    pull_requests: Vec<PullRequest>,
}

impl Digest {
    pub fn new(pull_requests: Vec<PullRequest>) -> Self {
        Digest { pull_requests }
    }

    pub fn pull_requests(&self) -> &[PullRequest] {
        &self.pull_requests
    }

    /// Renders the header followed by one line per pull request. Drafts are dropped
    /// here, after the cap was applied, so fewer lines than the cap may come out.
    pub fn render(&self, header: &str, skip_drafts: bool, formatter: &Formatter) -> String {
        let mut text = format!("{}\n", header);

        for pr in &self.pull_requests {
            if skip_drafts && pr.is_draft() {
                log::debug!("skipping draft {}", pr.url);
                continue;
            }
            text.push_str(&formatter.entry(pr));
            text.push('\n');
        }

        text
    }
}
