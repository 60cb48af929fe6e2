use super::age::days_since;
use crate::github::PullRequest;
use chrono::{DateTime, Utc};

/// Renders pull requests as digest lines, ageing them against a fixed instant.
pub struct Formatter {
    now: DateTime<Utc>,
}

impl Formatter {
    pub fn new(now: DateTime<Utc>) -> Self {
        Formatter { now }
    }

    pub fn entry(&self, pr: &PullRequest) -> String {
        format!(
            "* {} <{}> {} Created {} day(s) ago",
            pr.title,
            pr.url,
            pr.author(),
            days_since(&pr.created_at, self.now)
        )
    }
}
