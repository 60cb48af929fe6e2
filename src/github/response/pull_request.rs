use serde::Deserialize;

/// One open pull request as listed by the pulls endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PullRequest {
    pub title: String,
    #[serde(rename = "html_url")]
    pub url: String,
    pub created_at: String,
    /// Absent on servers that do not report draft status.
    #[serde(default)]
    pub draft: Option<bool>,
    pub user: User,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

impl PullRequest {
    pub fn author(&self) -> &str {
        &self.user.login
    }

    pub fn is_draft(&self) -> bool {
        self.draft.unwrap_or(false)
    }
}
