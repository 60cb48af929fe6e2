mod pull_request;

pub use pull_request::PullRequest;
