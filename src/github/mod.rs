pub mod cache;
pub mod client;
pub mod pull_request;

pub use cache::{CacheMode, CachePolicy};
pub use client::GithubClient;
pub use pull_request::{Author, GithubPullRequester, PullRequest, PullRequestState};
