use crate::github::GithubClient;
use crate::model::{Repository, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Author {
    pub login: String,
}

/// The subset of a GitHub pull request the report reads.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: Author,
    pub created_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub state: PullRequestState,
}

pub type PageProgress<'a> = Box<dyn FnMut(u32) + Send + 'a>;

/// Raw pull requests together with the number of non-empty pages they came from.
#[derive(Debug, Default)]
pub struct FetchedPullRequests {
    pub pull_requests: Vec<Value>,
    pub pages: u32,
}

pub trait GithubPullRequester {
    async fn fetch_pull_requests<'a>(
        &self,
        client: &GithubClient,
        cb: PageProgress<'a>,
    ) -> Result<FetchedPullRequests>;
}

impl GithubPullRequester for Repository {
    /// Walks the pages until GitHub answers with an empty one. Objects are kept
    /// raw, in the order GitHub returned them.
    async fn fetch_pull_requests<'a>(
        &self,
        client: &GithubClient,
        mut cb: PageProgress<'a>,
    ) -> Result<FetchedPullRequests> {
        let mut fetched = FetchedPullRequests::default();
        loop {
            let page = fetched.pages + 1;
            cb(page);
            let github_pull_requests = client.list_pulls(&self.name, page).await?;
            if github_pull_requests.is_empty() {
                break;
            }
            fetched.pull_requests.extend(github_pull_requests);
            fetched.pages = page;
        }
        Ok(fetched)
    }
}
