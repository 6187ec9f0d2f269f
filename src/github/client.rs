use crate::model::{Credentials, Error, Result};
use serde_json::Value;
use tracing::debug;

pub const PAGE_SIZE: u32 = 100;

/// Thin wrapper over the GitHub REST API, authenticated with basic auth.
pub struct GithubClient {
    http_client: reqwest::Client,
    api_url: String,
    owner: String,
    credentials: Credentials,
}

impl GithubClient {
    pub fn new(api_url: impl ToString, owner: impl ToString, credentials: Credentials) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("lab-report/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http_client,
            api_url: api_url.to_string().trim_end_matches('/').to_string(),
            owner: owner.to_string(),
            credentials,
        })
    }

    pub fn owner(&self) -> &str {
        &self.owner
    }

    pub fn pulls_url(&self, repo: &str, page: u32) -> String {
        format!(
            "{}/repos/{}/{}/pulls?state=all&per_page={}&page={}",
            self.api_url, self.owner, repo, PAGE_SIZE, page
        )
    }

    /// One page of pull requests, open and closed, as raw JSON objects.
    pub async fn list_pulls(&self, repo: &str, page: u32) -> Result<Vec<Value>> {
        let url = self.pulls_url(repo, page);
        debug!(url = %url, "GET");
        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/vnd.github+json")
            .basic_auth(&self.credentials.account, Some(&self.credentials.token))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api { status, body });
        }
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pulls_url_requests_every_state() {
        let client = GithubClient::new(
            "https://api.github.com/",
            "moevm",
            Credentials::new("lecturer", "secret"),
        )
        .unwrap();
        assert_eq!(
            client.pulls_url("spbetu_os_2020_8381", 2),
            "https://api.github.com/repos/moevm/spbetu_os_2020_8381/pulls?state=all&per_page=100&page=2"
        );
    }
}
