use crate::model::{GithubConfig, Result};
use dialoguer::{Input, Password};

#[derive(Clone, Eq, PartialEq)]
pub struct Credentials {
    pub account: String,
    pub token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("token", &"***")
            .finish()
    }
}

impl Credentials {
    pub fn new(account: impl ToString, token: impl ToString) -> Self {
        Self {
            account: account.to_string(),
            token: token.to_string(),
        }
    }

    /// Takes whatever the configuration (or the command line override) provides
    /// and asks on the terminal for the rest.
    pub fn resolve(config: &GithubConfig, token_override: Option<String>) -> Result<Self> {
        let account = match &config.account {
            Some(account) => account.clone(),
            None => Input::<String>::new()
                .with_prompt("GitHub user")
                .interact_text()?,
        };
        let token = match token_override.or_else(|| config.token.clone()) {
            Some(token) => token,
            None => Password::new()
                .with_prompt("GitHub access token")
                .interact()?,
        };
        Ok(Self::new(account, token))
    }
}
