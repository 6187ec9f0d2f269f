use crate::model::{Course, Result};
use serde_json::{from_str, Value};
use std::fs;
use std::path::Path;

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GithubConfig {
    pub account: Option<String>,
    pub token: Option<String>,
    pub owner: Option<String>,
    pub api_url: String,
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Config {
    pub github: GithubConfig,
    pub courses: Vec<Course>,
}

// Create
impl Config {
    pub fn from_config(path: impl AsRef<Path>) -> Result<Self> {
        let json_str = fs::read_to_string(path)?;
        Self::parse(&json_str)
    }
}

// Parser
impl Config {
    fn parse(json_str: &str) -> Result<Self> {
        let root: Value = from_str(json_str)?;
        let github = GithubConfig::parse(&root["github"]);
        let courses = match root["courses"].as_array() {
            Some(courses) => courses
                .iter()
                .map(Course::parse)
                .collect::<Result<Vec<_>>>()?,
            None => return Err("Not found 'courses' field".into()),
        };
        Ok(Self { github, courses })
    }
}

impl GithubConfig {
    fn parse(details: &Value) -> Self {
        let field = |name: &str| {
            details[name]
                .as_str()
                .filter(|value| !value.is_empty())
                .map(String::from)
        };
        Self {
            account: field("account"),
            token: field("token"),
            owner: field("owner"),
            api_url: field("api_url").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
        }
    }
}
