use crate::github::PullRequest;
use crate::model::Result;
use clap::ValueEnum;
use dialoguer::Confirm;
use serde_json::Value;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{error, warn};

/// How the user wants existing cache files treated.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, ValueEnum)]
pub enum CacheMode {
    /// Ask for every repository that already has a cache file.
    #[default]
    Ask,
    /// Reuse existing cache files without asking.
    Reuse,
    /// Always fetch from GitHub.
    Reload,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum CachePolicy {
    UseCache,
    Refetch,
}

impl CachePolicy {
    pub fn resolve(mode: CacheMode, cache_path: &Path, repo_name: &str) -> Self {
        Self::resolve_with(mode, cache_path, repo_name, |prompt| {
            Confirm::new().with_prompt(prompt).default(false).interact()
        })
    }

    /// Without a usable terminal the question gets its default answer: reuse.
    fn resolve_with<F>(mode: CacheMode, cache_path: &Path, repo_name: &str, ask: F) -> Self
    where
        F: FnOnce(String) -> dialoguer::Result<bool>,
    {
        if !cache_path.is_file() {
            return CachePolicy::Refetch;
        }
        let reload = match mode {
            CacheMode::Reuse => false,
            CacheMode::Reload => true,
            CacheMode::Ask => {
                match ask(format!("Cache for '{}' exists. Reload?", repo_name)) {
                    Ok(reload) => reload,
                    Err(err) => {
                        warn!(repo = %repo_name, "Cannot ask about the cache ({err}), reusing it");
                        false
                    }
                }
            }
        };
        if reload {
            CachePolicy::Refetch
        } else {
            CachePolicy::UseCache
        }
    }
}

pub fn cache_path(dir: impl AsRef<Path>, repo_name: &str) -> PathBuf {
    dir.as_ref().join(format!("{}.json", repo_name))
}

/// Overwrites the cache file with one JSON array.
pub fn write(path: &Path, pull_requests: &[Value]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, pull_requests)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Reads the cache back. Objects that do not look like a pull request are
/// reported and skipped; only a file that is not a JSON array fails.
pub fn load(path: &Path) -> Result<Vec<PullRequest>> {
    let reader = BufReader::new(File::open(path)?);
    let raw_pull_requests: Vec<Value> = serde_json::from_reader(reader)?;
    let pull_requests = raw_pull_requests
        .into_iter()
        .filter_map(|raw| {
            let number = raw["number"].as_u64();
            match serde_json::from_value::<PullRequest>(raw) {
                Ok(pull_request) => Some(pull_request),
                Err(err) => {
                    error!(
                        number = number,
                        cache = %path.display(),
                        "Malformed pull request, skipped: {err}"
                    );
                    None
                }
            }
        })
        .collect();
    Ok(pull_requests)
}
