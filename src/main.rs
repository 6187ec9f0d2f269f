mod analyze;
mod github;
mod model;
mod report;
mod utils;

use crate::analyze::LabAnalyzer;
use crate::github::{cache, CacheMode, CachePolicy, GithubClient, GithubPullRequester, PullRequest};
use crate::model::{plan_repositories, Config, Credentials, GithubConfig, Repository, Result};
use crate::report::{report_path, CsvReport, TableBuilder};
use crate::utils::{MultiProgressNew, ProgressStyleTemplate, ProgressWriter};
use clap::Parser;
use indicatif::{MultiProgress, ProgressBar};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds per-student lab submission reports from pull requests of course repositories
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(long = "config", default_value = "config.json")]
    config_path: PathBuf,
    #[arg(long = "cache-dir", default_value = ".")]
    cache_dir: PathBuf,
    #[arg(long = "output-dir", default_value = ".")]
    output_dir: PathBuf,
    /// What to do with repositories that already have cached pull requests
    #[arg(long = "cache", value_enum, default_value_t = CacheMode::Ask)]
    cache_mode: CacheMode,
    /// GitHub access token, takes precedence over the configured one
    #[arg(long = "token", env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let multi_progress = MultiProgress::default();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(ProgressWriter::new(multi_progress.clone())),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    match run(&args, &multi_progress).await {
        Ok(()) => {
            info!("Success!");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args, multi_progress: &MultiProgress) -> Result<()> {
    let config = Config::from_config(&args.config_path)?;
    let repos = plan_repositories(&config.courses);
    info!(
        config = %args.config_path.display(),
        repositories = repos.len(),
        "Configuration loaded"
    );
    if repos.is_empty() {
        warn!("No course groups configured, nothing to report");
        return Ok(());
    }

    let mut plans = Vec::with_capacity(repos.len());
    for repo in &repos {
        let cache_path = cache::cache_path(&args.cache_dir, &repo.name);
        let policy = multi_progress.suspend(|| {
            CachePolicy::resolve(args.cache_mode, &cache_path, &repo.name)
        });
        plans.push((repo, cache_path, policy));
    }

    let mut client = LazyClient::new(&config.github, args.token.clone());
    if plans.iter().any(|(_, _, policy)| *policy == CachePolicy::Refetch) {
        client.get(multi_progress)?;
    }

    let repos_pb = multi_progress.add_with_style(
        ProgressBar::new(plans.len() as u64),
        ProgressStyleTemplate::repositories(),
    );
    for (repo, cache_path, policy) in plans {
        repos_pb.set_message(repo.name.clone());
        repo_process(repo, &cache_path, policy, &mut client, args, multi_progress).await?;
        repos_pb.inc(1);
    }
    repos_pb.finish_with_message("✅ Reports written");
    Ok(())
}

async fn repo_process(
    repo: &Repository,
    cache_path: &Path,
    policy: CachePolicy,
    client: &mut LazyClient<'_>,
    args: &Args,
    multi_progress: &MultiProgress,
) -> Result<()> {
    let pull_requests = match policy {
        CachePolicy::UseCache => match cache::load(cache_path) {
            Ok(pull_requests) => {
                info!(
                    repo = %repo.name,
                    cache = %cache_path.display(),
                    pull_requests = pull_requests.len(),
                    "Using cached pull requests"
                );
                pull_requests
            }
            Err(err) => {
                warn!(
                    repo = %repo.name,
                    cache = %cache_path.display(),
                    "Cache is unreadable ({err}), fetching again"
                );
                let client = client.get(multi_progress)?;
                github_fetch(repo, cache_path, client, multi_progress).await?
            }
        },
        CachePolicy::Refetch => {
            let client = client.get(multi_progress)?;
            github_fetch(repo, cache_path, client, multi_progress).await?
        }
    };

    let history = pull_requests.analyze_labs();
    if history.is_empty() {
        warn!(repo = %repo.name, "No pull request carries lab metadata");
    }
    let table = history.build_table(repo);
    let csv_path = report_path(&args.output_dir, &repo.name);
    table.write_csv(&csv_path)?;
    info!(
        repo = %repo.name,
        report = %csv_path.display(),
        students = table.rows.len(),
        submissions = table.submitted_cells(),
        "Report written"
    );

    let idle = table.students_without_submissions();
    if !idle.is_empty() {
        info!(repo = %repo.name, "No submissions from: {}", idle.join(", "));
    }
    Ok(())
}

/// Fetches every pull request, overwrites the cache and reads it back.
async fn github_fetch(
    repo: &Repository,
    cache_path: &Path,
    client: &GithubClient,
    multi_progress: &MultiProgress,
) -> Result<Vec<PullRequest>> {
    let pb = multi_progress.add_spinner(
        ProgressStyleTemplate::spinner(),
        format!("Fetch pull requests of {} ...", repo.name),
    );
    let progress_pb = pb.clone();
    let progress = move |page: u32| {
        progress_pb.set_message(format!("Fetch pull requests (#{} page) ...", page));
    };

    let fetched = match repo.fetch_pull_requests(client, Box::new(progress)).await {
        Ok(fetched) => fetched,
        Err(err) => {
            pb.abandon_with_message(format!("❌ Failed to fetch pull requests of {}", repo.name));
            return Err(err);
        }
    };
    cache::write(cache_path, &fetched.pull_requests)?;
    pb.finish_with_message(format!(
        "✅ Completed fetch pull requests (find {} pull requests)",
        fetched.pull_requests.len()
    ));
    info!(
        repo = %repo.name,
        owner = %client.owner(),
        cache = %cache_path.display(),
        "Data from {} pages cached",
        fetched.pages
    );

    cache::load(cache_path)
}

/// Credentials are only asked for once a repository actually needs GitHub.
struct LazyClient<'a> {
    github: &'a GithubConfig,
    token: Option<String>,
    client: Option<GithubClient>,
}

impl<'a> LazyClient<'a> {
    fn new(github: &'a GithubConfig, token: Option<String>) -> Self {
        Self {
            github,
            token,
            client: None,
        }
    }

    fn get(&mut self, multi_progress: &MultiProgress) -> Result<&GithubClient> {
        let client = match self.client.take() {
            Some(client) => client,
            None => {
                let credentials = multi_progress
                    .suspend(|| Credentials::resolve(self.github, self.token.take()))?;
                let owner = self
                    .github
                    .owner
                    .clone()
                    .unwrap_or_else(|| credentials.account.clone());
                GithubClient::new(&self.github.api_url, owner, credentials)?
            }
        };
        Ok(self.client.insert(client))
    }
}
