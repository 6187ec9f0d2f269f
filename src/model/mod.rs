mod config;
mod course;
mod credentials;
mod repository;
mod result;

pub use config::{Config, GithubConfig};
pub use course::{plan_repositories, Course};
pub use credentials::Credentials;
pub use repository::{Repository, Roster};
pub use result::{Error, Result};
