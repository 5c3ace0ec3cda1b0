pub mod github_api;

pub use github_api::{GitHubClient, repo_coordinates};
