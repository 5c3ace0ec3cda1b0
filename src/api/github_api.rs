use crate::error::NexusError;
use reqwest::header::ACCEPT;
use tracing::{error, info};
use url::Url;

const RAW_CONTENT: &str = "application/vnd.github.v3.raw";

/// Minimal GitHub contents API client.
#[derive(Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    api_base: Url,
}

impl GitHubClient {
    pub fn new(api_base: Url, user_agent: &str) -> Result<Self, NexusError> {
        let http = reqwest::Client::builder()
            .user_agent(user_agent.to_string())
            .build()?;
        Ok(Self { http, api_base })
    }

    /// Raw text of `filename` at the root of `repository`.
    ///
    /// `repository` may be `owner/repo` or a full repository URL. A non-success
    /// status is reported with a fixed message; the upstream status and body
    /// only go to the log.
    pub async fn fetch_file(
        &self,
        repository: &str,
        token: &str,
        filename: &str,
    ) -> Result<String, NexusError> {
        info!(repository, filename, "fetching file from GitHub");

        let Some((owner, repo)) = repo_coordinates(repository) else {
            error!(repository, "repository reference needs an owner and a name");
            return Err(fetch_failed(filename));
        };
        let url = self.contents_url(owner, repo, filename)?;

        let resp = self
            .http
            .get(url)
            .bearer_auth(token)
            .header(ACCEPT, RAW_CONTENT)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            error!(%status, body = %body, filename, "GitHub rejected the contents request");
            return Err(fetch_failed(filename));
        }

        let text = resp.text().await?;
        info!(filename, bytes = text.len(), "fetched file from GitHub");
        Ok(text)
    }

    fn contents_url(&self, owner: &str, repo: &str, filename: &str) -> Result<Url, NexusError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                NexusError::InvalidConfig(format!("{} cannot be a base URL", self.api_base))
            })?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents", filename]);
        Ok(url)
    }
}

fn fetch_failed(filename: &str) -> NexusError {
    NexusError::app(format!(
        "Could not fetch {filename} from GitHub. Please check the repository URL and token and try again."
    ))
}

/// Owner and name from the last two non-empty `/` segments of a reference.
pub fn repo_coordinates(reference: &str) -> Option<(&str, &str)> {
    let mut segments = reference.rsplit('/').filter(|s| !s.is_empty());
    let repo = segments.next()?;
    let owner = segments.next()?;
    Some((owner, repo))
}
