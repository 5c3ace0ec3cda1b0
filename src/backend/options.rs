use crate::error::NexusError;
use crate::types::CmsManifest;

const DEFAULT_BRANCH: &str = "main";
const INITIAL_WORKFLOW_STATUS: &str = "draft";

/// Settings for the GitHub backend the adapter wraps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitHubApiOptions {
    pub token: String,
    pub repo: String,
    pub branch: String,
    pub squash_merges: bool,
    pub cms_label_prefix: String,
    pub initial_workflow_status: String,
}

impl GitHubApiOptions {
    /// Read from a manifest that already went through [`CmsManifest::inject`].
    pub fn from_manifest(manifest: &CmsManifest) -> Result<Self, NexusError> {
        let repo = manifest
            .backend_str("repo")
            .ok_or_else(|| NexusError::InvalidConfig("manifest has no backend.repo".into()))?;
        let token = manifest
            .str_field("githubToken")
            .ok_or_else(|| NexusError::InvalidConfig("manifest has no githubToken".into()))?;

        Ok(Self {
            token: token.to_string(),
            repo: repo.to_string(),
            branch: manifest
                .backend_str("branch")
                .unwrap_or(DEFAULT_BRANCH)
                .to_string(),
            squash_merges: manifest.backend_bool("squash_merges").unwrap_or(false),
            cms_label_prefix: manifest
                .backend_str("cms_label_prefix")
                .unwrap_or_default()
                .to_string(),
            initial_workflow_status: INITIAL_WORKFLOW_STATUS.to_string(),
        })
    }
}
