use crate::api::GitHubClient;
use crate::db::Settings;
use crate::router::{NexusState, SETUP_PATH};
use crate::types::CmsManifest;
use crate::NexusError;
use axum::response::{Html, IntoResponse, Redirect, Response};

/// Manifest file read from the root of the configured repository.
pub const MANIFEST_FILE: &str = "decapconfig.yml";

/// Path of the browser adapter bundle.
pub const ADAPTER_SCRIPT_PATH: &str = "/client.js";

/// Serve the CMS page, or send unconfigured deployments to the setup form.
pub async fn respond(state: &NexusState, settings: &Settings) -> Result<Response, NexusError> {
    let Some((repository, token)) = settings.credentials() else {
        // 303 so the follow-up request is always a GET
        return Ok(Redirect::to(SETUP_PATH).into_response());
    };

    let manifest = load_manifest(&state.github, repository, token).await?;
    let page = render_cms_page(&manifest, &state.cms_bundle_url)?;
    Ok(Html(page).into_response())
}

/// Fetch, validate and prepare the manifest for the browser adapter.
/// Nothing is cached; every page load reads the file again.
pub async fn load_manifest(
    github: &GitHubClient,
    repository: &str,
    token: &str,
) -> Result<CmsManifest, NexusError> {
    let source = github.fetch_file(repository, token, MANIFEST_FILE).await?;
    let mut manifest = CmsManifest::from_yaml(&source)?;
    manifest.ensure_collections()?;
    manifest.inject(repository, token);
    Ok(manifest)
}

pub fn render_cms_page(manifest: &CmsManifest, bundle_url: &str) -> Result<String, NexusError> {
    let config = manifest.to_script_literal()?;
    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="robots" content="noindex" />
  <title>Decap CMS</title>
</head>
<body>
  <script>
    window.DECAP_CONFIG = {config}
    window.CMS_MANUAL_INIT = true
  </script>
  <script src="{bundle_url}"></script>
  <script src="{ADAPTER_SCRIPT_PATH}"></script>
</body>
</html>
"#
    ))
}
