use crate::config::RepositoryPrefixMode;
use crate::db::SettingKey;
use crate::router::NexusState;
use crate::NexusError;
use axum::{
    extract::{FromRequest, Form, Query, Request},
    http::{Method, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use tracing::info;

pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

#[derive(Debug, Deserialize)]
pub struct SetupQuery {
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetupForm {
    #[serde(rename = "githubRepository", default)]
    pub github_repository: Option<String>,
    #[serde(rename = "githubToken", default)]
    pub github_token: Option<String>,
}

/// GET renders the form, POST stores the submitted settings.
pub async fn respond(state: &NexusState, req: Request) -> Result<Response, NexusError> {
    let method = req.method().clone();
    match method {
        Method::GET => {
            let error = Query::<SetupQuery>::try_from_uri(req.uri())
                .ok()
                .and_then(|Query(q)| q.error);
            Ok(Html(render_setup_page(error.as_deref())).into_response())
        }
        Method::POST => {
            let Form(form) = Form::<SetupForm>::from_request(req, &()).await?;
            submit(state, form).await
        }
        _ => Ok((StatusCode::METHOD_NOT_ALLOWED, [(header::ALLOW, "GET, POST")]).into_response()),
    }
}

async fn submit(state: &NexusState, form: SetupForm) -> Result<Response, NexusError> {
    let repository = form.github_repository.filter(|s| !s.is_empty());
    let token = form.github_token.filter(|s| !s.is_empty());
    let (Some(repository), Some(token)) = (repository, token) else {
        return Err(NexusError::app("Invalid github repository or token"));
    };

    let repository = normalize_repository(&repository, state.prefix_mode);
    state
        .store
        .save(&[
            (SettingKey::GithubRepository, repository.clone()),
            (SettingKey::GithubToken, token),
        ])
        .await?;
    info!(repository = %repository, "stored GitHub settings");

    Ok((StatusCode::FOUND, [(header::LOCATION, "/")]).into_response())
}

/// Clean up a submitted repository reference before it is stored.
///
/// `Legacy` only rewrites values that do NOT start with the GitHub URL
/// prefix, which leaves both `owner/repo` and full URLs as they are.
pub fn normalize_repository(raw: &str, mode: RepositoryPrefixMode) -> String {
    match mode {
        RepositoryPrefixMode::Legacy if !raw.starts_with(GITHUB_URL_PREFIX) => {
            raw.replacen(GITHUB_URL_PREFIX, "", 1)
        }
        RepositoryPrefixMode::Legacy => raw.to_string(),
        RepositoryPrefixMode::Strip => raw
            .strip_prefix(GITHUB_URL_PREFIX)
            .unwrap_or(raw)
            .to_string(),
    }
}

pub fn render_setup_page(error: Option<&str>) -> String {
    let error_block = error
        .filter(|message| !message.is_empty())
        .map(|message| {
            format!(
                r#"
    <div style="background-color: #fee; border: 1px solid #fcc; padding: 1rem; border-radius: 0.5rem;">
      <h3 style="margin: 0;">Oops!</h3>
      <p>{}</p>
    </div>"#,
                escape_html(message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="robots" content="noindex" />
  <title>Setup Decap CMS</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/npm/water.css@2/out/water.css">
</head>
<body>
  <div style="display: flex; flex-direction: column; gap: 1rem; max-width: 600px; margin: 0 auto; padding: 2rem;">{error_block}
    <h1 style="margin-bottom: 0;">Setup Decap CMS</h1>
    <p style="margin-top: 0;">
      You need a website in a GitHub repository, ideally one that deploys whenever new commits are pushed.
    </p>
    <form method="POST">
      <div>
        <label for="githubRepository"><strong>GitHub Repository URL</strong></label><br>
        <input style="width: 100%;" type="text" id="githubRepository" name="githubRepository" required />
        <p>
          Full URL (or <code>owner/repo</code>) of the public or private repository of your website. It needs a <code>decapconfig.yml</code> file at the root; no <code>/admin</code> folder is required.
        </p>
      </div>
      <br>
      <div>
        <label for="githubToken"><strong>GitHub Personal Token</strong></label><br>
        <input style="width: 100%;" type="text" id="githubToken" name="githubToken" required />
        <p>
          Only the "Contents" permission under "Repository permissions" is required. Tokens are created on the <a href="https://github.com/settings/personal-access-tokens/new" target="_blank">new token</a> page.
        </p>
      </div>
      <br>
      <button type="submit">Open Decap CMS</button>
      <p>These settings can be changed later at <a href="/setup">/setup</a>.</p>
    </form>
  </div>
</body>
</html>
"#
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
