use crate::api::GitHubClient;
use crate::config::{Config, RepositoryPrefixMode};
use crate::db::SharedConfigStore;
use crate::error::{NexusError, funnel};
use crate::handlers::{assets, cms, setup};
use axum::{
    Router,
    extract::{Request, State},
    response::Response,
    routing::get,
};
use std::sync::Arc;

pub const SETUP_PATH: &str = "/setup";

#[derive(Clone)]
pub struct NexusState {
    pub store: SharedConfigStore,
    pub github: GitHubClient,
    pub cms_bundle_url: Arc<str>,
    pub prefix_mode: RepositoryPrefixMode,
}

impl NexusState {
    pub fn new(store: SharedConfigStore, cfg: &Config) -> Result<Self, NexusError> {
        let github = GitHubClient::new(cfg.github_api_url.clone(), &cfg.user_agent)?;
        Ok(Self {
            store,
            github,
            cms_bundle_url: Arc::from(cfg.cms_bundle_url.as_str()),
            prefix_mode: cfg.repository_prefix_mode,
        })
    }
}

pub fn nexus_router(state: NexusState) -> Router {
    Router::new()
        .route(cms::ADAPTER_SCRIPT_PATH, get(assets::adapter_script))
        .fallback(entry)
        .with_state(state)
}

/// Every request except the adapter bundle lands here.
async fn entry(State(state): State<NexusState>, req: Request) -> Response {
    let on_setup_path = req.uri().path() == SETUP_PATH;
    match dispatch(&state, req, on_setup_path).await {
        Ok(resp) => resp,
        Err(err) => funnel(on_setup_path, err),
    }
}

async fn dispatch(
    state: &NexusState,
    req: Request,
    on_setup_path: bool,
) -> Result<Response, NexusError> {
    let settings = state.store.load().await?;
    if on_setup_path {
        setup::respond(state, req).await
    } else {
        cms::respond(state, &settings).await
    }
}
