#![allow(dead_code)]

use axum::{
    Router,
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use decap_nexus::config::Config;
use decap_nexus::db::SqliteConfigStore;
use std::{
    fs,
    path::PathBuf,
    sync::{Arc, Mutex},
    time::{SystemTime, UNIX_EPOCH},
};
use tokio::net::TcpListener;
use url::Url;

pub struct TestApp {
    pub app: Router,
    pub store: SqliteConfigStore,
    temp_path: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.temp_path);
    }
}

/// Router backed by a fresh SQLite file, talking to `github_api_url`.
pub async fn test_app(github_api_url: Url) -> TestApp {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time before UNIX_EPOCH")
        .as_nanos();

    let mut temp_path = std::env::temp_dir();
    temp_path.push(format!(
        "decap-nexus-{}-{}.sqlite",
        std::process::id(),
        nanos
    ));

    let database_url = format!("sqlite:{}", temp_path.display());
    let store = SqliteConfigStore::connect(&database_url)
        .await
        .expect("open sqlite store");

    let mut cfg = Config::default();
    cfg.github_api_url = github_api_url;
    cfg.cms_bundle_url = "https://cdn.example/decap-cms.js".to_string();

    let state = decap_nexus::NexusState::new(Arc::new(store.clone()), &cfg)
        .expect("build state");
    TestApp {
        app: decap_nexus::nexus_router(state),
        store,
        temp_path,
    }
}

#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub path: String,
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub user_agent: Option<String>,
}

/// In-process stand-in for the GitHub contents API.
pub struct FakeGitHub {
    pub base_url: Url,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
}

impl FakeGitHub {
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().unwrap().clone()
    }
}

/// Answer every request with `status` and `body`.
pub async fn fake_github(status: StatusCode, body: &'static str) -> FakeGitHub {
    let seen: Arc<Mutex<Vec<SeenRequest>>> = Arc::default();
    let recorded = seen.clone();

    let app = Router::new().fallback(move |req: Request| {
        let recorded = recorded.clone();
        async move {
            let header_value = |name: header::HeaderName| {
                req.headers()
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            };
            recorded.lock().unwrap().push(SeenRequest {
                path: req.uri().path().to_string(),
                authorization: header_value(header::AUTHORIZATION),
                accept: header_value(header::ACCEPT),
                user_agent: header_value(header::USER_AGENT),
            });
            (status, body).into_response()
        }
    });

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake github");
    let addr = listener.local_addr().expect("fake github addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("fake github server");
    });

    FakeGitHub {
        base_url: Url::parse(&format!("http://{addr}/")).expect("fake github url"),
        seen,
    }
}

pub fn get(uri: &str) -> Request {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("failed to build request")
}

pub fn post_form(uri: &str, body: &str) -> Request {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("failed to build request")
}

pub async fn body_string(resp: Response) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}

pub fn location(resp: &Response) -> String {
    resp.headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .expect("Location was not ascii")
        .to_string()
}

/// Decoded `error` query parameter of a `/setup?error=...` location.
pub fn error_param(location: &str) -> Option<String> {
    let (path, query) = location.split_once('?')?;
    assert_eq!(path, "/setup");
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(k, _)| k == "error")
        .map(|(_, v)| v.into_owned())
}
