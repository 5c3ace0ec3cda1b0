mod common;

use axum::http::{StatusCode, header};
use common::{body_string, fake_github, get, location, post_form, test_app};
use decap_nexus::db::{ConfigStore, Settings};
use decap_nexus::error::GENERIC_FAILURE_MESSAGE;
use tower::ServiceExt;

#[tokio::test]
async fn setup_page_renders_the_error_from_the_query() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    let resp = t
        .app
        .clone()
        .oneshot(get("/setup?error=Could%20not%20fetch%20decapconfig.yml"))
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    let body = body_string(resp).await;
    assert!(body.contains("Oops!"));
    assert!(body.contains("Could not fetch decapconfig.yml"));
    assert!(body.contains(r#"name="githubRepository""#));
    assert!(body.contains(r#"name="githubToken""#));
}

#[tokio::test]
async fn setup_submission_stores_settings_and_redirects_home() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    let resp = t
        .app
        .clone()
        .oneshot(post_form(
            "/setup",
            "githubRepository=acme%2Fsite&githubToken=tok",
        ))
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::FOUND);
    assert_eq!(location(&resp), "/");

    let settings = t.store.load().await.unwrap();
    assert_eq!(settings.credentials(), Some(("acme/site", "tok")));
    assert!(github.requests().is_empty());
}

#[tokio::test]
async fn empty_fields_fail_without_touching_the_store() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    for body in [
        "githubRepository=&githubToken=",
        "githubRepository=acme%2Fsite&githubToken=",
        "githubToken=tok",
    ] {
        let resp = t
            .app
            .clone()
            .oneshot(post_form("/setup", body))
            .await
            .expect("request failed");

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(resp.headers().get(header::LOCATION).is_none());
        assert_eq!(body_string(resp).await, "Invalid github repository or token");
    }

    assert_eq!(t.store.load().await.unwrap(), Settings::default());
}

#[tokio::test]
async fn full_repository_url_is_stored_verbatim() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    let resp = t
        .app
        .clone()
        .oneshot(post_form(
            "/setup",
            "githubRepository=https%3A%2F%2Fgithub.com%2Facme%2Fsite&githubToken=tok",
        ))
        .await
        .expect("request failed");
    assert_eq!(resp.status(), StatusCode::FOUND);

    let settings = t.store.load().await.unwrap();
    assert_eq!(
        settings.github_repository.as_deref(),
        Some("https://github.com/acme/site")
    );
}

#[tokio::test]
async fn resubmitting_overwrites_previous_values() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    for body in [
        "githubRepository=acme%2Fold&githubToken=t1",
        "githubRepository=acme%2Fsite&githubToken=t2",
    ] {
        let resp = t
            .app
            .clone()
            .oneshot(post_form("/setup", body))
            .await
            .expect("request failed");
        assert_eq!(resp.status(), StatusCode::FOUND);
    }

    let settings = t.store.load().await.unwrap();
    assert_eq!(settings.credentials(), Some(("acme/site", "t2")));
}

#[tokio::test]
async fn non_form_body_gets_the_generic_message() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/setup")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(r#"{"githubRepository":"acme/site"}"#))
        .expect("failed to build request");
    let resp = t.app.clone().oneshot(req).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_string(resp).await, GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn other_methods_are_not_allowed() {
    let github = fake_github(StatusCode::OK, "").await;
    let t = test_app(github.base_url.clone()).await;

    let req = axum::http::Request::builder()
        .method("DELETE")
        .uri("/setup")
        .body(axum::body::Body::empty())
        .expect("failed to build request");
    let resp = t.app.clone().oneshot(req).await.expect("request failed");

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(resp.headers()[header::ALLOW], "GET, POST");
}
