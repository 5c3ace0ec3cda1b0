use axum::http::header;
use axum::response::IntoResponse;

/// Browser-side backend adapter, loaded by the CMS page after the CMS bundle.
pub const ADAPTER_SCRIPT: &str = include_str!("../../assets/client.js");

/// GET /client.js
pub async fn adapter_script() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript; charset=utf-8")],
        ADAPTER_SCRIPT,
    )
}
