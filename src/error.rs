use axum::extract::rejection::FormRejection;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

use crate::router::SETUP_PATH;

/// Shown instead of the real cause for every unclassified failure.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Something went wrong when loading decap. Please check the config values and try again.";

#[derive(Debug, ThisError)]
pub enum NexusError {
    /// Classified failure; the message is safe to show to the operator verbatim.
    #[error("{0}")]
    App(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    #[error("libsql error: {0}")]
    Libsql(#[from] libsql::Error),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Form error: {0}")]
    Form(#[from] FormRejection),

    #[error("Invalid platform environment descriptor: {0}")]
    InvalidDescriptor(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl NexusError {
    pub fn app(message: impl Into<String>) -> Self {
        NexusError::App(message.into())
    }

    pub fn is_classified(&self) -> bool {
        matches!(self, NexusError::App(_))
    }

    /// Message that may reach the browser.
    pub fn user_message(&self) -> &str {
        match self {
            NexusError::App(message) => message,
            _ => GENERIC_FAILURE_MESSAGE,
        }
    }
}

/// Turn any failure into the response the operator gets to see.
///
/// On the setup path the message is answered as plain text with status 500,
/// everywhere else the browser is sent back to the setup page (302) with the
/// message in the `error` query parameter.
pub fn funnel(on_setup_path: bool, err: NexusError) -> Response {
    error!(classified = err.is_classified(), error = %err, "request failed");

    let message = err.user_message();
    if on_setup_path {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            message.to_string(),
        )
            .into_response();
    }

    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("error", message)
        .finish();
    (
        StatusCode::FOUND,
        [(header::LOCATION, format!("{SETUP_PATH}?{query}"))],
    )
        .into_response()
}
