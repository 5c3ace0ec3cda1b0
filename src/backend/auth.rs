use crate::error::NexusError;
use crate::types::BACKEND_NAME;
use crate::types::cms::{Credentials, User};
use serde_json::Value;

/// Where operators land after logging out.
pub const LOGOUT_URL: &str = "https://luvabase.com";

const USER_NAME: &str = "Luvabase User";

/// What the CMS login screen should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthComponent {
    /// Report success immediately and render nothing.
    AutoLogin,
    Interactive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoutAction {
    Redirect(String),
    ClearSession,
}

/// How a backend identifies its user. Injected into [`super::LuvaBackend`].
pub trait AuthPolicy: Send + Sync {
    fn auth_component(&self) -> AuthComponent;

    fn authenticate(&self, credentials: Credentials) -> Result<User, NexusError>;

    fn restore_user(&self, user: User) -> Result<User, NexusError>;

    fn get_token(&self) -> Result<String, NexusError>;

    fn logout(&self) -> LogoutAction;
}

/// Uses the token the server embedded in the page; never talks to GitHub.
#[derive(Debug, Clone)]
pub struct EmbeddedTokenAuth {
    token: String,
}

impl EmbeddedTokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

impl AuthPolicy for EmbeddedTokenAuth {
    fn auth_component(&self) -> AuthComponent {
        AuthComponent::AutoLogin
    }

    fn authenticate(&self, mut credentials: Credentials) -> Result<User, NexusError> {
        let token = match credentials.remove("token") {
            Some(Value::String(token)) => Some(token),
            _ => None,
        };
        credentials.remove("backendName");
        credentials.remove("name");
        Ok(User {
            backend_name: BACKEND_NAME.to_string(),
            name: USER_NAME.to_string(),
            token,
            extra: credentials,
        })
    }

    fn restore_user(&self, user: User) -> Result<User, NexusError> {
        Ok(user)
    }

    fn get_token(&self) -> Result<String, NexusError> {
        Ok(self.token.clone())
    }

    fn logout(&self) -> LogoutAction {
        LogoutAction::Redirect(LOGOUT_URL.to_string())
    }
}
