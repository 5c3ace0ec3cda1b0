use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use url::Url;

/// Environment variable carrying the hosting platform's service descriptor.
pub const PLATFORM_ENV_VAR: &str = "luva";

pub static CONFIG: LazyLock<Config> =
    LazyLock::new(|| Config::load().expect("FATAL: failed to load configuration"));

/// How the submitted repository reference is cleaned up before it is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepositoryPrefixMode {
    /// Only values that do not start with the GitHub URL prefix are touched.
    #[default]
    Legacy,
    /// A leading GitHub URL prefix is removed.
    Strip,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub listen_addr: String,
    pub loglevel: String,
    /// Used when no platform descriptor is present.
    pub database_url: String,
    pub github_api_url: Url,
    pub user_agent: String,
    pub cms_bundle_url: String,
    pub repository_prefix_mode: RepositoryPrefixMode,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            database_url: "sqlite://decap-nexus.sqlite".to_string(),
            github_api_url: Url::parse("https://api.github.com").expect("static url"),
            user_agent: "Luvabase Decap CMS".to_string(),
            cms_bundle_url: "https://unpkg.com/decap-cms@^3.0.0/dist/decap-cms.js".to_string(),
            repository_prefix_mode: RepositoryPrefixMode::Legacy,
        }
    }
}

impl Config {
    /// Defaults overridden by `NEXUS_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed("NEXUS_"))
            .extract()
    }

    /// Raw platform descriptor, if the hosting environment provides one.
    pub fn platform_descriptor() -> Option<String> {
        std::env::var(PLATFORM_ENV_VAR)
            .ok()
            .filter(|raw| !raw.trim().is_empty())
    }
}
