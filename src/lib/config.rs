use log::debug;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Identifies this client to api.weather.gov, which rejects anonymous
/// requests. Replace the contact address when deploying.
pub const DEFAULT_USER_AGENT: &str = "FlashFloodTracker/1.0 (contact: youremail@example.com)";
pub const USER_AGENT_VAR: &str = "USER_AGENT";
pub const SECRETS_FILE: &str = "secrets.toml";

/// A source of configuration values. Providers are queried in order until
/// one yields a non-empty value; a provider that cannot answer (unset
/// variable, missing file, bad TOML) yields `None` rather than an error.
pub trait Provider {
    fn user_agent(&self) -> Option<String>;
}

/// Reads the `USER_AGENT` environment variable.
pub struct EnvProvider;

impl Provider for EnvProvider {
    fn user_agent(&self) -> Option<String> {
        env::var(USER_AGENT_VAR).ok().filter(|value| !value.is_empty())
    }
}

/// Reads the `user_agent` key from a TOML secrets file.
pub struct SecretsProvider {
    path: PathBuf,
}

#[derive(Deserialize)]
struct Secrets {
    user_agent: Option<String>,
}

impl SecretsProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        SecretsProvider { path: path.into() }
    }
}

fn parse_secrets(raw: &str) -> Option<String> {
    let secrets: Secrets = toml::from_str(raw).ok()?;
    secrets.user_agent.filter(|value| !value.is_empty())
}

impl Provider for SecretsProvider {
    fn user_agent(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        parse_secrets(&raw)
    }
}

/// Always answers with [`DEFAULT_USER_AGENT`]; goes last in the chain.
pub struct DefaultProvider;

impl Provider for DefaultProvider {
    fn user_agent(&self) -> Option<String> {
        Some(DEFAULT_USER_AGENT.to_string())
    }
}

pub fn resolve_user_agent(providers: &[&dyn Provider]) -> Option<String> {
    providers.iter().find_map(|provider| provider.user_agent())
}

/// The standard chain: environment, then secrets file, then the default.
pub fn user_agent() -> String {
    let resolved = resolve_user_agent(&[
        &EnvProvider,
        &SecretsProvider::new(SECRETS_FILE),
        &DefaultProvider,
    ]);
    let user_agent = resolved.unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
    debug!("using user agent {:?}", user_agent);
    user_agent
}
