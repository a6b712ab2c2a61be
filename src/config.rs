//! Process configuration
//!
//! All settings come from the environment, read once at startup into an
//! immutable `Config` passed by reference to every component. Handlers never
//! consult the environment themselves.

use std::env;
use std::fmt;

use thiserror::Error;

const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
const DEFAULT_API_BASE_URL: &str = "https://api.spotify.com";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required credential variable is unset or blank
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Broker configuration
///
/// The credential fields are process-wide and read-only. `token_url` and
/// `api_base_url` default to the real Spotify endpoints; tests override them
/// to point the client at a local stub.
#[derive(Clone)]
pub struct Config {
    pub refresh_token: String,
    pub client_id: String,
    pub client_secret: String,
    pub port: u16,
    pub token_url: String,
    pub api_base_url: String,
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// The port comes from the command line (clap resolves the `PORT`
    /// variable and the default); every credential must be present and
    /// non-blank or startup fails.
    pub fn from_env(port: u16) -> Result<Self, ConfigError> {
        Ok(Self {
            refresh_token: require("SPOTIFY_REFRESH_TOKEN")?,
            client_id: require("SPOTIFY_CLIENT_ID")?,
            client_secret: require("SPOTIFY_CLIENT_SECRET")?,
            port,
            token_url: env::var("SPOTIFY_TOKEN_URL")
                .unwrap_or_else(|_| DEFAULT_TOKEN_URL.to_string()),
            api_base_url: env::var("SPOTIFY_API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        })
    }
}

// Credentials must never appear in full in logs, so Debug shows a prefix only.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("refresh_token", &redact(&self.refresh_token))
            .field("client_id", &redact(&self.client_id))
            .field("client_secret", &redact(&self.client_secret))
            .field("port", &self.port)
            .field("token_url", &self.token_url)
            .field("api_base_url", &self.api_base_url)
            .finish()
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

fn redact(value: &str) -> String {
    let prefix: String = value.chars().take(4).collect();
    format!("{}****", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn set_credentials() {
        env::set_var("SPOTIFY_REFRESH_TOKEN", "refresh-aaaa");
        env::set_var("SPOTIFY_CLIENT_ID", "client-bbbb");
        env::set_var("SPOTIFY_CLIENT_SECRET", "secret-cccc");
        env::remove_var("SPOTIFY_TOKEN_URL");
        env::remove_var("SPOTIFY_API_BASE_URL");
    }

    #[test]
    #[serial]
    fn loads_credentials_and_defaults() {
        set_credentials();

        let config = Config::from_env(3000).expect("config should load");
        assert_eq!(config.refresh_token, "refresh-aaaa");
        assert_eq!(config.port, 3000);
        assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    #[serial]
    fn missing_credential_is_a_startup_error() {
        set_credentials();
        env::remove_var("SPOTIFY_CLIENT_SECRET");

        let err = Config::from_env(3000).expect_err("missing secret should fail");
        assert!(matches!(err, ConfigError::MissingVar("SPOTIFY_CLIENT_SECRET")));
    }

    #[test]
    #[serial]
    fn blank_credential_is_a_startup_error() {
        set_credentials();
        env::set_var("SPOTIFY_REFRESH_TOKEN", "   ");

        let err = Config::from_env(3000).expect_err("blank token should fail");
        assert!(matches!(err, ConfigError::MissingVar("SPOTIFY_REFRESH_TOKEN")));
    }

    #[test]
    #[serial]
    fn endpoint_overrides_are_honored() {
        set_credentials();
        env::set_var("SPOTIFY_TOKEN_URL", "http://127.0.0.1:9/token");
        env::set_var("SPOTIFY_API_BASE_URL", "http://127.0.0.1:9");

        let config = Config::from_env(3000).expect("config should load");
        assert_eq!(config.token_url, "http://127.0.0.1:9/token");
        assert_eq!(config.api_base_url, "http://127.0.0.1:9");

        env::remove_var("SPOTIFY_TOKEN_URL");
        env::remove_var("SPOTIFY_API_BASE_URL");
    }

    #[test]
    #[serial]
    fn debug_output_redacts_credentials() {
        set_credentials();

        let config = Config::from_env(3000).expect("config should load");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("refresh-aaaa"));
        assert!(!rendered.contains("secret-cccc"));
        assert!(rendered.contains("refr****"));
    }
}
