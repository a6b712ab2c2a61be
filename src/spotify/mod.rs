//! Outbound Spotify Web API clients
//!
//! Two capabilities sit behind the [`SpotifyApi`] trait: exchanging the
//! stored refresh token for an access token, and the playback command calls
//! (search, start-playback, transport control, currently-playing). The one
//! production implementation is [`SpotifyClient`]; tests substitute a fake.

pub mod auth;
pub mod models;
pub mod player;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::Config;
use models::{PlaybackState, TokenResponse, TrackHit};
pub use player::TransportAction;

const USER_AGENT: &str = "spotify-broker/0.1.0";
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Spotify client errors
#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Capability surface of the remote service, one method per capability.
///
/// HTTP handlers depend on `Arc<dyn SpotifyApi>` so tests can inject an
/// implementation with canned responses and call counters instead of a
/// network client.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchange the stored refresh token for a fresh access token.
    async fn exchange_token(&self) -> Result<TokenResponse, SpotifyError>;

    /// Search for one track matching `query`; `None` when nothing matches.
    async fn search_track(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Option<TrackHit>, SpotifyError>;

    /// Start playback of the track identified by `uri`.
    async fn start_playback(&self, access_token: &str, uri: &str) -> Result<(), SpotifyError>;

    /// Issue one transport-control command.
    async fn transport(
        &self,
        access_token: &str,
        action: TransportAction,
    ) -> Result<(), SpotifyError>;

    /// Fetch the currently-playing state; `None` when nothing is playing.
    async fn currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<PlaybackState>, SpotifyError>;
}

/// Production client against the real (or stubbed) Spotify endpoints.
///
/// Holds its own `reqwest::Client`; endpoint URLs come from [`Config`] so
/// integration tests can point it at a local stub server.
pub struct SpotifyClient {
    http_client: reqwest::Client,
    token_url: String,
    api_base_url: String,
    refresh_token: String,
    client_id: String,
    client_secret: String,
}

impl SpotifyClient {
    pub fn new(config: &Config) -> Result<Self, SpotifyError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            token_url: config.token_url.clone(),
            api_base_url: config.api_base_url.clone(),
            refresh_token: config.refresh_token.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_token(&self) -> Result<TokenResponse, SpotifyError> {
        SpotifyClient::exchange_token(self).await
    }

    async fn search_track(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Option<TrackHit>, SpotifyError> {
        SpotifyClient::search_track(self, access_token, query).await
    }

    async fn start_playback(&self, access_token: &str, uri: &str) -> Result<(), SpotifyError> {
        SpotifyClient::start_playback(self, access_token, uri).await
    }

    async fn transport(
        &self,
        access_token: &str,
        action: TransportAction,
    ) -> Result<(), SpotifyError> {
        SpotifyClient::transport(self, access_token, action).await
    }

    async fn currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<PlaybackState>, SpotifyError> {
        SpotifyClient::currently_playing(self, access_token).await
    }
}
