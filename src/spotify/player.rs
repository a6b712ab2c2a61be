//! Playback command calls against the Spotify Web API
//!
//! Every call carries `Authorization: Bearer <access_token>`. Transport
//! control and start-playback are fire-and-forget: the remote status code
//! and body are ignored, only a failed connection is an error.

use reqwest::Method;
use serde_json::json;
use tracing::debug;

use super::models::{PlaybackState, SearchResponse, TrackHit};
use super::{SpotifyClient, SpotifyError};

/// Transport-control commands, each mapping to exactly one remote endpoint
/// and HTTP verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportAction {
    Pause,
    Resume,
    SkipNext,
    SkipPrevious,
}

impl TransportAction {
    pub fn path(self) -> &'static str {
        match self {
            TransportAction::Pause => "/v1/me/player/pause",
            TransportAction::Resume => "/v1/me/player/play",
            TransportAction::SkipNext => "/v1/me/player/next",
            TransportAction::SkipPrevious => "/v1/me/player/previous",
        }
    }

    pub fn method(self) -> Method {
        match self {
            TransportAction::Pause | TransportAction::Resume => Method::PUT,
            TransportAction::SkipNext | TransportAction::SkipPrevious => Method::POST,
        }
    }

    /// Success message reported to the local caller.
    pub fn message(self) -> &'static str {
        match self {
            TransportAction::Pause => "Playback paused",
            TransportAction::Resume => "Playback resumed",
            TransportAction::SkipNext => "Skipped to next track",
            TransportAction::SkipPrevious => "Returned to previous track",
        }
    }
}

impl SpotifyClient {
    /// Search for a single track matching `query`.
    ///
    /// Filtered to the track type, limited to one result; `Ok(None)` when
    /// the result list is empty.
    pub async fn search_track(
        &self,
        access_token: &str,
        query: &str,
    ) -> Result<Option<TrackHit>, SpotifyError> {
        let url = format!("{}/v1/search", self.api_base_url);

        debug!(query = %query, "Searching for track");

        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), body));
        }

        let results: SearchResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        let hit = results
            .tracks
            .map(|page| page.items)
            .unwrap_or_default()
            .into_iter()
            .next();

        Ok(hit)
    }

    /// Start playback of the track identified by `uri`.
    pub async fn start_playback(
        &self,
        access_token: &str,
        uri: &str,
    ) -> Result<(), SpotifyError> {
        let url = format!("{}/v1/me/player/play", self.api_base_url);

        debug!(uri = %uri, "Starting playback");

        // Completion of the request is the success condition; the remote
        // status and body carry no information the facade reports.
        self.http_client
            .put(&url)
            .bearer_auth(access_token)
            .json(&json!({ "uris": [uri] }))
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(())
    }

    /// Issue one transport-control command.
    pub async fn transport(
        &self,
        access_token: &str,
        action: TransportAction,
    ) -> Result<(), SpotifyError> {
        let url = format!("{}{}", self.api_base_url, action.path());

        debug!(?action, "Sending transport command");

        self.http_client
            .request(action.method(), &url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        Ok(())
    }

    /// Fetch the currently-playing state.
    ///
    /// HTTP 204 or an empty body means nothing is playing and maps to
    /// `Ok(None)` rather than an error.
    pub async fn currently_playing(
        &self,
        access_token: &str,
    ) -> Result<Option<PlaybackState>, SpotifyError> {
        let url = format!("{}/v1/me/player/currently-playing", self.api_base_url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NO_CONTENT {
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), body));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;
        if body.is_empty() {
            return Ok(None);
        }

        let state: PlaybackState =
            serde_json::from_str(&body).map_err(|e| SpotifyError::Parse(e.to_string()))?;

        Ok(Some(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_actions_map_to_distinct_endpoints() {
        let actions = [
            TransportAction::Pause,
            TransportAction::Resume,
            TransportAction::SkipNext,
            TransportAction::SkipPrevious,
        ];

        let mut paths: Vec<&str> = actions.iter().map(|a| a.path()).collect();
        paths.sort_unstable();
        paths.dedup();
        // Pause and Resume share the player endpoint family but not a path.
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn pause_and_resume_use_put() {
        assert_eq!(TransportAction::Pause.method(), Method::PUT);
        assert_eq!(TransportAction::Resume.method(), Method::PUT);
        assert_eq!(TransportAction::SkipNext.method(), Method::POST);
        assert_eq!(TransportAction::SkipPrevious.method(), Method::POST);
    }
}
