//! Access-token acquisition against the Spotify accounts service

use tracing::debug;

use super::models::TokenResponse;
use super::{SpotifyClient, SpotifyError};

impl SpotifyClient {
    /// Exchange the stored refresh token for a fresh access token.
    ///
    /// One form-encoded POST per invocation, no retry and no caching: every
    /// caller pays a full exchange round-trip. A non-2xx status, a network
    /// failure, or a malformed body all fail the exchange; the caller
    /// decides how to surface that.
    pub async fn exchange_token(&self) -> Result<TokenResponse, SpotifyError> {
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", self.refresh_token.as_str()),
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
        ];

        debug!(url = %self.token_url, "Requesting access token");

        let response = self
            .http_client
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| SpotifyError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SpotifyError::Api(status.as_u16(), body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| SpotifyError::Parse(e.to_string()))?;

        debug!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            "Access token acquired"
        );

        Ok(token)
    }
}
