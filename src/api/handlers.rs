//! HTTP request handlers
//!
//! Each playback handler follows the same template: acquire a fresh access
//! token through the client seam, issue the remote call(s), shape the reply.
//! Nothing is shared between requests.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiError;
use crate::spotify::models::{PlaybackState, TokenResponse, TrackSummary};
use crate::spotify::TransportAction;
use crate::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlayRequest {
    query: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    message: String,
}

#[derive(Debug, Serialize)]
pub struct PlayResponse {
    message: String,
    uri: String,
}

#[derive(Debug, Serialize)]
pub struct TokenEnvelope {
    data: TokenResponse,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    module: String,
    version: String,
}

/// Now-playing replies are either a track summary or an informational
/// message; both are 200 responses.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum NowPlayingResponse {
    Track(TrackSummary),
    Message(MessageResponse),
}

// ============================================================================
// Liveness and Health
// ============================================================================

/// GET / - plain-text liveness probe
pub async fn root() -> &'static str {
    "Spotify token broker is running"
}

/// GET /health - health check endpoint
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "spotify-broker".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// OAuth Helper Routes
// ============================================================================

/// GET /callback - OAuth authorization-code landing page
///
/// Shows the code so the operator can copy it and request a refresh token
/// out of band. The facade itself never consumes the code.
pub async fn callback(
    Query(params): Query<CallbackParams>,
) -> Result<Html<String>, (StatusCode, &'static str)> {
    let Some(code) = params.code else {
        return Err((
            StatusCode::BAD_REQUEST,
            "No authorization code found in request",
        ));
    };

    info!("Received authorization code via callback");

    Ok(Html(format!(
        "<h2>Authorization successful!</h2>\n\
         <p>Your code is:</p>\n\
         <pre>{code}</pre>\n\
         <p>Copy this code and use it to request your refresh token.</p>"
    )))
}

/// GET /token - perform one token exchange and return the provider response
pub async fn token(State(state): State<AppState>) -> Result<Json<TokenEnvelope>, ApiError> {
    let data = state
        .spotify
        .exchange_token()
        .await
        .map_err(ApiError::token_exchange)?;

    info!(
        token_type = ?data.token_type,
        expires_in = ?data.expires_in,
        "Refreshed access token"
    );

    Ok(Json(TokenEnvelope { data }))
}

// ============================================================================
// Playback Commands
// ============================================================================

/// POST /spotify_play - search for a track and start playing it
///
/// Query validation runs before the token exchange so a bad request makes
/// no outbound call at all.
pub async fn play(
    State(state): State<AppState>,
    body: Option<Json<PlayRequest>>,
) -> Result<Json<PlayResponse>, ApiError> {
    let query = body
        .and_then(|Json(req)| req.query)
        .map(|q| q.trim().to_string())
        .filter(|q| !q.is_empty());

    let Some(query) = query else {
        return Err(ApiError::BadRequest("Missing query".to_string()));
    };

    let token = state
        .spotify
        .exchange_token()
        .await
        .map_err(ApiError::token_exchange)?;

    let hit = state
        .spotify
        .search_track(&token.access_token, &query)
        .await
        .map_err(ApiError::upstream)?;

    let Some(hit) = hit else {
        return Err(ApiError::NotFound(format!("No track found for \"{query}\"")));
    };

    state
        .spotify
        .start_playback(&token.access_token, &hit.uri)
        .await
        .map_err(ApiError::upstream)?;

    info!(uri = %hit.uri, track = %hit.name, "Started playback");

    Ok(Json(PlayResponse {
        message: "Playback started".to_string(),
        uri: hit.uri,
    }))
}

/// POST /spotify_pause
pub async fn pause(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    transport_command(&state, TransportAction::Pause).await
}

/// POST /spotify_resume
pub async fn resume(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    transport_command(&state, TransportAction::Resume).await
}

/// POST /spotify_skip
pub async fn skip(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    transport_command(&state, TransportAction::SkipNext).await
}

/// POST /spotify_previous
pub async fn previous(State(state): State<AppState>) -> Result<Json<MessageResponse>, ApiError> {
    transport_command(&state, TransportAction::SkipPrevious).await
}

/// GET /spotify_now_playing
pub async fn now_playing(
    State(state): State<AppState>,
) -> Result<Json<NowPlayingResponse>, ApiError> {
    let token = state
        .spotify
        .exchange_token()
        .await
        .map_err(ApiError::token_exchange)?;

    let playback = state
        .spotify
        .currently_playing(&token.access_token)
        .await
        .map_err(ApiError::upstream)?;

    let response = match playback {
        None => NowPlayingResponse::Message(MessageResponse {
            message: "Nothing playing right now.".to_string(),
        }),
        Some(PlaybackState { item: None, .. }) => NowPlayingResponse::Message(MessageResponse {
            message: "No track info available.".to_string(),
        }),
        Some(PlaybackState {
            item: Some(item),
            is_playing,
        }) => NowPlayingResponse::Track(TrackSummary::from_item(item, is_playing)),
    };

    Ok(Json(response))
}

/// Shared template for the four transport-control routes: token, one remote
/// call, fixed success message. The reply does not depend on the remote
/// playback state, so repeating a command always returns the same shape.
async fn transport_command(
    state: &AppState,
    action: TransportAction,
) -> Result<Json<MessageResponse>, ApiError> {
    let token = state
        .spotify
        .exchange_token()
        .await
        .map_err(ApiError::token_exchange)?;

    state
        .spotify
        .transport(&token.access_token, action)
        .await
        .map_err(ApiError::upstream)?;

    info!(?action, "Transport command forwarded");

    Ok(Json(MessageResponse {
        message: action.message().to_string(),
    }))
}
