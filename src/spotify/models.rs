//! Wire models for the Spotify Web API
//!
//! Deserialization keeps only the fields the broker consumes; everything
//! else in the remote payloads is dropped.

use serde::{Deserialize, Serialize};

/// Token-endpoint response
///
/// Lives for a single request; never cached or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
}

/// Search response, filtered to track results
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<TrackPage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackPage {
    #[serde(default)]
    pub items: Vec<TrackHit>,
}

/// One search result
#[derive(Debug, Clone, Deserialize)]
pub struct TrackHit {
    pub uri: String,
    pub name: String,
}

/// Currently-playing response body
#[derive(Debug, Clone, Deserialize)]
pub struct PlaybackState {
    #[serde(default)]
    pub is_playing: bool,
    pub item: Option<TrackItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrackItem {
    pub name: String,
    #[serde(default)]
    pub artists: Vec<Artist>,
    pub album: Option<Album>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Artist {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Album {
    pub name: String,
}

/// Flattened now-playing reply for local callers
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub is_playing: bool,
}

impl TrackSummary {
    /// Build the reply from a remote track item.
    ///
    /// Artist names are joined with `", "` in the order the remote reports
    /// them.
    pub fn from_item(item: TrackItem, is_playing: bool) -> Self {
        let artist_name = item
            .artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            track_name: item.name,
            artist_name,
            album_name: item.album.map(|a| a.name).unwrap_or_default(),
            is_playing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artists_join_in_original_order() {
        let item = TrackItem {
            name: "Duet".to_string(),
            artists: vec![
                Artist { name: "First Artist".to_string() },
                Artist { name: "Second Artist".to_string() },
            ],
            album: Some(Album { name: "Album".to_string() }),
        };

        let summary = TrackSummary::from_item(item, true);
        assert_eq!(summary.artist_name, "First Artist, Second Artist");
        assert_eq!(summary.track_name, "Duet");
        assert_eq!(summary.album_name, "Album");
        assert!(summary.is_playing);
    }

    #[test]
    fn missing_album_becomes_empty_name() {
        let item = TrackItem {
            name: "Single".to_string(),
            artists: vec![Artist { name: "Solo".to_string() }],
            album: None,
        };

        let summary = TrackSummary::from_item(item, false);
        assert_eq!(summary.album_name, "");
    }

    #[test]
    fn currently_playing_payload_parses() {
        let body = r#"{
            "is_playing": true,
            "item": {
                "name": "Song",
                "artists": [{"name": "A"}, {"name": "B"}],
                "album": {"name": "Record"}
            }
        }"#;

        let state: PlaybackState = serde_json::from_str(body).expect("should parse");
        assert!(state.is_playing);
        let item = state.item.expect("item should be present");
        assert_eq!(item.artists.len(), 2);
    }

    #[test]
    fn search_payload_with_no_items_yields_empty_page() {
        let body = r#"{"tracks": {"items": []}}"#;
        let response: SearchResponse = serde_json::from_str(body).expect("should parse");
        assert!(response.tracks.expect("page").items.is_empty());
    }

    #[test]
    fn token_response_serializes_without_absent_fields() {
        let token = TokenResponse {
            access_token: "T".to_string(),
            token_type: Some("Bearer".to_string()),
            scope: None,
            expires_in: Some(3600),
            refresh_token: None,
        };

        let value = serde_json::to_value(&token).expect("should serialize");
        assert_eq!(value["access_token"], "T");
        assert!(value.get("scope").is_none());
        assert!(value.get("refresh_token").is_none());
    }
}
