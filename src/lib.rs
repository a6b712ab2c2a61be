//! spotify-broker library interface
//!
//! Exposes the application state and router for integration testing.

pub mod api;
pub mod config;
pub mod error;
pub mod spotify;

pub use crate::error::ApiError;

use std::sync::Arc;

use crate::spotify::SpotifyApi;

/// Application state shared across HTTP handlers
///
/// Holds only the client seam; there is no mutable state and nothing is
/// shared between requests beyond the client itself.
#[derive(Clone)]
pub struct AppState {
    pub spotify: Arc<dyn SpotifyApi>,
}

impl AppState {
    pub fn new(spotify: Arc<dyn SpotifyApi>) -> Self {
        Self { spotify }
    }
}

pub use crate::api::build_router;
