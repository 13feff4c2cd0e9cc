//! # API Module
//!
//! This module implements the browser-facing HTTP routes of the song quiz.
//! Every handler is a thin orchestration step: read the visitor's signed
//! session cookies, talk to Spotify, write the session back, and answer with
//! HTML, JSON, or a redirect.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Starts the OAuth authorization-code flow
//! - [`callback`] - Receives the authorization code and establishes the session
//! - [`logout`] - Drops the whole session
//!
//! ### Quiz
//!
//! - [`home`] - The main page: puzzle or revealed solution
//! - [`solve`] - Marks the current riddle as solved
//! - [`check_song`] - Polling endpoint for the client-side track watcher
//! - [`toggle_player_mode`] - Switches the always-show-answer mode
//!
//! ### Transport
//!
//! - [`play_pause`], [`next_track`], [`previous_track`], [`seek`] -
//!   Best-effort playback control, errors swallowed per the uniform policy
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version information
//!
//! ## Session Handling
//!
//! Handlers receive the request's `SignedCookieJar`, wrap it in a
//! [`Session`](crate::management::Session), and must return the jar as part
//! of the response tuple, otherwise cookie changes never reach the browser.

mod auth;
mod health;
mod player;
mod quiz;

pub use auth::{callback, login, logout};
pub use health::health;
pub use player::{next_track, play_pause, previous_track, seek};
pub use quiz::{check_song, home, solve, toggle_player_mode};

use crate::{
    management::{Session, TokenManager},
    warning,
};

// Shared login gate: returns a usable access token, refreshing it through
// the session when needed. None means the caller should treat the visitor
// as logged out.
pub(crate) async fn valid_access_token(session: &mut Session) -> Option<String> {
    let token = session.token()?;
    let mut manager = TokenManager::new(token);
    match manager.get_valid_token().await {
        Ok(access_token) => {
            if manager.was_refreshed() {
                session.set_token(manager.current_token());
            }
            Some(access_token)
        }
        Err(e) => {
            warning!("Token refresh failed: {}", e);
            None
        }
    }
}
