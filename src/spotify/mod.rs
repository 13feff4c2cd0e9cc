//! # Spotify Integration Module
//!
//! This module provides the interface to the Spotify Web API that the quiz
//! needs: the OAuth 2.0 authorization-code flow, reading the currently
//! playing track, issuing playback commands, and searching the catalog for
//! earlier releases of a song. It handles all HTTP communication, bearer
//! authentication, and rate-limit responses, presenting a small async
//! function per remote operation.
//!
//! ## Core Modules
//!
//! - [`auth`] - Authorization-code flow: building the authorize URL,
//!   exchanging callback codes for tokens, and refreshing expired tokens.
//!   The client secret is sent as an HTTP Basic header on the token
//!   endpoint only.
//! - [`player`] - Playback state and transport: currently-playing lookup
//!   (with `Retry-After` handling, since the browser polls it), seek,
//!   next/previous, pause and play.
//! - [`search`] - Track search, used by the original-release heuristic.
//!
//! ## Error Handling
//!
//! Every function returns `Result<_, String>`; network failures, non-success
//! statuses and malformed payloads are all flattened into a message. Callers
//! at the route boundary treat any error uniformly (reset the quiz session
//! and show the retry page, or swallow and redirect for transport actions),
//! so a finer-grained taxonomy would go unused.

pub mod auth;
pub mod player;
pub mod search;
