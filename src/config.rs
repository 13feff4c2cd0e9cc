//! Configuration management for the song quiz server.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. It provides a centralized way to
//! manage application configuration including Spotify API credentials, the
//! cookie signing secret, server settings, and other runtime parameters.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use dotenv;
use std::{env, path::PathBuf};

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the necessary directory structure if it doesn't exist and loads
/// environment variables from a `.env` file located in the platform-specific
/// local data directory under `songquiz/.env`. This allows users to store
/// configuration securely without hardcoding sensitive values.
///
/// When no file exists at that location, a `.env` in the current working
/// directory is tried instead, and finally the process environment alone is
/// used. A missing file is not an error; the required variables just have to
/// come from somewhere before the server starts.
///
/// # Directory Structure
///
/// The function looks for the `.env` file in:
/// - Linux: `~/.local/share/songquiz/.env`
/// - macOS: `~/Library/Application Support/songquiz/.env`
/// - Windows: `%LOCALAPPDATA%/songquiz/.env`
///
/// # Returns
///
/// Returns `Ok(())` unless the parent directory cannot be created.
///
/// # Example
///
/// ```
/// use songquiz::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("songquiz/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if dotenv::from_path(&path).is_err() {
        // No data-dir config; fall back to a .env in the working directory.
        let _ = dotenv::dotenv();
    }
    Ok(())
}

/// Returns the address the HTTP server binds to.
///
/// Retrieves the `SERVER_ADDRESS` environment variable. Defaults to
/// `127.0.0.1:8888`, which matches the redirect URI most people register
/// for a self-hosted Spotify app.
///
/// # Example
///
/// ```
/// let addr = server_addr(); // e.g., "127.0.0.1:8888"
/// ```
pub fn server_addr() -> String {
    env::var("SERVER_ADDRESS").unwrap_or_else(|_| "127.0.0.1:8888".to_string())
}

/// Returns the secret used to sign session cookies.
///
/// Retrieves the `SESSION_SECRET` environment variable. The signing key is
/// derived from this value, so it must be at least 32 bytes long and should
/// be random. Changing it invalidates all existing sessions.
///
/// # Panics
///
/// Panics if the `SESSION_SECRET` environment variable is not set.
pub fn session_secret() -> String {
    env::var("SESSION_SECRET").expect("SESSION_SECRET must be set")
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable which
/// contains the client ID obtained when registering the application with
/// Spotify's developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_ID").expect("SPOTIFY_API_AUTH_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable which
/// contains the client secret obtained when registering the application with
/// Spotify's developer platform. The secret is sent to the token endpoint as
/// an HTTP Basic authorization header and never leaves the server otherwise.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_AUTH_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_API_AUTH_CLIENT_SECRET").expect("SPOTIFY_API_AUTH_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_API_REDIRECT_URI` environment variable which
/// specifies the callback URL that Spotify should redirect to after user
/// authorization. This must match the redirect URI registered in the Spotify
/// application settings and must point at this server's `/callback` route.
///
/// # Panics
///
/// Panics if the `SPOTIFY_API_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_API_REDIRECT_URI").expect("SPOTIFY_API_REDIRECT_URI must be set")
}

/// Returns the Spotify API scope permissions.
///
/// Retrieves the `SPOTIFY_API_AUTH_SCOPE` environment variable. Defaults to
/// the two scopes the quiz needs: reading the currently playing track and
/// controlling playback.
pub fn spotify_scope() -> String {
    env::var("SPOTIFY_API_AUTH_SCOPE")
        .unwrap_or_else(|_| "user-read-currently-playing user-modify-playback-state".to_string())
}

/// Returns the Spotify OAuth authorization URL.
///
/// Retrieves the `SPOTIFY_API_AUTH_URL` environment variable, defaulting to
/// the public accounts endpoint. This is where users are redirected to grant
/// permissions to the application.
pub fn spotify_apiauth_url() -> String {
    env::var("SPOTIFY_API_AUTH_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/authorize".to_string())
}

/// Returns the Spotify OAuth token exchange URL.
///
/// Retrieves the `SPOTIFY_API_TOKEN_URL` environment variable, defaulting to
/// the public accounts endpoint. Used for exchanging authorization codes and
/// refresh tokens for access tokens.
pub fn spotify_apitoken_url() -> String {
    env::var("SPOTIFY_API_TOKEN_URL")
        .unwrap_or_else(|_| "https://accounts.spotify.com/api/token".to_string())
}

/// Returns the Spotify Web API base URL.
///
/// Retrieves the `SPOTIFY_API_URL` environment variable, defaulting to the
/// public API endpoint. This is used for all API operations after
/// authentication.
pub fn spotify_apiurl() -> String {
    env::var("SPOTIFY_API_URL").unwrap_or_else(|_| "https://api.spotify.com/v1".to_string())
}
