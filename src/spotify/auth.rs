use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::Utc;
use reqwest::Client;
use serde_json::Value;

use crate::{config, types::Token};

/// Builds the Spotify authorization URL the browser is redirected to.
///
/// The URL carries the client id, the registered redirect URI, the requested
/// scopes and the caller-provided `state` value. The `state` must be stored
/// in the visitor's session before redirecting so the callback handler can
/// verify that the answer belongs to a flow this server started.
///
/// # Arguments
///
/// * `state` - Random single-use value bound to the visitor's session
///
/// # Example
///
/// ```
/// let state = utils::generate_state_token();
/// let url = authorize_url(&state);
/// // redirect the browser to `url`
/// ```
pub fn authorize_url(state: &str) -> String {
    format!(
        "{auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&scope={scope}&state={state}",
        auth_url = &config::spotify_apiauth_url(),
        client_id = &config::spotify_client_id(),
        redirect_uri = urlencoding::encode(&config::spotify_redirect_uri()),
        scope = urlencoding::encode(&config::spotify_scope()),
        state = state,
    )
}

/// Exchanges an authorization code for an access token.
///
/// Completes the OAuth 2.0 authorization-code flow by posting the code
/// received on the callback route to Spotify's token endpoint, authenticated
/// with the client id and secret as an HTTP Basic header.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Complete token with access token, refresh token, and metadata
/// - `Err(String)` - Network error, API error, or a response without a token
///
/// # Error Conditions
///
/// Common failures include an expired or already-used authorization code, a
/// redirect URI that differs from the registered one, and plain network
/// errors. The authorization code is single-use and short-lived, so the
/// exchange happens immediately inside the callback handler.
pub async fn exchange_code(code: &str) -> Result<Token, String> {
    let redirect_uri = config::spotify_redirect_uri();

    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .header("Authorization", basic_auth_header())
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;
    token_from_response(&json, None)
}

/// Refreshes an expired access token using the stored refresh token.
///
/// Exchanges the refresh token for a new access token so the session keeps
/// working without sending the user back through the authorize screen.
/// Spotify may rotate the refresh token; when the response omits it, the
/// previous refresh token is carried over into the new [`Token`].
///
/// # Arguments
///
/// * `token` - The current session token whose refresh token is still valid
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - New token with fresh access token and updated expiration
/// - `Err(String)` - Error message describing the failure
pub async fn refresh_token(token: &Token) -> Result<Token, String> {
    let client = Client::new();
    let res = client
        .post(&config::spotify_apitoken_url())
        .header("Authorization", basic_auth_header())
        .form(&[
            ("grant_type", "refresh_token"),
            ("refresh_token", token.refresh_token.as_str()),
        ])
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let json: Value = res.json().await.map_err(|e| e.to_string())?;
    token_from_response(&json, Some(token.refresh_token.as_str()))
}

fn basic_auth_header() -> String {
    let credentials = format!(
        "{}:{}",
        config::spotify_client_id(),
        config::spotify_client_secret()
    );
    format!("Basic {}", STANDARD.encode(credentials))
}

fn token_from_response(json: &Value, previous_refresh: Option<&str>) -> Result<Token, String> {
    let Some(access_token) = json["access_token"].as_str() else {
        return Err(format!("token endpoint answered without a token: {}", json));
    };

    Ok(Token {
        access_token: access_token.to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .or(previous_refresh)
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: Utc::now().timestamp() as u64,
    })
}
