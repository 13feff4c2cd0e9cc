use std::time::Duration;

use reqwest::{Client, StatusCode, header::CONTENT_LENGTH};
use tokio::time::sleep;

use crate::{config, types::CurrentlyPlaying};

/// Retrieves the playback state of the connected account.
///
/// Calls Spotify's `/me/player/currently-playing` endpoint. A `204 No
/// Content` answer means nothing is playing and maps to `Ok(None)`; note
/// that even a `200` payload can carry no `item` (local files, ads), which
/// callers must handle themselves.
///
/// # Rate Limiting
///
/// The browser polls this endpoint every few seconds, so `429 Too Many
/// Requests` answers are expected under aggressive polling. Short
/// `Retry-After` delays are waited out and the request retried; anything
/// longer becomes an error so the handler can fall back to its error path
/// instead of stalling the request.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
pub async fn currently_playing(token: &str) -> Result<Option<CurrentlyPlaying>, String> {
    let api_url = format!(
        "{uri}/me/player/currently-playing",
        uri = &config::spotify_apiurl()
    );

    loop {
        let client = Client::new();
        let response = client
            .get(&api_url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|value| value.to_str().ok())
                .and_then(|value| value.parse::<u64>().ok())
                .unwrap_or(1);
            if retry_after <= 5 {
                sleep(Duration::from_secs(retry_after)).await;
                continue;
            }
            return Err(format!("rate limited for {} seconds", retry_after));
        }

        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let response = response.error_for_status().map_err(|e| e.to_string())?;
        let playing = response
            .json::<CurrentlyPlaying>()
            .await
            .map_err(|e| e.to_string())?;
        return Ok(Some(playing));
    }
}

/// Moves playback to the given position in the current track.
pub async fn seek(token: &str, position_ms: u64) -> Result<(), String> {
    let api_url = format!(
        "{uri}/me/player/seek?position_ms={position_ms}",
        uri = &config::spotify_apiurl(),
        position_ms = position_ms
    );
    send_command(Client::new().put(&api_url).bearer_auth(token)).await
}

/// Skips to the next track in the account's queue.
pub async fn next_track(token: &str) -> Result<(), String> {
    let api_url = format!("{uri}/me/player/next", uri = &config::spotify_apiurl());
    send_command(Client::new().post(&api_url).bearer_auth(token)).await
}

/// Skips back to the previous track.
pub async fn previous_track(token: &str) -> Result<(), String> {
    let api_url = format!("{uri}/me/player/previous", uri = &config::spotify_apiurl());
    send_command(Client::new().post(&api_url).bearer_auth(token)).await
}

/// Pauses playback on the active device.
pub async fn pause(token: &str) -> Result<(), String> {
    let api_url = format!("{uri}/me/player/pause", uri = &config::spotify_apiurl());
    send_command(Client::new().put(&api_url).bearer_auth(token)).await
}

/// Resumes playback on the active device.
pub async fn play(token: &str) -> Result<(), String> {
    let api_url = format!("{uri}/me/player/play", uri = &config::spotify_apiurl());
    send_command(Client::new().put(&api_url).bearer_auth(token)).await
}

// Transport endpoints take no request body; Spotify still insists on a
// Content-Length header for the bodyless PUT/POST calls.
async fn send_command(request: reqwest::RequestBuilder) -> Result<(), String> {
    let response = request
        .header(CONTENT_LENGTH, 0)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    response
        .error_for_status()
        .map(|_| ())
        .map_err(|e| e.to_string())
}
