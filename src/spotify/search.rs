use reqwest::Client;

use crate::{
    config,
    types::{SearchResponse, TrackItem},
};

/// Searches the Spotify catalog for tracks.
///
/// Issues a `/search` request of type `track` and returns the raw result
/// items. The quiz uses field-qualified queries (`track:<title>
/// artist:<names>`) to look for earlier releases of the song that is
/// currently playing; result filtering happens on the caller's side.
///
/// # Arguments
///
/// * `token` - Valid access token for Spotify API authentication
/// * `query` - Search query, may use Spotify's field filters
/// * `limit` - Maximum number of results (1-50)
pub async fn search_tracks(token: &str, query: &str, limit: u32) -> Result<Vec<TrackItem>, String> {
    let api_url = format!("{uri}/search", uri = &config::spotify_apiurl());
    let limit = limit.to_string();

    let client = Client::new();
    let response = client
        .get(&api_url)
        .query(&[("q", query), ("type", "track"), ("limit", limit.as_str())])
        .bearer_auth(token)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let response = response.error_for_status().map_err(|e| e.to_string())?;
    let results = response
        .json::<SearchResponse>()
        .await
        .map_err(|e| e.to_string())?;

    Ok(results.tracks.items)
}
