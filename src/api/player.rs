use std::time::Duration;

use axum::response::{Json, Redirect};
use axum_extra::extract::SignedCookieJar;
use tokio::time::sleep;

use crate::{
    management::Session,
    spotify,
    types::{ActionResponse, SeekRequest},
};

// Give Spotify a moment to apply a transport command before the follow-up
// redirect triggers the next playback read.
const SKIP_SETTLE: Duration = Duration::from_millis(500);
const SEEK_SETTLE: Duration = Duration::from_millis(200);

/// Toggles between play and pause, based on the current playback state.
pub async fn play_pause(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    if let Some(access_token) = super::valid_access_token(&mut session).await {
        let _ = toggle_playback(&access_token).await;
    }

    (session.into_jar(), Redirect::to("/"))
}

/// Skips to the next track. On success the quiz state is dropped so the new
/// track starts as an unsolved riddle.
pub async fn next_track(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    if let Some(access_token) = super::valid_access_token(&mut session).await {
        if spotify::player::next_track(&access_token).await.is_ok() {
            session.clear_quiz_state();
            sleep(SKIP_SETTLE).await;
        }
    }

    (session.into_jar(), Redirect::to("/"))
}

/// Skips back to the previous track; otherwise identical to [`next_track`].
pub async fn previous_track(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    if let Some(access_token) = super::valid_access_token(&mut session).await {
        if spotify::player::previous_track(&access_token).await.is_ok() {
            session.clear_quiz_state();
            sleep(SKIP_SETTLE).await;
        }
    }

    (session.into_jar(), Redirect::to("/"))
}

/// Moves playback to the posted millisecond position.
pub async fn seek(
    jar: SignedCookieJar,
    Json(request): Json<SeekRequest>,
) -> (SignedCookieJar, Json<ActionResponse>) {
    let mut session = Session::new(jar);

    let Some(access_token) = super::valid_access_token(&mut session).await else {
        return (
            session.into_jar(),
            Json(ActionResponse::failed("Not logged in")),
        );
    };

    let Some(position_ms) = request.position_ms else {
        return (
            session.into_jar(),
            Json(ActionResponse::failed("Invalid position")),
        );
    };

    let response = match spotify::player::seek(&access_token, position_ms).await {
        Ok(()) => {
            sleep(SEEK_SETTLE).await;
            ActionResponse::ok()
        }
        Err(e) => ActionResponse::failed(e),
    };

    (session.into_jar(), Json(response))
}

async fn toggle_playback(access_token: &str) -> Result<(), String> {
    let playing = spotify::player::currently_playing(access_token).await?;
    let is_playing = playing.map(|p| p.is_playing).unwrap_or(false);

    if is_playing {
        spotify::player::pause(access_token).await?;
    } else {
        spotify::player::play(access_token).await?;
    }

    sleep(SKIP_SETTLE).await;
    Ok(())
}
