use axum::response::{Html, Json, Redirect};
use axum_extra::extract::SignedCookieJar;

use crate::{
    management::Session,
    pages::{self, QuizView, SolutionView},
    spotify,
    types::{ActionResponse, CheckSongResponse, PlayerModeRequest, QuizState, TrackItem},
    utils, warning,
};

/// The main page.
///
/// Without a session token this renders the login page. Otherwise it reads
/// the account's playback state, advances the quiz state, and renders either
/// the puzzle or the revealed solution. Any failure along the way (nothing
/// playing, expired session, network trouble) resets the puzzle session
/// state and renders the static retry page.
pub async fn home(jar: SignedCookieJar) -> (SignedCookieJar, Html<String>) {
    let mut session = Session::new(jar);

    if session.token().is_none() {
        return (session.into_jar(), Html(pages::login_page()));
    }

    match render_quiz(&mut session).await {
        Ok(page) => (session.into_jar(), Html(page)),
        Err(e) => {
            warning!("Home route falling back to error page: {}", e);
            session.reset_quiz();
            (session.into_jar(), Html(pages::error_page()))
        }
    }
}

/// Reveals the answer for the current track.
pub async fn solve(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    if let Some(mut state) = session.quiz_state() {
        state.is_solved = true;
        session.set_quiz_state(&state);
    }

    (session.into_jar(), Redirect::to("/"))
}

/// Polling endpoint for the client-side track watcher.
///
/// Answers with the id of the currently playing track, or `null` when the
/// visitor is logged out, nothing is playing, or the lookup fails. The page
/// script reloads whenever the id differs from the one it was rendered with.
pub async fn check_song(jar: SignedCookieJar) -> (SignedCookieJar, Json<CheckSongResponse>) {
    let mut session = Session::new(jar);
    let track_id = current_track_id(&mut session).await;
    (session.into_jar(), Json(CheckSongResponse { track_id }))
}

/// Stores the player-mode flag posted by the toggle switch.
pub async fn toggle_player_mode(
    jar: SignedCookieJar,
    Json(request): Json<PlayerModeRequest>,
) -> (SignedCookieJar, Json<ActionResponse>) {
    let mut session = Session::new(jar);
    session.set_player_mode(request.player_mode);
    (session.into_jar(), Json(ActionResponse::ok()))
}

async fn render_quiz(session: &mut Session) -> Result<String, String> {
    let access_token = super::valid_access_token(session)
        .await
        .ok_or("no valid access token")?;

    let playing = spotify::player::currently_playing(&access_token)
        .await?
        .ok_or("no song is currently playing")?;
    let item = playing.item.ok_or("playback state has no track item")?;
    let track_id = item
        .id
        .clone()
        .ok_or("current track has no id (local file?)")?;

    // A different track resets the riddle to unsolved.
    let quiz_state = match session.quiz_state() {
        Some(state) if state.track_id == track_id => state,
        _ => {
            let state = QuizState {
                track_id: track_id.clone(),
                is_solved: false,
            };
            session.set_quiz_state(&state);
            state
        }
    };

    let player_mode = session.player_mode();
    let show_solution = player_mode || quiz_state.is_solved;

    let solution = if show_solution {
        Some(build_solution(&access_token, &item).await?)
    } else {
        None
    };

    let view = QuizView {
        track_id,
        progress_ms: playing.progress_ms.unwrap_or(0),
        duration_ms: item.duration_ms,
        is_playing: playing.is_playing,
        player_mode,
        solution,
    };

    Ok(pages::quiz_page(&view))
}

async fn build_solution(access_token: &str, item: &TrackItem) -> Result<SolutionView, String> {
    let artists = utils::join_artist_names(&item.artists);
    let album = item.album.name.clone();
    let initial_year = utils::release_year(&item.album.release_date)
        .ok_or("album release date has no parseable year")?;
    let album_image_url = item
        .album
        .images
        .first()
        .map(|image| image.url.clone())
        .unwrap_or_default();

    let cleaned_title = utils::clean_track_title(&item.name);
    let query = format!("track:{} artist:{}", cleaned_title, artists);

    // The earlier-release scan is cosmetic. When the search fails the page
    // just shows the playing album's year.
    let candidates = match spotify::search::search_tracks(access_token, &query, 50).await {
        Ok(candidates) => candidates,
        Err(e) => {
            warning!("Original-release search failed: {}", e);
            Vec::new()
        }
    };

    let original = utils::find_original_release(&cleaned_title, initial_year, &album, &candidates);

    Ok(SolutionView {
        title: item.name.clone(),
        artists,
        album,
        album_image_url,
        initial_year,
        cleaned_title,
        original,
    })
}

async fn current_track_id(session: &mut Session) -> Option<String> {
    let access_token = super::valid_access_token(session).await?;
    let playing = spotify::player::currently_playing(&access_token)
        .await
        .ok()??;
    playing.item?.id
}
