use axum::http::{HeaderMap, header::{COOKIE, SET_COOKIE}};
use axum::response::IntoResponse;
use axum_extra::extract::SignedCookieJar;
use axum_extra::extract::cookie::Key;

use songquiz::management::Session;
use songquiz::types::{QuizState, Token};

// Helper function to create a test token
fn create_test_token() -> Token {
    Token {
        access_token: "access_abc123".to_string(),
        refresh_token: "refresh_def456".to_string(),
        scope: "user-read-currently-playing user-modify-playback-state".to_string(),
        expires_in: 3600,
        obtained_at: 1_700_000_000,
    }
}

// Serializes the jar's Set-Cookie headers back into a Cookie request header,
// the way a browser would on the next request, and builds a fresh jar from it.
fn roundtrip(jar: SignedCookieJar, key: Key) -> SignedCookieJar {
    let response = jar.into_response();
    let cookie_header = response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|value| {
            value
                .to_str()
                .expect("set-cookie header must be valid ascii")
                .split(';')
                .next()
                .unwrap()
        })
        .collect::<Vec<_>>()
        .join("; ");

    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, cookie_header.parse().unwrap());
    SignedCookieJar::from_headers(&headers, key)
}

#[test]
fn test_token_survives_round_trip() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_token(&create_test_token());

    let session = Session::new(roundtrip(session.into_jar(), key));
    let token = session.token().expect("token must survive the round trip");
    assert_eq!(token.access_token, "access_abc123");
    assert_eq!(token.refresh_token, "refresh_def456");
    assert_eq!(token.expires_in, 3600);
    assert_eq!(token.obtained_at, 1_700_000_000);
}

#[test]
fn test_quiz_state_survives_round_trip() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_quiz_state(&QuizState {
        track_id: "4u7EnebtmKWzUH433cf5Qv".to_string(),
        is_solved: true,
    });

    let session = Session::new(roundtrip(session.into_jar(), key));
    let state = session.quiz_state().expect("quiz state must survive");
    assert_eq!(state.track_id, "4u7EnebtmKWzUH433cf5Qv");
    assert!(state.is_solved);
}

#[test]
fn test_player_mode_defaults_to_false() {
    let key = Key::generate();
    let session = Session::new(SignedCookieJar::new(key));
    assert!(!session.player_mode());
}

#[test]
fn test_player_mode_round_trip() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_player_mode(true);

    let session = Session::new(roundtrip(session.into_jar(), key));
    assert!(session.player_mode());
}

#[test]
fn test_oauth_state_round_trip() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_oauth_state("random_state_value_1234");

    let session = Session::new(roundtrip(session.into_jar(), key));
    assert_eq!(
        session.oauth_state().as_deref(),
        Some("random_state_value_1234")
    );
}

#[test]
fn test_reset_quiz_keeps_token() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_token(&create_test_token());
    session.set_quiz_state(&QuizState {
        track_id: "track1".to_string(),
        is_solved: true,
    });
    session.set_player_mode(true);

    session.reset_quiz();

    let session = Session::new(roundtrip(session.into_jar(), key));
    assert!(session.token().is_some());
    assert!(session.quiz_state().is_none());
    assert!(!session.player_mode());
}

#[test]
fn test_clear_drops_everything() {
    let key = Key::generate();
    let mut session = Session::new(SignedCookieJar::new(key.clone()));
    session.set_token(&create_test_token());
    session.set_quiz_state(&QuizState {
        track_id: "track1".to_string(),
        is_solved: false,
    });
    session.set_player_mode(true);
    session.set_oauth_state("state");

    session.clear();

    let session = Session::new(roundtrip(session.into_jar(), key));
    assert!(session.token().is_none());
    assert!(session.quiz_state().is_none());
    assert!(!session.player_mode());
    assert!(session.oauth_state().is_none());
}

#[test]
fn test_unsigned_cookie_reads_as_absent() {
    let key = Key::generate();

    // A value written without the signing key must not verify.
    let mut headers = HeaderMap::new();
    headers.insert(COOKIE, "songquiz_player_mode=true".parse().unwrap());
    let session = Session::new(SignedCookieJar::from_headers(&headers, key));

    assert!(!session.player_mode());
}

#[test]
fn test_foreign_key_reads_as_absent() {
    let signing_key = Key::generate();
    let other_key = Key::generate();

    let mut session = Session::new(SignedCookieJar::new(signing_key));
    session.set_token(&create_test_token());

    // Same cookies, different verification key: the token must vanish.
    let session = Session::new(roundtrip(session.into_jar(), other_key));
    assert!(session.token().is_none());
}
