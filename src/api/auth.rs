use std::collections::HashMap;

use axum::{extract::Query, response::Redirect};
use axum_extra::extract::SignedCookieJar;

use crate::{management::Session, spotify, success, utils, warning};

/// Starts the OAuth flow by redirecting the browser to Spotify.
///
/// A fresh random `state` value is written into the session before the
/// redirect; the callback handler refuses answers that do not carry it back.
pub async fn login(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    let state = utils::generate_state_token();
    session.set_oauth_state(&state);

    let auth_url = spotify::auth::authorize_url(&state);
    (session.into_jar(), Redirect::to(&auth_url))
}

/// Handles the redirect back from Spotify's authorize screen.
///
/// Verifies the `state` parameter against the session, exchanges the
/// authorization code for a token, and stores the token in the session.
/// Every outcome ends in a redirect to the home page, which then renders
/// either the quiz (token present) or the login page (exchange failed).
pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    jar: SignedCookieJar,
) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);

    let expected_state = session.oauth_state();
    session.clear_oauth_state();

    let state_ok = match (params.get("state"), expected_state.as_deref()) {
        (Some(got), Some(expected)) => got.as_str() == expected,
        _ => false,
    };
    if !state_ok {
        warning!("OAuth callback with missing or foreign state parameter");
        return (session.into_jar(), Redirect::to("/"));
    }

    let Some(code) = params.get("code") else {
        warning!(
            "OAuth callback without authorization code (error: {:?})",
            params.get("error")
        );
        return (session.into_jar(), Redirect::to("/"));
    };

    match spotify::auth::exchange_code(code).await {
        Ok(token) => {
            session.set_token(&token);
            success!("Authentication successful, session established");
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
        }
    }

    (session.into_jar(), Redirect::to("/"))
}

/// Logs the visitor out by dropping all session cookies.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Redirect) {
    let mut session = Session::new(jar);
    session.clear();
    (session.into_jar(), Redirect::to("/"))
}
