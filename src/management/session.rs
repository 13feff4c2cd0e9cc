use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Serialize, de::DeserializeOwned};

use crate::types::{QuizState, Token};

const TOKEN_COOKIE: &str = "songquiz_token";
const QUIZ_COOKIE: &str = "songquiz_quiz";
const PLAYER_MODE_COOKIE: &str = "songquiz_player_mode";
const OAUTH_STATE_COOKIE: &str = "songquiz_oauth_state";

/// Per-visitor state, persisted as individually signed session cookies.
///
/// Wraps the request's [`SignedCookieJar`]; every mutation is recorded in the
/// jar, and the jar must travel back in the response for the change to reach
/// the browser (see [`Session::into_jar`]). Cookies that fail signature
/// verification or JSON parsing read as absent.
pub struct Session {
    jar: SignedCookieJar,
}

impl Session {
    pub fn new(jar: SignedCookieJar) -> Self {
        Session { jar }
    }

    /// Consumes the session and hands the jar back for the response.
    pub fn into_jar(self) -> SignedCookieJar {
        self.jar
    }

    pub fn token(&self) -> Option<Token> {
        self.read_json(TOKEN_COOKIE)
    }

    pub fn set_token(&mut self, token: &Token) {
        self.write_json(TOKEN_COOKIE, token);
    }

    pub fn quiz_state(&self) -> Option<QuizState> {
        self.read_json(QUIZ_COOKIE)
    }

    pub fn set_quiz_state(&mut self, state: &QuizState) {
        self.write_json(QUIZ_COOKIE, state);
    }

    pub fn clear_quiz_state(&mut self) {
        self.remove(QUIZ_COOKIE);
    }

    pub fn player_mode(&self) -> bool {
        self.read_json(PLAYER_MODE_COOKIE).unwrap_or(false)
    }

    pub fn set_player_mode(&mut self, enabled: bool) {
        self.write_json(PLAYER_MODE_COOKIE, &enabled);
    }

    pub fn oauth_state(&self) -> Option<String> {
        self.read_json(OAUTH_STATE_COOKIE)
    }

    pub fn set_oauth_state(&mut self, state: &str) {
        self.write_json(OAUTH_STATE_COOKIE, state);
    }

    pub fn clear_oauth_state(&mut self) {
        self.remove(OAUTH_STATE_COOKIE);
    }

    /// Drops puzzle progress and player mode, keeping the login. This is the
    /// uniform failure policy of the home route.
    pub fn reset_quiz(&mut self) {
        self.remove(QUIZ_COOKIE);
        self.remove(PLAYER_MODE_COOKIE);
    }

    /// Drops everything, including the token. Used by logout.
    pub fn clear(&mut self) {
        for name in [
            TOKEN_COOKIE,
            QUIZ_COOKIE,
            PLAYER_MODE_COOKIE,
            OAUTH_STATE_COOKIE,
        ] {
            self.remove(name);
        }
    }

    fn read_json<T: DeserializeOwned>(&self, name: &str) -> Option<T> {
        let cookie = self.jar.get(name)?;
        serde_json::from_str(cookie.value()).ok()
    }

    fn write_json<T: Serialize + ?Sized>(&mut self, name: &'static str, value: &T) {
        let Ok(json) = serde_json::to_string(value) else {
            return;
        };
        let cookie = Cookie::build((name, json))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        self.jar = self.jar.clone().add(cookie);
    }

    fn remove(&mut self, name: &'static str) {
        let removal = Cookie::build((name, "")).path("/").build();
        self.jar = self.jar.clone().remove(removal);
    }
}
