use chrono::Utc;

use crate::{spotify, types::Token};

// Refresh when less than a minute of validity remains.
const REFRESH_MARGIN_SECS: u64 = 60;

pub struct TokenManager {
    token: Token,
    refreshed: bool,
}

impl TokenManager {
    pub fn new(token: Token) -> Self {
        TokenManager {
            token,
            refreshed: false,
        }
    }

    pub async fn get_valid_token(&mut self) -> Result<String, String> {
        if self.is_expired() {
            let refreshed = spotify::auth::refresh_token(&self.token).await?;
            self.token = refreshed;
            self.refreshed = true;
        }

        Ok(self.token.access_token.clone())
    }

    /// True when `get_valid_token` replaced the token; the caller then has to
    /// write the new token back into the session cookie.
    pub fn was_refreshed(&self) -> bool {
        self.refreshed
    }

    pub fn current_token(&self) -> &Token {
        &self.token
    }

    fn is_expired(&self) -> bool {
        let now = Utc::now().timestamp() as u64;
        self.token.obtained_at + self.token.expires_in <= now + REFRESH_MARGIN_SECS
    }
}
