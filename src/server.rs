use axum::{
    Router,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use std::{net::SocketAddr, str::FromStr};

use crate::{api, config, error, info};

pub async fn start_api_server(addr: &str) {
    let secret = config::session_secret();
    if secret.len() < 32 {
        error!("SESSION_SECRET must be at least 32 bytes long");
    }
    let key = Key::derive_from(secret.as_bytes());

    let app = Router::new()
        .route("/", get(api::home))
        .route("/login", get(api::login))
        .route("/logout", get(api::logout))
        .route("/callback", get(api::callback))
        .route("/solve", get(api::solve))
        .route("/next", get(api::next_track))
        .route("/previous", get(api::previous_track))
        .route("/play_pause", get(api::play_pause))
        .route("/seek", post(api::seek))
        .route("/check-song", get(api::check_song))
        .route("/toggle-player-mode", post(api::toggle_player_mode))
        .route("/health", get(api::health))
        .with_state(key);

    let addr = match SocketAddr::from_str(addr) {
        Ok(addr) => addr,
        Err(e) => error!("Failed to parse server address: {}", e),
    };

    info!("Listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
