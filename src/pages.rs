//! Server-rendered HTML pages.
//!
//! All pages are built as plain strings from constant templates; there is no
//! template engine. Dynamic values are spliced in with `str::replace` on
//! named `{slot}` markers, and everything user- or catalog-controlled goes
//! through [`escape_html`] first. The visual tuning knobs live in one block
//! of constants so the look can be adjusted without touching the markup.

use crate::utils::{OriginalRelease, escape_html};

const HIGHLIGHT_COLOR: &str = "#C06EF3";
const BUTTON_HOVER_COLOR: &str = "#983BD2";
const WAVE_ANIMATION_SPEED: u32 = 50;
const POLLING_INTERVAL_SECONDS: u32 = 3;
const ARROW_SIZE: &str = "60px";
const ARROW_THICKNESS: u32 = 4;
const PROGRESS_BAR_THICKNESS: u32 = 10;
const PROGRESS_BAR_HOVER_INCREASE_PX: u32 = 3;
const ALBUM_ART_HOVER_SCALE: &str = "1.03";
const ARROW_HOVER_SCALE: &str = "1.15";
const BUTTON_HOVER_SCALE: &str = "1.05";

/// Everything the quiz page needs to render one playback snapshot.
pub struct QuizView {
    pub track_id: String,
    pub progress_ms: u64,
    pub duration_ms: u64,
    pub is_playing: bool,
    pub player_mode: bool,
    /// `None` renders the puzzle; `Some` renders the revealed answer.
    pub solution: Option<SolutionView>,
}

pub struct SolutionView {
    pub title: String,
    pub artists: String,
    pub album: String,
    pub album_image_url: String,
    pub initial_year: i32,
    pub cleaned_title: String,
    pub original: OriginalRelease,
}

impl SolutionView {
    // The "original version" box appears when the scan found something
    // strictly older, or when cleaning changed the title at all.
    fn has_origin_story(&self) -> bool {
        self.original.year < self.initial_year || self.cleaned_title != self.title
    }
}

pub fn login_page() -> String {
    LOGIN_PAGE
        .replace("{highlight_color}", HIGHLIGHT_COLOR)
        .replace("{button_hover_color}", BUTTON_HOVER_COLOR)
}

pub fn error_page() -> String {
    ERROR_PAGE
        .replace("{highlight_color}", HIGHLIGHT_COLOR)
        .replace("{button_hover_color}", BUTTON_HOVER_COLOR)
}

pub fn quiz_page(view: &QuizView) -> String {
    let (title, artist, year_question, info_section, image, button_link, button_text) =
        match &view.solution {
            None => (
                "Which song is this?".to_string(),
                "Who is the artist?".to_string(),
                r#"<h3 class="year-question">From which year?</h3>"#.to_string(),
                String::new(),
                PLACEHOLDER_ART.to_string(),
                "/solve",
                "Reveal",
            ),
            Some(solution) => (
                escape_html(&solution.title),
                escape_html(&solution.artists),
                String::new(),
                info_section_html(solution),
                format!(
                    r#"<img class="album-art" src="{src}" alt="Album cover">"#,
                    src = escape_html(&solution.album_image_url)
                ),
                "/next",
                "Next song",
            ),
        };

    // JSON-encoding the id yields a correctly quoted and escaped JS literal.
    let track_id_js =
        serde_json::to_string(&view.track_id).unwrap_or_else(|_| "null".to_string());

    QUIZ_PAGE
        .replace("{highlight_color}", HIGHLIGHT_COLOR)
        .replace("{button_hover_color}", BUTTON_HOVER_COLOR)
        .replace("{album_art_hover_scale}", ALBUM_ART_HOVER_SCALE)
        .replace("{arrow_size}", ARROW_SIZE)
        .replace("{arrow_thickness}", &ARROW_THICKNESS.to_string())
        .replace("{arrow_hover_scale}", ARROW_HOVER_SCALE)
        .replace(
            "{progress_bar_thickness}",
            &PROGRESS_BAR_THICKNESS.to_string(),
        )
        .replace(
            "{progress_bar_hover_thickness}",
            &(PROGRESS_BAR_THICKNESS + PROGRESS_BAR_HOVER_INCREASE_PX).to_string(),
        )
        .replace("{button_hover_scale}", BUTTON_HOVER_SCALE)
        .replace("{title}", &title)
        .replace("{artist}", &artist)
        .replace("{year_question}", &year_question)
        .replace("{info_section}", &info_section)
        .replace("{image}", &image)
        .replace("{button_link}", button_link)
        .replace("{button_text}", button_text)
        .replace(
            "{player_mode_checked}",
            if view.player_mode { "checked" } else { "" },
        )
        .replace("{track_id_js}", &track_id_js)
        .replace(
            "{polling_ms}",
            &(POLLING_INTERVAL_SECONDS * 1000).to_string(),
        )
        .replace("{progress_ms}", &view.progress_ms.to_string())
        .replace("{duration_ms}", &view.duration_ms.to_string())
        .replace("{is_playing}", if view.is_playing { "true" } else { "false" })
        .replace("{wave_speed}", &WAVE_ANIMATION_SPEED.to_string())
}

fn info_section_html(solution: &SolutionView) -> String {
    let mut prominent_year = solution.initial_year;
    let mut initial_year_line = String::new();
    let mut origin_box = String::new();

    if solution.has_origin_story() {
        prominent_year = solution.original.year;
        initial_year_line = format!(
            "<p><strong>Release year of this version:</strong> {year}</p>",
            year = solution.initial_year
        );
        origin_box = format!(
            r#"<div class="info-box"><h3>Original version</h3><p><strong>Title used for search:</strong> {cleaned}</p><p><strong>Original album:</strong> {album}</p></div>"#,
            cleaned = escape_html(&solution.cleaned_title),
            album = escape_html(&solution.original.album),
        );
    }

    format!(
        r#"
        <div class="info-section">
            <hr class="info-divider">
            <div class="info-box">
                <p><strong>Album:</strong> {album}</p>
                {initial_year_line}
            </div>
            {origin_box}
            <p class="prominent-year">{prominent_year}</p>
        </div>
        "#,
        album = escape_html(&solution.album),
        initial_year_line = initial_year_line,
        origin_box = origin_box,
        prominent_year = prominent_year,
    )
}

const PLACEHOLDER_ART: &str = r##"
<div class="placeholder-quiz">
    <svg class="quiz-icon" xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
        <circle cx="12" cy="12" r="10"></circle>
        <path d="M9.09 9a3 3 0 0 1 5.83 1c0 2-3 3-3 3"></path>
        <line x1="12" y1="17" x2="12.01" y2="17"></line>
    </svg>
</div>
"##;

const LOGIN_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Login</title>
<style>
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        background-color: #121212;
        color: #B3B3B3;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: flex-start;
        min-height: 100vh;
        margin: 0;
        text-align: center;
        padding-top: 5vh;
        padding-bottom: 5vh;
    }
    .container {
        width: calc(100% - 2rem);
        max-width: 600px;
        padding: 3rem;
        border-radius: 12px;
        background-color: #1a1a1a;
        box-shadow: 0 4px 15px rgba(0, 0, 0, 0.5);
    }
    h1 {
        color: #FFFFFF;
        font-size: clamp(1.5rem, 6vw, 2.5rem);
        margin-bottom: 2rem;
    }
    .button {
        padding: 12px 24px;
        background-color: {highlight_color};
        color: white;
        text-decoration: none;
        border-radius: 50px;
        font-weight: bold;
        transition: background-color 0.3s, transform 0.3s;
        display: inline-block;
    }
    .button:hover {
        background-color: {button_hover_color};
        transform: scale(1.05);
    }
</style>
</head>
<body>
<div class="container">
    <h1>Spotify Song Quiz</h1>
    <a href="/login" class="button">Sign in with Spotify</a>
</div>
</body>
</html>
"##;

const ERROR_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Error</title>
<style>
    body {
        font-family: -apple-system, sans-serif;
        background-color: #121212;
        color: #b3b3b3;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: center;
        min-height: 100vh;
        margin: 0;
        text-align: center;
        padding: 1rem;
    }
    .container {
        width: calc(100% - 2rem);
        max-width: 600px;
        padding: 2.5rem;
        border-radius: 12px;
        background-color: #1a1a1a;
        box-shadow: 0 4px 15px rgba(0, 0, 0, 0.5);
    }
    h1 { color: #fff; margin-bottom: 1rem; }
    p { margin: 1rem 0; line-height: 1.6; }
    .button {
        padding: 12px 24px;
        background-color: {highlight_color};
        color: #fff;
        text-decoration: none;
        border-radius: 50px;
        font-weight: 700;
        margin-top: 20px;
        display: inline-block;
        transition: background-color .3s, transform .3s ease;
    }
    .button:hover { background-color: {button_hover_color}; transform: scale(1.05); }
</style>
</head>
<body>
<div class="container">
    <h1>Error or no active song</h1>
    <p>Maybe a local file is playing, or nothing is active at all. Make sure a
    song is playing on Spotify, then try again.</p>
    <a href="/" class="button">Refresh / sign in again</a>
</div>
</body>
</html>
"##;

const QUIZ_PAGE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Spotify Song Quiz</title>
<style>
    * { box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
        background-color: #121212;
        color: #B3B3B3;
        display: flex;
        flex-direction: column;
        align-items: center;
        justify-content: flex-start;
        min-height: 100vh;
        margin: 0;
        text-align: center;
        padding-top: 5vh;
        padding-bottom: 5vh;
    }
    .container {
        width: calc(100% - 2rem);
        max-width: 600px;
        padding: 2rem;
        border-radius: 12px;
        background-color: #1a1a1a;
        box-shadow: 0 4px 15px rgba(0, 0, 0, 0.5);
    }
    .album-art-container {
        display: flex;
        align-items: center;
        justify-content: center;
        gap: 20px;
        width: 100%;
        max-width: 450px;
        margin: 0 auto 1.5rem;
    }
    .album-art-link {
        flex: 1 1 0;
        min-width: 0;
        display: flex;
        justify-content: center;
        transition: transform 0.3s ease;
    }
    .album-art-link:hover { transform: scale({album_art_hover_scale}); }
    .album-art, .placeholder-quiz {
        width: 100%;
        max-width: 300px;
        height: auto;
        aspect-ratio: 1 / 1;
        border-radius: 8px;
        box-shadow: 0 4px 10px rgba(0, 0, 0, 0.3);
    }
    .placeholder-quiz {
        display: flex;
        align-items: center;
        justify-content: center;
        background-color: #282828;
    }
    .quiz-icon {
        width: 60%;
        height: auto;
        stroke: {highlight_color};
        transition: stroke 0.2s ease-in-out;
    }
    .album-art-link:hover .quiz-icon { stroke: {button_hover_color}; }
    .control-arrow svg {
        width: {arrow_size};
        height: {arrow_size};
        stroke: {highlight_color};
        stroke-width: {arrow_thickness};
        transition: transform 0.3s ease, stroke 0.3s ease;
    }
    .control-arrow:hover svg {
        stroke: {button_hover_color};
        transform: scale({arrow_hover_scale});
    }
    h1 {
        color: #FFFFFF;
        font-size: clamp(1.5rem, 6vw, 2.5rem);
        margin-bottom: 0.5rem;
        min-height: 1.2em;
    }
    h2 {
        color: #B3B3B3;
        font-size: clamp(1rem, 3vw, 1.2rem);
        margin: 0.5rem 0 1.5rem;
        min-height: 1.2em;
    }
    .year-question {
        color: {highlight_color};
        font-size: clamp(1.1rem, 4vw, 1.4rem);
        font-weight: bold;
        margin-top: 2rem;
        margin-bottom: 1.5rem;
    }
    .info-section { width: 100%; text-align: center; }
    .info-box strong { color: #FFFFFF; }
    .info-box h3 { color: #FFFFFF; margin-top: 1.5rem; margin-bottom: 0.5rem; }
    .info-divider { margin: 2rem 0; border: 0; border-top: 1px solid #333; }
    .button {
        padding: 12px 24px;
        background-color: {highlight_color};
        color: white;
        text-decoration: none;
        border-radius: 50px;
        font-weight: bold;
        margin-top: 20px;
        display: inline-block;
        transition: background-color 0.3s, transform 0.3s ease;
    }
    .button:hover {
        background-color: {button_hover_color};
        transform: scale({button_hover_scale});
    }
    .prominent-year {
        font-size: clamp(3rem, 12vw, 4rem);
        font-weight: bold;
        color: {highlight_color};
        margin: 1rem 0;
    }
    .progress-svg-container { width: 80%; max-width: 350px; margin: 20px auto 0; }
    .progress-interactive-area { width: 80%; margin: 0 auto; height: 14px; cursor: pointer; }
    .progress-interactive-area svg { width: 100%; height: 100%; overflow: visible; }
    #progressTrack, #progressFill {
        fill: none;
        stroke-width: {progress_bar_thickness};
        stroke-linecap: round;
        stroke-linejoin: round;
        transition: stroke-width 0.2s ease, stroke 0.2s ease;
    }
    #progressTrack { stroke: #444; }
    #progressFill { stroke: {highlight_color}; }
    .progress-interactive-area:hover #progressFill,
    .progress-interactive-area:hover #progressTrack { stroke-width: {progress_bar_hover_thickness}; }
    .progress-interactive-area:hover #progressFill { stroke: {button_hover_color}; }
    .player-mode-toggle {
        margin-top: 30px;
        margin-bottom: 35px;
        display: flex;
        flex-direction: column;
        align-items: center;
        gap: 10px;
    }
    .toggle-label { font-size: 0.9rem; color: #B3B3B3; }
    .switch { position: relative; display: inline-block; width: 50px; height: 28px; }
    .switch input { opacity: 0; width: 0; height: 0; }
    .slider {
        position: absolute;
        cursor: pointer;
        top: 0; left: 0; right: 0; bottom: 0;
        background-color: #444;
        transition: .4s;
        border-radius: 28px;
    }
    .slider:before {
        position: absolute;
        content: "";
        height: 22px;
        width: 22px;
        left: 3px;
        bottom: 3px;
        background-color: white;
        transition: .4s;
        border-radius: 50%;
    }
    input:checked + .slider { background-color: {highlight_color}; }
    input:checked + .slider:before { transform: translateX(22px); }
</style>
</head>
<body>
<div class="container">
    <div class="album-art-container">
        <a href="/previous" class="control-arrow"><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-linecap="round" stroke-linejoin="round"><polyline points="15 18 9 12 15 6"></polyline></svg></a>
        <a href="/play_pause" class="album-art-link">{image}</a>
        <a href="/next" class="control-arrow"><svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-linecap="round" stroke-linejoin="round"><polyline points="9 18 15 12 9 6"></polyline></svg></a>
    </div>
    <div class="progress-svg-container">
        <div class="progress-interactive-area">
            <svg viewBox="0 0 300 14"><path id="progressTrack" d=""></path><path id="progressFill" d=""></path></svg>
        </div>
    </div>
    <h1>{title}</h1>
    <h2>{artist}</h2>
    {year_question}
    {info_section}
    <a href="{button_link}" class="button">{button_text}</a>
    <div class="player-mode-toggle">
        <label for="playerMode" class="toggle-label">Player mode</label>
        <label class="switch"><input type="checkbox" id="playerMode" name="playerMode" {player_mode_checked}><span class="slider"></span></label>
    </div>
    <a href="/logout" style="font-size: 0.8rem; color: #888;">Logout</a>
</div>

<script>
    document.addEventListener('DOMContentLoaded', function () {
        const progressTrack = document.getElementById('progressTrack');
        const progressFill = document.getElementById('progressFill');
        const interactiveArea = document.querySelector('.progress-interactive-area');

        const svgWidth = 300;
        const svgHeight = 14;
        const midHeight = svgHeight / 2;
        const amplitude = 6;
        const frequency = 0.05;
        const segments = 150;
        const waveSpeed = {wave_speed};

        const initialTrackId = {track_id_js};
        const pollingInterval = {polling_ms};
        let currentProgress = {progress_ms};
        const totalDuration = {duration_ms};
        const isPlaying = {is_playing};

        let animationFrameId = null;
        let animationStartTime = performance.now();

        function generateWavePath(phase) {
            let path = `M 0 ${midHeight}`;
            for (let i = 0; i <= segments; i++) {
                const x = (i / segments) * svgWidth;
                const fadeWidth = svgWidth * 0.1;
                let currentAmplitude = amplitude;
                if (x < fadeWidth) {
                    currentAmplitude = amplitude * Math.sin((x / fadeWidth) * (Math.PI / 2));
                } else if (x > svgWidth - fadeWidth) {
                    currentAmplitude = amplitude * Math.sin(((svgWidth - x) / fadeWidth) * (Math.PI / 2));
                }
                const y = midHeight + Math.sin(x * frequency + phase) * currentAmplitude;
                path += ` L ${x.toFixed(3)} ${y.toFixed(3)}`;
            }
            return path;
        }

        function updateProgressBar(progress) {
            if (totalDuration <= 0) {
                return;
            }
            const progressRatio = Math.min(progress / totalDuration, 1);
            const dynamicPhase = progressRatio * Math.PI * waveSpeed;
            const wavePath = generateWavePath(dynamicPhase);
            progressTrack.setAttribute('d', wavePath);
            progressFill.setAttribute('d', wavePath);
            const totalLength = progressFill.getTotalLength();
            if (totalLength > 0) {
                progressFill.style.strokeDasharray = totalLength;
                progressFill.style.strokeDashoffset = totalLength * (1 - progressRatio);
            }
        }

        function animate(currentTime) {
            const elapsedTime = currentTime - animationStartTime;
            const newProgress = currentProgress + elapsedTime;
            updateProgressBar(newProgress);
            if (newProgress < totalDuration) {
                animationFrameId = requestAnimationFrame(animate);
            }
        }

        function startAnimation() {
            if (isPlaying) {
                animationStartTime = performance.now();
                animationFrameId = requestAnimationFrame(animate);
            }
        }

        function stopAnimation() {
            if (animationFrameId) {
                cancelAnimationFrame(animationFrameId);
                animationFrameId = null;
            }
        }

        updateProgressBar(currentProgress);
        startAnimation();

        interactiveArea.addEventListener('click', function (event) {
            if (totalDuration <= 0) {
                return;
            }
            stopAnimation();
            const rect = interactiveArea.getBoundingClientRect();
            const clickX = event.clientX - rect.left;
            const clickPercentage = Math.max(0, Math.min(1, clickX / rect.width));
            const seekPositionMs = Math.round(clickPercentage * totalDuration);
            currentProgress = seekPositionMs;
            updateProgressBar(currentProgress);
            startAnimation();
            fetch('/seek', {
                method: 'POST',
                headers: { 'Content-Type': 'application/json' },
                body: JSON.stringify({ position_ms: seekPositionMs })
            }).catch(error => console.error('Error seeking track:', error));
        });

        setInterval(function () {
            fetch('/check-song')
                .then(response => response.ok ? response.json() : Promise.reject('Network response was not ok'))
                .then(data => {
                    if (data && data.track_id !== initialTrackId) {
                        window.location.reload();
                    }
                })
                .catch(error => console.error('Error during polling:', error));
        }, pollingInterval);

        const playerModeToggle = document.getElementById('playerMode');
        if (playerModeToggle) {
            playerModeToggle.addEventListener('change', function () {
                fetch('/toggle-player-mode', {
                    method: 'POST',
                    headers: { 'Content-Type': 'application/json' },
                    body: JSON.stringify({ playerMode: this.checked })
                })
                    .then(response => response.ok ? response.json() : Promise.reject('Failed to toggle mode'))
                    .then(data => {
                        if (data.success) {
                            window.location.reload();
                        }
                    })
                    .catch(error => console.error('Error:', error));
            });
        }
    });
</script>
</body>
</html>
"##;
