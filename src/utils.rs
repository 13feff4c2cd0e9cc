use once_cell::sync::Lazy;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;

use crate::types::{TrackArtist, TrackItem};

// Markers that streaming catalogs stick onto re-releases. Order matters: the
// broad "- <year> Remaster..." form must run before the narrower ones.
static TITLE_NOISE: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s*-\s*\d{4}\s*Remaster.*",
        r"(?i)\s*-\s*Remastered\s*\d{4}",
        r"(?i)\(Remastered\)",
        r"(?i)\[Remastered\]",
        r"(?i)\s*-\s*Live",
        r"(?i)\(Live\)",
        r"(?i)\(Edit\)",
        r"(?i)\s*-\s*Single Version",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("static title pattern must compile"))
    .collect()
});

#[derive(Debug, Clone, PartialEq)]
pub struct OriginalRelease {
    pub year: i32,
    pub album: String,
}

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

pub fn clean_track_title(raw: &str) -> String {
    let mut title = raw.trim().to_string();
    for pattern in TITLE_NOISE.iter() {
        title = pattern.replace_all(&title, "").trim().to_string();
    }
    title
}

pub fn same_title(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

pub fn release_year(release_date: &str) -> Option<i32> {
    release_date.split('-').next()?.trim().parse().ok()
}

pub fn join_artist_names(artists: &[TrackArtist]) -> String {
    artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// Scans search results for an earlier release of the same song. A candidate
// counts as the same song when its cleaned title matches case-insensitively;
// candidates without a parseable release year are skipped. Ties keep the
// incumbent, so the playing album wins unless something is strictly older.
pub fn find_original_release(
    cleaned_title: &str,
    initial_year: i32,
    initial_album: &str,
    candidates: &[TrackItem],
) -> OriginalRelease {
    let mut original = OriginalRelease {
        year: initial_year,
        album: initial_album.to_string(),
    };

    for candidate in candidates {
        if !same_title(cleaned_title, &clean_track_title(&candidate.name)) {
            continue;
        }
        let Some(year) = release_year(&candidate.album.release_date) else {
            continue;
        };
        if year < original.year {
            original = OriginalRelease {
                year,
                album: candidate.album.name.clone(),
            };
        }
    }

    original
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
