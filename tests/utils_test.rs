use songquiz::types::{AlbumImage, TrackAlbum, TrackArtist, TrackItem};
use songquiz::utils::*;

// Helper function to create a search result track
fn create_test_track(name: &str, release_date: &str, album_name: &str) -> TrackItem {
    TrackItem {
        id: Some(format!("{}_id", name.to_lowercase().replace(' ', "_"))),
        name: name.to_string(),
        duration_ms: 180_000,
        artists: vec![TrackArtist {
            id: Some("artist_id".to_string()),
            name: "Test Artist".to_string(),
        }],
        album: TrackAlbum {
            name: album_name.to_string(),
            release_date: release_date.to_string(),
            images: vec![AlbumImage {
                url: "https://example.com/cover.jpg".to_string(),
            }],
        },
    }
}

#[test]
fn test_generate_state_token() {
    let state = generate_state_token();

    // Should be exactly 32 characters
    assert_eq!(state.len(), 32);

    // Should contain only alphanumeric characters
    assert!(state.chars().all(|c| c.is_ascii_alphanumeric()));

    // Two generated values should be different
    let state2 = generate_state_token();
    assert_ne!(state, state2);
}

#[test]
fn test_clean_track_title_remaster_markers() {
    assert_eq!(clean_track_title("Yesterday - 2009 Remaster"), "Yesterday");
    assert_eq!(
        clean_track_title("Yesterday - 2009 Remastered Version"),
        "Yesterday"
    );
    assert_eq!(clean_track_title("Yesterday - Remastered 2009"), "Yesterday");
    assert_eq!(clean_track_title("Yesterday (Remastered)"), "Yesterday");
    assert_eq!(clean_track_title("Yesterday [Remastered]"), "Yesterday");
}

#[test]
fn test_clean_track_title_live_and_edit_markers() {
    assert_eq!(clean_track_title("Hey Jude - Live"), "Hey Jude");
    assert_eq!(clean_track_title("Hey Jude (Live)"), "Hey Jude");
    assert_eq!(clean_track_title("Hey Jude (Edit)"), "Hey Jude");
    assert_eq!(clean_track_title("Hey Jude - Single Version"), "Hey Jude");
}

#[test]
fn test_clean_track_title_case_insensitive() {
    assert_eq!(clean_track_title("YESTERDAY - 2009 REMASTER"), "YESTERDAY");
    assert_eq!(clean_track_title("yesterday (remastered)"), "yesterday");
    assert_eq!(clean_track_title("Hey Jude - LIVE"), "Hey Jude");
}

#[test]
fn test_clean_track_title_leaves_clean_titles_untouched() {
    assert_eq!(clean_track_title("Bohemian Rhapsody"), "Bohemian Rhapsody");
    assert_eq!(clean_track_title("Help!"), "Help!");

    // "Live" as part of a real title must survive
    assert_eq!(clean_track_title("Live and Let Die"), "Live and Let Die");
}

#[test]
fn test_clean_track_title_is_idempotent() {
    let inputs = [
        "Yesterday - 2009 Remaster",
        "Hey Jude (Live)",
        "Bohemian Rhapsody",
        "Something [Remastered] - Single Version",
        "  Padded Title  ",
    ];

    for input in inputs {
        let once = clean_track_title(input);
        let twice = clean_track_title(&once);
        assert_eq!(once, twice, "cleaning '{}' twice changed the result", input);
    }
}

#[test]
fn test_clean_track_title_trims_whitespace() {
    assert_eq!(clean_track_title("  Yesterday  "), "Yesterday");
    assert_eq!(clean_track_title("Yesterday (Remastered) "), "Yesterday");
}

#[test]
fn test_same_title() {
    assert!(same_title("Yesterday", "yesterday"));
    assert!(same_title("HEY JUDE", "hey jude"));
    assert!(!same_title("Yesterday", "Yesterday "));
    assert!(!same_title("Yesterday", "Tomorrow"));
}

#[test]
fn test_release_year() {
    assert_eq!(release_year("1969-09-26"), Some(1969));
    assert_eq!(release_year("1969-09"), Some(1969));
    assert_eq!(release_year("1969"), Some(1969));
    assert_eq!(release_year(""), None);
    assert_eq!(release_year("unknown"), None);
}

#[test]
fn test_join_artist_names() {
    let artists = vec![
        TrackArtist {
            id: None,
            name: "Artist A".to_string(),
        },
        TrackArtist {
            id: None,
            name: "Artist B".to_string(),
        },
    ];
    assert_eq!(join_artist_names(&artists), "Artist A, Artist B");
    assert_eq!(join_artist_names(&artists[..1]), "Artist A");
    assert_eq!(join_artist_names(&[]), "");
}

#[test]
fn test_find_original_release_prefers_earliest_matching_year() {
    let candidates = vec![
        create_test_track("Yesterday - 2009 Remaster", "2009-04-17", "Help! (Remastered)"),
        create_test_track("yesterday", "1965-08-06", "Help!"),
        create_test_track("Yesterday (Live)", "1987-05-01", "Live Collection"),
        // Earlier year, but a different song - must be ignored
        create_test_track("Tomorrow", "1960-01-01", "Other Album"),
    ];

    let original = find_original_release("Yesterday", 2009, "Help! (Remastered)", &candidates);
    assert_eq!(original.year, 1965);
    assert_eq!(original.album, "Help!");
}

#[test]
fn test_find_original_release_matches_case_insensitively() {
    // Cleaned search result "yesterday" matches the cleaned title "Yesterday";
    // the earlier of the two release years wins.
    let candidates = vec![create_test_track("yesterday", "1965-08-06", "Help!")];

    let original = find_original_release("Yesterday", 2009, "Love Songs", &candidates);
    assert_eq!(original.year, 1965);
    assert_eq!(original.album, "Help!");
}

#[test]
fn test_find_original_release_skips_unparseable_dates() {
    let candidates = vec![
        create_test_track("Yesterday", "", "No Date Album"),
        create_test_track("Yesterday", "not-a-year", "Broken Date Album"),
    ];

    let original = find_original_release("Yesterday", 2009, "Help!", &candidates);
    assert_eq!(original.year, 2009);
    assert_eq!(original.album, "Help!");
}

#[test]
fn test_find_original_release_keeps_incumbent_on_tie() {
    let candidates = vec![create_test_track("Yesterday", "2009-01-01", "Some Reissue")];

    let original = find_original_release("Yesterday", 2009, "Help!", &candidates);
    assert_eq!(original.year, 2009);
    assert_eq!(original.album, "Help!");
}

#[test]
fn test_find_original_release_without_candidates() {
    let original = find_original_release("Yesterday", 2009, "Help!", &[]);
    assert_eq!(original.year, 2009);
    assert_eq!(original.album, "Help!");
}

#[test]
fn test_escape_html() {
    assert_eq!(
        escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
        "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
    );

    // Plain strings pass through unchanged
    assert_eq!(escape_html("Hey Jude"), "Hey Jude");
}
