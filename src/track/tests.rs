use super::*;

fn t(id: &str, title: &str, artists: &[&str]) -> Track {
    Track {
        id: TrackId::new(id),
        title: title.to_string(),
        artists: artists.iter().map(|a| a.to_string()).collect(),
        location: None,
    }
}

#[test]
fn track_id_serializes_with_legacy_oid_wrapper() {
    let track = t("65a1f00c", "Nightbird", &["Eva"]);
    let json = serde_json::to_value(&track).unwrap();

    assert_eq!(json["_id"]["$oid"], "65a1f00c");
    assert_eq!(json["title"], "Nightbird");
    assert_eq!(json["artists"][0], "Eva");
}

#[test]
fn track_deserializes_from_legacy_session_blob() {
    let json = r#"{
        "title": "Golden Hour",
        "artists": ["Kai", "Mori"],
        "_id": { "$oid": "507f1f77bcf86cd799439011" }
    }"#;

    let track: Track = serde_json::from_str(json).unwrap();
    assert_eq!(track.id.as_str(), "507f1f77bcf86cd799439011");
    assert_eq!(track.title, "Golden Hour");
    assert_eq!(track.artists, vec!["Kai".to_string(), "Mori".to_string()]);
    assert_eq!(track.location, None);
}

#[test]
fn missing_artists_default_to_empty() {
    let json = r#"{"title": "Untitled", "_id": {"$oid": "x"}}"#;
    let track: Track = serde_json::from_str(json).unwrap();
    assert!(track.artists.is_empty());
}

#[test]
fn location_is_omitted_from_json_when_absent() {
    let track = t("a", "A", &[]);
    let json = serde_json::to_value(&track).unwrap();
    assert!(json.get("location").is_none());

    let mut with_path = t("b", "B", &[]);
    with_path.location = Some(std::path::PathBuf::from("/music/b.mp3"));
    let json = serde_json::to_value(&with_path).unwrap();
    assert_eq!(json["location"], "/music/b.mp3");
}

#[test]
fn artist_line_separates_all_but_the_last() {
    let track = t("a", "A", &["One", "Two", "Three"]);
    assert_eq!(track.artist_line(", "), "One, Two, Three");

    let solo = t("b", "B", &["Solo"]);
    assert_eq!(solo.artist_line(", "), "Solo");

    let none = t("c", "C", &[]);
    assert_eq!(none.artist_line(", "), "");
}

#[test]
fn display_line_falls_back_to_title_without_artists() {
    let track = t("a", "Aria", &[]);
    assert_eq!(track.display_line(", "), "Aria");

    let full = t("b", "Aria", &["X", "Y"]);
    assert_eq!(full.display_line(", "), "X, Y - Aria");
}
