use lyrics_sync::library;
use std::collections::HashSet;
use std::path::PathBuf;

#[test]
fn test_scan_keeps_only_audio_extensions() {
    let dir = tempfile::tempdir().unwrap();
    for name in ["a.m4a", "notes.txt", "b.flac", "cover.jpg"] {
        std::fs::write(dir.path().join(name), b"").unwrap();
    }

    let found: HashSet<PathBuf> = library::scan(dir.path()).into_iter().collect();
    let expected: HashSet<PathBuf> = ["a.m4a", "b.flac"]
        .iter()
        .map(|name| dir.path().join(name))
        .collect();

    assert_eq!(found, expected);
}

#[test]
fn test_scan_of_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    assert!(library::scan(dir.path()).is_empty());
}

#[test]
fn test_scan_of_missing_directory_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    assert!(library::scan(&dir.path().join("missing")).is_empty());
}
