//! Console output for each run mode

use crate::batch::{BatchReport, RemovalReport};
use crate::error::LookupError;
use crate::lyrics::LyricsRecord;
use std::io::{self, Write};
use std::path::PathBuf;

/// Listing printed by `--dry-run`
pub fn write_dry_run(out: &mut impl Write, paths: &[PathBuf]) -> io::Result<()> {
    writeln!(out, "Files that will be processed:")?;
    for path in paths {
        writeln!(out, "{}", path.display())?;
    }
    Ok(())
}

pub fn write_manual_lookup(
    out: &mut impl Write,
    title: &str,
    result: &Result<LyricsRecord, LookupError>,
) -> io::Result<()> {
    match result {
        Ok(record) => writeln!(out, "{}", record.to_block()),
        Err(e) => writeln!(out, "No lyrics found for '{}': {}", title, e),
    }
}

/// Cleared paths, then any failures
pub fn write_removal(out: &mut impl Write, report: &RemovalReport) -> io::Result<()> {
    for path in &report.cleared {
        writeln!(out, "{}", path.display())?;
    }
    write_failures(out, &report.failed)
}

/// Missed paths in scan order followed by the totals.
///
/// The failure section only appears when something failed.
pub fn write_sync_summary(out: &mut impl Write, report: &BatchReport) -> io::Result<()> {
    for path in &report.missed {
        writeln!(out, "{}", path.display())?;
    }
    writeln!(out, "Missed Songs Total: {}", report.missed.len())?;

    if !report.failed.is_empty() {
        write_failures(out, &report.failed)?;
        writeln!(out, "Failed Songs Total: {}", report.failed.len())?;
    }
    Ok(())
}

fn write_failures(out: &mut impl Write, failed: &[(PathBuf, String)]) -> io::Result<()> {
    for (path, reason) in failed {
        writeln!(out, "Failed: {} ({})", path.display(), reason)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn render(f: impl FnOnce(&mut Vec<u8>) -> io::Result<()>) -> String {
        let mut out = Vec::new();
        f(&mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_dry_run_listing() {
        let paths = vec![PathBuf::from("music/a.mp3"), PathBuf::from("music/b.flac")];
        assert_eq!(
            render(|out| write_dry_run(out, &paths)),
            "Files that will be processed:\nmusic/a.mp3\nmusic/b.flac\n"
        );
        assert_eq!(
            render(|out| write_dry_run(out, &[])),
            "Files that will be processed:\n"
        );
    }

    #[test]
    fn test_sync_summary_without_failures() {
        let report = BatchReport {
            processed: 3,
            updated: 1,
            missed: vec![PathBuf::from("music/x.m4a"), PathBuf::from("music/y.mp3")],
            ..BatchReport::default()
        };

        assert_eq!(
            render(|out| write_sync_summary(out, &report)),
            "music/x.m4a\nmusic/y.mp3\nMissed Songs Total: 2\n"
        );
    }

    #[test]
    fn test_sync_summary_lists_failures() {
        let report = BatchReport {
            processed: 1,
            failed: vec![(PathBuf::from("music/live.wav"), "no bit rate".to_string())],
            ..BatchReport::default()
        };

        assert_eq!(
            render(|out| write_sync_summary(out, &report)),
            "Missed Songs Total: 0\nFailed: music/live.wav (no bit rate)\nFailed Songs Total: 1\n"
        );
    }

    #[test]
    fn test_manual_lookup_output() {
        let record = LyricsRecord {
            title: "Deep Pockets".to_string(),
            author: "Drake".to_string(),
            lyrics: "Yeah".to_string(),
            retrieved_at: Local.with_ymd_and_hms(2021, 1, 1, 0, 0, 0).unwrap(),
        };
        assert_eq!(
            render(|out| write_manual_lookup(out, "Deep Pockets", &Ok(record))),
            "Title: Deep Pockets\nAuthor: Drake\n\nYeah\nRetrieved on: 01/01/2021 00:00:00\n"
        );

        let miss = Err(LookupError::Status(404));
        let text = render(|out| write_manual_lookup(out, "Nothing", &miss));
        assert!(text.starts_with("No lyrics found for 'Nothing': "));
    }

    #[test]
    fn test_removal_output() {
        let report = RemovalReport {
            cleared: vec![PathBuf::from("music/one.mp3")],
            failed: vec![(PathBuf::from("music/gone.wav"), "missing".to_string())],
        };
        assert_eq!(
            render(|out| write_removal(out, &report)),
            "music/one.mp3\nFailed: music/gone.wav (missing)\n"
        );
    }
}
