//! Per-file lyrics synchronization
//!
//! One pass over a track reads its tags, decides whether a lookup is needed,
//! merges the lookup result with the stream stats and writes the lyrics back.
//! Tracks that already carry real lyrics are left untouched, so repeated runs
//! over the same directory only fill in the gaps.

use crate::audio::TagStore;
use crate::lyrics::{LyricsLookup, LyricsRecord, build_query, normalize_artist};
use crate::probe::{Prober, StreamStats};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;

/// Lyrics longer than this many characters are never replaced
pub const EXISTING_LYRICS_THRESHOLD: usize = 10;

/// What a workflow pass did to a track
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Lyrics were already present; nothing was fetched or written
    Skipped,
    /// Lyrics were fetched and written
    Updated,
    /// The lookup failed; the lyrics tag was cleared
    Missed,
}

pub fn has_lyrics(lyrics: &str) -> bool {
    lyrics.chars().count() > EXISTING_LYRICS_THRESHOLD
}

/// The text stored in the lyrics tag for a successful lookup
pub fn merge_lyrics(record: &LyricsRecord, stats: &StreamStats) -> String {
    record.to_block() + &stats.summary()
}

/// The collaborators a workflow pass talks to
#[derive(Clone)]
pub struct SyncContext {
    pub store: Arc<dyn TagStore>,
    pub lookup: Arc<dyn LyricsLookup>,
    pub prober: Arc<dyn Prober>,
}

impl SyncContext {
    pub fn new(
        store: Arc<dyn TagStore>,
        lookup: Arc<dyn LyricsLookup>,
        prober: Arc<dyn Prober>,
    ) -> Self {
        Self {
            store,
            lookup,
            prober,
        }
    }

    /// Run one workflow pass over the file at `path`.
    ///
    /// Lookup failures are an `Ok(SyncOutcome::Missed)`. Tag and probe
    /// failures are returned as errors and leave the file as it was.
    #[tracing::instrument(skip(self, path), fields(path = %path.display()))]
    pub async fn sync_track(&self, path: &Path) -> Result<SyncOutcome> {
        let mut track = self.store.read(path)?;

        if has_lyrics(&track.lyrics) {
            tracing::info!("Lyrics already exist for {}", path.display());
            return Ok(SyncOutcome::Skipped);
        }

        let artist = normalize_artist(&track.artist);
        let query = build_query(&track.title, &artist);

        let record = match self.lookup.lookup(&query).await {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Lyrics lookup failed for {}: {}", path.display(), e);
                track.lyrics.clear();
                self.store.write(&track)?;
                return Ok(SyncOutcome::Missed);
            }
        };

        let stats = self
            .prober
            .probe(path)
            .await
            .with_context(|| format!("Failed to probe {}", path.display()))?;

        track.lyrics = merge_lyrics(&record, &stats);
        self.store.write(&track)?;

        tracing::info!("Updated lyrics for {}", path.display());
        Ok(SyncOutcome::Updated)
    }
}
