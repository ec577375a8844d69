pub mod artist;
pub mod client;

use chrono::{DateTime, Local};

pub use artist::normalize_artist;
pub use client::{HttpLyricsClient, LyricsLookup};

/// Layout of the "Retrieved on" stamp, e.g. `01/01/2021 00:00:00`
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// Lyrics returned by the lookup service, stamped with when they were fetched
#[derive(Debug, Clone, PartialEq)]
pub struct LyricsRecord {
    pub title: String,
    pub author: String,
    pub lyrics: String,
    pub retrieved_at: DateTime<Local>,
}

impl LyricsRecord {
    /// Render the text block that gets embedded in the file
    pub fn to_block(&self) -> String {
        format!(
            "Title: {}\nAuthor: {}\n\n{}\nRetrieved on: {}",
            self.title,
            self.author,
            self.lyrics,
            self.retrieved_at.format(TIMESTAMP_FORMAT)
        )
    }
}

/// Build the free-text lookup query for a track.
///
/// The artist is expected to be normalized already; an empty artist leaves
/// just the title.
pub fn build_query(title: &str, artist: &str) -> String {
    if artist.is_empty() {
        title.to_string()
    } else {
        format!("{} {}", title, artist)
    }
}
