//! Lyrics Sync - embeds fetched lyrics into local audio files
//!
//! This library provides the pieces behind the `lyrics-sync` binary: directory
//! scanning, tag storage for the supported containers, stream probing, the
//! lyrics lookup client and the per-file synchronization workflow.

pub mod audio;
pub mod batch;
pub mod config;
pub mod error;
pub mod library;
pub mod lyrics;
pub mod probe;
pub mod report;
pub mod sync;
