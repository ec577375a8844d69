//! Command line configuration

use crate::lyrics::client::DEFAULT_ENDPOINT;
use clap::Parser;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(name = "lyrics-sync")]
#[command(about = "Set lyrics for music files", long_about = None)]
pub struct Cli {
    /// Directory containing the music files
    #[arg(short, long, env = "MUSIC_LIBRARY_PATH", default_value = "./")]
    pub directory: PathBuf,

    /// Process files with a pool of workers instead of one at a time
    #[arg(short, long)]
    pub concurrent: bool,

    /// Number of workers used with --concurrent
    #[arg(long, env = "LYRICS_SYNC_WORKERS", default_value = "2")]
    pub workers: usize,

    /// Only print the files that will be processed
    #[arg(long)]
    pub dry_run: bool,

    /// Fetch lyrics for a single song title and print them
    #[arg(long, value_name = "TITLE")]
    pub fetch_manual: Option<String>,

    /// Remove lyrics from every file in the directory
    #[arg(long)]
    pub remove_lyrics: bool,

    /// Lyrics lookup endpoint
    #[arg(long, env = "LYRICS_API_URL", default_value = DEFAULT_ENDPOINT)]
    pub api_url: String,

    /// ffprobe binary used to read stream info
    #[arg(long, env = "FFPROBE_PATH", default_value = "ffprobe")]
    pub ffprobe: String,

    /// Hide the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// What a single invocation does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    RemoveLyrics,
    FetchManual(String),
    DryRun,
    Sync { workers: Option<usize> },
}

impl Mode {
    /// Whether the mode works on the scanned directory. A manual fetch never
    /// touches it.
    pub fn uses_directory(&self) -> bool {
        !matches!(self, Mode::FetchManual(_))
    }
}

impl Cli {
    /// Resolve the requested mode. When several are given, removal wins over
    /// a manual fetch, which wins over a dry run.
    pub fn mode(&self) -> Mode {
        if self.remove_lyrics {
            return Mode::RemoveLyrics;
        }
        if let Some(title) = self.fetch_manual.as_ref().filter(|t| !t.is_empty()) {
            return Mode::FetchManual(title.clone());
        }
        if self.dry_run {
            return Mode::DryRun;
        }
        Mode::Sync {
            workers: self.concurrent.then_some(self.workers),
        }
    }
}

/// Single-dash spellings accepted for compatibility with older scripts
const LEGACY_FLAGS: [(&str, &str); 5] = [
    ("-directory", "--directory"),
    ("-concurrent", "--concurrent"),
    ("-dry_run", "--dry-run"),
    ("-fetch_manual", "--fetch-manual"),
    ("-remove_lyrics", "--remove-lyrics"),
];

/// Rewrite legacy flags such as `-dry_run` or `-directory=music` into the
/// GNU-style flags clap understands. Other arguments pass through untouched.
pub fn normalize_legacy_args<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let (flag, value) = match text.split_once('=') {
                Some((flag, value)) => (flag, Some(value)),
                None => (text, None),
            };

            match LEGACY_FLAGS.iter().find(|(legacy, _)| *legacy == flag) {
                Some((_, modern)) => match value {
                    Some(value) => OsString::from(format!("{}={}", modern, value)),
                    None => OsString::from(*modern),
                },
                None => arg,
            }
        })
        .collect()
}
