use anyhow::Result;
use clap::Parser;
use lyrics_sync::audio::FileTagStore;
use lyrics_sync::batch::{self, BatchDriver};
use lyrics_sync::config::{Cli, Mode, normalize_legacy_args};
use lyrics_sync::{library, report};
use lyrics_sync::lyrics::{HttpLyricsClient, LyricsLookup};
use lyrics_sync::probe::FfprobeProber;
use lyrics_sync::sync::SyncContext;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("lyrics_sync=info")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_legacy_args(std::env::args_os()));
    let mode = cli.mode();

    // Problems are reported on stdout; the exit status stays zero.
    let paths = if mode.uses_directory() {
        if let Err(e) = library::check_directory(&cli.directory) {
            println!("{}", e);
            return Ok(());
        }
        library::scan(&cli.directory)
    } else {
        Vec::new()
    };

    let store = Arc::new(FileTagStore);
    let mut out = std::io::stdout();

    match mode {
        Mode::RemoveLyrics => {
            let removal = batch::remove_lyrics(store.as_ref(), &paths);
            report::write_removal(&mut out, &removal)?;
        }
        Mode::FetchManual(title) => {
            let Some(client) = lyrics_client(&cli.api_url) else {
                return Ok(());
            };
            let result = client.lookup(&title).await;
            report::write_manual_lookup(&mut out, &title, &result)?;
        }
        Mode::DryRun => report::write_dry_run(&mut out, &paths)?,
        Mode::Sync { workers } => {
            let Some(client) = lyrics_client(&cli.api_url) else {
                return Ok(());
            };
            tracing::info!("Lyrics endpoint: {}", client.endpoint());

            let ctx = SyncContext::new(
                store,
                Arc::new(client),
                Arc::new(FfprobeProber::new(cli.ffprobe.clone())),
            );
            let driver = BatchDriver::new(ctx).with_progress(!cli.no_progress);

            let summary = match workers {
                Some(workers) => driver.run_concurrent(paths, workers).await,
                None => driver.run_sequential(&paths).await,
            };

            report::write_sync_summary(&mut out, &summary)?;
            tracing::info!(
                "Processed {} files: {} updated, {} skipped, {} missed, {} failed",
                summary.processed,
                summary.updated,
                summary.skipped,
                summary.missed.len(),
                summary.failed.len()
            );
        }
    }

    Ok(())
}

fn lyrics_client(endpoint: &str) -> Option<HttpLyricsClient> {
    match HttpLyricsClient::new(endpoint) {
        Ok(client) => Some(client),
        Err(e) => {
            println!("Failed to create lyrics client: {}", e);
            None
        }
    }
}
