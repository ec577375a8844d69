//! Batch application of the sync workflow over a scanned file list

use crate::audio::TagStore;
use crate::sync::{SyncContext, SyncOutcome};
use anyhow::{Result, anyhow};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;

/// Summary of one batch run
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Files that went through a workflow pass, whatever the result
    pub processed: usize,
    pub updated: usize,
    pub skipped: usize,
    /// Files whose lookup failed, in scan order
    pub missed: Vec<PathBuf>,
    /// Files whose pass errored on tag storage or probing, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl BatchReport {
    fn record(&mut self, path: PathBuf, result: Result<SyncOutcome>) {
        self.processed += 1;
        match result {
            Ok(SyncOutcome::Updated) => self.updated += 1,
            Ok(SyncOutcome::Skipped) => self.skipped += 1,
            Ok(SyncOutcome::Missed) => self.missed.push(path),
            Err(e) => {
                tracing::error!("Failed to process {}: {:#}", path.display(), e);
                self.failed.push((path, format!("{:#}", e)));
            }
        }
    }
}

/// Result of a bulk lyrics removal
#[derive(Debug, Clone, Default)]
pub struct RemovalReport {
    pub cleared: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, String)>,
}

/// Completion notice sent from workers to the progress reporter
struct ProgressEvent {
    path: PathBuf,
}

/// Owns the progress bar; workers only hold channel senders
struct ProgressReporter {
    tx: mpsc::UnboundedSender<ProgressEvent>,
    task: JoinHandle<()>,
}

impl ProgressReporter {
    fn spawn(total: usize, visible: bool) -> Self {
        let bar = ProgressBar::new(total as u64);
        if !visible {
            bar.set_draw_target(ProgressDrawTarget::hidden());
        }
        bar.set_style(
            ProgressStyle::with_template("{msg} [{bar:40}] {pos}/{len} file(s)")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar.set_message("Processing");

        let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();
        let task = tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                tracing::trace!("Finished {}", event.path.display());
                bar.inc(1);
            }
            bar.finish_and_clear();
        });

        Self { tx, task }
    }

    fn sender(&self) -> mpsc::UnboundedSender<ProgressEvent> {
        self.tx.clone()
    }

    async fn finish(self) {
        drop(self.tx);
        if let Err(e) = self.task.await {
            tracing::warn!("Progress reporter stopped unexpectedly: {}", e);
        }
    }
}

fn notify(progress: &mpsc::UnboundedSender<ProgressEvent>, path: &Path) {
    // The reporter only goes away after every sender is dropped.
    let _ = progress.send(ProgressEvent {
        path: path.to_path_buf(),
    });
}

/// Runs the sync workflow over many files
pub struct BatchDriver {
    ctx: SyncContext,
    show_progress: bool,
}

impl BatchDriver {
    pub fn new(ctx: SyncContext) -> Self {
        Self {
            ctx,
            show_progress: true,
        }
    }

    /// Enable or disable the terminal progress bar
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Process `paths` one after another, in order
    pub async fn run_sequential(&self, paths: &[PathBuf]) -> BatchReport {
        tracing::info!("Processing {} files sequentially", paths.len());

        let progress = ProgressReporter::spawn(paths.len(), self.show_progress);
        let tx = progress.sender();

        let mut report = BatchReport::default();
        for path in paths {
            let result = self.ctx.sync_track(path).await;
            notify(&tx, path);
            report.record(path.clone(), result);
        }

        drop(tx);
        progress.finish().await;
        report
    }

    /// Process `paths` with a pool of `workers` tasks sharing one queue.
    ///
    /// Each path is handed to exactly one worker. The report lists missed and
    /// failed files in the order of `paths`. Every path ends up in the
    /// report, even when a worker task dies mid-batch.
    pub async fn run_concurrent(&self, paths: Vec<PathBuf>, workers: usize) -> BatchReport {
        let workers = workers.clamp(1, paths.len().max(1));
        tracing::info!(
            "Processing {} files with {} workers",
            paths.len(),
            workers
        );

        let progress = ProgressReporter::spawn(paths.len(), self.show_progress);
        let queue: Arc<Mutex<VecDeque<(usize, PathBuf)>>> =
            Arc::new(Mutex::new(paths.iter().cloned().enumerate().collect()));

        let handles = (0..workers).map(|worker| {
            let queue = queue.clone();
            let ctx = self.ctx.clone();
            let tx = progress.sender();

            tokio::spawn(async move {
                let mut results = Vec::new();
                loop {
                    let next = queue.lock().await.pop_front();
                    let Some((index, path)) = next else {
                        break;
                    };

                    let result = ctx.sync_track(&path).await;
                    notify(&tx, &path);
                    results.push((index, path, result));
                }
                tracing::debug!(worker, "Worker finished after {} files", results.len());
                results
            })
        });

        let mut entries = Vec::new();
        for joined in join_all(handles).await {
            match joined {
                Ok(results) => entries.extend(results),
                Err(e) => tracing::error!("Worker task failed: {}", e),
            }
        }
        progress.finish().await;

        // A worker that died takes its finished results with it; those files
        // and any left in the queue are reported as failed.
        let mut reported = vec![false; paths.len()];
        for (index, _, _) in &entries {
            reported[*index] = true;
        }
        let lost: Vec<(usize, PathBuf)> = paths
            .into_iter()
            .enumerate()
            .filter(|(index, _)| !reported[*index])
            .collect();
        if !lost.is_empty() {
            tracing::error!("{} files have no result after a worker failure", lost.len());
            for (index, path) in lost {
                entries.push((
                    index,
                    path,
                    Err(anyhow!("worker task stopped before reporting a result")),
                ));
            }
        }

        entries.sort_by_key(|(index, _, _)| *index);

        let mut report = BatchReport::default();
        for (_, path, result) in entries {
            report.record(path, result);
        }
        report
    }
}

/// Clear the lyrics tag of every file in `paths`. No lookups are made.
pub fn remove_lyrics(store: &dyn TagStore, paths: &[PathBuf]) -> RemovalReport {
    let mut report = RemovalReport::default();

    for path in paths {
        let result = store.read(path).and_then(|mut track| {
            track.lyrics.clear();
            store.write(&track)
        });

        match result {
            Ok(()) => {
                tracing::debug!("Cleared lyrics: {}", path.display());
                report.cleared.push(path.clone());
            }
            Err(e) => {
                tracing::error!("Failed to clear lyrics for {}: {:#}", path.display(), e);
                report.failed.push((path.clone(), format!("{:#}", e)));
            }
        }
    }

    report
}
