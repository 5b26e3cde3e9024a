use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use crate::config::Settings;
use crate::error::{FetchError, NavError};
use crate::nav::{self, Command};
use crate::page::{self, Document};
use crate::render::Board;
use crate::source::SnapshotSource;
use crate::stats::Stats;
use crate::types::Snapshot;

fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis() as u64
}

async fn maybe_write_jsonl(path: &Option<String>, line: &str) {
    if let Some(p) = path.as_ref().map(|x| x.trim().to_string()).filter(|x| !x.is_empty()) {
        if let Ok(mut f) = tokio::fs::OpenOptions::new().create(true).append(true).open(&p).await {
            use tokio::io::AsyncWriteExt;
            let _ = f.write_all(line.as_bytes()).await;
            let _ = f.write_all(b"\n").await;
        }
    }
}

/// Outcome of one fetch, tagged with the cycle that issued it.
#[derive(Debug)]
pub struct CycleResult {
    pub seq: u64,
    pub result: Result<Snapshot, FetchError>,
}

/// Owns the page and drives refresh cycles. Fetches run as their own tasks;
/// everything that touches the page happens on the `run` loop.
pub struct App<S: SnapshotSource + 'static> {
    source: Arc<S>,
    board: Board,
    stats: Arc<Stats>,
    interval: Duration,
    output: Option<PathBuf>,
    discard_stale: bool,
    stats_log_sec: u64,
    stats_jsonl_path: Option<String>,
    next_seq: u64,
    last_applied: u64,
}

impl<S: SnapshotSource + 'static> App<S> {
    pub fn new(s: &Settings, source: S) -> Self {
        let interval = s.poll_interval();
        let mut doc = Document::for_variant(s.variant);
        doc.set_reload_secs(Some(interval.as_secs()));

        let output = Some(s.output_path.trim())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Self {
            source: Arc::new(source),
            board: Board::new(doc),
            stats: Stats::new(now_ms()),
            interval,
            output,
            discard_stale: s.discard_stale,
            stats_log_sec: s.stats_log_sec,
            stats_jsonl_path: s.stats_jsonl_path.clone(),
            next_seq: 0,
            last_applied: 0,
        }
    }

    #[cfg(test)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[cfg(test)]
    pub fn stats(&self) -> &Arc<Stats> {
        &self.stats
    }

    /// Starts a fetch without waiting for it. Earlier fetches still in flight
    /// are left running.
    pub fn spawn_cycle(&mut self, done: &mpsc::UnboundedSender<CycleResult>) {
        self.next_seq += 1;
        let seq = self.next_seq;
        self.stats.inc_started();
        tracing::debug!(cycle = seq, "refresh cycle started");

        let source = self.source.clone();
        let done = done.clone();
        tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = done.send(CycleResult { seq, result });
        });
    }

    /// Applies a finished fetch to the page. Returns whether the page changed.
    pub fn complete(&mut self, done: CycleResult) -> bool {
        let CycleResult { seq, result } = done;
        let snap = match result {
            Ok(snap) => snap,
            Err(e) => {
                self.fail(seq, &e);
                return false;
            }
        };

        if self.discard_stale && seq < self.last_applied {
            self.stats.inc_stale();
            tracing::info!(cycle = seq, last_applied = self.last_applied, "stale snapshot dropped");
            return false;
        }

        match self.board.apply(&snap) {
            Ok(report) => {
                self.last_applied = self.last_applied.max(seq);
                self.stats.inc_applied();
                tracing::info!(
                    cycle = seq,
                    rendered = report.rendered.len(),
                    skipped = report.skipped.len(),
                    fixtures = snap.fixtures_data.len(),
                    teams = snap.teams_data.len(),
                    players = snap.players_data.len(),
                    "refresh cycle applied"
                );
                true
            }
            Err(e) => {
                self.fail(seq, &e);
                false
            }
        }
    }

    fn fail(&self, seq: u64, e: &FetchError) {
        self.stats.record_failure(e);
        tracing::warn!(cycle = seq, error = %e, "refresh cycle failed, keeping current page");
    }

    pub fn navigate(&mut self, cmd: &Command) -> Result<(), NavError> {
        let doc = self.board.doc_mut();
        match cmd {
            Command::Enter => nav::enter_app(doc),
            Command::Show(page) => nav::show_page(doc, page),
            Command::Refresh | Command::Quit => Ok(()),
        }
    }

    async fn write(&self) {
        let Some(path) = &self.output else { return };
        let html = self.board.doc().to_html();
        if let Err(e) = page::write_page(path, &html).await {
            let msg = format!("{e:#}");
            tracing::warn!(error = %msg, "page write failed");
        }
    }

    async fn maybe_log_stats(&self) {
        let t = now_ms();
        if !self.stats.should_log(t, self.stats_log_sec) {
            return;
        }
        let ss = self.stats.snapshot(t);
        self.stats.mark_logged(t);

        let line = serde_json::to_string(&ss).unwrap_or_default();
        tracing::info!(
            up_sec = ss.up_sec,
            cycles_started = ss.cycles_started,
            cycles_applied = ss.cycles_applied,
            stale_dropped = ss.stale_dropped,
            transport_failures = ss.transport_failures,
            application_failures = ss.application_failures,
            "stats"
        );

        maybe_write_jsonl(&self.stats_jsonl_path, &line).await;
    }

    /// Refreshes once now and on every tick until `quit` or Ctrl-C.
    pub async fn run(mut self, mut commands: mpsc::Receiver<Command>) -> anyhow::Result<()> {
        let (done_tx, mut done_rx) = mpsc::unbounded_channel();
        let mut ticker = tokio::time::interval(self.interval);
        let mut commands_open = true;

        tracing::info!(
            interval_secs = self.interval.as_secs(),
            variant = ?self.board.doc().variant(),
            output = ?self.output,
            "auction board started"
        );
        self.write().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => self.spawn_cycle(&done_tx),
                Some(done) = done_rx.recv() => {
                    if self.complete(done) {
                        self.write().await;
                    }
                    self.maybe_log_stats().await;
                }
                cmd = commands.recv(), if commands_open => match cmd {
                    None => {
                        commands_open = false;
                        tracing::debug!("command stream closed");
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Refresh) => self.spawn_cycle(&done_tx),
                    Some(c) => match self.navigate(&c) {
                        Ok(()) => self.write().await,
                        Err(e) => tracing::warn!(error = %e, "navigation ignored"),
                    },
                },
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("interrupted");
                    break;
                }
            }
        }

        self.board.teardown();
        tracing::info!("auction board stopped");
        Ok(())
    }
}
