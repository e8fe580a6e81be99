//! Trailing debounce for the orders search box
//!
//! Keystrokes are buffered and only committed after a quiet period. Each new
//! keystroke reschedules the commit. Pressing Enter commits immediately.
//!
//! # Architecture
//!
//! ```text
//! input() ──┐
//! flush() ──┼──▶ mpsc ──▶ debounce task ──▶ watch channel ──▶ OrdersView::sync_search()
//! confirm()─┤             (tokio timer)
//! cancel() ─┘
//! ```
//!
//! # Usage
//!
//! ```rust,ignore
//! let search = SearchDebouncer::spawn(Duration::from_millis(300));
//! let mut committed = search.subscribe();
//!
//! search.input("nat");
//! search.input("natali");
//!
//! // 300ms after the last keystroke
//! committed.changed().await?;
//! assert_eq!(*committed.borrow(), "natali");
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep};

/// Default quiet period before a search is committed
pub const DEFAULT_SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

#[derive(Debug)]
enum Command {
    Input(String),
    Flush,
    Confirm(String),
    Cancel,
}

/// Coalescing buffer between the search input and the query pipeline
///
/// The background task stops when the debouncer is dropped, discarding any
/// pending text.
#[derive(Debug)]
pub struct SearchDebouncer {
    commands: mpsc::UnboundedSender<Command>,
    committed: watch::Receiver<String>,
    commits: Arc<AtomicUsize>,
    task: JoinHandle<()>,
    delay: Duration,
}

impl SearchDebouncer {
    /// Start the debounce task
    ///
    /// Must be called from within a Tokio runtime.
    pub fn spawn(delay: Duration) -> Self {
        let (commands, rx) = mpsc::unbounded_channel();
        let (tx, committed) = watch::channel(String::new());
        let commits = Arc::new(AtomicUsize::new(0));
        let task = tokio::spawn(run(rx, Committer { tx, commits: commits.clone() }, delay));

        Self {
            commands,
            committed,
            commits,
            task,
            delay,
        }
    }

    /// Record a keystroke and (re)schedule the commit
    pub fn input(&self, text: impl Into<String>) {
        self.send(Command::Input(text.into()));
    }

    /// Commit any pending text right away
    pub fn flush(&self) {
        self.send(Command::Flush);
    }

    /// Flush whatever was pending, then commit `text`
    ///
    /// This is the Enter-key path. The buffered keystroke is published first
    /// and the box's current value is committed right after it, so `text` is
    /// always the final value.
    pub fn confirm(&self, text: impl Into<String>) {
        self.send(Command::Confirm(text.into()));
    }

    /// Drop pending text without committing it
    pub fn cancel(&self) {
        self.send(Command::Cancel);
    }

    /// Receiver notified on every commit
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.committed.clone()
    }

    /// Last committed search text
    pub fn committed(&self) -> String {
        self.committed.borrow().clone()
    }

    /// Number of commits published since the task started
    pub fn commit_count(&self) -> usize {
        self.commits.load(Ordering::Acquire)
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    fn send(&self, command: Command) {
        // Only fails once the task is gone, at which point nothing is listening
        if let Err(e) = self.commands.send(command) {
            tracing::warn!(command = ?e.0, "search debouncer task is not running");
        }
    }
}

impl Drop for SearchDebouncer {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn run(
    mut commands: mpsc::UnboundedReceiver<Command>,
    committed: Committer,
    delay: Duration,
) {
    let mut pending: Option<String> = None;
    let timer = sleep(delay);
    tokio::pin!(timer);

    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Input(text)) => {
                    pending = Some(text);
                    timer.as_mut().reset(Instant::now() + delay);
                }
                Some(Command::Flush) => {
                    if let Some(text) = pending.take() {
                        committed.commit(text, "flush");
                    }
                }
                Some(Command::Confirm(text)) => {
                    if let Some(buffered) = pending.take() {
                        committed.commit(buffered, "flush");
                    }
                    committed.commit(text, "confirm");
                }
                Some(Command::Cancel) => {
                    if pending.take().is_some() {
                        tracing::debug!("discarded pending search");
                    }
                }
                None => break,
            },
            () = &mut timer, if pending.is_some() => {
                if let Some(text) = pending.take() {
                    committed.commit(text, "timer");
                }
            }
        }
    }
}

struct Committer {
    tx: watch::Sender<String>,
    commits: Arc<AtomicUsize>,
}

impl Committer {
    fn commit(&self, text: String, trigger: &'static str) {
        tracing::debug!(query = %text, trigger, "committed search");
        self.commits.fetch_add(1, Ordering::Release);
        self.tx.send_replace(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_commits_after_quiet_period() {
        let search = SearchDebouncer::spawn(Duration::from_millis(300));

        search.input("a");
        sleep(Duration::from_millis(100)).await;
        search.input("ab");

        sleep(Duration::from_millis(250)).await;
        assert_eq!(search.committed(), "");

        sleep(Duration::from_millis(100)).await;
        assert_eq!(search.committed(), "ab");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_commits_immediately() {
        let search = SearchDebouncer::spawn(Duration::from_millis(300));
        let mut rx = search.subscribe();
        let start = Instant::now();

        search.input("natali");
        search.flush();
        rx.changed().await.unwrap();

        assert_eq!(*rx.borrow(), "natali");
        assert!(start.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_flushes_pending_then_commits() {
        let search = SearchDebouncer::spawn(Duration::from_millis(300));
        let mut rx = search.subscribe();

        search.input("nat");
        search.confirm("natali");
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), "natali");
        assert_eq!(search.commit_count(), 2);

        // the flushed keystroke must not fire again later
        sleep(Duration::from_secs(1)).await;
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test(start_paused = true)]
    async fn test_confirm_without_pending_commits_once() {
        let search = SearchDebouncer::spawn(Duration::from_millis(300));
        let mut rx = search.subscribe();

        search.confirm("drew");
        rx.changed().await.unwrap();
        assert_eq!(search.commit_count(), 1);
        assert_eq!(search.committed(), "drew");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_discards_pending() {
        let search = SearchDebouncer::spawn(Duration::from_millis(300));

        search.input("drew");
        search.cancel();
        sleep(Duration::from_secs(1)).await;

        assert_eq!(search.committed(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_flush_without_pending_is_noop() {
        let search = SearchDebouncer::spawn(DEFAULT_SEARCH_DEBOUNCE);
        let rx = search.subscribe();

        search.flush();
        sleep(Duration::from_millis(10)).await;

        assert!(!rx.has_changed().unwrap());
    }
}
