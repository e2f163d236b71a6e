//! Trailing-edge debouncing of search input.
//!
//! [`Debouncer`] is the clock-injected state machine; [`debounce_terms`] drives
//! it from a channel of raw keystroke snapshots on the tokio timer.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, sleep_until};

/// Settles a stream of search terms after a quiet period.
///
/// Every call to [`Debouncer::input`] restarts the window. Once the window
/// has passed without new input, [`Debouncer::poll`] yields the term, unless
/// it equals the last settled term. The settled term starts out empty, which
/// is the term the initial "popular movies" listing is fetched with.
#[derive(Debug)]
pub struct Debouncer {
    interval: Duration,
    pending: Option<(String, Instant)>,
    settled: String,
}

impl Debouncer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
            settled: String::new(),
        }
    }

    /// Records the current contents of the search box.
    pub fn input(&mut self, term: impl Into<String>, now: Instant) {
        self.pending = Some((term.into(), now));
    }

    /// Returns the newly settled term once the window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<String> {
        let ready = match &self.pending {
            Some((_, at)) => now.saturating_duration_since(*at) >= self.interval,
            None => false,
        };
        if !ready {
            return None;
        }

        let (term, _) = self.pending.take()?;
        if term == self.settled {
            return None;
        }
        self.settled = term.clone();
        Some(term)
    }

    /// Instant at which the pending term settles.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|(_, at)| *at + self.interval)
    }

    /// Time left before the pending term settles, zero once it is due.
    pub fn time_until_ready(&self, now: Instant) -> Option<Duration> {
        self.deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Last term that made it through the window.
    pub fn settled(&self) -> &str {
        &self.settled
    }
}

/// Spawns a task that turns raw input snapshots into settled search terms.
///
/// When `input` closes, a pending term still settles after its window and the
/// output channel closes afterwards.
pub fn debounce_terms(mut input: mpsc::Receiver<String>, interval: Duration) -> mpsc::Receiver<String> {
    let (tx, rx) = mpsc::channel(16);

    tokio::spawn(async move {
        let mut debouncer = Debouncer::new(interval);
        let mut input_open = true;

        loop {
            let deadline = debouncer.deadline();
            if !input_open && deadline.is_none() {
                break;
            }

            tokio::select! {
                received = input.recv(), if input_open => match received {
                    Some(term) => debouncer.input(term, Instant::now()),
                    None => input_open = false,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(term) = debouncer.poll(Instant::now()) {
                        tracing::debug!(term = %term, "Search term settled");
                        if tx.send(term).await.is_err() {
                            break;
                        }
                    }
                }
            }
        }
    });

    rx
}
