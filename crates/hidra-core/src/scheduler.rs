// ── Coordinated refresh scheduler ──
//
// One interval per period. Ticks are fanned out over a broadcast channel
// to any number of subscribers, and everything stops when the shared
// cancellation token fires.

use std::future::Future;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const TICK_CHANNEL_SIZE: usize = 16;

/// One scheduler tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Sequence number, starting at 1.
    pub seq: u64,
    pub at: Instant,
}

pub struct Scheduler {
    period: Duration,
    initial_delay: Duration,
    tx: broadcast::Sender<Tick>,
    cancel: CancellationToken,
}

impl Scheduler {
    /// A scheduler whose first tick fires one `period` after `spawn`.
    pub fn new(period: Duration, cancel: CancellationToken) -> Self {
        Self::with_initial_delay(period, period, cancel)
    }

    pub fn with_initial_delay(
        period: Duration,
        initial_delay: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let (tx, _) = broadcast::channel(TICK_CHANNEL_SIZE);
        Self {
            period,
            initial_delay,
            tx,
            cancel,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Tick> {
        self.tx.subscribe()
    }

    /// Start the timer.
    pub fn spawn(&self) -> JoinHandle<()> {
        let tx = self.tx.clone();
        let cancel = self.cancel.clone();
        let start = Instant::now() + self.initial_delay;
        let period = self.period;

        tokio::spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut seq = 0;

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    at = interval.tick() => {
                        seq += 1;
                        // No subscribers is fine; the tick is simply dropped.
                        let _ = tx.send(Tick { seq, at });
                    }
                }
            }
            debug!("scheduler stopped");
        })
    }

    /// Run `job` on every tick until cancelled.
    ///
    /// A job that overruns makes the subscriber skip the ticks it missed.
    pub fn spawn_subscriber<F, Fut>(&self, name: &'static str, job: F) -> JoinHandle<()>
    where
        F: Fn() -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let mut rx = self.tx.subscribe();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    tick = rx.recv() => match tick {
                        Ok(tick) => {
                            debug!(name, seq = tick.seq, "scheduled refresh");
                            job().await;
                        }
                        Err(broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(name, skipped, "refresh fell behind, skipping ticks");
                        }
                        Err(broadcast::error::RecvError::Closed) => break,
                    },
                }
            }
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn ticks_fan_out_to_every_subscriber() {
        let cancel = CancellationToken::new();
        let scheduler = Scheduler::new(Duration::from_secs(10), cancel.clone());

        let a = Arc::new(AtomicU32::new(0));
        let b = Arc::new(AtomicU32::new(0));
        let (ca, cb) = (Arc::clone(&a), Arc::clone(&b));
        let sa = scheduler.spawn_subscriber("a", move || {
            let ca = Arc::clone(&ca);
            async move {
                ca.fetch_add(1, Ordering::SeqCst);
            }
        });
        let sb = scheduler.spawn_subscriber("b", move || {
            let cb = Arc::clone(&cb);
            async move {
                cb.fetch_add(1, Ordering::SeqCst);
            }
        });
        let timer = scheduler.spawn();

        tokio::time::sleep(Duration::from_secs(35)).await;
        cancel.cancel();
        for handle in [timer, sa, sb] {
            handle.await.unwrap();
        }

        assert_eq!(a.load(Ordering::SeqCst), 3);
        assert_eq!(b.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn initial_delay_shifts_first_tick() {
        let cancel = CancellationToken::new();
        let scheduler = Scheduler::with_initial_delay(
            Duration::from_secs(300),
            Duration::from_secs(10),
            cancel.clone(),
        );
        let mut rx = scheduler.subscribe();
        let started = Instant::now();
        let timer = scheduler.spawn();

        let first = rx.recv().await.unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(first.at.duration_since(started), Duration::from_secs(10));

        cancel.cancel();
        timer.await.unwrap();
    }
}
