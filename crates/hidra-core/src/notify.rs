// ── Notification queue ──
//
// Shared, bounded queue of user-visible messages. Every store holds an
// `Arc<Notifier>`; consumers watch the queue through a `watch` channel.
// Entries older than their TTL are evicted lazily on each access.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde::Serialize;
use strum::{Display, EnumString};
use tokio::sync::watch;
use tokio::time::Instant;
use tracing::{debug, error, info};

/// Default queue capacity.
pub const DEFAULT_CAPACITY: usize = 32;

/// Default time a notification stays visible.
pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Success,
    Error,
}

/// One queued message.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub text: String,
    pub severity: Severity,
    /// Technical detail (server payload, error chain). Logged, never shown
    /// in the headline.
    pub detail: String,
    pub ttl: Duration,
    pub raised_at: Instant,
}

impl Notification {
    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.raised_at) >= self.ttl
    }
}

/// Bounded, TTL-pruned notification queue.
pub struct Notifier {
    queue: watch::Sender<VecDeque<Notification>>,
    next_id: AtomicU64,
    capacity: usize,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        let (queue, _) = watch::channel(VecDeque::with_capacity(capacity));
        Self {
            queue,
            next_id: AtomicU64::new(0),
            capacity: capacity.max(1),
            ttl,
        }
    }

    /// Log a message and, unless `silent`, queue it for display.
    ///
    /// When the queue is full the oldest entry is evicted.
    pub fn raise(&self, message: &str, severity: Severity, detail: &str, silent: bool) {
        match severity {
            Severity::Error => error!("{message} ({detail})"),
            Severity::Success => info!("{message} ({detail})"),
            Severity::Info => debug!("{message} ({detail})"),
        }

        if silent {
            return;
        }

        let entry = Notification {
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            text: message.to_owned(),
            severity,
            detail: detail.to_owned(),
            ttl: self.ttl,
            raised_at: Instant::now(),
        };

        let capacity = self.capacity;
        self.queue.send_modify(|queue| {
            evict_expired(queue, entry.raised_at);
            while queue.len() >= capacity {
                queue.pop_front();
            }
            queue.push_back(entry);
        });
    }

    pub fn error(&self, message: &str, detail: &str) {
        self.raise(message, Severity::Error, detail, false);
    }

    pub fn success(&self, message: &str, detail: &str) {
        self.raise(message, Severity::Success, detail, false);
    }

    pub fn info(&self, message: &str) {
        self.raise(message, Severity::Info, "", false);
    }

    /// Notifications still within their TTL, oldest first.
    pub fn active(&self) -> Vec<Notification> {
        self.prune();
        self.queue.borrow().iter().cloned().collect()
    }

    /// Remove and return everything currently queued (expired entries are
    /// dropped first).
    pub fn drain(&self) -> Vec<Notification> {
        let mut drained = Vec::new();
        self.queue.send_if_modified(|queue| {
            evict_expired(queue, Instant::now());
            drained.extend(queue.drain(..));
            !drained.is_empty()
        });
        drained
    }

    /// Drop a single notification (user dismissed it).
    pub fn dismiss(&self, id: u64) -> bool {
        self.queue.send_if_modified(|queue| {
            let before = queue.len();
            queue.retain(|n| n.id != id);
            queue.len() != before
        })
    }

    /// Evict every entry past its TTL.
    pub fn prune(&self) {
        let now = Instant::now();
        self.queue.send_if_modified(|queue| evict_expired(queue, now) > 0);
    }

    /// Watch the queue.
    pub fn subscribe(&self) -> watch::Receiver<VecDeque<Notification>> {
        self.queue.subscribe()
    }
}

/// Coerce a JSON payload into a detail string.
pub fn detail_of(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn evict_expired(queue: &mut VecDeque<Notification>, now: Instant) -> usize {
    let before = queue.len();
    queue.retain(|n| !n.is_expired(now));
    before - queue.len()
}
