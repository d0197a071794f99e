// ── Remote resource cell ──
//
// The state every store keeps for the resource it mirrors: the visible
// value, the pre-edit backup, and the loading/error flags. State lives in
// a `watch` channel and is only touched through `send_modify`, so no lock
// is ever held across an `.await`.
//
// Every fetch takes a generation token. A response carrying a token older
// than the latest one issued is discarded. Loading is a count of in-flight
// operations; the guards returned by `begin_fetch` / `begin_mutation`
// decrement it on drop, so it is cleared on every exit path.

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::debug;

use crate::stream::ResourceStream;

/// Snapshot of one remote resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceState<T> {
    /// Value shown to the user (possibly with unsaved edits).
    pub current: T,
    /// Last confirmed value while editing. `Some` iff `edit_mode`.
    pub backup: Option<T>,
    pub loading: bool,
    /// User-facing message of the last failed operation.
    pub error: Option<String>,
    pub edit_mode: bool,
    /// Token of the most recently issued fetch.
    pub generation: u64,
    pub last_synced: Option<DateTime<Utc>>,
    in_flight: u32,
}

impl<T: Default> Default for ResourceState<T> {
    fn default() -> Self {
        Self {
            current: T::default(),
            backup: None,
            loading: false,
            error: None,
            edit_mode: false,
            generation: 0,
            last_synced: None,
            in_flight: 0,
        }
    }
}

impl<T> ResourceState<T> {
    /// The last value confirmed by the gateway: the backup while editing,
    /// `current` otherwise.
    pub fn confirmed(&self) -> &T {
        self.backup.as_ref().unwrap_or(&self.current)
    }

    fn set_in_flight(&mut self, in_flight: u32) {
        self.in_flight = in_flight;
        self.loading = in_flight > 0;
    }
}

/// Watch-backed owner of a [`ResourceState`].
pub struct ResourceCell<T> {
    state: watch::Sender<ResourceState<T>>,
}

impl<T> Default for ResourceCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ResourceCell<T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (state, _) = watch::channel(ResourceState::default());
        Self { state }
    }

    // ── Reads ────────────────────────────────────────────────────────

    pub fn snapshot(&self) -> ResourceState<T> {
        self.state.borrow().clone()
    }

    pub fn current(&self) -> T {
        self.state.borrow().current.clone()
    }

    pub fn backup(&self) -> Option<T> {
        self.state.borrow().backup.clone()
    }

    pub fn is_editing(&self) -> bool {
        self.state.borrow().edit_mode
    }

    pub fn subscribe(&self) -> ResourceStream<T> {
        ResourceStream::new(self.state.subscribe())
    }

    // ── Edit mode ────────────────────────────────────────────────────

    /// Enter edit mode, snapshotting `current` into `backup`.
    /// No-op (returns `false`) when already editing.
    pub fn hold(&self) -> bool {
        self.state.send_if_modified(|s| {
            if s.edit_mode {
                return false;
            }
            s.backup = Some(s.current.clone());
            s.edit_mode = true;
            true
        })
    }

    /// Leave edit mode, discarding edits. No-op (returns `false`) when not
    /// editing.
    pub fn restore(&self) -> bool {
        self.state.send_if_modified(|s| {
            if !s.edit_mode {
                return false;
            }
            if let Some(backup) = s.backup.take() {
                s.current = backup;
            }
            s.edit_mode = false;
            true
        })
    }

    /// Leave edit mode keeping `current` as is.
    pub(crate) fn commit_edit(&self) {
        self.state.send_if_modified(|s| {
            let was_editing = s.edit_mode;
            s.backup = None;
            s.edit_mode = false;
            was_editing
        });
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Apply an edit to the visible value.
    pub fn update_current(&self, f: impl FnOnce(&mut T)) {
        self.state.send_modify(|s| f(&mut s.current));
    }

    pub(crate) fn replace_current(&self, value: T) {
        self.state.send_modify(|s| s.current = value);
    }

    /// Apply a background change (clock tick) to the confirmed value:
    /// `backup` while editing, `current` otherwise.
    pub(crate) fn update_confirmed(&self, f: impl FnOnce(&mut T)) {
        self.state.send_modify(|s| match s.backup.as_mut() {
            Some(backup) => f(backup),
            None => f(&mut s.current),
        });
    }

    pub(crate) fn set_error(&self, message: &str) {
        self.state.send_modify(|s| s.error = Some(message.to_owned()));
    }

    // ── In-flight operations ─────────────────────────────────────────

    /// Start a fetch: bump the generation, raise `loading`, clear `error`.
    pub(crate) fn begin_fetch(&self) -> FetchTicket<'_, T> {
        let mut token = 0;
        self.state.send_modify(|s| {
            s.generation += 1;
            token = s.generation;
            s.error = None;
            s.set_in_flight(s.in_flight + 1);
        });
        FetchTicket { cell: self, token }
    }

    /// Start a write: raise `loading`, clear `error`.
    pub(crate) fn begin_mutation(&self) -> MutationGuard<'_, T> {
        self.state.send_modify(|s| {
            s.error = None;
            s.set_in_flight(s.in_flight + 1);
        });
        MutationGuard { cell: self }
    }

    fn finish_one(&self) {
        self.state
            .send_modify(|s| s.set_in_flight(s.in_flight.saturating_sub(1)));
    }
}

/// An in-flight fetch. Dropping it clears its share of `loading`.
pub(crate) struct FetchTicket<'a, T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    cell: &'a ResourceCell<T>,
    token: u64,
}

impl<T> FetchTicket<'_, T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    /// Install a fetched value. Returns `false` if a newer fetch was issued
    /// meanwhile, in which case the value is dropped.
    ///
    /// While editing the value lands in `backup` so the user's unsaved
    /// edits stay visible.
    pub(crate) fn complete(&self, value: T) -> bool {
        self.complete_with(|slot| *slot = value)
    }

    /// Like [`complete`](Self::complete), but merges into the confirmed
    /// value in place, so fields the response does not carry keep whatever
    /// they hold at install time.
    pub(crate) fn complete_with(&self, merge: impl FnOnce(&mut T)) -> bool {
        let token = self.token;
        self.cell.state.send_if_modified(|s| {
            if s.generation != token {
                debug!(token, latest = s.generation, "discarding stale fetch response");
                return false;
            }
            match s.backup.as_mut() {
                Some(backup) => merge(backup),
                None => merge(&mut s.current),
            }
            s.last_synced = Some(Utc::now());
            true
        })
    }

    /// Record a failed fetch. Returns `false` if the failure is stale.
    pub(crate) fn fail(&self, message: &str) -> bool {
        let token = self.token;
        self.cell.state.send_if_modified(|s| {
            if s.generation != token {
                debug!(token, latest = s.generation, "discarding stale fetch failure");
                return false;
            }
            s.error = Some(message.to_owned());
            true
        })
    }
}

impl<T> Drop for FetchTicket<'_, T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.cell.finish_one();
    }
}

/// An in-flight write. Dropping it clears its share of `loading`.
pub(crate) struct MutationGuard<'a, T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    cell: &'a ResourceCell<T>,
}

impl<T> Drop for MutationGuard<'_, T>
where
    T: Clone + Default + Send + Sync + 'static,
{
    fn drop(&mut self) {
        self.cell.finish_one();
    }
}
