// ── Remote resource stores ──
//
// One store per gateway resource. Each owns a `ResourceCell` and shares
// the `Notifier`; failures never escape a store method. They set the
// cell's error flag and raise a notification instead.

mod config_store;
mod module_store;
mod server_store;
mod wifi_dialog;
mod wifi_store;

use std::future::Future;

use tracing::warn;

pub use config_store::ConfigStore;
pub use module_store::ModuleStore;
pub use server_store::ServerStore;
pub use wifi_dialog::WifiDialogStore;
pub use wifi_store::WifiStore;

use crate::error::CoreError;
use crate::notify::Notifier;
use crate::resource::ResourceCell;

/// Result of a store fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was installed.
    Applied,
    /// The request succeeded but a newer fetch was issued meanwhile.
    Superseded,
    Failed,
}

impl FetchOutcome {
    pub fn is_ok(self) -> bool {
        !matches!(self, Self::Failed)
    }
}

/// Message shown when an action has no behaviour yet.
pub const NOT_IMPLEMENTED: &str = "Funcionalidade ainda não implementada.";

/// Run a read request against `cell`.
///
/// Issues a fresh generation token, converts the payload, and installs it
/// unless a newer fetch superseded this one. On failure the cell's error is
/// set to `failure` and an error notification carries the technical detail.
pub(crate) async fn fetch_into<T, R, Fut, F>(
    cell: &ResourceCell<T>,
    notifier: &Notifier,
    failure: &str,
    request: Fut,
    convert: F,
) -> FetchOutcome
where
    T: Clone + Default + Send + Sync + 'static,
    Fut: Future<Output = Result<R, hidra_api::Error>>,
    F: FnOnce(R) -> Result<T, CoreError>,
{
    fetch_merge_into(cell, notifier, failure, request, convert, |slot, value| {
        *slot = value;
    })
    .await
}

/// [`fetch_into`] for payloads that refresh only part of the state.
///
/// `merge` runs against the state as it is when the response lands, not as
/// it was when the request went out.
pub(crate) async fn fetch_merge_into<T, R, V, Fut, F, M>(
    cell: &ResourceCell<T>,
    notifier: &Notifier,
    failure: &str,
    request: Fut,
    convert: F,
    merge: M,
) -> FetchOutcome
where
    T: Clone + Default + Send + Sync + 'static,
    Fut: Future<Output = Result<R, hidra_api::Error>>,
    F: FnOnce(R) -> Result<V, CoreError>,
    M: FnOnce(&mut T, V),
{
    let ticket = cell.begin_fetch();

    let result = request
        .await
        .map_err(CoreError::from)
        .and_then(convert);

    match result {
        Ok(value) => {
            if ticket.complete_with(|slot| merge(slot, value)) {
                FetchOutcome::Applied
            } else {
                FetchOutcome::Superseded
            }
        }
        Err(e) => {
            if ticket.fail(failure) {
                notifier.error(failure, &e.to_string());
            } else {
                warn!(error = %e, "superseded fetch failed");
            }
            FetchOutcome::Failed
        }
    }
}
