//! Store session lifecycle
//!
//! A session owns one store handle from `init` to `free`. The handle is
//! released when the session is dropped, so every exit path, including a
//! failed transfer, frees it exactly once and only after the transfer call
//! has returned.

use crate::error::{Error, Result};
use crate::target::StoreTarget;
use crate::traits::ObjectStore;
use crate::transfer::{Transfer, TransferRequest};

/// Per-invocation lifecycle stages
///
/// Transitions are linear; a failure in any stage goes straight to `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Start,
    Parsed,
    Resolved,
    SessionOpen,
    OperationDone,
    Closed,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Start => "start",
            Stage::Parsed => "parsed",
            Stage::Resolved => "resolved",
            Stage::SessionOpen => "session-open",
            Stage::OperationDone => "operation-done",
            Stage::Closed => "closed",
        };
        f.write_str(name)
    }
}

/// Result of a completed transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferOutcome {
    pub transfer: Transfer,
    pub bytes: u64,
}

/// An open store handle with guaranteed release
pub struct StoreSession<'a, S: ObjectStore> {
    store: &'a S,
    handle: Option<S::Handle>,
}

impl<'a, S: ObjectStore> StoreSession<'a, S> {
    /// Initialize the store against a target
    ///
    /// Any failure is reported as `Error::StoreInit`; no handle is held.
    pub fn open(store: &'a S, target: &StoreTarget) -> Result<Self> {
        let handle = store.init(target).map_err(|e| match e {
            Error::StoreInit(_) => e,
            other => Error::StoreInit(other.to_string()),
        })?;
        tracing::debug!(stage = %Stage::SessionOpen, %target, "store handle acquired");
        Ok(Self {
            store,
            handle: Some(handle),
        })
    }

    /// Perform exactly one transfer and close the session
    pub fn execute(self, transfer: &Transfer) -> Result<u64> {
        let Some(handle) = self.handle.as_ref() else {
            return Err(Error::StoreInit("store session is closed".into()));
        };

        let result = match transfer {
            Transfer::Download { bucket, key, file } => {
                tracing::debug!(%bucket, %key, file = %file.display(), "dispatching read");
                self.store.read_object_to_file(handle, bucket, key, file)
            }
            Transfer::Upload { bucket, key, file } => {
                tracing::debug!(%bucket, %key, file = %file.display(), "dispatching write");
                self.store.write_object_from_file(handle, bucket, key, file)
            }
        };
        tracing::debug!(stage = %Stage::OperationDone, ok = result.is_ok());

        result.map_err(|e| match e {
            Error::Transfer(_) => e,
            other => Error::Transfer(other.to_string()),
        })
    }

    /// Release the handle now
    pub fn close(self) {}
}

impl<S: ObjectStore> Drop for StoreSession<'_, S> {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.store.free(handle);
            tracing::debug!(stage = %Stage::Closed, "store handle released");
        }
    }
}

/// Run one validated request against a store: init, transfer, free
pub fn copy<S: ObjectStore>(
    store: &S,
    target: &StoreTarget,
    request: &TransferRequest,
) -> Result<TransferOutcome> {
    let transfer = request.transfer();
    tracing::debug!(stage = %Stage::Resolved, download = transfer.is_download());

    let session = StoreSession::open(store, target)?;
    match session.execute(&transfer) {
        Ok(bytes) => Ok(TransferOutcome { transfer, bytes }),
        Err(e) => {
            tracing::warn!(error = %e, "transfer failed");
            Err(e)
        }
    }
}
