use crate::domain::nonce::NonceMap;
use crate::error::BridgeError;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// The completion handle parked while a PayPal flow is in flight.
pub type Completion = oneshot::Sender<Result<NonceMap, BridgeError>>;

/// Single-slot holder for the in-flight PayPal completion.
///
/// The gateway reports PayPal outcomes through an out-of-band listener, so
/// the caller's oneshot sender is parked here between invocation and the
/// terminal listener event. At most one flow may be in flight: `begin`
/// refuses a second request instead of overwriting the first caller's
/// completion. The slot must be written before the gateway is invoked; the
/// listener can fire before the invocation returns.
#[derive(Clone, Default)]
pub struct PendingSlot {
    inner: Arc<Mutex<Option<Completion>>>,
}

impl PendingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<Completion>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Parks `completion`. Fails without touching the stored completion when
    /// a flow is already in flight.
    pub fn begin(&self, completion: Completion) -> Result<(), BridgeError> {
        let mut slot = self.lock();
        if slot.is_some() {
            return Err(BridgeError::PayPal(
                "a PayPal flow is already in progress".into(),
            ));
        }
        *slot = Some(completion);
        tracing::debug!("paypal slot: idle -> pending");
        Ok(())
    }

    /// Removes and returns the parked completion. Drain-once: a concurrent
    /// caller gets `None` and must not settle anything.
    pub fn drain(&self) -> Option<Completion> {
        let drained = self.lock().take();
        if drained.is_some() {
            tracing::debug!("paypal slot: pending -> idle");
        }
        drained
    }

    pub fn is_pending(&self) -> bool {
        self.lock().is_some()
    }

    /// Settles the parked completion with `outcome`, if one is still parked.
    /// A no-op when the slot is idle, so a late error path cannot settle a
    /// completion twice.
    pub fn settle(&self, outcome: Result<NonceMap, BridgeError>) {
        if let Some(completion) = self.drain()
            && completion.send(outcome).is_err()
        {
            tracing::debug!("paypal completion receiver dropped before settlement");
        }
    }
}
