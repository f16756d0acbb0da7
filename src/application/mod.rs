//! Application layer: the bridge facade and its two mechanisms.
//!
//! `PaymentsBridge` is the entry point for the application layer. The PayPal
//! flows route their completion through `PendingSlot`, a single-slot
//! callback-to-oneshot adapter, and session construction is serialized onto
//! `UiExecutor`.

pub mod bridge;
pub mod executor;
pub mod pending;
