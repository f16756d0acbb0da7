use super::card::CardRequest;
use super::nonce::PaymentMethodNonce;
use super::paypal::PayPalRequest;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Error shape reported by the gateway SDK.
///
/// Cancellation is a distinct flavor because the PayPal listener surfaces a
/// user-dismissed flow as an error, and the bridge must map it to its own
/// cancellation code rather than a generic failure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("user canceled the flow")]
    Canceled,
    #[error("{0}")]
    Other(String),
}

/// Result of a card tokenization callback.
///
/// The gateway contract permits nonce and error to both be absent; the bridge
/// preserves that degenerate case as its own failure branch.
#[derive(Debug, Clone, Default)]
pub struct CardTokenizeOutcome {
    pub nonce: Option<PaymentMethodNonce>,
    pub error: Option<GatewayError>,
}

#[async_trait]
pub trait CardGateway: Send + Sync {
    async fn tokenize(&self, request: CardRequest) -> CardTokenizeOutcome;
}

/// Receives the terminal outcome of a PayPal flow, possibly on another
/// thread, possibly before `tokenize_account` has returned.
pub trait PayPalListener: Send + Sync {
    fn on_success(&self, nonce: PaymentMethodNonce);
    fn on_failure(&self, error: GatewayError);
}

#[async_trait]
pub trait PayPalGateway: Send + Sync {
    fn set_listener(&self, listener: Arc<dyn PayPalListener>);

    /// Hands the request to the gateway's UI flow. The terminal outcome
    /// arrives through the registered listener; an `Err` here is a
    /// synchronous invocation failure, after which the listener will not
    /// fire for this request.
    async fn tokenize_account(&self, request: PayPalRequest) -> Result<(), GatewayError>;
}

#[async_trait]
pub trait DeviceDataGateway: Send + Sync {
    /// Collects the fraud-risk fingerprint. `Ok(None)` means the gateway
    /// reported success with no payload.
    async fn collect(&self) -> Result<Option<String>, GatewayError>;
}

/// Capability probe for the host UI context. The PayPal flows are modal and
/// refuse to start when the host cannot present them.
pub trait HostHandle: Send + Sync {
    fn supports_modal_flow(&self) -> bool;
}

/// One initialized connection to the gateway: the sub-clients derived from a
/// single authorization token. Replaced wholesale on re-initialize.
#[derive(Clone)]
pub struct Session {
    pub card: Arc<dyn CardGateway>,
    pub paypal: Arc<dyn PayPalGateway>,
    pub device_data: Arc<dyn DeviceDataGateway>,
}

/// Constructs gateway sessions. `connect` must run on the serialized session
/// executor; the gateway SDK requires client construction on one designated
/// thread.
pub trait GatewayConnector: Send + Sync + 'static {
    fn connect(&self, authorization: &str) -> Result<Session, GatewayError>;
}
