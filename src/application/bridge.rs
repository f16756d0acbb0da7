use super::executor::UiExecutor;
use super::pending::PendingSlot;
use crate::domain::card::{CardDetails, CardRequest};
use crate::domain::nonce::{NonceMap, PaymentMethodNonce};
use crate::domain::paypal::{
    CheckoutOptions, CheckoutRequest, PayPalRequest, VaultOptions, VaultRequest,
};
use crate::domain::ports::{
    GatewayConnector, GatewayError, HostHandle, PayPalListener, Session,
};
use crate::error::{BridgeError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::oneshot;

/// The bridge facade: five asynchronous operations over the gateway SDK.
///
/// Owns the session cell and the single pending-completion slot shared with
/// the PayPal listener. Every operation settles exactly once; precondition
/// failures are returned before any gateway call.
pub struct PaymentsBridge {
    connector: Arc<dyn GatewayConnector>,
    host: Arc<dyn HostHandle>,
    executor: UiExecutor,
    session: Mutex<Option<Session>>,
    pending: PendingSlot,
}

impl PaymentsBridge {
    pub fn new(connector: Arc<dyn GatewayConnector>, host: Arc<dyn HostHandle>) -> Self {
        Self {
            connector,
            host,
            executor: UiExecutor::new(),
            session: Mutex::new(None),
            pending: PendingSlot::new(),
        }
    }

    fn session_cell(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Clones a sub-client out of the current session, or fails
    /// `NOT_INITIALIZED` when no session exists.
    fn sub_client<T>(&self, pick: impl FnOnce(&Session) -> T) -> Result<T> {
        self.session_cell()
            .as_ref()
            .map(pick)
            .ok_or(BridgeError::NotInitialized)
    }

    /// Constructs a new gateway session from `token`, replacing any prior
    /// session. Construction runs on the serialized session executor.
    pub async fn initialize(&self, token: &str) -> Result<bool> {
        let connector = Arc::clone(&self.connector);
        let token = token.to_owned();
        let session = self
            .executor
            .run(move || connector.connect(&token))
            .await?
            .map_err(|e| BridgeError::Initialization(e.to_string()))?;

        session.paypal.set_listener(Arc::new(SlotListener {
            pending: self.pending.clone(),
        }));
        *self.session_cell() = Some(session);
        tracing::info!("gateway session initialized");
        Ok(true)
    }

    /// Tokenizes a card and returns the converted wire map.
    ///
    /// The gateway callback is a (nonce, error) pair and all three cases are
    /// distinct: an error wins over any nonce, and the gateway is permitted
    /// to report neither.
    pub async fn tokenize_card(&self, details: CardDetails) -> Result<NonceMap> {
        let card = self.sub_client(|s| Arc::clone(&s.card))?;
        tracing::debug!("tokenizing card");

        let outcome = card.tokenize(CardRequest::from(details)).await;
        match (outcome.error, outcome.nonce) {
            (Some(error), _) => Err(BridgeError::Tokenization(error.to_string())),
            (None, Some(nonce)) => Ok(nonce.to_wire()),
            (None, None) => Err(BridgeError::Tokenization("unknown error occurred".into())),
        }
    }

    /// Runs a one-time PayPal checkout for `amount` and resolves with the
    /// converted account nonce.
    pub async fn request_paypal_checkout(
        &self,
        amount: &str,
        options: Option<CheckoutOptions>,
    ) -> Result<NonceMap> {
        let request = CheckoutRequest::build(amount, options)?;
        self.run_paypal_flow(PayPalRequest::Checkout(request)).await
    }

    /// Runs a store-for-later PayPal flow and resolves with the converted
    /// account nonce.
    pub async fn request_paypal_vault(&self, options: Option<VaultOptions>) -> Result<NonceMap> {
        let request = VaultRequest::build(options);
        self.run_paypal_flow(PayPalRequest::Vault(request)).await
    }

    async fn run_paypal_flow(&self, request: PayPalRequest) -> Result<NonceMap> {
        let paypal = self.sub_client(|s| Arc::clone(&s.paypal))?;
        if !self.host.supports_modal_flow() {
            return Err(BridgeError::Activity(
                "current host context cannot present a modal flow".into(),
            ));
        }

        let (completion, outcome) = oneshot::channel();
        // Park the completion before invoking the gateway: the listener may
        // fire before tokenize_account returns.
        self.pending.begin(completion)?;
        tracing::debug!(?request, "starting paypal flow");

        if let Err(error) = paypal.tokenize_account(request).await {
            // If the listener already drained the slot, its outcome wins and
            // this settle is a no-op.
            self.pending
                .settle(Err(BridgeError::PayPal(error.to_string())));
        }

        outcome
            .await
            .map_err(|_| BridgeError::PayPal("PayPal flow ended without a result".into()))?
    }

    /// Collects the fraud-risk fingerprint string. Resolves with an empty
    /// string when the gateway reports success with no payload.
    pub async fn collect_device_data(&self) -> Result<String> {
        let collector = self.sub_client(|s| Arc::clone(&s.device_data))?;
        match collector.collect().await {
            Ok(data) => Ok(data.unwrap_or_default()),
            Err(error) => Err(BridgeError::DeviceData(error.to_string())),
        }
    }
}

/// Drains the pending slot on terminal listener events.
struct SlotListener {
    pending: PendingSlot,
}

impl PayPalListener for SlotListener {
    fn on_success(&self, nonce: PaymentMethodNonce) {
        self.pending.settle(Ok(nonce.to_wire()));
    }

    fn on_failure(&self, error: GatewayError) {
        let outcome = match error {
            GatewayError::Canceled => BridgeError::UserCancelled,
            other => BridgeError::PayPal(other.to_string()),
        };
        self.pending.settle(Err(outcome));
    }
}
