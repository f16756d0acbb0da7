use crate::domain::card::CardRequest;
use crate::domain::nonce::{CardNonce, NonceDetails, PayPalNonce, PaymentMethodNonce};
use crate::domain::paypal::PayPalRequest;
use crate::domain::ports::{
    CardGateway, CardTokenizeOutcome, DeviceDataGateway, GatewayConnector, GatewayError,
    HostHandle, PayPalGateway, PayPalListener, Session,
};
use async_trait::async_trait;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, ThreadId};

/// Scripted outcome for sandbox card tokenization.
#[derive(Clone, Debug, Default)]
pub enum CardBehavior {
    /// Tokenize any well-formed number deterministically.
    #[default]
    Approve,
    /// Report an error through the callback.
    Decline(String),
    /// Report neither a nonce nor an error, the degenerate callback case.
    Empty,
}

/// Scripted outcome for the sandbox PayPal flow.
#[derive(Clone, Debug, Default)]
pub enum PayPalBehavior {
    /// Fire the listener with an approved account nonce before
    /// `tokenize_account` returns.
    #[default]
    Approve,
    /// Fire the listener with a cancellation-flavored error.
    Cancel,
    /// Fire the listener with a generic failure.
    Fail(String),
    /// Fail the invocation synchronously; the listener never fires.
    RefuseInvoke(String),
    /// Accept the invocation and never fire the listener. Tests drive the
    /// terminal event manually with [`SandboxPayPalGateway::fire_success`].
    Hang,
}

/// Scripted outcome for sandbox device-data collection.
#[derive(Clone, Debug, Default)]
pub enum DeviceDataBehavior {
    #[default]
    Fingerprint,
    /// Success with no payload.
    Empty,
    Fail(String),
}

fn digest(input: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    input.hash(&mut hasher);
    hasher.finish()
}

pub struct SandboxCardGateway {
    behavior: CardBehavior,
    calls: AtomicUsize,
}

impl SandboxCardGateway {
    fn new(behavior: CardBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn brand(number: &str) -> &'static str {
        match number.chars().next() {
            Some('3') => "American Express",
            Some('4') => "Visa",
            Some('5') => "Mastercard",
            _ => "Unknown",
        }
    }

    fn approve(request: &CardRequest) -> CardTokenizeOutcome {
        let number = request.number.trim();
        if number.len() < 12 || number.len() > 19 || !number.chars().all(|c| c.is_ascii_digit()) {
            return CardTokenizeOutcome {
                nonce: None,
                error: Some(GatewayError::Other("credit card number is invalid".into())),
            };
        }

        let nonce = PaymentMethodNonce {
            nonce: format!("tokencc_sandbox_{:012x}", digest(number)),
            is_default: false,
            details: NonceDetails::Card(CardNonce {
                card_type: Self::brand(number).to_string(),
                last_two: number[number.len() - 2..].to_string(),
                last_four: number[number.len() - 4..].to_string(),
                bin: Some(number[..6].to_string()),
                expiration_month: Some(request.expiration_month.clone()),
                expiration_year: Some(request.expiration_year.clone()),
            }),
        };
        CardTokenizeOutcome {
            nonce: Some(nonce),
            error: None,
        }
    }
}

#[async_trait]
impl CardGateway for SandboxCardGateway {
    async fn tokenize(&self, request: CardRequest) -> CardTokenizeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            CardBehavior::Approve => Self::approve(&request),
            CardBehavior::Decline(message) => CardTokenizeOutcome {
                nonce: None,
                error: Some(GatewayError::Other(message.clone())),
            },
            CardBehavior::Empty => CardTokenizeOutcome::default(),
        }
    }
}

pub struct SandboxPayPalGateway {
    behavior: PayPalBehavior,
    listener: Mutex<Option<Arc<dyn PayPalListener>>>,
    invocations: AtomicUsize,
    last_request: Mutex<Option<PayPalRequest>>,
}

impl SandboxPayPalGateway {
    fn new(behavior: PayPalBehavior) -> Self {
        Self {
            behavior,
            listener: Mutex::new(None),
            invocations: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn invocation_count(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// The most recent request handed to `tokenize_account`.
    pub fn last_request(&self) -> Option<PayPalRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn listener(&self) -> Option<Arc<dyn PayPalListener>> {
        self.listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Delivers a success event to the registered listener, as the vendor
    /// UI flow would after user approval.
    pub fn fire_success(&self, nonce: PaymentMethodNonce) {
        if let Some(listener) = self.listener() {
            listener.on_success(nonce);
        }
    }

    /// Delivers a failure event to the registered listener.
    pub fn fire_failure(&self, error: GatewayError) {
        if let Some(listener) = self.listener() {
            listener.on_failure(error);
        }
    }

    /// Deterministic approved account nonce for a request.
    pub fn approved_nonce(request: &PayPalRequest) -> PaymentMethodNonce {
        let seed = match request {
            PayPalRequest::Checkout(checkout) => format!("checkout:{}", checkout.amount.value()),
            PayPalRequest::Vault(_) => "vault".to_string(),
        };
        PaymentMethodNonce {
            nonce: format!("tokenpp_sandbox_{:012x}", digest(&seed)),
            is_default: false,
            details: NonceDetails::PayPal(PayPalNonce {
                email: Some("sandbox-buyer@example.com".into()),
                first_name: Some("Sandbox".into()),
                last_name: Some("Buyer".into()),
            }),
        }
    }
}

#[async_trait]
impl PayPalGateway for SandboxPayPalGateway {
    fn set_listener(&self, listener: Arc<dyn PayPalListener>) {
        *self
            .listener
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(listener);
    }

    async fn tokenize_account(&self, request: PayPalRequest) -> Result<(), GatewayError> {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(request.clone());

        match &self.behavior {
            PayPalBehavior::Approve => {
                // Listener fires before the invocation returns, the worst
                // case the store-then-invoke ordering must survive.
                self.fire_success(Self::approved_nonce(&request));
                Ok(())
            }
            PayPalBehavior::Cancel => {
                self.fire_failure(GatewayError::Canceled);
                Ok(())
            }
            PayPalBehavior::Fail(message) => {
                self.fire_failure(GatewayError::Other(message.clone()));
                Ok(())
            }
            PayPalBehavior::RefuseInvoke(message) => Err(GatewayError::Other(message.clone())),
            PayPalBehavior::Hang => Ok(()),
        }
    }
}

pub struct SandboxDeviceDataGateway {
    behavior: DeviceDataBehavior,
    seed: String,
}

#[async_trait]
impl DeviceDataGateway for SandboxDeviceDataGateway {
    async fn collect(&self) -> Result<Option<String>, GatewayError> {
        match &self.behavior {
            DeviceDataBehavior::Fingerprint => Ok(Some(format!(
                r#"{{"correlation_id":"{:016x}"}}"#,
                digest(&self.seed)
            ))),
            DeviceDataBehavior::Empty => Ok(None),
            DeviceDataBehavior::Fail(message) => Err(GatewayError::Other(message.clone())),
        }
    }
}

/// Host probe for the sandbox. Defaults to a host that can present the
/// modal PayPal flow.
pub struct SandboxHost {
    modal: bool,
}

impl SandboxHost {
    /// A host that cannot present modal flows.
    pub fn headless() -> Self {
        Self { modal: false }
    }
}

impl Default for SandboxHost {
    fn default() -> Self {
        Self { modal: true }
    }
}

impl HostHandle for SandboxHost {
    fn supports_modal_flow(&self) -> bool {
        self.modal
    }
}

/// Concrete handles of the most recently connected sandbox session, for
/// test inspection.
#[derive(Clone)]
pub struct SandboxHandles {
    pub card: Arc<SandboxCardGateway>,
    pub paypal: Arc<SandboxPayPalGateway>,
    pub device_data: Arc<SandboxDeviceDataGateway>,
}

/// In-process gateway connector: builds sandbox sub-clients with scripted
/// behavior. Fills the role the real SDK's client factory plays, without
/// leaving the process.
#[derive(Default)]
pub struct SandboxConnector {
    card_behavior: CardBehavior,
    paypal_behavior: PayPalBehavior,
    device_behavior: DeviceDataBehavior,
    refusal: Option<String>,
    connects: AtomicUsize,
    connect_threads: Mutex<Vec<ThreadId>>,
    handles: Mutex<Option<SandboxHandles>>,
}

impl SandboxConnector {
    pub fn new() -> Self {
        Self::default()
    }

    /// A connector whose `connect` always fails with `message`.
    pub fn refusing(message: impl Into<String>) -> Self {
        Self {
            refusal: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn with_card(mut self, behavior: CardBehavior) -> Self {
        self.card_behavior = behavior;
        self
    }

    pub fn with_paypal(mut self, behavior: PayPalBehavior) -> Self {
        self.paypal_behavior = behavior;
        self
    }

    pub fn with_device_data(mut self, behavior: DeviceDataBehavior) -> Self {
        self.device_behavior = behavior;
        self
    }

    pub fn connect_count(&self) -> usize {
        self.connects.load(Ordering::SeqCst)
    }

    /// Thread ids `connect` ran on, one per call.
    pub fn connect_threads(&self) -> Vec<ThreadId> {
        self.connect_threads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Handles of the most recent session, if any.
    pub fn handles(&self) -> Option<SandboxHandles> {
        self.handles
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl GatewayConnector for SandboxConnector {
    fn connect(&self, authorization: &str) -> Result<Session, GatewayError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        self.connect_threads
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(thread::current().id());

        if let Some(message) = &self.refusal {
            return Err(GatewayError::Other(message.clone()));
        }
        if authorization.trim().is_empty() {
            return Err(GatewayError::Other("authorization token is empty".into()));
        }

        let handles = SandboxHandles {
            card: Arc::new(SandboxCardGateway::new(self.card_behavior.clone())),
            paypal: Arc::new(SandboxPayPalGateway::new(self.paypal_behavior.clone())),
            device_data: Arc::new(SandboxDeviceDataGateway {
                behavior: self.device_behavior.clone(),
                seed: authorization.to_string(),
            }),
        };
        *self.handles.lock().unwrap_or_else(PoisonError::into_inner) = Some(handles.clone());

        Ok(Session {
            card: handles.card,
            paypal: handles.paypal,
            device_data: handles.device_data,
        })
    }
}
