use thiserror::Error;

pub type Result<T> = std::result::Result<T, BridgeError>;

/// Caller-visible failure taxonomy. Every variant maps to a stable string
/// code via [`BridgeError::code`]; the display form carries the message
/// propagated from the gateway where one exists.
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("initialization failed: {0}")]
    Initialization(String),
    #[error("gateway client not initialized")]
    NotInitialized,
    #[error("host cannot present the PayPal flow: {0}")]
    Activity(String),
    #[error("card tokenization failed: {0}")]
    Tokenization(String),
    #[error("PayPal flow failed: {0}")]
    PayPal(String),
    #[error("user cancelled the PayPal flow")]
    UserCancelled,
    #[error("device data collection failed: {0}")]
    DeviceData(String),
}

impl BridgeError {
    /// Stable code for the application layer. These strings are the wire
    /// contract; the display messages are not.
    pub fn code(&self) -> &'static str {
        match self {
            BridgeError::Initialization(_) => "INITIALIZATION_ERROR",
            BridgeError::NotInitialized => "NOT_INITIALIZED",
            BridgeError::Activity(_) => "ACTIVITY_ERROR",
            BridgeError::Tokenization(_) => "TOKENIZATION_ERROR",
            BridgeError::PayPal(_) => "PAYPAL_ERROR",
            BridgeError::UserCancelled => "USER_CANCELLED",
            BridgeError::DeviceData(_) => "DEVICE_DATA_ERROR",
        }
    }
}
