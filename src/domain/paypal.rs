use crate::error::BridgeError;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A positive charge amount.
///
/// Wraps `rust_decimal::Decimal` so a checkout request can never carry a
/// zero, negative, or unparseable amount past the bridge boundary.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(Decimal);

impl Amount {
    pub fn parse(raw: &str) -> Result<Self, BridgeError> {
        let value: Decimal = raw
            .trim()
            .parse()
            .map_err(|_| BridgeError::PayPal(format!("invalid amount: {raw:?}")))?;
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(BridgeError::PayPal(format!(
                "amount must be positive: {raw:?}"
            )))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Checkout options as supplied by the application layer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutOptions {
    #[serde(default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Vault options as supplied by the application layer.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultOptions {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CheckoutIntent {
    /// Immediate capture.
    Sale,
    /// Authorize now, capture later.
    Authorize,
}

/// A fully-built one-time checkout request for the gateway.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutRequest {
    pub amount: Amount,
    pub currency_code: String,
    pub intent: CheckoutIntent,
    pub display_name: Option<String>,
}

impl CheckoutRequest {
    /// Builds the gateway request from the caller's amount and options.
    ///
    /// Currency defaults to `"USD"`. Only the literal intent `"sale"` maps to
    /// [`CheckoutIntent::Sale`]; anything else, including absence, is
    /// authorize-only.
    pub fn build(amount: &str, options: Option<CheckoutOptions>) -> Result<Self, BridgeError> {
        let amount = Amount::parse(amount)?;
        let options = options.unwrap_or_default();
        let intent = match options.intent.as_deref() {
            Some("sale") => CheckoutIntent::Sale,
            _ => CheckoutIntent::Authorize,
        };
        Ok(Self {
            amount,
            currency_code: options.currency_code.unwrap_or_else(|| "USD".to_string()),
            intent,
            display_name: options.display_name,
        })
    }
}

/// A store-for-later request: no amount, optional display name.
#[derive(Debug, Clone, PartialEq)]
pub struct VaultRequest {
    pub display_name: Option<String>,
}

impl VaultRequest {
    pub fn build(options: Option<VaultOptions>) -> Self {
        Self {
            display_name: options.unwrap_or_default().display_name,
        }
    }
}

/// The two PayPal flows the gateway can run.
#[derive(Debug, Clone, PartialEq)]
pub enum PayPalRequest {
    Checkout(CheckoutRequest),
    Vault(VaultRequest),
}
