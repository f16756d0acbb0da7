use serde::Deserialize;

/// Card fields as supplied by the application layer.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv: String,
    #[serde(default)]
    pub cardholder_name: Option<String>,
    #[serde(default)]
    pub postal_code: Option<String>,
}

/// The gateway-side tokenization request shape.
///
/// Optional fields that were not supplied stay unset; the bridge never
/// substitutes defaults for them.
#[derive(Debug, Clone, PartialEq)]
pub struct CardRequest {
    pub number: String,
    pub expiration_month: String,
    pub expiration_year: String,
    pub cvv: String,
    pub cardholder_name: Option<String>,
    pub postal_code: Option<String>,
}

impl From<CardDetails> for CardRequest {
    fn from(details: CardDetails) -> Self {
        Self {
            number: details.number,
            expiration_month: details.expiration_month,
            expiration_year: details.expiration_year,
            cvv: details.cvv,
            cardholder_name: details.cardholder_name,
            postal_code: details.postal_code,
        }
    }
}
