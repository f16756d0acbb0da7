use serde_json::{Map, Value};

/// The uniform wire shape handed back to the application layer.
pub type NonceMap = Map<String, Value>;

/// A tokenized payment method as reported by the gateway.
///
/// The nonce string is one-time-use and opaque; everything else is display
/// metadata. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentMethodNonce {
    pub nonce: String,
    pub is_default: bool,
    pub details: NonceDetails,
}

/// Variant payload of a [`PaymentMethodNonce`].
///
/// `Other` is the forward-compatible fallback for gateway payment methods
/// this crate does not model; only the runtime type name survives conversion.
#[derive(Debug, Clone, PartialEq)]
pub enum NonceDetails {
    Card(CardNonce),
    PayPal(PayPalNonce),
    Other { type_name: String },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CardNonce {
    pub card_type: String,
    pub last_two: String,
    pub last_four: String,
    pub bin: Option<String>,
    pub expiration_month: Option<String>,
    pub expiration_year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PayPalNonce {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl PaymentMethodNonce {
    /// Converts the nonce into the uniform wire map.
    ///
    /// Total over all variants. Optional fields are present only when the
    /// source value exists; absence is key omission, never JSON null.
    pub fn to_wire(&self) -> NonceMap {
        let mut map = NonceMap::new();
        map.insert("nonce".into(), Value::String(self.nonce.clone()));
        map.insert("isDefault".into(), Value::Bool(self.is_default));

        match &self.details {
            NonceDetails::Card(card) => {
                map.insert("type".into(), Value::String("Card".into()));
                map.insert("cardType".into(), Value::String(card.card_type.clone()));
                map.insert("lastTwo".into(), Value::String(card.last_two.clone()));
                map.insert("lastFour".into(), Value::String(card.last_four.clone()));
                put_opt(&mut map, "bin", &card.bin);
                put_opt(&mut map, "expirationMonth", &card.expiration_month);
                put_opt(&mut map, "expirationYear", &card.expiration_year);
            }
            NonceDetails::PayPal(paypal) => {
                map.insert("type".into(), Value::String("PayPal".into()));
                put_opt(&mut map, "email", &paypal.email);
                put_opt(&mut map, "firstName", &paypal.first_name);
                put_opt(&mut map, "lastName", &paypal.last_name);
            }
            NonceDetails::Other { type_name } => {
                map.insert("type".into(), Value::String(type_name.clone()));
            }
        }

        map
    }
}

fn put_opt(map: &mut NonceMap, key: &str, value: &Option<String>) {
    if let Some(value) = value {
        map.insert(key.into(), Value::String(value.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card_nonce() -> PaymentMethodNonce {
        PaymentMethodNonce {
            nonce: "abc".into(),
            is_default: false,
            details: NonceDetails::Card(CardNonce {
                card_type: "Visa".into(),
                last_two: "11".into(),
                last_four: "1111".into(),
                bin: None,
                expiration_month: None,
                expiration_year: None,
            }),
        }
    }

    #[test]
    fn test_card_wire_shape_without_optionals() {
        let map = card_nonce().to_wire();

        assert_eq!(map.len(), 6);
        assert_eq!(map["nonce"], "abc");
        assert_eq!(map["isDefault"], false);
        assert_eq!(map["type"], "Card");
        assert_eq!(map["cardType"], "Visa");
        assert_eq!(map["lastTwo"], "11");
        assert_eq!(map["lastFour"], "1111");
        // Absent optionals are omitted, not null
        assert!(!map.contains_key("bin"));
        assert!(!map.contains_key("expirationMonth"));
        assert!(!map.contains_key("expirationYear"));
    }

    #[test]
    fn test_card_wire_shape_with_optionals() {
        let mut nonce = card_nonce();
        if let NonceDetails::Card(card) = &mut nonce.details {
            card.bin = Some("411111".into());
            card.expiration_month = Some("12".into());
            card.expiration_year = Some("2030".into());
        }

        let map = nonce.to_wire();
        assert_eq!(map["bin"], "411111");
        assert_eq!(map["expirationMonth"], "12");
        assert_eq!(map["expirationYear"], "2030");
    }

    #[test]
    fn test_paypal_wire_shape() {
        let nonce = PaymentMethodNonce {
            nonce: "pp-nonce".into(),
            is_default: true,
            details: NonceDetails::PayPal(PayPalNonce {
                email: Some("buyer@example.com".into()),
                first_name: None,
                last_name: Some("Doe".into()),
            }),
        };

        let map = nonce.to_wire();
        assert_eq!(map["type"], "PayPal");
        assert_eq!(map["isDefault"], true);
        assert_eq!(map["email"], "buyer@example.com");
        assert_eq!(map["lastName"], "Doe");
        assert!(!map.contains_key("firstName"));
    }

    #[test]
    fn test_other_variant_carries_type_name_only() {
        let nonce = PaymentMethodNonce {
            nonce: "venmo-nonce".into(),
            is_default: false,
            details: NonceDetails::Other {
                type_name: "VenmoAccountNonce".into(),
            },
        };

        let map = nonce.to_wire();
        assert_eq!(map.len(), 3);
        assert_eq!(map["type"], "VenmoAccountNonce");
    }
}
