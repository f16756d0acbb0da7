//! Domain layer: boundary types and the gateway port traits.

pub mod card;
pub mod nonce;
pub mod paypal;
pub mod ports;
