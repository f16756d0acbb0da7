//! Infrastructure layer: in-process implementations of the gateway ports.

pub mod sandbox;
