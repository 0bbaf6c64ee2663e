//! Payment ledger entries and gateway signature verification.

mod payment;
mod signature;

pub use payment::{GatewayReference, NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use signature::GatewaySignatureVerifier;

#[cfg(test)]
pub use signature::compute_test_signature;
