//! Gateway payment signature verification.
//!
//! The gateway signs `"{order_id}|{payment_id}"` with HMAC-SHA256 keyed by
//! the shared key secret and sends the hex digest back with the checkout
//! callback.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Verifies gateway checkout signatures.
pub struct GatewaySignatureVerifier {
    secret: Secret<String>,
}

impl GatewaySignatureVerifier {
    pub fn new(secret: Secret<String>) -> Self {
        Self { secret }
    }

    /// Returns true iff `signature_hex` is the expected digest for the pair.
    ///
    /// Malformed hex is treated as a mismatch.
    pub fn verify(&self, order_id: &str, payment_id: &str, signature_hex: &str) -> bool {
        let Ok(provided) = hex::decode(signature_hex.trim()) else {
            return false;
        };
        match self.compute_signature(order_id, payment_id) {
            Some(expected) => constant_time_compare(&expected, &provided),
            None => false,
        }
    }

    fn compute_signature(&self, order_id: &str, payment_id: &str) -> Option<Vec<u8>> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes()).ok()?;
        mac.update(order_id.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Some(mac.finalize().into_bytes().to_vec())
    }
}

/// Performs constant-time comparison of two byte slices.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}

/// Computes the gateway signature for use in test fixtures.
#[cfg(test)]
pub fn compute_test_signature(secret: &str, order_id: &str, payment_id: &str) -> String {
    let mut mac = Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key");
    mac.update(format!("{}|{}", order_id, payment_id).as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
