use crate::PublicKey;
use ed25519_dalek::{Signature, Verifier, VerifyingKey};

/// Checks that `signature` was produced over `message` by the owner of `public_key`.
/// Any malformed key or signature is reported as a failed verification.
pub trait SignatureVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool;
}

/// Verifies Ed25519 signatures.
#[derive(Debug, Default, Copy, Clone)]
pub struct Ed25519Verifier;

impl SignatureVerifier for Ed25519Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        let verifying_key = match VerifyingKey::from_bytes(public_key.as_bytes()) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let signature = match Signature::from_slice(signature) {
            Ok(signature) => signature,
            Err(_) => return false,
        };
        verifying_key.verify(message, &signature).is_ok()
    }
}
