use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub const PUBLIC_KEY_BYTE_COUNT: usize = 32;

/// The Ed25519 public key that an output is locked to.
/// Only the owner of the corresponding secret key can produce a signature that spends it.
#[derive(Debug, Copy, Clone, Hash, Serialize, Deserialize, Eq, PartialEq, Ord, PartialOrd)]
pub struct PublicKey([u8; PUBLIC_KEY_BYTE_COUNT]);

impl PublicKey {
    pub const fn new(public_key: [u8; PUBLIC_KEY_BYTE_COUNT]) -> Self {
        Self(public_key)
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_BYTE_COUNT] {
        &self.0
    }
}

impl Display for PublicKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}
