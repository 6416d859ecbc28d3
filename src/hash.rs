use serde::{Deserialize, Serialize};
use sha2::Digest;
use std::convert::TryInto;
use std::fmt::{Display, Formatter};

const SHA256_BYTE_COUNT: usize = 32;

/// Sha-256 is a 256-bit array or 32 bytes.
/// It provides an API to display as hex-encoded string and parse it from a hex-encoded string.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
pub struct Sha256([u8; SHA256_BYTE_COUNT]);

impl Sha256 {
    pub const fn from_raw(raw_bytes: [u8; SHA256_BYTE_COUNT]) -> Self {
        Self(raw_bytes)
    }

    pub fn digest(data: &[u8]) -> Self {
        let mut hasher = sha2::Sha256::new();
        hasher.update(data);
        let mut output = [0; SHA256_BYTE_COUNT];
        output.copy_from_slice(hasher.finalize().as_slice());
        Sha256::from_raw(output)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0[..]
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.as_slice())
    }

    pub fn from_hex(s: &str) -> Result<Self, String> {
        let bytes = hex::decode(s).map_err(|e| e.to_string())?;
        let length = bytes.len();
        let raw: [u8; SHA256_BYTE_COUNT] = bytes.try_into().map_err(|_| {
            format!(
                "Invalid SHA-256 length. Expected: {} but got: {} in: {}",
                SHA256_BYTE_COUNT, length, s
            )
        })?;
        Ok(Sha256::from_raw(raw))
    }
}

impl Display for Sha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use crate::Sha256;

    #[test]
    fn digest_test() {
        let data = b"hello world";
        assert_eq!(
            Sha256::digest(data).to_hex(),
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn from_hex_parses_displayed_value() {
        let hash = Sha256::digest(b"utxo");
        assert_eq!(Sha256::from_hex(&hash.to_string()), Ok(hash));
    }

    #[test]
    fn from_hex_rejects_wrong_length() {
        let result = Sha256::from_hex("abcd");
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Expected: 32 but got: 2"));
    }

    #[test]
    fn from_hex_rejects_non_hex() {
        assert!(Sha256::from_hex("zz").is_err());
    }
}
