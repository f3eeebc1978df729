//! Account identifiers for the ledger
//!
//! Addresses are opaque 20-byte values, rendered as 0x-prefixed hex.
//! The all-zero address is reserved and never holds value.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors from parsing an address string
#[derive(Error, Debug, PartialEq)]
pub enum AddressError {
    #[error("Invalid address length: expected 40 hex characters, got {0}")]
    InvalidLength(usize),
    #[error("Invalid hex in address: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// A 20-byte account identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address([u8; 20]);

impl Address {
    /// The reserved null address (all zero bytes)
    pub const NULL: Address = Address([0u8; 20]);

    /// Construct from raw bytes
    pub fn from_bytes(bytes: [u8; 20]) -> Self {
        Address(bytes)
    }

    /// Raw byte view
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// True for the reserved all-zero address
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        if hex_part.len() != 40 {
            return Err(AddressError::InvalidLength(hex_part.len()));
        }

        let bytes = hex::decode(hex_part)?;
        let mut addr = [0u8; 20];
        addr.copy_from_slice(&bytes);
        Ok(Address(addr))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Address> for String {
    fn from(addr: Address) -> String {
        addr.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let s = "0x00112233445566778899aabbccddeeff00112233";
        let addr: Address = s.parse().unwrap();
        assert_eq!(addr.to_string(), s);

        // Prefix is optional on input
        let bare: Address = s[2..].parse().unwrap();
        assert_eq!(bare, addr);
    }

    #[test]
    fn test_null_address() {
        assert!(Address::NULL.is_null());
        assert_eq!(
            Address::NULL.to_string(),
            "0x0000000000000000000000000000000000000000"
        );

        let parsed: Address = "0x0000000000000000000000000000000000000000"
            .parse()
            .unwrap();
        assert!(parsed.is_null());

        let nonzero = Address::from_bytes([1u8; 20]);
        assert!(!nonzero.is_null());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "0x1234".parse::<Address>(),
            Err(AddressError::InvalidLength(4))
        ));
        assert!(matches!(
            "0xzz112233445566778899aabbccddeeff00112233".parse::<Address>(),
            Err(AddressError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_serde_round_trip() {
        let addr = Address::from_bytes([0xab; 20]);
        let json = serde_json::to_string(&addr).unwrap();
        assert_eq!(json, "\"0xabababababababababababababababababababab\"");

        let back: Address = serde_json::from_str(&json).unwrap();
        assert_eq!(back, addr);
    }
}
