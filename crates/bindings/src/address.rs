use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use bcs_schema::{SchemaError, format_address, parse_address};

/// A Move `address`. BCS form is 32 raw bytes, JSON form is `0x` + 64 hex
/// digits.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address([u8; 32]);

impl Address {
    pub const ZERO: Address = Address([0u8; 32]);

    pub const fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn into_inner(self) -> [u8; 32] {
        self.0
    }
}

impl FromStr for Address {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_address(s).map(Self)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_address(&self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl From<sui_sdk_types::Address> for Address {
    fn from(value: sui_sdk_types::Address) -> Self {
        Self(value.into_inner())
    }
}

impl From<Address> for sui_sdk_types::Address {
    fn from(value: Address) -> Self {
        sui_sdk_types::Address::new(value.0)
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_string())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(de::Error::custom)
        } else {
            <[u8; 32]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bcs_is_raw_bytes() {
        let address: Address = "0x2".parse().unwrap();
        let bytes = bcs::to_bytes(&address).unwrap();
        assert_eq!(bytes.len(), 32);
        assert_eq!(bytes[31], 2);
        assert_eq!(bcs::from_bytes::<Address>(&bytes).unwrap(), address);
    }

    #[test]
    fn test_json_is_hex() {
        let address: Address = "0xab".parse().unwrap();
        let json = serde_json::to_value(address).unwrap();
        assert_eq!(
            json,
            "0x00000000000000000000000000000000000000000000000000000000000000ab"
        );
        assert_eq!(serde_json::from_value::<Address>(json).unwrap(), address);
    }

    #[test]
    fn test_sdk_conversion() {
        let address: Address = "0x5".parse().unwrap();
        let sdk: sui_sdk_types::Address = address.into();
        assert_eq!(Address::from(sdk), address);
    }
}
