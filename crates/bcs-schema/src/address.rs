//! Hex helpers for 32-byte Sui addresses.
//!
//! On-chain type strings and RPC payloads use both the short form (`0x2`)
//! and the full 64-digit form. Everything in this crate compares the
//! normalized form.

use crate::error::{Result, SchemaError};

pub const ADDRESS_LENGTH: usize = 32;

/// Parse a hex address, left-padding short forms with zeros.
pub fn parse_address(s: &str) -> Result<[u8; ADDRESS_LENGTH]> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty()
        || digits.len() > ADDRESS_LENGTH * 2
        || !digits.chars().all(|c| c.is_ascii_hexdigit())
    {
        return Err(SchemaError::InvalidAddress(s.to_string()));
    }

    let padded = format!("{:0>64}", digits);
    let mut out = [0u8; ADDRESS_LENGTH];
    hex::decode_to_slice(&padded, &mut out)
        .map_err(|_| SchemaError::InvalidAddress(s.to_string()))?;
    Ok(out)
}

/// Format raw address bytes as `0x` followed by 64 lowercase hex digits.
pub fn format_address(bytes: &[u8; ADDRESS_LENGTH]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Normalize any accepted address spelling to the 64-digit form.
pub fn normalize_address(s: &str) -> Result<String> {
    parse_address(s).map(|bytes| format_address(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_address_is_left_padded() {
        let bytes = parse_address("0x2").unwrap();
        assert_eq!(bytes[31], 2);
        assert!(bytes[..31].iter().all(|b| *b == 0));
        assert_eq!(
            normalize_address("0x2").unwrap(),
            "0x0000000000000000000000000000000000000000000000000000000000000002"
        );
    }

    #[test]
    fn test_prefix_is_optional() {
        assert_eq!(parse_address("ab").unwrap(), parse_address("0xAB").unwrap());
    }

    #[test]
    fn test_rejects_bad_addresses() {
        assert!(parse_address("").is_err());
        assert!(parse_address("0x").is_err());
        assert!(parse_address("0xzz").is_err());
        assert!(parse_address(&format!("0x{}", "1".repeat(65))).is_err());
    }
}
